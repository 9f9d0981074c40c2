//! The episode adapter.
//!
//! [`Environment`] owns at most one engine at a time and drives it
//! through the `reset` / `step` lifecycle:
//!
//! ```text
//! ABSENT ──reset──▶ FIRST ──step──▶ MID ──step──▶ ... ──step──▶ LAST
//!    ▲                                                            │
//!    └────────────── next step drops the episode ◀────────────────┘
//! ```
//!
//! ABSENT is represented by the absence of an episode: the engine and
//! every value cached from it live together in one struct and are
//! dropped together.
//!
//! # Construction probe
//!
//! [`Environment::new`] starts one real episode to learn the
//! observation keys, shapes, and dtypes, then discards it. The first
//! `reset` or `step` a caller makes therefore still reports FIRST.

use std::fmt;

use tracing::{debug, trace, warn};

use tessera_core::{
    Action, ArraySpec, Engine, EngineAction, EngineStep, GameFactory, ObservationOf,
    ObservationSpec, Observations, Reward, Scalar, StepType, TimeStep,
};
use tessera_obs::{Distill, Distilled};

use crate::action_spec::{build_action_spec, ActionSpec};
use crate::config::EnvConfig;
use crate::error::EnvError;

// ── Episode ─────────────────────────────────────────────────────

/// Values cached from the most recent engine tick.
struct Tick {
    observations: Distilled,
    reward: Reward,
    discount: f64,
}

/// One live engine plus its lifecycle state.
struct Episode<E> {
    engine: E,
    state: StepType,
    last: Tick,
}

/// Distill the observation and substitute the default for an absent reward.
fn digest<O>(step: EngineStep<O>, distiller: &dyn Distill<O>, default_reward: &Reward) -> Tick {
    Tick {
        observations: distiller.distill(&step.observation),
        reward: step.reward.unwrap_or_else(|| default_reward.clone()),
        discount: step.discount,
    }
}

/// The engine's own flag, or the tick counter reaching the cap.
fn game_over<E: Engine>(engine: &E, max_iterations: Option<u64>) -> bool {
    engine.terminated() || max_iterations.is_some_and(|max| engine.elapsed_ticks() >= max)
}

// ── Environment ─────────────────────────────────────────────────

/// RL environment adapter around a turn-based game engine.
///
/// Not safe for concurrent use: all operations take `&mut self` and run
/// to completion on the calling thread.
///
/// # Example
///
/// ```ignore
/// let mut env = Environment::new(factory, distiller, EnvConfig::default().with_discrete((0, 3)))?;
/// let mut ts = env.reset(None)?;
/// while !ts.last() {
///     ts = env.step(policy(&ts.observation))?;
/// }
/// ```
pub struct Environment<F: GameFactory> {
    factory: F,
    distiller: Box<dyn Distill<ObservationOf<F>>>,
    default_reward: Reward,
    max_iterations: Option<u64>,
    action_spec: ActionSpec,
    action_arity: usize,
    observation_spec: ObservationSpec,
    episode: Option<Episode<F::Engine>>,
}

impl<F: GameFactory> Environment<F> {
    /// Build an adapter and probe one episode for the observation spec.
    ///
    /// # Errors
    ///
    /// - [`EnvError::Config`] if neither action channel has a slot, or a
    ///   bound is invalid.
    /// - [`EnvError::TypeMismatch`] if the probe engine's first reward
    ///   cannot be added to `config.default_reward`. Only checked when
    ///   the probe engine returns a first reward at all.
    /// - [`EnvError::Engine`] if the factory or `begin` fails.
    pub fn new(
        factory: F,
        distiller: impl Distill<ObservationOf<F>> + 'static,
        config: EnvConfig,
    ) -> Result<Self, EnvError> {
        let (action_spec, action_arity) =
            build_action_spec(&config.discrete_actions, &config.continuous_actions)?;

        let mut env = Self {
            factory,
            distiller: Box::new(distiller),
            default_reward: config.default_reward,
            max_iterations: config.max_iterations,
            action_spec,
            action_arity,
            observation_spec: ObservationSpec::new(),
            episode: None,
        };
        env.observation_spec = env.compute_observation_spec()?;

        debug!(
            action_arity,
            observation_keys = ?env.observation_spec.keys().collect::<Vec<_>>(),
            "environment ready"
        );
        Ok(env)
    }

    /// Start a new episode, discarding any episode underway.
    ///
    /// The returned step is FIRST with no reward or discount, whatever
    /// the engine reported for its opening tick.
    pub fn reset(&mut self, layout: Option<&F::Layout>) -> Result<TimeStep, EnvError> {
        self.start_episode(layout).map(|(ts, _)| ts)
    }

    /// Apply `action` and advance the engine one tick.
    ///
    /// Stepping after a LAST step (or before any reset) ignores `action`
    /// and starts a fresh episode instead, returning its FIRST step.
    ///
    /// # Errors
    ///
    /// [`EnvError::InvalidAction`] if the flattened action length differs
    /// from the configured arity; the adapter is left untouched.
    /// [`EnvError::Engine`] if the engine fails.
    pub fn step(&mut self, action: impl Into<Action>) -> Result<TimeStep, EnvError> {
        let slots = self.flatten_action(&action.into())?;

        if self.state() == Some(StepType::Last) {
            self.drop_last_episode();
        }
        let Some(episode) = self.episode.as_mut() else {
            return self.reset(None);
        };

        let engine_action = EngineAction::from_slots(slots);
        let step = episode.engine.advance(&engine_action)?;
        episode.last = digest(step, self.distiller.as_ref(), &self.default_reward);
        let over = game_over(&episode.engine, self.max_iterations);
        episode.state = if over {
            StepType::Last
        } else {
            StepType::Mid
        };

        let ticks = episode.engine.elapsed_ticks();
        trace!(ticks, state = %episode.state, reward = %episode.last.reward, "step");
        if over {
            debug!(
                ticks,
                capped = !episode.engine.terminated(),
                "episode ended"
            );
        }

        Ok(TimeStep {
            step_type: episode.state,
            reward: Some(episode.last.reward.clone()),
            discount: Some(episode.last.discount),
            observation: episode.last.observations.to_observations(),
        })
    }

    /// The action space, fixed at construction.
    pub fn action_spec(&self) -> &ActionSpec {
        &self.action_spec
    }

    /// Observation keys, shapes, and dtypes, fixed at construction.
    pub fn observation_spec(&self) -> &ObservationSpec {
        &self.observation_spec
    }

    /// The most recent distilled observation, keyed by name.
    ///
    /// A bare-array distiller's output appears under `"board"`. `None`
    /// while no episode is underway.
    pub fn last_observations(&self) -> Option<Observations> {
        self.episode
            .as_ref()
            .map(|e| e.last.observations.to_observations())
    }

    /// Lifecycle state; `None` while no episode is underway.
    pub fn state(&self) -> Option<StepType> {
        self.episode.as_ref().map(|e| e.state)
    }

    /// Whether an engine is currently held.
    pub fn is_running(&self) -> bool {
        self.episode.is_some()
    }

    /// Ticks executed by the current engine.
    pub fn episode_ticks(&self) -> Option<u64> {
        self.episode.as_ref().map(|e| e.engine.elapsed_ticks())
    }

    /// Total flattened action arity.
    pub fn action_arity(&self) -> usize {
        self.action_arity
    }

    /// Reward substituted when the engine issues none.
    pub fn default_reward(&self) -> &Reward {
        &self.default_reward
    }

    /// Episode length cap, if any.
    pub fn max_iterations(&self) -> Option<u64> {
        self.max_iterations
    }

    /// The game factory.
    pub fn factory(&self) -> &F {
        &self.factory
    }

    // ── Internals ───────────────────────────────────────────────

    /// Build an engine, run its opening tick, and enter FIRST.
    ///
    /// Also returns the engine's own first reward, which the public
    /// `TimeStep` suppresses.
    fn start_episode(
        &mut self,
        layout: Option<&F::Layout>,
    ) -> Result<(TimeStep, Option<Reward>), EnvError> {
        // Release the previous engine before the factory builds the next.
        self.drop_last_episode();

        let mut engine = self.factory.create(layout)?;
        let first = engine.begin()?;
        let first_reward = first.reward.clone();
        let last = digest(first, self.distiller.as_ref(), &self.default_reward);
        let observation = last.observations.to_observations();

        self.episode = Some(Episode {
            engine,
            state: StepType::First,
            last,
        });
        debug!("episode started");

        Ok((
            TimeStep {
                step_type: StepType::First,
                reward: None,
                discount: None,
                observation,
            },
            first_reward,
        ))
    }

    fn flatten_action(&self, action: &Action) -> Result<Vec<Scalar>, EnvError> {
        let slots = action.flatten();
        if slots.len() != self.action_arity {
            warn!(
                expected = self.action_arity,
                got = slots.len(),
                "rejected action with wrong arity"
            );
            return Err(EnvError::InvalidAction {
                expected: self.action_arity,
                got: slots.len(),
            });
        }
        Ok(slots)
    }

    fn compute_observation_spec(&mut self) -> Result<ObservationSpec, EnvError> {
        let (timestep, first_reward) = self.start_episode(None)?;
        let spec = timestep
            .observation
            .iter()
            .map(|(key, array)| (key.clone(), ArraySpec::describe(key.clone(), array)))
            .collect();

        if let Some(reward) = first_reward {
            if !reward.is_compatible_with(&self.default_reward) {
                self.drop_last_episode();
                return Err(EnvError::TypeMismatch {
                    probe: reward.kind(),
                    default: self.default_reward.kind(),
                });
            }
        }

        self.drop_last_episode();
        Ok(spec)
    }

    fn drop_last_episode(&mut self) {
        if let Some(episode) = self.episode.take() {
            trace!(ticks = episode.engine.elapsed_ticks(), "episode dropped");
        }
    }
}

impl<F: GameFactory> fmt::Debug for Environment<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("state", &self.state())
            .field("action_arity", &self.action_arity)
            .field("observation_keys", &self.observation_spec.keys())
            .field("default_reward", &self.default_reward)
            .field("max_iterations", &self.max_iterations)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_test_utils::{raw_board_distiller, MockFactory, MockGame};

    fn env(game: MockGame, config: EnvConfig) -> Environment<MockFactory> {
        Environment::new(MockFactory::new(game), raw_board_distiller(), config).unwrap()
    }

    #[test]
    fn cap_zero_ends_at_first_advance() {
        let mut env = env(
            MockGame::default(),
            EnvConfig::default().with_discrete((0, 1)).with_max_iterations(0),
        );
        // The opening tick is never LAST; the cap is checked after advance.
        assert!(env.reset(None).unwrap().first());
        assert!(env.step(0).unwrap().last());
    }

    #[test]
    fn finished_episode_keeps_last_observation_until_next_step() {
        let mut env = env(
            MockGame::default().terminating_after(1),
            EnvConfig::default().with_discrete((0, 1)),
        );
        env.reset(None).unwrap();
        let last = env.step(1).unwrap();
        assert!(last.last());
        assert_eq!(env.last_observations(), Some(last.observation));
        assert!(env.is_running());
        assert_eq!(env.episode_ticks(), Some(1));
    }

    #[test]
    fn debug_shows_state_and_keys() {
        let mut env = env(MockGame::default(), EnvConfig::default().with_discrete((0, 1)));
        assert!(format!("{env:?}").contains("state: None"));
        env.reset(None).unwrap();
        let dbg = format!("{env:?}");
        assert!(dbg.contains("First"));
        assert!(dbg.contains("\"board\""));
    }

    #[test]
    fn accessors_reflect_config() {
        let env = env(
            MockGame::default(),
            EnvConfig::default()
                .with_continuous(vec![(-1.0, 1.0), (0.0, 2.0)])
                .with_default_reward(Reward::Int(-1))
                .with_max_iterations(50),
        );
        assert_eq!(env.action_arity(), 2);
        assert_eq!(env.default_reward(), &Reward::Int(-1));
        assert_eq!(env.max_iterations(), Some(50));
        assert_eq!(env.factory().probe().created(), 1);
    }
}
