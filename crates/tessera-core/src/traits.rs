//! Collaborator traits: the game factory and the engine it builds.
//!
//! The adapter never looks inside an engine. It only creates one per
//! episode, starts it, advances it with actions, and reads back the
//! termination flag and tick counter.

use crate::action::EngineAction;
use crate::error::EngineError;
use crate::reward::Reward;

/// The `(observation, reward, discount)` triple returned by an engine tick.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineStep<O> {
    /// Engine-native observation.
    pub observation: O,
    /// Reward for this tick, or `None` if the engine issued none.
    pub reward: Option<Reward>,
    /// Discount for this tick.
    pub discount: f64,
}

impl<O> EngineStep<O> {
    /// Convenience constructor.
    pub fn new(observation: O, reward: Option<Reward>, discount: f64) -> Self {
        Self {
            observation,
            reward,
            discount,
        }
    }
}

/// A stateful, turn-based game instance driving one episode.
pub trait Engine {
    /// Engine-native observation type.
    type Observation;

    /// Start the game and return its first tick.
    ///
    /// Called exactly once per engine, before any [`advance`](Engine::advance).
    fn begin(&mut self) -> Result<EngineStep<Self::Observation>, EngineError>;

    /// Apply one action and return the resulting tick.
    fn advance(
        &mut self,
        action: &EngineAction,
    ) -> Result<EngineStep<Self::Observation>, EngineError>;

    /// Whether the game has ended on its own terms.
    fn terminated(&self) -> bool;

    /// Number of ticks the engine has executed since it was created.
    fn elapsed_ticks(&self) -> u64;
}

/// Builds a fresh [`Engine`] for every episode.
///
/// Factories should be stateless across calls for reproducible episodes;
/// the adapter does not enforce this.
pub trait GameFactory {
    /// Engine type produced by this factory.
    type Engine: Engine;
    /// Optional initial-layout argument (for instance, game art rows).
    type Layout;

    /// Create a new, not-yet-started engine.
    fn create(&mut self, layout: Option<&Self::Layout>) -> Result<Self::Engine, EngineError>;
}

/// Engine-native observation type produced by factory `F`.
pub type ObservationOf<F> = <<F as GameFactory>::Engine as Engine>::Observation;
