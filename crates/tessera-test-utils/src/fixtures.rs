//! Mock game engines and factories.
//!
//! - [`MockGame`]: the script every engine from a factory follows.
//! - [`MockEngine`]: renders a board with an agent `A` walking along
//!   row 0, one column per tick.
//! - [`MockFactory`]: builds engines from a [`MockGame`], recording
//!   every call into a shared [`Probe`](crate::Probe).

use tessera_core::{Engine, EngineAction, EngineError, EngineStep, GameFactory, Reward};
use tessera_obs::Board;

use crate::Probe;

/// Script shared by all engines a [`MockFactory`] builds.
#[derive(Clone, Debug)]
pub struct MockGame {
    pub rows: usize,
    pub cols: usize,
    /// Reward returned by `begin`.
    pub first_reward: Option<Reward>,
    /// Per-tick rewards for `advance`, cycled. Empty = always `None`.
    pub rewards: Vec<Option<Reward>>,
    pub discount: f64,
    /// Self-terminate once this many ticks have run.
    pub terminate_after: Option<u64>,
    /// Fail `advance` on this tick number (1-based).
    pub fail_advance_at: Option<u64>,
    /// Fail `begin` on every engine whose id is at least this.
    pub fail_begin_from: Option<usize>,
}

impl Default for MockGame {
    fn default() -> Self {
        Self {
            rows: 3,
            cols: 4,
            first_reward: None,
            rewards: vec![Some(Reward::Float(1.0))],
            discount: 0.9,
            terminate_after: None,
            fail_advance_at: None,
            fail_begin_from: None,
        }
    }
}

impl MockGame {
    pub fn with_first_reward(mut self, reward: Reward) -> Self {
        self.first_reward = Some(reward);
        self
    }

    pub fn with_rewards(mut self, rewards: Vec<Option<Reward>>) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn terminating_after(mut self, ticks: u64) -> Self {
        self.terminate_after = Some(ticks);
        self
    }

    pub fn failing_at(mut self, tick: u64) -> Self {
        self.fail_advance_at = Some(tick);
        self
    }

    pub fn failing_begin_from(mut self, id: usize) -> Self {
        self.fail_begin_from = Some(id);
        self
    }

    fn reward_for(&self, tick: u64) -> Option<Reward> {
        if self.rewards.is_empty() {
            return None;
        }
        let idx = (tick.saturating_sub(1) as usize) % self.rewards.len();
        self.rewards[idx].clone()
    }
}

/// Engine driven by a [`MockGame`] script.
pub struct MockEngine {
    id: usize,
    game: MockGame,
    base: Board,
    ticks: u64,
    terminated: bool,
    probe: Probe,
}

impl MockEngine {
    /// Creation index of this engine within its factory (0-based).
    pub fn id(&self) -> usize {
        self.id
    }

    fn render(&self) -> Board {
        let mut board = self.base.clone();
        let col = (self.ticks as usize) % board.cols();
        board.set(0, col, b'A');
        board
    }

    fn tick(&self, reward: Option<Reward>) -> EngineStep<Board> {
        EngineStep::new(self.render(), reward, self.game.discount)
    }
}

impl Engine for MockEngine {
    type Observation = Board;

    fn begin(&mut self) -> Result<EngineStep<Board>, EngineError> {
        self.probe.record_begin();
        if self.game.fail_begin_from.is_some_and(|n| self.id >= n) {
            return Err(EngineError::from(format!("engine {} failed to start", self.id)));
        }
        Ok(self.tick(self.game.first_reward.clone()))
    }

    fn advance(&mut self, action: &EngineAction) -> Result<EngineStep<Board>, EngineError> {
        self.probe.record_action(action.clone());
        self.ticks += 1;
        if self.game.fail_advance_at == Some(self.ticks) {
            return Err(EngineError::from(format!("engine {} failed", self.id)));
        }
        if self.game.terminate_after.is_some_and(|t| self.ticks >= t) {
            self.terminated = true;
        }
        Ok(self.tick(self.game.reward_for(self.ticks)))
    }

    fn terminated(&self) -> bool {
        self.terminated || self.probe.terminate_requested()
    }

    fn elapsed_ticks(&self) -> u64 {
        self.ticks
    }
}

impl Drop for MockEngine {
    fn drop(&mut self) {
        self.probe.record_drop();
    }
}

/// Factory building [`MockEngine`]s.
///
/// The layout type is game art: equal-width rows of characters.
pub struct MockFactory {
    game: MockGame,
    probe: Probe,
    fail_from: Option<usize>,
}

impl MockFactory {
    pub fn new(game: MockGame) -> Self {
        Self {
            game,
            probe: Probe::default(),
            fail_from: None,
        }
    }

    /// Fail every `create` call from the `n`-th one (0-based) onwards.
    pub fn failing_from(mut self, n: usize) -> Self {
        self.fail_from = Some(n);
        self
    }

    /// Shared handle onto this factory's call record.
    pub fn probe(&self) -> Probe {
        self.probe.clone()
    }
}

impl Default for MockFactory {
    fn default() -> Self {
        Self::new(MockGame::default())
    }
}

impl GameFactory for MockFactory {
    type Engine = MockEngine;
    type Layout = Vec<String>;

    fn create(&mut self, layout: Option<&Vec<String>>) -> Result<MockEngine, EngineError> {
        let id = self.probe.created();
        if self.fail_from.is_some_and(|n| id >= n) {
            return Err(EngineError::from("factory refused to build a game"));
        }
        let base = match layout {
            Some(art) => Board::from_art(art).map_err(EngineError::new)?,
            None => Board::from_art(&vec![".".repeat(self.game.cols); self.game.rows])
                .map_err(EngineError::new)?,
        };
        self.probe.record_create(layout.cloned());
        Ok(MockEngine {
            id,
            game: self.game.clone(),
            base,
            ticks: 0,
            terminated: false,
            probe: self.probe.clone(),
        })
    }
}
