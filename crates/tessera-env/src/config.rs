//! Adapter configuration, validation, and error types.
//!
//! [`EnvConfig`] carries everything an [`Environment`](crate::Environment)
//! needs besides its two collaborators (the game factory and the
//! distiller). [`validate()`](EnvConfig::validate) checks the structural
//! invariants without building an engine.

use std::error::Error;
use std::fmt;

use tessera_core::Reward;

use crate::action_spec::{build_action_spec, ActionBounds};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating an [`EnvConfig`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Neither the discrete nor the continuous channel contributes a slot.
    NoActions,
    /// A slot's bounds are inverted or NaN.
    InvalidBounds {
        /// `"discrete"` or `"continuous"`.
        channel: &'static str,
        /// Index of the slot within its channel.
        slot: usize,
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoActions => write!(
                f,
                "adapter initialised without any discrete or continuous actions"
            ),
            Self::InvalidBounds {
                channel,
                slot,
                min,
                max,
            } => write!(f, "{channel} slot {slot} has invalid bounds ({min}, {max})"),
        }
    }
}

impl Error for ConfigError {}

// ── EnvConfig ──────────────────────────────────────────────────────

/// Configuration for constructing an [`Environment`](crate::Environment).
///
/// # Examples
///
/// ```
/// use tessera_env::{ActionBounds, EnvConfig};
/// use tessera_core::Reward;
///
/// let config = EnvConfig::default()
///     .with_discrete((0, 3))
///     .with_default_reward(Reward::Float(0.0))
///     .with_max_iterations(100);
///
/// assert_eq!(config.action_arity(), 1);
/// assert!(config.validate().is_ok());
/// assert!(EnvConfig::default().validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct EnvConfig {
    /// Bounds for integer-valued action slots. Default: absent.
    pub discrete_actions: ActionBounds,
    /// Bounds for float-valued action slots. Default: absent.
    pub continuous_actions: ActionBounds,
    /// Reward reported when the engine issues none. Default: `Float(0.0)`.
    pub default_reward: Reward,
    /// Episode length cap in engine ticks. `None` = unbounded (default).
    pub max_iterations: Option<u64>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            discrete_actions: ActionBounds::Absent,
            continuous_actions: ActionBounds::Absent,
            default_reward: Reward::Float(0.0),
            max_iterations: None,
        }
    }
}

impl EnvConfig {
    /// Set the discrete channel's bounds.
    pub fn with_discrete(mut self, bounds: impl Into<ActionBounds>) -> Self {
        self.discrete_actions = bounds.into();
        self
    }

    /// Set the continuous channel's bounds.
    pub fn with_continuous(mut self, bounds: impl Into<ActionBounds>) -> Self {
        self.continuous_actions = bounds.into();
        self
    }

    /// Set the substitute for absent engine rewards.
    pub fn with_default_reward(mut self, reward: impl Into<Reward>) -> Self {
        self.default_reward = reward.into();
        self
    }

    /// Cap episodes at `max` engine ticks.
    pub fn with_max_iterations(mut self, max: u64) -> Self {
        self.max_iterations = Some(max);
        self
    }

    /// Total flattened action arity (discrete plus continuous slots).
    pub fn action_arity(&self) -> usize {
        self.discrete_actions.arity() + self.continuous_actions.arity()
    }

    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        build_action_spec(&self.discrete_actions, &self.continuous_actions).map(|_| ())
    }
}
