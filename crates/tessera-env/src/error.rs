//! Errors surfaced by [`Environment`](crate::Environment).

use std::error::Error;
use std::fmt;

use tessera_core::{EngineError, RewardKind};

use crate::config::ConfigError;

/// Errors from constructing or driving an environment adapter.
///
/// None of these are retried internally. `InvalidAction` leaves the
/// adapter untouched; `Config` and `TypeMismatch` only occur during
/// construction; `Engine` carries the collaborator's failure unmodified.
#[derive(Debug)]
pub enum EnvError {
    /// The configuration is structurally invalid.
    Config(ConfigError),
    /// The probe episode's first reward cannot be combined with the
    /// configured default reward.
    TypeMismatch {
        /// Kind of reward the probe engine returned.
        probe: RewardKind,
        /// Kind of the configured default reward.
        default: RewardKind,
    },
    /// An action's flattened length differs from the adapter's arity.
    InvalidAction {
        /// Configured total arity.
        expected: usize,
        /// Flattened length supplied.
        got: usize,
    },
    /// The game factory or engine failed.
    Engine(EngineError),
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::TypeMismatch { probe, default } => write!(
                f,
                "first reward of kind {probe} is incompatible with default reward of kind {default}"
            ),
            Self::InvalidAction { expected, got } => write!(
                f,
                "action has {got} values but the game expects {expected}"
            ),
            Self::Engine(e) => write!(f, "{e}"),
        }
    }
}

impl Error for EnvError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            Self::Engine(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ConfigError> for EnvError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<EngineError> for EnvError {
    fn from(e: EngineError) -> Self {
        Self::Engine(e)
    }
}
