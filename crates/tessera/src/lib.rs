//! Tessera: reinforcement-learning environments over turn-based game engines.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Tessera sub-crates. For most users, adding `tessera` as a single dependency
//! is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tessera::prelude::*;
//! use tessera_test_utils::{raw_board_distiller, MockFactory};
//!
//! let config = EnvConfig::default().with_discrete((0, 3));
//! let mut env = Environment::new(MockFactory::default(), raw_board_distiller(), config).unwrap();
//! assert_eq!(env.observation_spec()["board"].shape.as_slice(), &[3, 4]);
//!
//! let mut ts = env.reset(None).unwrap();
//! assert_eq!(ts.step_type, StepType::First);
//! for action in [0, 1, 2] {
//!     ts = env.step(action).unwrap();
//! }
//! assert_eq!(ts.step_type, StepType::Mid);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tessera-core` | Actions, rewards, arrays, specs, time steps, engine traits |
//! | [`obs`] | `tessera-obs` | Distillers, repainters, character boards |
//! | [`env`] | `tessera-env` | The `Environment` adapter, config, action specs |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and traits (`tessera-core`).
///
/// Contains the [`types::Engine`] and [`types::GameFactory`] traits an
/// engine integration implements, plus the value types that cross the
/// adapter boundary.
pub use tessera_core as types;

/// Observation distillation (`tessera-obs`).
///
/// Build an [`obs::Distiller`] from a converter and an optional
/// repainter, or use the stock [`obs::Board`] stages.
pub use tessera_obs as obs;

/// The episode adapter (`tessera-env`).
///
/// [`env::Environment`] drives one engine per episode through the
/// FIRST / MID / LAST lifecycle.
pub use tessera_env as env;

/// Common imports for typical Tessera usage.
///
/// ```rust
/// use tessera::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use tessera_core::{
        Action, DType, Engine, EngineAction, EngineStep, GameFactory, ObsArray, Observations,
        Reward, Scalar, StepType, TimeStep,
    };

    // Specs
    pub use tessera_core::{ArraySpec, BoundedArraySpec, ObservationSpec};

    // Errors
    pub use tessera_core::EngineError;
    pub use tessera_env::{ConfigError, EnvError};

    // Observation
    pub use tessera_obs::{Distill, Distilled, Distiller, Repaint};

    // Environment
    pub use tessera_env::{ActionBounds, ActionSpec, EnvConfig, Environment};
}
