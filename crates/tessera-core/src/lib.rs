//! Core types and traits for Tessera environments.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the values exchanged across the adapter boundary: actions, rewards,
//! dtype-tagged observation arrays, array specs, time steps, and the
//! [`Engine`] / [`GameFactory`] traits implemented by game backends.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action;
pub mod array;
pub mod error;
pub mod reward;
pub mod spec;
pub mod step;
pub mod traits;

pub use action::{Action, EngineAction, Scalar};
pub use array::{DType, ObsArray, Observations};
pub use error::{EngineError, SpecError};
pub use reward::{Reward, RewardKind};
pub use spec::{ArraySpec, BoundedArraySpec, ObservationSpec, Shape};
pub use step::{StepType, TimeStep};
pub use traits::{Engine, EngineStep, GameFactory, ObservationOf};
