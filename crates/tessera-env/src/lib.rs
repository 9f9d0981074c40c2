//! Episode adapter turning turn-based game engines into RL environments.
//!
//! [`Environment`] wraps a [`GameFactory`](tessera_core::GameFactory)
//! and a distiller, and exposes the uniform `reset` / `step` /
//! `action_spec` / `observation_spec` surface an RL training loop
//! expects. The action spec is derived from [`EnvConfig`] bounds; the
//! observation spec is learned by probing one episode at construction.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod action_spec;
pub mod config;
pub mod environment;
pub mod error;

pub use action_spec::{build_action_spec, ActionBounds, ActionSpec, CONTINUOUS, DISCRETE};
pub use config::{ConfigError, EnvConfig};
pub use environment::Environment;
pub use error::EnvError;
