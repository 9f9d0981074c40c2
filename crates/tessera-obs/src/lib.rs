//! Observation distillation for Tessera environments.
//!
//! Turns engine-native observations into the dtype-tagged arrays an
//! agent consumes. The [`Distiller`] pairs an optional [`Repaint`]
//! stage with a mandatory [`Distill`] conversion; [`board`] supplies
//! stock stages for character-grid games.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod board;
pub mod distiller;

pub use board::{Board, BoardError, BoardToArray, BoardToFeatureArray, CharacterRepainter};
pub use distiller::{Distill, Distilled, Distiller, Repaint, BOARD_KEY};
