//! Observation distillation: engine-native observation to named arrays.
//!
//! A distiller runs two stages in fixed order: an optional
//! [`Repaint`] over the engine-native observation, then a mandatory
//! conversion ([`Distill`]) into either a bare array or a named map of
//! arrays. Both stages borrow their input and hold no per-call state,
//! so one distiller can serve every episode of an adapter.

use std::fmt;

use tessera_core::{ObsArray, Observations};

/// Key under which a bare-array observation is exposed.
pub const BOARD_KEY: &str = "board";

/// Output of a distiller: a single unnamed array or a named mapping.
#[derive(Clone, Debug, PartialEq)]
pub enum Distilled {
    /// One unnamed array; exposed under [`BOARD_KEY`].
    Board(ObsArray),
    /// Arrays keyed by name, in production order.
    Named(Observations),
}

impl Distilled {
    /// View as a name-keyed map, synthesizing [`BOARD_KEY`] for a bare array.
    pub fn to_observations(&self) -> Observations {
        match self {
            Self::Board(array) => {
                let mut map = Observations::with_capacity(1);
                map.insert(BOARD_KEY.to_string(), array.clone());
                map
            }
            Self::Named(map) => map.clone(),
        }
    }

    /// Consuming form of [`to_observations`](Self::to_observations).
    pub fn into_observations(self) -> Observations {
        match self {
            Self::Board(array) => {
                let mut map = Observations::with_capacity(1);
                map.insert(BOARD_KEY.to_string(), array);
                map
            }
            Self::Named(map) => map,
        }
    }
}

impl From<ObsArray> for Distilled {
    fn from(array: ObsArray) -> Self {
        Self::Board(array)
    }
}

impl From<Observations> for Distilled {
    fn from(map: Observations) -> Self {
        Self::Named(map)
    }
}

/// Converts an engine-native observation into arrays.
///
/// Implemented for any `Fn(&O) -> Distilled`.
pub trait Distill<O> {
    /// Produce arrays from `observation` without modifying it.
    fn distill(&self, observation: &O) -> Distilled;
}

impl<O, F> Distill<O> for F
where
    F: Fn(&O) -> Distilled,
{
    fn distill(&self, observation: &O) -> Distilled {
        self(observation)
    }
}

/// Rewrites an engine-native observation into another of the same type.
///
/// Implemented for any `Fn(&O) -> O`.
pub trait Repaint<O> {
    /// Produce a repainted copy of `observation`.
    fn repaint(&self, observation: &O) -> O;
}

impl<O, F> Repaint<O> for F
where
    F: Fn(&O) -> O,
{
    fn repaint(&self, observation: &O) -> O {
        self(observation)
    }
}

/// Two-stage distiller: optional repaint, then conversion.
///
/// # Examples
///
/// ```
/// use tessera_obs::{Distill, Distilled, Distiller};
/// use tessera_core::ObsArray;
/// use ndarray::{ArrayD, IxDyn};
///
/// let distiller = Distiller::new(|v: &Vec<u8>| {
///     Distilled::Board(ObsArray::from(
///         ArrayD::from_shape_vec(IxDyn(&[v.len()]), v.clone()).unwrap(),
///     ))
/// })
/// .with_repainter(|v: &Vec<u8>| -> Vec<u8> { v.iter().map(|c| c + 1).collect() });
///
/// let out = distiller.distill(&vec![1, 2, 3]).into_observations();
/// assert_eq!(out["board"].to_f64_vec(), vec![2.0, 3.0, 4.0]);
/// ```
pub struct Distiller<O> {
    repainter: Option<Box<dyn Repaint<O>>>,
    converter: Box<dyn Distill<O>>,
}

impl<O> Distiller<O> {
    /// Create a distiller with only a conversion stage.
    pub fn new(converter: impl Distill<O> + 'static) -> Self {
        Self {
            repainter: None,
            converter: Box::new(converter),
        }
    }

    /// Add a repaint stage applied before conversion.
    pub fn with_repainter(mut self, repainter: impl Repaint<O> + 'static) -> Self {
        self.repainter = Some(Box::new(repainter));
        self
    }

    /// Whether a repaint stage is configured.
    pub fn has_repainter(&self) -> bool {
        self.repainter.is_some()
    }
}

impl<O> Distill<O> for Distiller<O> {
    fn distill(&self, observation: &O) -> Distilled {
        match &self.repainter {
            Some(repainter) => {
                let repainted = repainter.repaint(observation);
                self.converter.distill(&repainted)
            }
            None => self.converter.distill(observation),
        }
    }
}

impl<O> fmt::Debug for Distiller<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Distiller")
            .field("has_repainter", &self.has_repainter())
            .finish()
    }
}
