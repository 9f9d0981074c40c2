//! Array descriptors for actions and observations.
//!
//! [`ArraySpec`] describes the shape and element type of one named
//! observation array. [`BoundedArraySpec`] additionally carries
//! per-slot inclusive bounds and describes one action channel.

use indexmap::IndexMap;
use smallvec::SmallVec;

use crate::action::Scalar;
use crate::array::{DType, ObsArray};
use crate::error::SpecError;

/// Array dimensions. Inline for up to four axes.
pub type Shape = SmallVec<[usize; 4]>;

/// Shape, element type, and name of an array.
///
/// # Examples
///
/// ```
/// use tessera_core::{ArraySpec, DType, ObsArray};
/// use ndarray::{ArrayD, IxDyn};
///
/// let board = ObsArray::from(ArrayD::<u8>::zeros(IxDyn(&[5, 7])));
/// let spec = ArraySpec::describe("board", &board);
///
/// assert_eq!(spec.shape.as_slice(), &[5, 7]);
/// assert_eq!(spec.dtype, DType::U8);
/// assert!(spec.validate(&board).is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArraySpec {
    /// Array dimensions.
    pub shape: Shape,
    /// Element type.
    pub dtype: DType,
    /// Name of the array (the observation key).
    pub name: String,
}

impl ArraySpec {
    /// Create a spec from explicit parts.
    pub fn new(name: impl Into<String>, shape: &[usize], dtype: DType) -> Self {
        Self {
            shape: Shape::from_slice(shape),
            dtype,
            name: name.into(),
        }
    }

    /// Describe an existing array under `name`.
    pub fn describe(name: impl Into<String>, array: &ObsArray) -> Self {
        Self::new(name, array.shape(), array.dtype())
    }

    /// Check that `array` has exactly this shape and element type.
    pub fn validate(&self, array: &ObsArray) -> Result<(), SpecError> {
        if array.dtype() != self.dtype {
            return Err(SpecError::DTypeMismatch {
                name: self.name.clone(),
                expected: self.dtype,
                got: array.dtype(),
            });
        }
        if array.shape() != self.shape.as_slice() {
            return Err(SpecError::ShapeMismatch {
                name: self.name.clone(),
                expected: self.shape.to_vec(),
                got: array.shape().to_vec(),
            });
        }
        Ok(())
    }
}

/// A one-dimensional action channel with per-slot inclusive bounds.
///
/// `minimum[i]` and `maximum[i]` bound slot `i`; both vectors have
/// exactly `shape[0]` entries.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundedArraySpec {
    /// Always one-dimensional: `[arity]`.
    pub shape: Shape,
    /// [`DType::I32`] for discrete channels, [`DType::F32`] for continuous.
    pub dtype: DType,
    /// Per-slot lower bounds.
    pub minimum: Vec<f64>,
    /// Per-slot upper bounds.
    pub maximum: Vec<f64>,
    /// Channel name (`"discrete"` or `"continuous"`).
    pub name: String,
}

impl BoundedArraySpec {
    /// Build a channel spec from ordered `(min, max)` pairs.
    pub fn from_bounds(name: impl Into<String>, dtype: DType, bounds: &[(f64, f64)]) -> Self {
        let (minimum, maximum) = bounds.iter().copied().unzip();
        Self {
            shape: Shape::from_slice(&[bounds.len()]),
            dtype,
            minimum,
            maximum,
            name: name.into(),
        }
    }

    /// Number of slots in this channel.
    pub fn arity(&self) -> usize {
        self.shape.first().copied().unwrap_or(0)
    }

    /// Check a run of slot values against this channel's bounds.
    ///
    /// Integer channels additionally reject non-integer values.
    pub fn validate_values(&self, values: &[Scalar]) -> Result<(), SpecError> {
        if values.len() != self.arity() {
            return Err(SpecError::LengthMismatch {
                name: self.name.clone(),
                expected: self.arity(),
                got: values.len(),
            });
        }
        for (slot, value) in values.iter().enumerate() {
            if self.dtype == DType::I32 && value.as_int().is_none() {
                return Err(SpecError::NotAnInteger {
                    name: self.name.clone(),
                    slot,
                });
            }
            let v = value.as_f64();
            if v < self.minimum[slot] || v > self.maximum[slot] {
                return Err(SpecError::OutOfBounds {
                    name: self.name.clone(),
                    slot,
                    value: v,
                });
            }
        }
        Ok(())
    }
}

/// Observation key to array descriptor, in distiller key order.
pub type ObservationSpec = IndexMap<String, ArraySpec>;
