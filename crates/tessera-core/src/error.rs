//! Error types shared across the Tessera crates.

use std::error::Error;
use std::fmt;

use crate::array::DType;

/// A failure raised by a game factory or engine.
///
/// The adapter never inspects or retries these; it hands them back to
/// its caller with the original error reachable through
/// [`source()`](Error::source).
#[derive(Debug)]
pub struct EngineError {
    inner: Box<dyn Error + Send + Sync + 'static>,
}

impl EngineError {
    /// Wrap an arbitrary engine-side error.
    pub fn new(err: impl Into<Box<dyn Error + Send + Sync + 'static>>) -> Self {
        Self { inner: err.into() }
    }

    /// Borrow the wrapped error.
    pub fn inner(&self) -> &(dyn Error + Send + Sync + 'static) {
        &*self.inner
    }

    /// Unwrap into the original boxed error.
    pub fn into_inner(self) -> Box<dyn Error + Send + Sync + 'static> {
        self.inner
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "engine failed: {}", self.inner)
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(&*self.inner)
    }
}

impl From<String> for EngineError {
    fn from(reason: String) -> Self {
        Self::new(reason)
    }
}

impl From<&str> for EngineError {
    fn from(reason: &str) -> Self {
        Self::new(reason)
    }
}

/// A value does not conform to an [`ArraySpec`](crate::ArraySpec) or
/// [`BoundedArraySpec`](crate::BoundedArraySpec).
#[derive(Clone, Debug, PartialEq)]
pub enum SpecError {
    /// Array dimensions differ from the spec.
    ShapeMismatch {
        /// Spec name.
        name: String,
        /// Dimensions the spec declares.
        expected: Vec<usize>,
        /// Dimensions observed.
        got: Vec<usize>,
    },
    /// Element type differs from the spec.
    DTypeMismatch {
        /// Spec name.
        name: String,
        /// Element type the spec declares.
        expected: DType,
        /// Element type observed.
        got: DType,
    },
    /// Wrong number of slot values for a bounded channel.
    LengthMismatch {
        /// Spec name.
        name: String,
        /// Channel arity.
        expected: usize,
        /// Values supplied.
        got: usize,
    },
    /// A slot value lies outside its inclusive bounds.
    OutOfBounds {
        /// Spec name.
        name: String,
        /// Offending slot.
        slot: usize,
        /// Offending value.
        value: f64,
    },
    /// A float was supplied for an integer slot.
    NotAnInteger {
        /// Spec name.
        name: String,
        /// Offending slot.
        slot: usize,
    },
}

impl fmt::Display for SpecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShapeMismatch {
                name,
                expected,
                got,
            } => write!(f, "'{name}': expected shape {expected:?}, got {got:?}"),
            Self::DTypeMismatch {
                name,
                expected,
                got,
            } => write!(f, "'{name}': expected dtype {expected}, got {got}"),
            Self::LengthMismatch {
                name,
                expected,
                got,
            } => write!(f, "'{name}': expected {expected} values, got {got}"),
            Self::OutOfBounds { name, slot, value } => {
                write!(f, "'{name}': slot {slot} value {value} is out of bounds")
            }
            Self::NotAnInteger { name, slot } => {
                write!(f, "'{name}': slot {slot} requires an integer value")
            }
        }
    }
}

impl Error for SpecError {}
