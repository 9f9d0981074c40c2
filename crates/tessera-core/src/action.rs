//! Action values: what callers pass to `step`, and what engines receive.

use std::fmt;

/// One flattened action slot.
///
/// Discrete slots normally carry [`Scalar::Int`] and continuous slots
/// [`Scalar::Float`], but the adapter passes values through exactly as
/// supplied; conformance against bounds is left to the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scalar {
    /// An integer value.
    Int(i64),
    /// A floating-point value.
    Float(f64),
}

impl Scalar {
    /// The value widened to `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(v) => v as f64,
            Self::Float(v) => v,
        }
    }

    /// The value as an integer, if it is one.
    pub fn as_int(self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(v),
            Self::Float(_) => None,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
        }
    }
}

macro_rules! scalar_from_int {
    ($($t:ty),*) => {
        $(impl From<$t> for Scalar {
            fn from(v: $t) -> Self {
                Self::Int(i64::from(v))
            }
        })*
    };
}

scalar_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f32> for Scalar {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

/// An action as supplied by a caller of `step`.
///
/// Adapters with a total arity of one accept either a bare
/// [`Action::Scalar`] or a one-element [`Action::Sequence`]. Wider
/// adapters require a sequence with exactly one value per slot,
/// discrete slots first.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// A single bare value.
    Scalar(Scalar),
    /// An ordered sequence of values.
    Sequence(Vec<Scalar>),
}

impl Action {
    /// Flatten into the ordered list of slot values.
    pub fn flatten(&self) -> Vec<Scalar> {
        match self {
            Self::Scalar(s) => vec![*s],
            Self::Sequence(values) => values.clone(),
        }
    }

    /// Number of values this action carries once flattened.
    pub fn len(&self) -> usize {
        match self {
            Self::Scalar(_) => 1,
            Self::Sequence(values) => values.len(),
        }
    }

    /// Whether this action carries no values at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

macro_rules! action_from_scalar {
    ($($t:ty),*) => {
        $(impl From<$t> for Action {
            fn from(v: $t) -> Self {
                Self::Scalar(v.into())
            }
        })*
    };
}

action_from_scalar!(Scalar, i8, i16, i32, i64, u8, u16, u32, f32, f64);

impl<T: Into<Scalar>> From<Vec<T>> for Action {
    fn from(values: Vec<T>) -> Self {
        Self::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar>, const N: usize> From<[T; N]> for Action {
    fn from(values: [T; N]) -> Self {
        Self::Sequence(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Scalar> + Copy> From<&[T]> for Action {
    fn from(values: &[T]) -> Self {
        Self::Sequence(values.iter().map(|&v| v.into()).collect())
    }
}

/// The action shape handed to [`Engine::advance`](crate::Engine::advance).
///
/// A bare scalar when the adapter's arity is one, otherwise the full
/// ordered sequence in discrete-then-continuous order.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineAction {
    /// Arity-one action.
    Scalar(Scalar),
    /// Multi-slot action.
    Sequence(Vec<Scalar>),
}

impl EngineAction {
    /// Re-assemble validated slot values into the engine's native shape.
    ///
    /// Exactly one slot becomes [`EngineAction::Scalar`]; any other count,
    /// including zero, becomes a [`EngineAction::Sequence`].
    pub fn from_slots(slots: Vec<Scalar>) -> Self {
        match slots.as_slice() {
            [only] => Self::Scalar(*only),
            _ => Self::Sequence(slots),
        }
    }

    /// The slot values in order.
    pub fn values(&self) -> &[Scalar] {
        match self {
            Self::Scalar(s) => std::slice::from_ref(s),
            Self::Sequence(values) => values,
        }
    }
}
