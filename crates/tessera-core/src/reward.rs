//! Reward values and their combination rules.

use std::fmt;

/// Structural classification of a [`Reward`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewardKind {
    /// Integer scalar.
    Int,
    /// Floating-point scalar.
    Float,
    /// Fixed-length vector of floats.
    Vector {
        /// Number of components.
        len: usize,
    },
}

impl fmt::Display for RewardKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int => write!(f, "int"),
            Self::Float => write!(f, "float"),
            Self::Vector { len } => write!(f, "vector[{len}]"),
        }
    }
}

/// A reward issued by an engine for one tick.
#[derive(Clone, Debug, PartialEq)]
pub enum Reward {
    /// Integer scalar reward.
    Int(i64),
    /// Floating-point scalar reward.
    Float(f64),
    /// Multi-objective reward.
    Vector(Vec<f64>),
}

impl Reward {
    /// The structural kind of this reward.
    pub fn kind(&self) -> RewardKind {
        match self {
            Self::Int(_) => RewardKind::Int,
            Self::Float(_) => RewardKind::Float,
            Self::Vector(v) => RewardKind::Vector { len: v.len() },
        }
    }

    /// Add two rewards, or `None` if their kinds cannot be combined.
    ///
    /// Integer plus integer stays integer; any other scalar pairing widens
    /// to float. A scalar broadcasts over a vector. Two vectors combine
    /// only when their lengths match.
    pub fn checked_add(&self, other: &Reward) -> Option<Reward> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => a.checked_add(*b).map(Self::Int),
            (Self::Int(a), Self::Float(b)) | (Self::Float(b), Self::Int(a)) => {
                Some(Self::Float(*a as f64 + b))
            }
            (Self::Float(a), Self::Float(b)) => Some(Self::Float(a + b)),
            (Self::Vector(v), s @ (Self::Int(_) | Self::Float(_)))
            | (s @ (Self::Int(_) | Self::Float(_)), Self::Vector(v)) => {
                let s = s.as_scalar()?;
                Some(Self::Vector(v.iter().map(|x| x + s).collect()))
            }
            (Self::Vector(a), Self::Vector(b)) if a.len() == b.len() => Some(Self::Vector(
                a.iter().zip(b).map(|(x, y)| x + y).collect(),
            )),
            (Self::Vector(_), Self::Vector(_)) => None,
        }
    }

    /// Whether `self + other` is defined for these kinds, ignoring overflow.
    pub fn is_compatible_with(&self, other: &Reward) -> bool {
        match (self, other) {
            (Self::Vector(a), Self::Vector(b)) => a.len() == b.len(),
            _ => true,
        }
    }

    /// The value as an `f64` if this is a scalar reward.
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Int(v) => Some(*v as f64),
            Self::Float(v) => Some(*v),
            Self::Vector(_) => None,
        }
    }
}

impl Default for Reward {
    fn default() -> Self {
        Self::Float(0.0)
    }
}

impl fmt::Display for Reward {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Vector(v) => write!(f, "{v:?}"),
        }
    }
}

impl From<i64> for Reward {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Reward {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Reward {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for Reward {
    fn from(v: f32) -> Self {
        Self::Float(f64::from(v))
    }
}

impl From<Vec<f64>> for Reward {
    fn from(v: Vec<f64>) -> Self {
        Self::Vector(v)
    }
}
