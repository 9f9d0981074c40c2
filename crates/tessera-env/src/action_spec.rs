//! Action-spec derivation from discrete and continuous bounds.
//!
//! [`build_action_spec`] normalizes the two bound descriptors once, at
//! construction, into an [`ActionSpec`] plus the total arity that
//! `step` validates against. Discrete slots always precede continuous
//! slots in the flattened action.

use tessera_core::{BoundedArraySpec, DType};

use crate::config::ConfigError;

/// Bounds for one action channel.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ActionBounds {
    /// The channel is not used.
    #[default]
    Absent,
    /// One slot with inclusive `(min, max)` bounds.
    Single(f64, f64),
    /// One slot per pair, in order.
    PerSlot(Vec<(f64, f64)>),
}

impl ActionBounds {
    /// Number of slots this channel contributes.
    pub fn arity(&self) -> usize {
        match self {
            Self::Absent => 0,
            Self::Single(..) => 1,
            Self::PerSlot(pairs) => pairs.len(),
        }
    }

    fn pairs(&self) -> Vec<(f64, f64)> {
        match self {
            Self::Absent => Vec::new(),
            Self::Single(min, max) => vec![(*min, *max)],
            Self::PerSlot(pairs) => pairs.clone(),
        }
    }

    fn validate(&self, channel: &'static str) -> Result<(), ConfigError> {
        for (slot, (min, max)) in self.pairs().into_iter().enumerate() {
            if min.is_nan() || max.is_nan() || min > max {
                return Err(ConfigError::InvalidBounds {
                    channel,
                    slot,
                    min,
                    max,
                });
            }
        }
        Ok(())
    }
}

impl From<(f64, f64)> for ActionBounds {
    fn from((min, max): (f64, f64)) -> Self {
        Self::Single(min, max)
    }
}

impl From<(i32, i32)> for ActionBounds {
    fn from((min, max): (i32, i32)) -> Self {
        Self::Single(f64::from(min), f64::from(max))
    }
}

impl From<Vec<(f64, f64)>> for ActionBounds {
    fn from(pairs: Vec<(f64, f64)>) -> Self {
        Self::PerSlot(pairs)
    }
}

impl From<Vec<(i32, i32)>> for ActionBounds {
    fn from(pairs: Vec<(i32, i32)>) -> Self {
        Self::PerSlot(
            pairs
                .into_iter()
                .map(|(a, b)| (f64::from(a), f64::from(b)))
                .collect(),
        )
    }
}

/// The action space exposed by an adapter.
///
/// A single channel is exposed bare; with both channels present the
/// discrete one comes first.
#[derive(Clone, Debug, PartialEq)]
pub enum ActionSpec {
    /// Exactly one channel is in use.
    Single(BoundedArraySpec),
    /// Both channels are in use.
    Pair {
        /// Integer-valued channel.
        discrete: BoundedArraySpec,
        /// Float-valued channel.
        continuous: BoundedArraySpec,
    },
}

impl ActionSpec {
    /// Channels in flattened-action order.
    pub fn channels(&self) -> Vec<&BoundedArraySpec> {
        match self {
            Self::Single(spec) => vec![spec],
            Self::Pair {
                discrete,
                continuous,
            } => vec![discrete, continuous],
        }
    }

    /// Total number of slots across channels.
    pub fn arity(&self) -> usize {
        self.channels().iter().map(|c| c.arity()).sum()
    }

    /// The discrete channel, if present.
    pub fn discrete(&self) -> Option<&BoundedArraySpec> {
        self.channels().into_iter().find(|c| c.dtype == DType::I32)
    }

    /// The continuous channel, if present.
    pub fn continuous(&self) -> Option<&BoundedArraySpec> {
        self.channels().into_iter().find(|c| c.dtype == DType::F32)
    }
}

/// Name of the integer-valued channel.
pub const DISCRETE: &str = "discrete";
/// Name of the float-valued channel.
pub const CONTINUOUS: &str = "continuous";

/// Derive the action spec and total arity from channel bounds.
///
/// A `PerSlot` channel with no pairs contributes nothing and is omitted.
///
/// # Errors
///
/// [`ConfigError::InvalidBounds`] if any slot has `min > max` or a NaN
/// bound; [`ConfigError::NoActions`] if neither channel contributes a slot.
pub fn build_action_spec(
    discrete: &ActionBounds,
    continuous: &ActionBounds,
) -> Result<(ActionSpec, usize), ConfigError> {
    discrete.validate(DISCRETE)?;
    continuous.validate(CONTINUOUS)?;

    let channel = |bounds: &ActionBounds, name: &str, dtype: DType| {
        (bounds.arity() > 0).then(|| BoundedArraySpec::from_bounds(name, dtype, &bounds.pairs()))
    };
    let discrete = channel(discrete, DISCRETE, DType::I32);
    let continuous = channel(continuous, CONTINUOUS, DType::F32);

    let spec = match (discrete, continuous) {
        (Some(discrete), Some(continuous)) => ActionSpec::Pair {
            discrete,
            continuous,
        },
        (Some(only), None) | (None, Some(only)) => ActionSpec::Single(only),
        (None, None) => return Err(ConfigError::NoActions),
    };
    let arity = spec.arity();
    Ok((spec, arity))
}
