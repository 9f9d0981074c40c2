//! Episode step types and the [`TimeStep`] returned to RL callers.

use std::fmt;

use crate::array::Observations;
use crate::reward::Reward;

/// Position of a [`TimeStep`] within its episode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StepType {
    /// First step of an episode; carries no reward or discount.
    First,
    /// Any step after the first that did not end the episode.
    Mid,
    /// The step that ended the episode.
    Last,
}

impl StepType {
    /// Whether this is [`StepType::First`].
    pub fn is_first(self) -> bool {
        self == Self::First
    }

    /// Whether this is [`StepType::Mid`].
    pub fn is_mid(self) -> bool {
        self == Self::Mid
    }

    /// Whether this is [`StepType::Last`].
    pub fn is_last(self) -> bool {
        self == Self::Last
    }
}

impl fmt::Display for StepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => write!(f, "FIRST"),
            Self::Mid => write!(f, "MID"),
            Self::Last => write!(f, "LAST"),
        }
    }
}

/// One transition as seen by an RL agent.
///
/// `reward` and `discount` are `None` exactly when `step_type` is
/// [`StepType::First`].
#[derive(Clone, Debug, PartialEq)]
pub struct TimeStep {
    /// Position within the episode.
    pub step_type: StepType,
    /// Reward for the action that led here.
    pub reward: Option<Reward>,
    /// Discount for the transition that led here.
    pub discount: Option<f64>,
    /// Distilled observation, keyed by name.
    pub observation: Observations,
}

impl TimeStep {
    /// Whether this step starts an episode.
    pub fn first(&self) -> bool {
        self.step_type.is_first()
    }

    /// Whether this step is mid-episode.
    pub fn mid(&self) -> bool {
        self.step_type.is_mid()
    }

    /// Whether this step ends an episode.
    pub fn last(&self) -> bool {
        self.step_type.is_last()
    }
}
