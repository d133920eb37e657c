//! Options and remembered instances.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// One of the two options offered on every trial.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Choice {
    Risky,
    Safe,
}

impl Choice {
    /// Both options, Risky first.
    pub const ALL: [Choice; 2] = [Choice::Risky, Choice::Safe];

    /// Whether this is the risky option.
    pub fn is_risky(self) -> bool {
        matches!(self, Choice::Risky)
    }
}

/// One remembered event: the option taken, the payoff observed, and the trial it happened on.
///
/// Instances are immutable once recorded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    pub option: Choice,
    pub outcome: f64,
    pub time: u32,
}

impl Instance {
    pub fn new(option: Choice, outcome: f64, time: u32) -> Self {
        Self {
            option,
            outcome,
            time,
        }
    }

    /// Whether `other` is the same remembered event type (same option, same outcome).
    ///
    /// Outcomes are compared with exact `f64` equality; outcomes are drawn from the
    /// problem's fixed payoff values, never computed.
    pub fn matches(&self, option: Choice, outcome: f64) -> bool {
        self.option == option && self.outcome == outcome
    }
}
