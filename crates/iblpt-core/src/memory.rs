//! Agent memory: an append-only record of remembered instances.
//!
//! Lookups scan the whole record. Callers go through [`Memory::of_option`] and
//! [`Memory::matching`] only, so the storage can later be bucketed by
//! (option, outcome) without touching agent logic.

use serde::{Deserialize, Serialize};

use crate::types::{Choice, Instance};

/// Outcome of the two prior instances every agent starts with.
pub const SEED_OUTCOME: f64 = 30.0;

/// Ordered, append-only sequence of instances owned by one agent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Memory {
    instances: Vec<Instance>,
}

impl Memory {
    /// A memory with no instances at all.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A memory holding the two prior instances, `(Risky, 30, 0)` and `(Safe, 30, 0)`.
    pub fn seeded() -> Self {
        Self {
            instances: vec![
                Instance::new(Choice::Risky, SEED_OUTCOME, 0),
                Instance::new(Choice::Safe, SEED_OUTCOME, 0),
            ],
        }
    }

    /// Append an instance.
    pub fn record(&mut self, instance: Instance) {
        self.instances.push(instance);
    }

    /// All instances in recording order.
    pub fn instances(&self) -> &[Instance] {
        &self.instances
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Instances of `option`, whatever their outcome.
    pub fn of_option(&self, option: Choice) -> impl Iterator<Item = &Instance> + '_ {
        self.instances.iter().filter(move |m| m.option == option)
    }

    /// Instances of `option` whose outcome equals `outcome` exactly.
    pub fn matching(&self, option: Choice, outcome: f64) -> impl Iterator<Item = &Instance> + '_ {
        self.instances
            .iter()
            .filter(move |m| m.matches(option, outcome))
    }
}
