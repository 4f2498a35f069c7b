//! Note inventory held by a machine.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::config::Denomination;
use crate::disbursement::{Disbursement, write_note_map};

/// Denomination → notes on hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Inventory {
    notes: BTreeMap<Denomination, u32>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notes of `denomination` on hand (0 if never stocked).
    pub fn count(&self, denomination: Denomination) -> u32 {
        self.notes.get(&denomination).copied().unwrap_or(0)
    }

    /// Stock `count` more notes; `None` on counter overflow.
    pub fn add(&mut self, denomination: Denomination, count: u32) -> Option<u32> {
        let slot = self.notes.entry(denomination).or_insert(0);
        *slot = slot.checked_add(count)?;
        Some(*slot)
    }

    /// Whether every note in `plan` is on hand.
    pub fn covers(&self, plan: &Disbursement) -> bool {
        plan.iter().all(|(d, c)| self.count(d) >= c)
    }

    /// Remove the notes in `plan`.
    ///
    /// The plan must have been computed against this inventory.
    pub(crate) fn dispense(&mut self, plan: &Disbursement) {
        debug_assert!(self.covers(plan), "plan exceeds inventory");
        for (d, c) in plan.iter() {
            if let Some(slot) = self.notes.get_mut(&d) {
                *slot = slot.saturating_sub(c);
            }
        }
    }

    /// Σ(denomination × count).
    pub fn total_value(&self) -> u64 {
        self.notes
            .iter()
            .map(|(d, c)| u64::from(*d) * u64::from(*c))
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        self.notes.iter().map(|(d, c)| (*d, *c))
    }
}

impl core::fmt::Display for Inventory {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write_note_map(f, self.iter())
    }
}
