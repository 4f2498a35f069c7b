//! Disbursement plan: which notes leave the machine for one withdrawal.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use cashpoint_core::ValueObject;

use crate::config::Denomination;

/// Denomination → number of notes to pay out.
///
/// Only denominations with a positive count are stored, so two plans paying
/// out the same notes always compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Disbursement {
    notes: BTreeMap<Denomination, u32>,
}

impl ValueObject for Disbursement {}

impl Disbursement {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` notes of `denomination` to the plan.
    pub fn add(&mut self, denomination: Denomination, count: u32) {
        if count == 0 {
            return;
        }
        *self.notes.entry(denomination).or_insert(0) += count;
    }

    pub fn count_of(&self, denomination: Denomination) -> u32 {
        self.notes.get(&denomination).copied().unwrap_or(0)
    }

    /// Face value paid out.
    pub fn total(&self) -> u64 {
        self.notes
            .iter()
            .map(|(d, c)| u64::from(*d) * u64::from(*c))
            .sum()
    }

    pub fn note_count(&self) -> u64 {
        self.notes.values().map(|c| u64::from(*c)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// (denomination, count) pairs, ascending by denomination.
    pub fn iter(&self) -> impl Iterator<Item = (Denomination, u32)> + '_ {
        self.notes.iter().map(|(d, c)| (*d, *c))
    }
}

impl FromIterator<(Denomination, u32)> for Disbursement {
    fn from_iter<T: IntoIterator<Item = (Denomination, u32)>>(iter: T) -> Self {
        let mut plan = Self::new();
        for (d, c) in iter {
            plan.add(d, c);
        }
        plan
    }
}

impl core::fmt::Display for Disbursement {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write_note_map(f, self.iter())
    }
}

/// `{5=2, 10=1}`
pub(crate) fn write_note_map(
    f: &mut core::fmt::Formatter<'_>,
    notes: impl Iterator<Item = (Denomination, u32)>,
) -> core::fmt::Result {
    f.write_str("{")?;
    for (idx, (d, c)) in notes.enumerate() {
        if idx > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{d}={c}")?;
    }
    f.write_str("}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_counts_are_not_stored() {
        let plan: Disbursement = [(5, 0), (20, 2)].into_iter().collect();
        assert_eq!(plan, [(20, 2)].into_iter().collect());
        assert_eq!(plan.count_of(5), 0);
    }

    #[test]
    fn totals_value_and_notes() {
        let plan: Disbursement = [(50, 4), (20, 2), (5, 1)].into_iter().collect();
        assert_eq!(plan.total(), 245);
        assert_eq!(plan.note_count(), 7);
        assert_eq!(plan.to_string(), "{5=1, 20=2, 50=4}");
    }

    #[test]
    fn serializes_as_plain_map() {
        let plan: Disbursement = [(5, 2), (10, 1)].into_iter().collect();
        assert_eq!(serde_json::to_string(&plan).unwrap(), r#"{"5":2,"10":1}"#);
    }
}
