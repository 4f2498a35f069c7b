//! Machine configuration: note set and withdrawal bounds.

use serde::Serialize;

use cashpoint_core::{DomainError, DomainResult};

/// Face value of a banknote, in whole currency units.
pub type Denomination = u32;

pub const DEFAULT_DENOMINATIONS: [Denomination; 4] = [5, 10, 20, 50];
pub const DEFAULT_MIN_WITHDRAWAL: u32 = 20;
pub const DEFAULT_MAX_WITHDRAWAL: u32 = 250;
pub const DEFAULT_CURRENCY_SYMBOL: &str = "£";

/// Largest accepted face value; the planner works with twice the smallest note.
pub const MAX_DENOMINATION: Denomination = Denomination::MAX / 2;

pub const ENV_DENOMINATIONS: &str = "CASHPOINT_DENOMINATIONS";
pub const ENV_MIN_WITHDRAWAL: &str = "CASHPOINT_MIN_WITHDRAWAL";
pub const ENV_MAX_WITHDRAWAL: &str = "CASHPOINT_MAX_WITHDRAWAL";

/// Validated machine configuration.
///
/// Denominations are kept sorted ascending; the first one is the "small note"
/// the planner treats specially.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MachineConfig {
    denominations: Vec<Denomination>,
    min_withdrawal: u32,
    max_withdrawal: u32,
    currency_symbol: String,
}

impl MachineConfig {
    pub fn new(
        denominations: impl IntoIterator<Item = Denomination>,
        min_withdrawal: u32,
        max_withdrawal: u32,
        currency_symbol: impl Into<String>,
    ) -> DomainResult<Self> {
        let mut denominations: Vec<Denomination> = denominations.into_iter().collect();
        if denominations.is_empty() {
            return Err(DomainError::invalid_config("at least one denomination is required"));
        }
        if denominations.contains(&0) {
            return Err(DomainError::invalid_config("denominations must be positive"));
        }
        if let Some(d) = denominations.iter().find(|d| **d > MAX_DENOMINATION) {
            return Err(DomainError::invalid_config(format!(
                "denomination {d} exceeds {MAX_DENOMINATION}"
            )));
        }
        denominations.sort_unstable();
        let before = denominations.len();
        denominations.dedup();
        if denominations.len() != before {
            return Err(DomainError::invalid_config("duplicate denomination"));
        }
        if min_withdrawal == 0 {
            return Err(DomainError::invalid_config("minimum withdrawal must be positive"));
        }
        if min_withdrawal > max_withdrawal {
            return Err(DomainError::invalid_config(format!(
                "minimum withdrawal {min_withdrawal} exceeds maximum {max_withdrawal}"
            )));
        }

        Ok(Self {
            denominations,
            min_withdrawal,
            max_withdrawal,
            currency_symbol: currency_symbol.into(),
        })
    }

    /// Read overrides from `CASHPOINT_*` environment variables.
    ///
    /// Malformed values are logged and replaced by defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let denominations = lookup(ENV_DENOMINATIONS)
            .and_then(|raw| {
                let parsed: Result<Vec<Denomination>, _> =
                    raw.split(',').map(|s| s.trim().parse::<Denomination>()).collect();
                parsed
                    .map_err(|e| {
                        tracing::warn!(var = ENV_DENOMINATIONS, value = %raw, error = %e, "ignoring malformed value");
                    })
                    .ok()
            })
            .unwrap_or_else(|| defaults.denominations.clone());

        let min_withdrawal = parse_bound(&lookup, ENV_MIN_WITHDRAWAL, defaults.min_withdrawal);
        let max_withdrawal = parse_bound(&lookup, ENV_MAX_WITHDRAWAL, defaults.max_withdrawal);

        Self::new(
            denominations,
            min_withdrawal,
            max_withdrawal,
            defaults.currency_symbol.clone(),
        )
        .unwrap_or_else(|e| {
            tracing::warn!(error = %e, "machine configuration rejected; using defaults");
            defaults
        })
    }

    /// Allowed denominations, ascending.
    pub fn denominations(&self) -> &[Denomination] {
        &self.denominations
    }

    pub fn accepts(&self, denomination: Denomination) -> bool {
        self.denominations.binary_search(&denomination).is_ok()
    }

    /// The small note that every odd-ending withdrawal needs.
    pub fn smallest_denomination(&self) -> Denomination {
        self.denominations[0]
    }

    pub fn min_withdrawal(&self) -> u32 {
        self.min_withdrawal
    }

    pub fn max_withdrawal(&self) -> u32 {
        self.max_withdrawal
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self {
            denominations: DEFAULT_DENOMINATIONS.to_vec(),
            min_withdrawal: DEFAULT_MIN_WITHDRAWAL,
            max_withdrawal: DEFAULT_MAX_WITHDRAWAL,
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
        }
    }
}

fn parse_bound(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: u32) -> u32 {
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            tracing::warn!(var = key, value = %raw, error = %e, "ignoring malformed value");
            default
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn default_matches_standard_note_set() {
        let config = MachineConfig::default();
        assert_eq!(config.denominations(), &[5, 10, 20, 50]);
        assert_eq!(config.smallest_denomination(), 5);
        assert_eq!(config.min_withdrawal(), 20);
        assert_eq!(config.max_withdrawal(), 250);
        assert!(config.accepts(20));
        assert!(!config.accepts(100));
    }

    #[test]
    fn new_sorts_denominations() {
        let config = MachineConfig::new([50, 5, 20, 10], 20, 250, "£").unwrap();
        assert_eq!(config.denominations(), &[5, 10, 20, 50]);
    }

    #[test]
    fn new_rejects_inconsistent_settings() {
        assert!(MachineConfig::new([], 20, 250, "£").is_err());
        assert!(MachineConfig::new([0, 5], 20, 250, "£").is_err());
        assert!(MachineConfig::new([5, 5, 10], 20, 250, "£").is_err());
        assert!(MachineConfig::new([5, 10], 0, 250, "£").is_err());
        assert!(matches!(
            MachineConfig::new([u32::MAX], 20, 250, "£"),
            Err(DomainError::InvalidConfig(_))
        ));
        assert!(MachineConfig::new([MAX_DENOMINATION], 20, 250, "£").is_ok());
        assert!(matches!(
            MachineConfig::new([5, 10], 300, 250, "£"),
            Err(DomainError::InvalidConfig(_))
        ));
    }

    #[test]
    fn lookup_overrides_defaults() {
        let config = MachineConfig::from_lookup(lookup_from(&[
            (ENV_DENOMINATIONS, "10, 20,100"),
            (ENV_MIN_WITHDRAWAL, "30"),
            (ENV_MAX_WITHDRAWAL, "500"),
        ]));
        assert_eq!(config.denominations(), &[10, 20, 100]);
        assert_eq!(config.min_withdrawal(), 30);
        assert_eq!(config.max_withdrawal(), 500);
    }

    #[test]
    fn malformed_values_fall_back() {
        let config = MachineConfig::from_lookup(lookup_from(&[
            (ENV_DENOMINATIONS, "5,ten"),
            (ENV_MIN_WITHDRAWAL, "lots"),
        ]));
        assert_eq!(config, MachineConfig::default());

        let inverted = MachineConfig::from_lookup(lookup_from(&[(ENV_MIN_WITHDRAWAL, "900")]));
        assert_eq!(inverted, MachineConfig::default());
    }
}
