//! Shared behaviour of diff result entities.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// A result entity that can report whether anything differs.
pub trait Changed {
    /// True if any observable difference was recorded.
    fn is_diff(&self) -> bool;
}

/// Accumulated contract/cosmetic signals for one result.
///
/// Signals only ever get added, so the outcome does not depend on the order in
/// which changes are discovered. A contract signal always dominates: the result
/// is cosmetic-only when a cosmetic signal was seen and no contract signal was.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    contract: bool,
    cosmetic: bool,
}

impl Classification {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark_contract(&mut self) {
        self.contract = true;
    }

    pub fn mark_cosmetic(&mut self) {
        self.cosmetic = true;
    }

    /// Record one change of the given kind.
    pub fn record(&mut self, cosmetic: bool) {
        if cosmetic {
            self.mark_cosmetic();
        } else {
            self.mark_contract();
        }
    }

    /// Fold another result's signals into this one.
    pub fn merge(&mut self, other: Self) {
        self.contract |= other.contract;
        self.cosmetic |= other.cosmetic;
    }

    #[must_use]
    pub fn has_contract_changes(&self) -> bool {
        self.contract
    }

    #[must_use]
    pub fn has_only_cosmetic_changes(&self) -> bool {
        self.cosmetic && !self.contract
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Classification", 2)?;
        state.serialize_field("has_contract_changes", &self.has_contract_changes())?;
        state.serialize_field("has_only_cosmetic_changes", &self.has_only_cosmetic_changes())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_is_not_cosmetic() {
        let c = Classification::new();
        assert!(!c.has_contract_changes());
        assert!(!c.has_only_cosmetic_changes());
    }

    #[test]
    fn test_contract_dominates_regardless_of_order() {
        let mut first = Classification::new();
        first.record(false);
        first.record(true);

        let mut second = Classification::new();
        second.record(true);
        second.record(false);

        assert_eq!(first, second);
        assert!(first.has_contract_changes());
        assert!(!first.has_only_cosmetic_changes());
    }

    #[test]
    fn test_merge() {
        let mut outer = Classification::new();
        let mut inner = Classification::new();
        inner.mark_cosmetic();
        outer.merge(inner);
        assert!(outer.has_only_cosmetic_changes());
    }

    #[test]
    fn test_serializes_verdict_fields() {
        let mut c = Classification::new();
        c.mark_cosmetic();
        let json = serde_json::to_value(c).unwrap();
        assert_eq!(json["has_contract_changes"], false);
        assert_eq!(json["has_only_cosmetic_changes"], true);
    }
}
