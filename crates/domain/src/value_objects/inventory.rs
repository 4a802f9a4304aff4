//! Character inventory - item type counters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Loot inventory as a map of item type to quantity.
///
/// A BTreeMap keeps serialized output stable for storage round-trips.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory(BTreeMap<String, i64>);

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add quantity for an item type, returning the new total.
    pub fn add(&mut self, item_type: impl Into<String>, quantity: i64) -> i64 {
        let entry = self.0.entry(item_type.into()).or_insert(0);
        *entry += quantity;
        *entry
    }

    pub fn quantity(&self, item_type: &str) -> i64 {
        self.0.get(item_type).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, i64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_accumulates_per_item_type() {
        let mut inventory = Inventory::new();
        assert_eq!(inventory.add("potion", 2), 2);
        assert_eq!(inventory.add("potion", 3), 5);
        assert_eq!(inventory.add("coins", 10), 10);
        assert_eq!(inventory.quantity("potion"), 5);
        assert_eq!(inventory.quantity("gem"), 0);
    }

    #[test]
    fn serializes_as_plain_map() {
        let mut inventory = Inventory::new();
        inventory.add("coins", 7);
        let json = serde_json::to_string(&inventory).expect("serialize");
        assert_eq!(json, r#"{"coins":7}"#);
        let back: Inventory = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, inventory);
    }
}
