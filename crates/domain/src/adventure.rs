//! Adventure reward validation.
//!
//! Adventure results are reported by the client after combat; every reward
//! is clamped to the caps below before any character mutation.

use serde::{Deserialize, Serialize};

/// Largest XP award a single adventure may grant.
pub const MAX_XP_PER_ADVENTURE: i32 = 500;
/// Most loot items accepted per adventure.
pub const MAX_LOOT_ITEMS: usize = 10;
/// Largest heal a single adventure may apply.
pub const MAX_HP_GAIN: i32 = 50;
/// Largest damage a single adventure may apply.
pub const MAX_HP_LOSS: i32 = 100;

/// One loot drop reported by the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootItem {
    #[serde(rename = "type")]
    pub item_type: String,
    pub quantity: i64,
}

/// Client-reported outcome of an adventure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdventureResults {
    pub hp_change: i32,
    pub xp_gained: i32,
    pub loot: Vec<LootItem>,
    pub victory: bool,
}

impl AdventureResults {
    /// Clamp every reward to its cap. Out-of-range values are adjusted,
    /// not rejected: a buggy or cheating client still gets a consistent
    /// (bounded) result.
    pub fn validated(mut self) -> Self {
        self.xp_gained = self.xp_gained.clamp(0, MAX_XP_PER_ADVENTURE);
        self.hp_change = self.hp_change.clamp(-MAX_HP_LOSS, MAX_HP_GAIN);
        self.loot.truncate(MAX_LOOT_ITEMS);
        self
    }
}
