//! Character entity - the player's RPG avatar.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::ids::CharacterId;
use crate::value_objects::{AbilityScores, Attribute, Inventory};

/// Upper bound on an inline avatar image (data URL), 5 MB.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// XP needed to leave a level: `level * XP_PER_LEVEL`.
const XP_PER_LEVEL: i32 = 100;

/// A player character: six abilities, derived HP, cumulative XP and level,
/// plus the loot inventory accumulated through adventures.
#[derive(Debug, Clone)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub level: i32,
    pub current_xp: i32,
    pub current_hp: i32,
    pub max_hp: i32,
    pub image_data: Option<String>,
    pub abilities: AbilityScores,
    pub inventory: Inventory,
}

/// Outcome of an HP mutation, with the clamped result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HpChange {
    pub previous_hp: i32,
    pub current_hp: i32,
    pub max_hp: i32,
    pub requested: i32,
    pub applied: i32,
}

/// Outcome of an XP award, including any level-ups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpGain {
    pub previous_xp: i32,
    pub current_xp: i32,
    pub previous_level: i32,
    pub current_level: i32,
}

impl XpGain {
    pub fn leveled_up(&self) -> bool {
        self.current_level > self.previous_level
    }

    pub fn levels_gained(&self) -> i32 {
        self.current_level - self.previous_level
    }
}

impl Character {
    /// Create a level-1 character. Max HP derives from constitution
    /// (10 + base bonus, floor 1) and the character starts at full health.
    pub fn new(name: impl Into<String>, abilities: AbilityScores) -> Result<Self, DomainError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("Character name cannot be empty"));
        }

        let max_hp = (10 + abilities.constitution.base_bonus()).max(1);
        Ok(Self {
            id: CharacterId::new(),
            name,
            level: 1,
            current_xp: 0,
            current_hp: max_hp,
            max_hp,
            image_data: None,
            abilities,
            inventory: Inventory::new(),
        })
    }

    /// Attach an avatar image after validating the payload.
    pub fn with_image(mut self, image_data: String) -> Result<Self, DomainError> {
        Self::validate_image_data(&image_data)?;
        self.image_data = Some(image_data);
        Ok(self)
    }

    /// Check an inline avatar payload: must be a `data:image/` URL of at
    /// most [`MAX_IMAGE_BYTES`].
    pub fn validate_image_data(image_data: &str) -> Result<(), DomainError> {
        if !image_data.starts_with("data:image/") {
            return Err(DomainError::validation(
                "Image must be a valid data URL".to_string(),
            ));
        }
        if image_data.len() > MAX_IMAGE_BYTES {
            return Err(DomainError::validation(
                "Image file too large (max 5MB)".to_string(),
            ));
        }
        Ok(())
    }

    /// Apply an HP delta, clamping to `0..=max_hp`.
    pub fn apply_hp_change(&mut self, delta: i32) -> HpChange {
        let previous = self.current_hp;
        self.current_hp = (self.current_hp + delta).clamp(0, self.max_hp);
        HpChange {
            previous_hp: previous,
            current_hp: self.current_hp,
            max_hp: self.max_hp,
            requested: delta,
            applied: self.current_hp - previous,
        }
    }

    /// Award XP and level up while the cumulative total clears each
    /// threshold (`level * 100`). XP is never reset on level-up.
    pub fn gain_xp(&mut self, xp: i32) -> XpGain {
        let previous_xp = self.current_xp;
        let previous_level = self.level;

        self.current_xp += xp.max(0);
        while self.current_xp >= self.level * XP_PER_LEVEL {
            self.level += 1;
        }

        XpGain {
            previous_xp,
            current_xp: self.current_xp,
            previous_level,
            current_level: self.level,
        }
    }

    /// Credit habit points toward one ability.
    pub fn add_habit_points(&mut self, attribute: Attribute, delta: i32) {
        self.abilities.get_mut(attribute).add_habit_points(delta);
    }

    /// A character must be conscious to start an adventure.
    pub fn can_adventure(&self) -> bool {
        self.current_hp > 0
    }
}

/// Compact listing row for a character the user owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterSummary {
    pub id: CharacterId,
    pub name: String,
    pub level: i32,
    pub current_xp: i32,
    pub image_data: Option<String>,
}
