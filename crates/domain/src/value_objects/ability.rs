//! Ability scores and habit-point bonuses.
//!
//! Each character carries six abilities. An ability has a base score
//! (1..=30) and an accumulated habit-point counter; both feed the total
//! bonus used by the adventure subsystem.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Lowest permitted base score.
pub const MIN_ABILITY_SCORE: i32 = 1;
/// Highest permitted base score.
pub const MAX_ABILITY_SCORE: i32 = 30;

/// Habit points needed per +1 bonus.
const HABIT_POINTS_PER_BONUS: i32 = 5;

/// The six character abilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Attribute {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Attribute {
    /// All six abilities, in sheet order.
    pub const ALL: [Attribute; 6] = [
        Attribute::Strength,
        Attribute::Dexterity,
        Attribute::Constitution,
        Attribute::Intelligence,
        Attribute::Wisdom,
        Attribute::Charisma,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Strength => "strength",
            Attribute::Dexterity => "dexterity",
            Attribute::Constitution => "constitution",
            Attribute::Intelligence => "intelligence",
            Attribute::Wisdom => "wisdom",
            Attribute::Charisma => "charisma",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Attribute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strength" => Ok(Attribute::Strength),
            "dexterity" => Ok(Attribute::Dexterity),
            "constitution" => Ok(Attribute::Constitution),
            "intelligence" => Ok(Attribute::Intelligence),
            "wisdom" => Ok(Attribute::Wisdom),
            "charisma" => Ok(Attribute::Charisma),
            other => Err(format!("Unknown attribute: {other}")),
        }
    }
}

/// One ability's base score plus its accumulated habit points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeScore {
    base_score: i32,
    habit_points: i32,
}

impl AttributeScore {
    /// Create a score with zero habit points. Base must be 1..=30.
    pub fn new(base_score: i32) -> Result<Self, DomainError> {
        Self::with_habit_points(base_score, 0)
    }

    /// Create a score with an existing habit-point counter (storage hydration).
    pub fn with_habit_points(base_score: i32, habit_points: i32) -> Result<Self, DomainError> {
        if !(MIN_ABILITY_SCORE..=MAX_ABILITY_SCORE).contains(&base_score) {
            return Err(DomainError::validation(format!(
                "Ability score must be between {MIN_ABILITY_SCORE} and {MAX_ABILITY_SCORE}, got {base_score}"
            )));
        }
        if habit_points < 0 {
            return Err(DomainError::validation(
                "Habit points cannot be negative".to_string(),
            ));
        }
        Ok(Self {
            base_score,
            habit_points,
        })
    }

    pub fn base_score(&self) -> i32 {
        self.base_score
    }

    pub fn habit_points(&self) -> i32 {
        self.habit_points
    }

    /// Bonus from the base score alone: floor((score - 10) / 2).
    pub fn base_bonus(&self) -> i32 {
        (self.base_score - 10).div_euclid(2)
    }

    /// Bonus from accumulated habit points: one per five points.
    pub fn habit_bonus(&self) -> i32 {
        self.habit_points / HABIT_POINTS_PER_BONUS
    }

    /// Combined bonus applied during adventures.
    pub fn total_bonus(&self) -> i32 {
        self.base_bonus() + self.habit_bonus()
    }

    /// Add habit points. Negative deltas are floored at zero.
    pub fn add_habit_points(&mut self, delta: i32) {
        self.habit_points = (self.habit_points + delta).max(0);
    }
}

/// The full six-ability sheet for a character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: AttributeScore,
    pub dexterity: AttributeScore,
    pub constitution: AttributeScore,
    pub intelligence: AttributeScore,
    pub wisdom: AttributeScore,
    pub charisma: AttributeScore,
}

impl AbilityScores {
    /// Build a sheet from six base scores, each validated to 1..=30.
    pub fn new(
        strength: i32,
        dexterity: i32,
        constitution: i32,
        intelligence: i32,
        wisdom: i32,
        charisma: i32,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            strength: AttributeScore::new(strength)?,
            dexterity: AttributeScore::new(dexterity)?,
            constitution: AttributeScore::new(constitution)?,
            intelligence: AttributeScore::new(intelligence)?,
            wisdom: AttributeScore::new(wisdom)?,
            charisma: AttributeScore::new(charisma)?,
        })
    }

    pub fn get(&self, attribute: Attribute) -> &AttributeScore {
        match attribute {
            Attribute::Strength => &self.strength,
            Attribute::Dexterity => &self.dexterity,
            Attribute::Constitution => &self.constitution,
            Attribute::Intelligence => &self.intelligence,
            Attribute::Wisdom => &self.wisdom,
            Attribute::Charisma => &self.charisma,
        }
    }

    pub fn get_mut(&mut self, attribute: Attribute) -> &mut AttributeScore {
        match attribute {
            Attribute::Strength => &mut self.strength,
            Attribute::Dexterity => &mut self.dexterity,
            Attribute::Constitution => &mut self.constitution,
            Attribute::Intelligence => &mut self.intelligence,
            Attribute::Wisdom => &mut self.wisdom,
            Attribute::Charisma => &mut self.charisma,
        }
    }

    /// Iterate the sheet in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = (Attribute, &AttributeScore)> {
        Attribute::ALL.iter().map(move |a| (*a, self.get(*a)))
    }
}
