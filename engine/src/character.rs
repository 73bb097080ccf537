use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::roll::Die;

/// D&D ability modifier = floor((score - 10) / 2) for integer scores.
pub fn ability_modifier(score: i32) -> i32 {
    // `div_euclid` with positive divisor matches mathematical floor division.
    score.saturating_sub(10).div_euclid(2)
}

/// Proficiency bonus by character level: +2 at 1-4, +3 at 5-8, and so on.
/// Levels below 1 are treated as level 1.
pub fn proficiency_bonus(level: u32) -> i32 {
    let level = i32::try_from(level.max(1)).unwrap_or(i32::MAX);
    (level - 1) / 4 + 2
}

/// Render a modifier with an explicit sign: `+3`, `+0`, `-1`.
pub fn format_modifier(modifier: i32) -> String {
    format!("{:+}", modifier)
}

/// 10 + WIS modifier, plus the proficiency bonus when proficient in Perception.
pub fn passive_perception(wisdom_score: i32, proficiency_bonus: i32, proficient: bool) -> i32 {
    let bonus = if proficient { proficiency_bonus } else { 0 };
    10i32
        .saturating_add(ability_modifier(wisdom_score))
        .saturating_add(bonus)
}

/// Unarmored level-1 AC: 10 + DEX modifier.
pub fn starting_armor_class(dexterity_score: i32) -> i32 {
    10 + ability_modifier(dexterity_score)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown class '{0}'")]
pub struct UnknownClass(pub String);

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterClass {
    Barbarian,
    Bard,
    Cleric,
    Druid,
    Fighter,
    Monk,
    Paladin,
    Ranger,
    Rogue,
    Sorcerer,
    Warlock,
    Wizard,
}

impl CharacterClass {
    pub const ALL: [CharacterClass; 12] = [
        CharacterClass::Barbarian,
        CharacterClass::Bard,
        CharacterClass::Cleric,
        CharacterClass::Druid,
        CharacterClass::Fighter,
        CharacterClass::Monk,
        CharacterClass::Paladin,
        CharacterClass::Ranger,
        CharacterClass::Rogue,
        CharacterClass::Sorcerer,
        CharacterClass::Warlock,
        CharacterClass::Wizard,
    ];

    pub fn hit_die(self) -> Die {
        use CharacterClass::*;
        match self {
            Barbarian => Die::D12,
            Fighter | Paladin | Ranger => Die::D10,
            Bard | Cleric | Druid | Monk | Rogue | Warlock => Die::D8,
            Sorcerer | Wizard => Die::D6,
        }
    }

    /// Level-1 max HP: the hit die's top face plus the CON modifier.
    pub fn starting_hit_points(self, constitution_score: i32) -> i32 {
        let top = self.hit_die().sides() as i32;
        top.saturating_add(ability_modifier(constitution_score))
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for CharacterClass {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CharacterClass::ALL
            .into_iter()
            .find(|c| c.to_string().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownClass(s.to_string()))
    }
}
