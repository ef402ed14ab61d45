//! Character model: abilities, scores, classes, races, and the persistent
//! character record.
//!
//! Ability scores keep the base value (from dice or point buy) separate
//! from the racial bonus; the total and the derived modifier are computed.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// ID Types
// ============================================================================

/// Unique identifier for characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub Uuid);

impl CharacterId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CharacterId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// Abilities
// ============================================================================

/// The six ability scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }

    /// Parse the three-letter index used by the reference API ("str", "dex", ...).
    pub fn from_api_index(index: &str) -> Option<Ability> {
        match index {
            "str" => Some(Ability::Strength),
            "dex" => Some(Ability::Dexterity),
            "con" => Some(Ability::Constitution),
            "int" => Some(Ability::Intelligence),
            "wis" => Some(Ability::Wisdom),
            "cha" => Some(Ability::Charisma),
            _ => None,
        }
    }

    pub fn all() -> [Ability; 6] {
        [
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One ability's score entry: the base value plus the racial bonus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScore {
    /// Base score from dice rolling (3-18) or point buy (8-15).
    pub base: u8,
    /// Racial bonus. Overwritten, never accumulated, when bonuses apply.
    pub bonus: i8,
}

impl AbilityScore {
    pub fn from_base(base: u8) -> Self {
        Self { base, bonus: 0 }
    }

    pub fn total(&self) -> i16 {
        self.base as i16 + self.bonus as i16
    }

    /// Derived modifier: floor((total - 10) / 2).
    ///
    /// `div_euclid` rounds toward negative infinity, so a total of 7
    /// yields -2 rather than the -1 truncation would give.
    pub fn modifier(&self) -> i8 {
        (self.total() - 10).div_euclid(2) as i8
    }
}

/// The full set of six ability score entries, one per ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityScores {
    pub strength: AbilityScore,
    pub dexterity: AbilityScore,
    pub constitution: AbilityScore,
    pub intelligence: AbilityScore,
    pub wisdom: AbilityScore,
    pub charisma: AbilityScore,
}

impl AbilityScores {
    /// Build a score set from six base values, with no bonuses applied.
    pub fn from_base(str: u8, dex: u8, con: u8, int: u8, wis: u8, cha: u8) -> Self {
        Self {
            strength: AbilityScore::from_base(str),
            dexterity: AbilityScore::from_base(dex),
            constitution: AbilityScore::from_base(con),
            intelligence: AbilityScore::from_base(int),
            wisdom: AbilityScore::from_base(wis),
            charisma: AbilityScore::from_base(cha),
        }
    }

    /// All six abilities at a base of 10.
    pub fn flat() -> Self {
        Self::from_base(10, 10, 10, 10, 10, 10)
    }

    pub fn get(&self, ability: Ability) -> AbilityScore {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    fn get_mut(&mut self, ability: Ability) -> &mut AbilityScore {
        match ability {
            Ability::Strength => &mut self.strength,
            Ability::Dexterity => &mut self.dexterity,
            Ability::Constitution => &mut self.constitution,
            Ability::Intelligence => &mut self.intelligence,
            Ability::Wisdom => &mut self.wisdom,
            Ability::Charisma => &mut self.charisma,
        }
    }

    pub fn set_base(&mut self, ability: Ability, base: u8) {
        self.get_mut(ability).base = base;
    }

    pub fn set_bonus(&mut self, ability: Ability, bonus: i8) {
        self.get_mut(ability).bonus = bonus;
    }

    pub fn total(&self, ability: Ability) -> i16 {
        self.get(ability).total()
    }

    pub fn modifier(&self, ability: Ability) -> i8 {
        self.get(ability).modifier()
    }

    /// Overwrite the bonus field for every ability present in the mapping.
    ///
    /// Abilities absent from the mapping are untouched, so a race with a
    /// single +2 leaves the other five entries at their existing bonus.
    /// Applying the same mapping twice is idempotent.
    pub fn apply_bonuses(&mut self, bonuses: &std::collections::BTreeMap<Ability, i8>) {
        for (&ability, &bonus) in bonuses {
            self.set_bonus(ability, bonus);
        }
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self::flat()
    }
}

// ============================================================================
// Classes and Races
// ============================================================================

/// The supported character classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
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
    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Barbarian => "Barbarian",
            CharacterClass::Bard => "Bard",
            CharacterClass::Cleric => "Cleric",
            CharacterClass::Druid => "Druid",
            CharacterClass::Fighter => "Fighter",
            CharacterClass::Monk => "Monk",
            CharacterClass::Paladin => "Paladin",
            CharacterClass::Ranger => "Ranger",
            CharacterClass::Rogue => "Rogue",
            CharacterClass::Sorcerer => "Sorcerer",
            CharacterClass::Warlock => "Warlock",
            CharacterClass::Wizard => "Wizard",
        }
    }

    pub fn all() -> &'static [CharacterClass] {
        &[
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
        ]
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The supported character races.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CharacterRace {
    Human,
    Elf,
    Dwarf,
    Halfling,
    Gnome,
    HalfElf,
    HalfOrc,
    Tiefling,
    Dragonborn,
    Orc,
    Goliath,
}

impl CharacterRace {
    pub fn name(&self) -> &'static str {
        match self {
            CharacterRace::Human => "Human",
            CharacterRace::Elf => "Elf",
            CharacterRace::Dwarf => "Dwarf",
            CharacterRace::Halfling => "Halfling",
            CharacterRace::Gnome => "Gnome",
            CharacterRace::HalfElf => "Half-Elf",
            CharacterRace::HalfOrc => "Half-Orc",
            CharacterRace::Tiefling => "Tiefling",
            CharacterRace::Dragonborn => "Dragonborn",
            CharacterRace::Orc => "Orc",
            CharacterRace::Goliath => "Goliath",
        }
    }

    /// The race's index in the reference API, where one exists.
    ///
    /// Orc and Goliath are playable here but absent from the 2014 SRD
    /// reference data, so they have no index and no fetched bonuses.
    pub fn api_index(&self) -> Option<&'static str> {
        match self {
            CharacterRace::Human => Some("human"),
            CharacterRace::Elf => Some("elf"),
            CharacterRace::Dwarf => Some("dwarf"),
            CharacterRace::Halfling => Some("halfling"),
            CharacterRace::Gnome => Some("gnome"),
            CharacterRace::HalfElf => Some("half-elf"),
            CharacterRace::HalfOrc => Some("half-orc"),
            CharacterRace::Tiefling => Some("tiefling"),
            CharacterRace::Dragonborn => Some("dragonborn"),
            CharacterRace::Orc | CharacterRace::Goliath => None,
        }
    }

    pub fn all() -> &'static [CharacterRace] {
        &[
            CharacterRace::Human,
            CharacterRace::Elf,
            CharacterRace::Dwarf,
            CharacterRace::Halfling,
            CharacterRace::Gnome,
            CharacterRace::HalfElf,
            CharacterRace::HalfOrc,
            CharacterRace::Tiefling,
            CharacterRace::Dragonborn,
            CharacterRace::Orc,
            CharacterRace::Goliath,
        ]
    }
}

impl fmt::Display for CharacterRace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// ============================================================================
// Hit Points
// ============================================================================

/// Hit points tracking. Current never exceeds maximum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitPoints {
    pub current: u16,
    pub maximum: u16,
}

impl HitPoints {
    pub fn new(maximum: u16) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }
}

/// Starting hit point computation, pluggable per campaign rules.
///
/// None of the supported creation flows implements the per-class hit-die
/// formula yet; the default is a flat placeholder.
pub trait HitPointRule: Send + Sync {
    fn starting_hp(&self, class: CharacterClass, scores: &AbilityScores) -> u16;
}

/// Flat starting hit points regardless of class or Constitution.
#[derive(Debug, Clone, Copy)]
pub struct FlatHitPoints(pub u16);

impl HitPointRule for FlatHitPoints {
    fn starting_hp(&self, _class: CharacterClass, _scores: &AbilityScores) -> u16 {
        self.0
    }
}

/// Default placeholder of 10 starting hit points.
pub const DEFAULT_STARTING_HP: u16 = 10;

// ============================================================================
// Character
// ============================================================================

/// A named skill entry with its stored check value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillEntry {
    pub name: String,
    pub value: i8,
}

/// A complete character record.
///
/// The in-memory value is a detached copy; durable state lives in the
/// character store and changes only through explicit update calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub level: u8,
    pub class: CharacterClass,
    pub race: CharacterRace,
    pub hit_points: HitPoints,
    pub ability_scores: AbilityScores,
    pub proficiencies: Vec<String>,
    pub skills: Vec<SkillEntry>,
}

impl Character {
    /// Construct a fresh level-1 character with a new identifier.
    pub fn new(
        name: impl Into<String>,
        class: CharacterClass,
        race: CharacterRace,
        ability_scores: AbilityScores,
        max_hp: u16,
    ) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            level: 1,
            class,
            race,
            hit_points: HitPoints::new(max_hp),
            ability_scores,
            proficiencies: Vec::new(),
            skills: Vec::new(),
        }
    }

    pub fn ability_modifier(&self, ability: Ability) -> i8 {
        self.ability_scores.modifier(ability)
    }

    /// Look up a skill's stored value by name (case-insensitive).
    pub fn skill_value(&self, skill: &str) -> Option<i8> {
        self.skills
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(skill))
            .map(|s| s.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_modifier_floor_semantics() {
        // (total, expected modifier); the negative boundary uses floor,
        // not truncation.
        for (total, expected) in [(7, -2), (8, -1), (9, -1), (10, 0), (11, 0), (12, 1), (18, 4)] {
            let score = AbilityScore {
                base: total as u8,
                bonus: 0,
            };
            assert_eq!(score.modifier(), expected, "total {total}");
        }
    }

    #[test]
    fn test_modifier_includes_bonus() {
        let score = AbilityScore { base: 10, bonus: 2 };
        assert_eq!(score.total(), 12);
        assert_eq!(score.modifier(), 1);
    }

    #[test]
    fn test_apply_bonuses_overwrites() {
        let mut scores = AbilityScores::flat();
        let mut bonuses = BTreeMap::new();
        bonuses.insert(Ability::Dexterity, 2);

        scores.apply_bonuses(&bonuses);
        assert_eq!(scores.total(Ability::Dexterity), 12);

        // Reapplying must not accumulate.
        scores.apply_bonuses(&bonuses);
        assert_eq!(scores.total(Ability::Dexterity), 12);
        assert_eq!(scores.total(Ability::Strength), 10);
    }

    #[test]
    fn test_from_api_index() {
        assert_eq!(Ability::from_api_index("dex"), Some(Ability::Dexterity));
        assert_eq!(Ability::from_api_index("cha"), Some(Ability::Charisma));
        assert_eq!(Ability::from_api_index("luck"), None);
    }

    #[test]
    fn test_race_api_indexes() {
        assert_eq!(CharacterRace::HalfOrc.api_index(), Some("half-orc"));
        assert_eq!(CharacterRace::Orc.api_index(), None);
        assert_eq!(CharacterRace::Goliath.api_index(), None);
    }

    #[test]
    fn test_new_character_defaults() {
        let character = Character::new(
            "Thorin",
            CharacterClass::Fighter,
            CharacterRace::Dwarf,
            AbilityScores::flat(),
            DEFAULT_STARTING_HP,
        );
        assert_eq!(character.level, 1);
        assert_eq!(character.hit_points.current, 10);
        assert_eq!(character.hit_points.maximum, 10);
        assert!(character.skills.is_empty());
    }

    #[test]
    fn test_skill_lookup_case_insensitive() {
        let mut character = Character::new(
            "Aria",
            CharacterClass::Rogue,
            CharacterRace::Elf,
            AbilityScores::flat(),
            DEFAULT_STARTING_HP,
        );
        character.skills.push(SkillEntry {
            name: "Stealth".to_string(),
            value: 5,
        });

        assert_eq!(character.skill_value("stealth"), Some(5));
        assert_eq!(character.skill_value("Arcana"), None);
    }
}
