//! d20 check resolution against a built character.

use crate::character::{Ability, Character};
use crate::dice::d20;
use rand::Rng;
use thiserror::Error;

/// Error from check resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckError {
    #[error("Character has no skill named \"{0}\"")]
    UnknownSkill(String),
}

/// Outcome of a single d20 check. Transient, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckResult {
    /// The raw die roll, 1-20.
    pub roll: u32,
    /// The modifier applied to the roll.
    pub modifier: i8,
    /// roll + modifier.
    pub total: i32,
}

impl CheckResult {
    fn new(roll: u32, modifier: i8) -> Self {
        Self {
            roll,
            modifier,
            total: roll as i32 + modifier as i32,
        }
    }
}

/// Roll an ability check: d20 plus the ability's modifier.
pub fn ability_check<R: Rng>(rng: &mut R, character: &Character, ability: Ability) -> CheckResult {
    CheckResult::new(d20(rng), character.ability_modifier(ability))
}

/// Roll a saving throw. Without saving-throw proficiencies this is the
/// ability modifier alone, the same arithmetic as an ability check.
pub fn saving_throw<R: Rng>(rng: &mut R, character: &Character, ability: Ability) -> CheckResult {
    ability_check(rng, character, ability)
}

/// Roll a skill check: d20 plus the skill's stored value.
pub fn skill_check<R: Rng>(
    rng: &mut R,
    character: &Character,
    skill: &str,
) -> Result<CheckResult, CheckError> {
    let value = character
        .skill_value(skill)
        .ok_or_else(|| CheckError::UnknownSkill(skill.to_string()))?;
    Ok(CheckResult::new(d20(rng), value))
}
