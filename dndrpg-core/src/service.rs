//! Character management service: creation, CRUD, and check rolls.
//!
//! Owns the store, the race bonus resolver, and the starting hit point
//! rule. Creation persists the base character first, then fetches racial
//! bonuses and persists the bonus update as one full replacement; if the
//! reference data is unreachable the character stays valid with zero
//! bonuses and the failure is reported as a warning, not an error.

use crate::character::{
    Ability, AbilityScores, Character, CharacterClass, CharacterId, CharacterRace, FlatHitPoints,
    HitPointRule, DEFAULT_STARTING_HP,
};
use crate::checks::{self, CheckError, CheckResult};
use crate::races::{RaceBonusResolver, RaceDataError, RaceDataSource};
use crate::store::{CharacterStore, StoreError};
use thiserror::Error;
use tracing::warn;

/// Errors from character creation.
#[derive(Debug, Error)]
pub enum CreateError {
    #[error("Character name must not be empty")]
    InvalidName,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A freshly created character.
///
/// `bonus_failure` carries the race-data error when racial bonuses could
/// not be applied; the character itself is persisted and valid either way.
#[derive(Debug)]
pub struct CreatedCharacter {
    pub character: Character,
    pub bonus_failure: Option<RaceDataError>,
}

/// Character management facade over the store and the reference data.
pub struct CharacterService {
    store: Box<dyn CharacterStore>,
    races: RaceBonusResolver,
    hp_rule: Box<dyn HitPointRule>,
}

impl CharacterService {
    pub fn new(store: Box<dyn CharacterStore>, race_source: Box<dyn RaceDataSource>) -> Self {
        Self {
            store,
            races: RaceBonusResolver::new(race_source),
            hp_rule: Box::new(FlatHitPoints(DEFAULT_STARTING_HP)),
        }
    }

    /// Replace the starting hit point rule.
    pub fn with_hit_point_rule(mut self, rule: Box<dyn HitPointRule>) -> Self {
        self.hp_rule = rule;
        self
    }

    /// Create and persist a character from its base scores.
    ///
    /// The name is trimmed and must be non-empty; validation failures
    /// never reach the store. Any bonuses already present on the base
    /// scores are overwritten by the fetched racial bonuses.
    pub async fn create_character(
        &self,
        name: &str,
        class: CharacterClass,
        race: CharacterRace,
        base_scores: AbilityScores,
    ) -> Result<CreatedCharacter, CreateError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CreateError::InvalidName);
        }

        let max_hp = self.hp_rule.starting_hp(class, &base_scores);
        let character = Character::new(name, class, race, base_scores, max_hp);
        let mut character = self.store.create(character).await?;

        let bonus_failure = match self.races.ability_bonuses(race).await {
            Ok(bonuses) => {
                character.ability_scores.apply_bonuses(&bonuses);
                if self.store.update(character.clone()).await?.is_none() {
                    warn!(id = %character.id, "character vanished between create and bonus update");
                }
                None
            }
            Err(e) => {
                warn!(race = %race, error = %e, "creating character without racial bonuses");
                Some(e)
            }
        };

        Ok(CreatedCharacter {
            character,
            bonus_failure,
        })
    }

    pub async fn get_character(&self, id: CharacterId) -> Result<Option<Character>, StoreError> {
        self.store.get(id).await
    }

    pub async fn get_all_characters(&self) -> Result<Vec<Character>, StoreError> {
        self.store.get_all().await
    }

    pub async fn update_character(
        &self,
        character: Character,
    ) -> Result<Option<Character>, StoreError> {
        self.store.update(character).await
    }

    pub async fn delete_character(&self, id: CharacterId) -> Result<bool, StoreError> {
        self.store.delete(id).await
    }

    /// Roll a d20 ability check for a character.
    pub fn ability_check(&self, character: &Character, ability: Ability) -> CheckResult {
        checks::ability_check(&mut rand::thread_rng(), character, ability)
    }

    /// Roll a d20 skill check against a stored skill value.
    pub fn skill_check(
        &self,
        character: &Character,
        skill: &str,
    ) -> Result<CheckResult, CheckError> {
        checks::skill_check(&mut rand::thread_rng(), character, skill)
    }

    /// Roll a d20 saving throw for a character.
    pub fn saving_throw(&self, character: &Character, ability: Ability) -> CheckResult {
        checks::saving_throw(&mut rand::thread_rng(), character, ability)
    }
}
