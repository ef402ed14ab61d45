//! Racial ability bonus resolution.
//!
//! Bonuses come from the external reference API. Races map to API indexes
//! through a closed table; the API keys each bonus by a three-letter
//! ability abbreviation which is translated back into [`Ability`].

use crate::character::{Ability, CharacterRace};
use async_trait::async_trait;
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::warn;

/// Errors from racial bonus resolution.
#[derive(Debug, Error)]
pub enum RaceDataError {
    #[error("Race {0} has no reference API mapping")]
    UnsupportedRace(CharacterRace),

    #[error("Race data unavailable: {0}")]
    Unavailable(String),
}

/// Read-only source of racial ability bonuses, keyed by API race index.
///
/// Returns `(abbreviation, bonus)` pairs as the reference API reports
/// them, e.g. `("dex", 2)`.
#[async_trait]
pub trait RaceDataSource: Send + Sync {
    async fn race_ability_bonuses(&self, api_index: &str)
        -> Result<Vec<(String, i8)>, RaceDataError>;
}

#[async_trait]
impl RaceDataSource for dnd5eapi::Client {
    async fn race_ability_bonuses(
        &self,
        api_index: &str,
    ) -> Result<Vec<(String, i8)>, RaceDataError> {
        let race = self
            .race(api_index)
            .await
            .map_err(|e| RaceDataError::Unavailable(e.to_string()))?;

        Ok(race
            .ability_bonuses
            .into_iter()
            .map(|b| (b.ability_score.index, b.bonus))
            .collect())
    }
}

/// Resolves a race to its ability bonus mapping.
pub struct RaceBonusResolver {
    source: Box<dyn RaceDataSource>,
}

impl RaceBonusResolver {
    pub fn new(source: Box<dyn RaceDataSource>) -> Self {
        Self { source }
    }

    /// Fetch the bonus mapping for a race.
    ///
    /// Abbreviations the reference data uses but we do not recognize are
    /// logged and skipped rather than failing the whole lookup.
    pub async fn ability_bonuses(
        &self,
        race: CharacterRace,
    ) -> Result<BTreeMap<Ability, i8>, RaceDataError> {
        let api_index = race
            .api_index()
            .ok_or(RaceDataError::UnsupportedRace(race))?;

        let entries = self.source.race_ability_bonuses(api_index).await?;

        let mut bonuses = BTreeMap::new();
        for (abbreviation, bonus) in entries {
            match Ability::from_api_index(&abbreviation.to_lowercase()) {
                Some(ability) => {
                    bonuses.insert(ability, bonus);
                }
                None => {
                    warn!(race = %race, %abbreviation, "skipping unmapped ability abbreviation");
                }
            }
        }

        Ok(bonuses)
    }
}
