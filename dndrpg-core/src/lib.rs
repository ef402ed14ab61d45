//! D&D 5e character manager engine.
//!
//! This crate provides:
//! - Ability score generation (4d6-drop-lowest rolls and 27-point buy)
//! - Racial ability bonuses fetched from the public reference API
//! - Character creation and persistence
//! - d20 ability, skill, and saving throw checks
//!
//! # Quick Start
//!
//! ```ignore
//! use dndrpg_core::{
//!     AbilityScoreGenerator, CharacterClass, CharacterRace, CharacterService,
//!     JsonFileStore, Rolled,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let service = CharacterService::new(
//!         Box::new(JsonFileStore::new("characters")),
//!         Box::new(dnd5eapi::Client::new()),
//!     );
//!
//!     let scores = Rolled::new(rand::thread_rng()).generate()?;
//!     let created = service
//!         .create_character("Aria", CharacterClass::Rogue, CharacterRace::Elf, scores)
//!         .await?;
//!
//!     println!("{} created", created.character.name);
//!     Ok(())
//! }
//! ```

pub mod character;
pub mod checks;
pub mod dice;
pub mod generate;
pub mod races;
pub mod service;
pub mod store;

// Primary public API
pub use character::{
    Ability, AbilityScore, AbilityScores, Character, CharacterClass, CharacterId, CharacterRace,
    FlatHitPoints, HitPointRule, HitPoints, SkillEntry, DEFAULT_STARTING_HP,
};
pub use checks::{CheckError, CheckResult};
pub use generate::{
    point_buy_cost, AbilityScoreGenerator, GenerateError, PointBuy, PointBuyError, Rolled,
    POINT_BUY_BUDGET, POINT_BUY_MAX, POINT_BUY_MIN,
};
pub use races::{RaceBonusResolver, RaceDataError, RaceDataSource};
pub use service::{CharacterService, CreateError, CreatedCharacter};
pub use store::{CharacterStore, JsonFileStore, MemoryStore, StoreError};
