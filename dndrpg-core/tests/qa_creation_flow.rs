//! End-to-end creation flow: point-buy allocation, persistence to disk,
//! racial bonuses, reload, and checks.

use async_trait::async_trait;
use dndrpg_core::{
    Ability, AbilityScoreGenerator, CharacterClass, CharacterRace, CharacterService,
    JsonFileStore, PointBuy, RaceDataError, RaceDataSource,
};

/// Reference data stand-in serving the elf's DEX +2.
struct ElfData;

#[async_trait]
impl RaceDataSource for ElfData {
    async fn race_ability_bonuses(
        &self,
        api_index: &str,
    ) -> Result<Vec<(String, i8)>, RaceDataError> {
        assert_eq!(api_index, "elf");
        Ok(vec![("dex".to_string(), 2)])
    }
}

#[tokio::test]
async fn point_buy_character_survives_round_trip() {
    let dir = tempfile::TempDir::new().expect("temp dir");
    let service = CharacterService::new(
        Box::new(JsonFileStore::new(dir.path())),
        Box::new(ElfData),
    );

    // Spend the full 27-point budget.
    let mut allocation = PointBuy::new();
    allocation.set(Ability::Dexterity, 15).expect("dex to 15");
    allocation.set(Ability::Constitution, 14).expect("con to 14");
    allocation.set(Ability::Wisdom, 14).expect("wis to 14");
    allocation.set(Ability::Intelligence, 12).expect("int to 12");
    assert_eq!(allocation.remaining(), 0);
    let scores = allocation.generate().expect("complete allocation");

    let created = service
        .create_character("Aria", CharacterClass::Rogue, CharacterRace::Elf, scores)
        .await
        .expect("creation succeeds");
    assert!(created.bonus_failure.is_none());

    // DEX 15 base + 2 racial = 17, modifier +3.
    assert_eq!(
        created.character.ability_scores.total(Ability::Dexterity),
        17
    );
    assert_eq!(created.character.ability_modifier(Ability::Dexterity), 3);

    // Reload from disk by id and compare identity: name, class, race,
    // and ability totals.
    let reloaded = service
        .get_character(created.character.id)
        .await
        .expect("store read")
        .expect("character present");

    assert_eq!(reloaded.name, "Aria");
    assert_eq!(reloaded.class, CharacterClass::Rogue);
    assert_eq!(reloaded.race, CharacterRace::Elf);
    for ability in Ability::all() {
        assert_eq!(
            reloaded.ability_scores.total(ability),
            created.character.ability_scores.total(ability),
            "{ability} total"
        );
    }

    // Checks work against the reloaded copy.
    let check = service.ability_check(&reloaded, Ability::Dexterity);
    assert_eq!(check.modifier, 3);
    assert_eq!(check.total, check.roll as i32 + 3);

    // Enumeration and deletion round out the store contract.
    assert_eq!(service.get_all_characters().await.unwrap().len(), 1);
    assert!(service.delete_character(reloaded.id).await.unwrap());
    assert!(service
        .get_character(reloaded.id)
        .await
        .unwrap()
        .is_none());
}
