//! Menu-driven console front end.
//!
//! Every handler prints failures and returns to the menu; only stdin/stdout
//! errors abort the program.

use dndrpg_core::{
    Ability, AbilityScoreGenerator, AbilityScores, Character, CharacterClass, CharacterRace,
    CharacterService, PointBuy, Rolled, POINT_BUY_MAX, POINT_BUY_MIN,
};
use std::io::{self, Write};

pub struct Menu {
    service: CharacterService,
}

impl Menu {
    pub fn new(service: CharacterService) -> Self {
        Self { service }
    }

    pub async fn run(&self) -> io::Result<()> {
        println!("Welcome to the D&D Character Manager!");
        println!("-------------------------------------");

        loop {
            println!("\nWhat would you like to do?");
            println!("1. Create a new character");
            println!("2. List all characters");
            println!("3. View character details");
            println!("4. Roll ability check");
            println!("5. Roll skill check");
            println!("6. Roll saving throw");
            println!("7. Delete a character");
            println!("8. Exit");

            match read_line("> ")?.as_str() {
                "1" => self.create_character().await?,
                "2" => self.list_characters().await?,
                "3" => self.view_character().await?,
                "4" => self.roll_ability_check().await?,
                "5" => self.roll_skill_check().await?,
                "6" => self.roll_saving_throw().await?,
                "7" => self.delete_character().await?,
                "8" => return Ok(()),
                _ => println!("Invalid choice. Please try again."),
            }
        }
    }

    async fn create_character(&self) -> io::Result<()> {
        println!("\n=== Character Creation ===");

        let name = read_line("Enter character name: ")?;
        let Some(&race) = choose("Available Races:", CharacterRace::all(), |r| r.name())? else {
            return Ok(());
        };
        let Some(&class) = choose("Available Classes:", CharacterClass::all(), |c| c.name())?
        else {
            return Ok(());
        };

        println!("\nAbility score method:");
        println!("1. Roll 4d6, drop the lowest die, six times");
        println!("2. Point buy (27 points, scores {POINT_BUY_MIN}-{POINT_BUY_MAX})");
        let scores = match read_line("> ")?.as_str() {
            "1" => roll_scores(),
            "2" => point_buy_scores()?,
            _ => {
                println!("Invalid choice.");
                return Ok(());
            }
        };

        match self.service.create_character(&name, class, race, scores).await {
            Ok(created) => {
                if let Some(warning) = created.bonus_failure {
                    println!("\nWarning: racial bonuses were not applied: {warning}");
                }
                print_summary(&created.character);
            }
            Err(e) => println!("Error creating character: {e}"),
        }
        Ok(())
    }

    async fn list_characters(&self) -> io::Result<()> {
        match self.service.get_all_characters().await {
            Ok(characters) if characters.is_empty() => println!("\nNo characters yet."),
            Ok(characters) => {
                println!();
                for character in characters {
                    println!(
                        "{} — level {} {} {} ({})",
                        character.name, character.level, character.race, character.class,
                        character.id
                    );
                }
            }
            Err(e) => println!("Error listing characters: {e}"),
        }
        Ok(())
    }

    async fn view_character(&self) -> io::Result<()> {
        if let Some(character) = self.select_character().await? {
            print_summary(&character);
        }
        Ok(())
    }

    async fn roll_ability_check(&self) -> io::Result<()> {
        let Some(character) = self.select_character().await? else {
            return Ok(());
        };
        let Some(&ability) = choose("Ability:", &Ability::all(), |a| a.name())? else {
            return Ok(());
        };

        let result = self.service.ability_check(&character, ability);
        println!(
            "\n{} check: rolled {} {} = {}",
            ability,
            result.roll,
            format_modifier(result.modifier),
            result.total
        );
        Ok(())
    }

    async fn roll_skill_check(&self) -> io::Result<()> {
        let Some(character) = self.select_character().await? else {
            return Ok(());
        };
        if character.skills.is_empty() {
            println!("{} has no skills recorded.", character.name);
            return Ok(());
        }

        let skill = read_line("Skill name: ")?;
        match self.service.skill_check(&character, &skill) {
            Ok(result) => println!(
                "\n{skill} check: rolled {} {} = {}",
                result.roll,
                format_modifier(result.modifier),
                result.total
            ),
            Err(e) => println!("{e}"),
        }
        Ok(())
    }

    async fn roll_saving_throw(&self) -> io::Result<()> {
        let Some(character) = self.select_character().await? else {
            return Ok(());
        };
        let Some(&ability) = choose("Ability:", &Ability::all(), |a| a.name())? else {
            return Ok(());
        };

        let result = self.service.saving_throw(&character, ability);
        println!(
            "\n{} saving throw: rolled {} {} = {}",
            ability,
            result.roll,
            format_modifier(result.modifier),
            result.total
        );
        Ok(())
    }

    async fn delete_character(&self) -> io::Result<()> {
        let Some(character) = self.select_character().await? else {
            return Ok(());
        };
        match self.service.delete_character(character.id).await {
            Ok(true) => println!("{} deleted.", character.name),
            Ok(false) => println!("{} was already gone.", character.name),
            Err(e) => println!("Error deleting character: {e}"),
        }
        Ok(())
    }

    /// Pick a stored character from a numbered list.
    async fn select_character(&self) -> io::Result<Option<Character>> {
        let characters = match self.service.get_all_characters().await {
            Ok(characters) => characters,
            Err(e) => {
                println!("Error loading characters: {e}");
                return Ok(None);
            }
        };
        if characters.is_empty() {
            println!("\nNo characters yet.");
            return Ok(None);
        }

        Ok(choose("Characters:", &characters, |c| &c.name)?.cloned())
    }
}

/// Roll base scores and show the individual dice.
fn roll_scores() -> AbilityScores {
    println!("\nRolling ability scores (4d6, drop lowest)...");
    let mut generator = Rolled::new(rand::thread_rng());
    let detailed = generator.generate_detailed();

    let mut scores = AbilityScores::flat();
    for (ability, roll) in &detailed {
        println!(
            "{}: {} (rolls: {}, {}, {}, {})",
            ability, roll.score, roll.rolls[0], roll.rolls[1], roll.rolls[2], roll.rolls[3]
        );
        scores.set_base(*ability, roll.score);
    }
    scores
}

/// Drive the point-buy allocation until the budget is spent.
fn point_buy_scores() -> io::Result<AbilityScores> {
    let mut allocation = PointBuy::new();
    println!("\n=== Point Buy ===");
    println!("Cost from 8: 9=1 10=2 11=3 12=4 13=5 14=7 15=9");

    while !allocation.is_complete() {
        println!("\n{:<14} {:>5}", "Ability", "Score");
        for ability in Ability::all() {
            println!("{:<14} {:>5}", ability.name(), allocation.score(ability));
        }
        println!("Remaining points: {}", allocation.remaining());

        let Some(&ability) = choose("Ability to modify:", &Ability::all(), |a| a.name())? else {
            continue;
        };
        let input = read_line(&format!(
            "New score for {ability} ({POINT_BUY_MIN}-{POINT_BUY_MAX}): "
        ))?;
        let Ok(new_score) = input.parse::<u8>() else {
            println!("Invalid number.");
            continue;
        };

        if let Err(e) = allocation.set(ability, new_score) {
            println!("{e}");
        }
    }

    println!("\nAbility scores assigned!");
    // The loop only exits on a fully spent budget.
    Ok(allocation
        .generate()
        .expect("complete allocation yields scores"))
}

fn print_summary(character: &Character) {
    println!("\n=== {} ===", character.name);
    println!(
        "Level {} {} {}",
        character.level, character.race, character.class
    );
    println!(
        "Hit points: {}/{}",
        character.hit_points.current, character.hit_points.maximum
    );
    println!("\n{:<14} {:>5} {:>5} {:>6} {:>4}", "Ability", "Base", "Bonus", "Total", "Mod");
    for ability in Ability::all() {
        let entry = character.ability_scores.get(ability);
        println!(
            "{:<14} {:>5} {:>5} {:>6} {:>4}",
            ability.name(),
            entry.base,
            entry.bonus,
            entry.total(),
            format_modifier(entry.modifier())
        );
    }
    if !character.skills.is_empty() {
        println!("\nSkills:");
        for skill in &character.skills {
            println!("  {} {}", skill.name, format_modifier(skill.value));
        }
    }
}

fn format_modifier(modifier: i8) -> String {
    format!("{modifier:+}")
}

/// Present a numbered list and read a selection; `None` on bad input.
fn choose<'a, T>(
    label: &str,
    items: &'a [T],
    display: impl Fn(&T) -> &str,
) -> io::Result<Option<&'a T>> {
    println!("\n{label}");
    for (i, item) in items.iter().enumerate() {
        println!("{}. {}", i + 1, display(item));
    }

    let input = read_line(&format!("Select (1-{}): ", items.len()))?;
    match input.parse::<usize>() {
        Ok(n) if (1..=items.len()).contains(&n) => Ok(Some(&items[n - 1])),
        _ => {
            println!("Invalid selection.");
            Ok(None)
        }
    }
}

fn read_line(prompt: &str) -> io::Result<String> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}
