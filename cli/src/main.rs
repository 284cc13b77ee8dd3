use std::{fs, path::PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand, ValueEnum};
use sheet_engine::{
    Ability, Character, CharacterStore, DamageType, FileStorage, Skill, Weapon, WeaponType,
    ability_modifier, attack_bonus, damage_bonus, saving_throw_modifier, skill_modifier,
    total_carried_weight,
};

#[derive(Copy, Clone, ValueEnum)]
enum AbilityArg {
    Str,
    Dex,
    Con,
    Int,
    Wis,
    Cha,
}

#[derive(Copy, Clone, ValueEnum)]
enum WeaponKind {
    Melee,
    Ranged,
    Spell,
}

#[derive(Subcommand)]
enum Cmd {
    /// Start a fresh sheet (the default template or a bundled pregen)
    New {
        /// Directory holding the character storage blob
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Character name override
        #[arg(long)]
        name: Option<String>,
        /// Bundled pregen to start from (e.g. "fighter", "wizard")
        #[arg(long)]
        pregen: Option<String>,
    },
    /// Print the sheet with derived modifiers
    Show {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Print the character as JSON (stdout)
    Dump {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Pretty-print JSON
        #[arg(long, default_value_t = true)]
        pretty: bool,
    },
    /// Set one ability score (Constitution adjusts hit points)
    SetAbility {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Which ability to set
        #[arg(long, value_enum)]
        ability: AbilityArg,
        /// New score (nominal range 1-30)
        #[arg(long)]
        value: i32,
    },
    /// Change level; max HP follows the hit die and CON modifier
    Level {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Target level
        #[arg(long)]
        to: i32,
    },
    /// Apply damage (negative) or healing (positive) to current HP
    Hp {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        delta: i32,
    },
    /// Set temporary hit points
    TempHp {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        #[arg(long)]
        amount: i32,
    },
    /// Add a weapon to the sheet
    AddWeapon {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        #[arg(long)]
        name: String,
        #[arg(long, value_enum, default_value_t = WeaponKind::Melee)]
        kind: WeaponKind,
        #[arg(long, value_enum, default_value_t = AbilityArg::Str)]
        ability: AbilityArg,
        /// Damage dice expression, e.g. "1d8"
        #[arg(long)]
        dice: String,
        /// Damage type name, e.g. "slashing"
        #[arg(long, default_value = "slashing")]
        damage_type: String,
        #[arg(long, default_value_t = true)]
        proficient: bool,
    },
    /// Replace the sheet with a character from a JSON or YAML file
    Import {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
        /// Path to the character file (.json or .yaml/.yml)
        #[arg(long)]
        file: PathBuf,
    },
    /// Reset the sheet to the default template
    Reset {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Parser)]
#[command(name = "sheet")]
#[command(about = "Character sheet CLI harness")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn to_ability(a: AbilityArg) -> Ability {
    match a {
        AbilityArg::Str => Ability::Strength,
        AbilityArg::Dex => Ability::Dexterity,
        AbilityArg::Con => Ability::Constitution,
        AbilityArg::Int => Ability::Intelligence,
        AbilityArg::Wis => Ability::Wisdom,
        AbilityArg::Cha => Ability::Charisma,
    }
}

fn to_weapon_type(k: WeaponKind) -> WeaponType {
    match k {
        WeaponKind::Melee => WeaponType::Melee,
        WeaponKind::Ranged => WeaponType::Ranged,
        WeaponKind::Spell => WeaponType::Spell,
    }
}

fn parse_damage_type(s: &str) -> Option<DamageType> {
    use DamageType::*;
    match s.to_lowercase().as_str() {
        "acid" => Some(Acid),
        "bludgeoning" => Some(Bludgeoning),
        "cold" => Some(Cold),
        "fire" => Some(Fire),
        "force" => Some(Force),
        "lightning" => Some(Lightning),
        "necrotic" => Some(Necrotic),
        "piercing" => Some(Piercing),
        "poison" => Some(Poison),
        "psychic" => Some(Psychic),
        "radiant" => Some(Radiant),
        "slashing" => Some(Slashing),
        "thunder" => Some(Thunder),
        _ => None,
    }
}

fn open_store(dir: &PathBuf) -> CharacterStore {
    CharacterStore::with_storage(Box::new(FileStorage::new(dir)))
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::New { dir, name, pregen } => {
            let mut character = match pregen.as_deref() {
                Some(name) => sheet_engine::content::builtin_character(name)
                    .with_context(|| format!("no bundled pregen named '{name}'"))?,
                None => Character::default(),
            };
            if let Some(name) = name {
                character.name = name;
            }
            let mut store = open_store(&dir);
            store.set_character(character);
            println!("created '{}'", store.character().name);
        }
        Cmd::Show { dir } => {
            let store = open_store(&dir);
            print_sheet(store.character());
        }
        Cmd::Dump { dir, pretty } => {
            let store = open_store(&dir);
            if pretty {
                println!("{}", serde_json::to_string_pretty(store.character())?);
            } else {
                println!("{}", serde_json::to_string(store.character())?);
            }
        }
        Cmd::SetAbility { dir, ability, value } => {
            let mut store = open_store(&dir);
            let ability = to_ability(ability);
            store.set_ability_score(ability, value);
            println!(
                "{} = {} ({:+})",
                ability.label(),
                value,
                ability_modifier(value)
            );
        }
        Cmd::Level { dir, to } => {
            let mut store = open_store(&dir);
            store.update_level(to);
            let stats = &store.character().combat_stats;
            println!(
                "level {} — HP {}/{}, hit dice {}d{}",
                to, stats.current_hp, stats.max_hp, stats.hit_dice.total, stats.hit_dice.die_type
            );
        }
        Cmd::Hp { dir, delta } => {
            let mut store = open_store(&dir);
            store.modify_hp(delta);
            let stats = &store.character().combat_stats;
            println!("HP {}/{}", stats.current_hp, stats.max_hp);
        }
        Cmd::TempHp { dir, amount } => {
            let mut store = open_store(&dir);
            store.set_temporary_hp(amount);
            println!("temp HP {}", store.character().combat_stats.temporary_hp);
        }
        Cmd::AddWeapon {
            dir,
            name,
            kind,
            ability,
            dice,
            damage_type,
            proficient,
        } => {
            let Some(damage_type) = parse_damage_type(&damage_type) else {
                bail!("unknown damage type '{damage_type}'");
            };
            let mut store = open_store(&dir);
            let id = store.add_weapon(Weapon {
                id: String::new(),
                name: name.clone(),
                kind: to_weapon_type(kind),
                is_proficient: proficient,
                ability_score: to_ability(ability),
                attack_bonus: 0,
                damage_dice: dice,
                damage_bonus: 0,
                damage_type,
                properties: Vec::new(),
                range: None,
                notes: None,
            });
            println!("added '{name}' ({id})");
        }
        Cmd::Import { dir, file } => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("failed to read character file: {}", file.display()))?;
            let character: Character = match file.extension().and_then(|e| e.to_str()) {
                Some("yaml") | Some("yml") => serde_yaml::from_str(&text)
                    .with_context(|| format!("failed to parse YAML character: {}", file.display()))?,
                _ => serde_json::from_str(&text)
                    .with_context(|| format!("failed to parse JSON character: {}", file.display()))?,
            };
            let mut store = open_store(&dir);
            store.set_character(character);
            println!("imported '{}'", store.character().name);
        }
        Cmd::Reset { dir } => {
            let mut store = open_store(&dir);
            store.reset_character();
            println!("sheet reset");
        }
    }
    Ok(())
}

fn print_sheet(character: &Character) {
    println!(
        "{} — level {} {} {} ({})",
        character.name, character.level, character.race, character.class_name, character.background
    );
    let stats = &character.combat_stats;
    println!(
        "HP {}/{} (+{} temp)  AC {}  Speed {}  Hit dice {}/{} (d{})",
        stats.current_hp,
        stats.max_hp,
        stats.temporary_hp,
        stats.armor_class,
        stats.speed,
        stats.hit_dice.total - stats.hit_dice.used,
        stats.hit_dice.total,
        stats.hit_dice.die_type
    );

    let scores = &character.ability_scores;
    let line = Ability::ALL
        .iter()
        .map(|&a| {
            format!(
                "{} {} ({:+})",
                &a.label()[..3].to_uppercase(),
                scores.get(a),
                scores.modifier(a)
            )
        })
        .collect::<Vec<_>>()
        .join("  ");
    println!("{line}");

    let saves = Ability::ALL
        .iter()
        .map(|&a| {
            let marker = if character.saving_throws.get(a) { "*" } else { "" };
            format!(
                "{} {:+}{}",
                &a.label()[..3].to_uppercase(),
                saving_throw_modifier(
                    &character.saving_throws,
                    scores,
                    character.proficiency_bonus,
                    a
                ),
                marker
            )
        })
        .collect::<Vec<_>>()
        .join("  ");
    println!("Saves: {saves}");

    let proficient: Vec<String> = Skill::ALL
        .iter()
        .filter(|&&s| character.skills.get(s))
        .map(|&s| {
            format!(
                "{} {:+}",
                s.label(),
                skill_modifier(&character.skills, scores, character.proficiency_bonus, s)
            )
        })
        .collect();
    if !proficient.is_empty() {
        println!("Proficient skills: {}", proficient.join(", "));
    }

    if !character.weapons.is_empty() {
        println!("Weapons:");
        for weapon in &character.weapons {
            println!(
                "  {} — atk {:+}, dmg {}{:+} {:?}",
                weapon.name,
                attack_bonus(weapon, scores, character.proficiency_bonus),
                weapon.damage_dice,
                damage_bonus(weapon, scores),
                weapon.damage_type
            );
        }
    }

    if !character.equipment.is_empty() {
        println!(
            "Equipment ({} lb):",
            total_carried_weight(&character.equipment)
        );
        for item in &character.equipment {
            let equipped = if item.equipped { " [equipped]" } else { "" };
            println!("  {} x{}{}", item.name, item.quantity, equipped);
        }
    }

    if !character.spells.is_empty() {
        println!("Spells:");
        for spell in &character.spells {
            let prepared = if spell.prepared { "*" } else { " " };
            println!(
                "  {}{} (L{} {:?})",
                prepared, spell.name, spell.level, spell.school
            );
        }
        let slots: Vec<String> = character
            .spell_slots
            .iter()
            .filter(|(_, slot)| slot.total > 0)
            .map(|(level, slot)| format!("L{} {}/{}", level, slot.total - slot.used, slot.total))
            .collect();
        if !slots.is_empty() {
            println!("Slots: {}", slots.join("  "));
        }
    }
}
