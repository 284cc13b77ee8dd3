use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::modifiers::ability_modifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    pub const ALL: [Ability; 6] = [
        Ability::Strength,
        Ability::Dexterity,
        Ability::Constitution,
        Ability::Intelligence,
        Ability::Wisdom,
        Ability::Charisma,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }
}

/// The eighteen standard skills; each is governed by exactly one ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Skill {
    Acrobatics,
    AnimalHandling,
    Arcana,
    Athletics,
    Deception,
    History,
    Insight,
    Intimidation,
    Investigation,
    Medicine,
    Nature,
    Perception,
    Performance,
    Persuasion,
    Religion,
    SleightOfHand,
    Stealth,
    Survival,
}

impl Skill {
    pub const ALL: [Skill; 18] = [
        Skill::Acrobatics,
        Skill::AnimalHandling,
        Skill::Arcana,
        Skill::Athletics,
        Skill::Deception,
        Skill::History,
        Skill::Insight,
        Skill::Intimidation,
        Skill::Investigation,
        Skill::Medicine,
        Skill::Nature,
        Skill::Perception,
        Skill::Performance,
        Skill::Persuasion,
        Skill::Religion,
        Skill::SleightOfHand,
        Skill::Stealth,
        Skill::Survival,
    ];

    pub fn ability(self) -> Ability {
        use Skill::*;
        match self {
            Athletics => Ability::Strength,
            Acrobatics | SleightOfHand | Stealth => Ability::Dexterity,
            Arcana | History | Investigation | Nature | Religion => Ability::Intelligence,
            AnimalHandling | Insight | Medicine | Perception | Survival => Ability::Wisdom,
            Deception | Intimidation | Performance | Persuasion => Ability::Charisma,
        }
    }

    pub fn label(self) -> &'static str {
        use Skill::*;
        match self {
            Acrobatics => "Acrobatics",
            AnimalHandling => "Animal Handling",
            Arcana => "Arcana",
            Athletics => "Athletics",
            Deception => "Deception",
            History => "History",
            Insight => "Insight",
            Intimidation => "Intimidation",
            Investigation => "Investigation",
            Medicine => "Medicine",
            Nature => "Nature",
            Perception => "Perception",
            Performance => "Performance",
            Persuasion => "Persuasion",
            Religion => "Religion",
            SleightOfHand => "Sleight of Hand",
            Stealth => "Stealth",
            Survival => "Survival",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbilityScores {
    pub strength: i32,
    pub dexterity: i32,
    pub constitution: i32,
    pub intelligence: i32,
    pub wisdom: i32,
    pub charisma: i32,
}

impl AbilityScores {
    pub fn get(&self, ability: Ability) -> i32 {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn set(&mut self, ability: Ability, value: i32) {
        match ability {
            Ability::Strength => self.strength = value,
            Ability::Dexterity => self.dexterity = value,
            Ability::Constitution => self.constitution = value,
            Ability::Intelligence => self.intelligence = value,
            Ability::Wisdom => self.wisdom = value,
            Ability::Charisma => self.charisma = value,
        }
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        ability_modifier(self.get(ability))
    }
}

impl Default for AbilityScores {
    fn default() -> Self {
        Self {
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
        }
    }
}

/// Saving-throw proficiency flags, one per ability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingThrows {
    pub strength: bool,
    pub dexterity: bool,
    pub constitution: bool,
    pub intelligence: bool,
    pub wisdom: bool,
    pub charisma: bool,
}

impl SavingThrows {
    pub fn get(&self, ability: Ability) -> bool {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }

    pub fn toggle(&mut self, ability: Ability) {
        let flag = match ability {
            Ability::Strength => &mut self.strength,
            Ability::Dexterity => &mut self.dexterity,
            Ability::Constitution => &mut self.constitution,
            Ability::Intelligence => &mut self.intelligence,
            Ability::Wisdom => &mut self.wisdom,
            Ability::Charisma => &mut self.charisma,
        };
        *flag = !*flag;
    }
}

/// Skill proficiency flags, one per skill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillProficiencies {
    pub acrobatics: bool,
    pub animal_handling: bool,
    pub arcana: bool,
    pub athletics: bool,
    pub deception: bool,
    pub history: bool,
    pub insight: bool,
    pub intimidation: bool,
    pub investigation: bool,
    pub medicine: bool,
    pub nature: bool,
    pub perception: bool,
    pub performance: bool,
    pub persuasion: bool,
    pub religion: bool,
    pub sleight_of_hand: bool,
    pub stealth: bool,
    pub survival: bool,
}

impl SkillProficiencies {
    pub fn get(&self, skill: Skill) -> bool {
        *self.flag(skill)
    }

    pub fn toggle(&mut self, skill: Skill) {
        let flag = self.flag_mut(skill);
        *flag = !*flag;
    }

    fn flag(&self, skill: Skill) -> &bool {
        use Skill::*;
        match skill {
            Acrobatics => &self.acrobatics,
            AnimalHandling => &self.animal_handling,
            Arcana => &self.arcana,
            Athletics => &self.athletics,
            Deception => &self.deception,
            History => &self.history,
            Insight => &self.insight,
            Intimidation => &self.intimidation,
            Investigation => &self.investigation,
            Medicine => &self.medicine,
            Nature => &self.nature,
            Perception => &self.perception,
            Performance => &self.performance,
            Persuasion => &self.persuasion,
            Religion => &self.religion,
            SleightOfHand => &self.sleight_of_hand,
            Stealth => &self.stealth,
            Survival => &self.survival,
        }
    }

    fn flag_mut(&mut self, skill: Skill) -> &mut bool {
        use Skill::*;
        match skill {
            Acrobatics => &mut self.acrobatics,
            AnimalHandling => &mut self.animal_handling,
            Arcana => &mut self.arcana,
            Athletics => &mut self.athletics,
            Deception => &mut self.deception,
            History => &mut self.history,
            Insight => &mut self.insight,
            Intimidation => &mut self.intimidation,
            Investigation => &mut self.investigation,
            Medicine => &mut self.medicine,
            Nature => &mut self.nature,
            Perception => &mut self.perception,
            Performance => &mut self.performance,
            Persuasion => &mut self.persuasion,
            Religion => &mut self.religion,
            SleightOfHand => &mut self.sleight_of_hand,
            Stealth => &mut self.stealth,
            Survival => &mut self.survival,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HitDice {
    pub total: i32,
    pub used: i32,
    pub die_type: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombatStats {
    pub max_hp: i32,
    pub current_hp: i32,
    pub temporary_hp: i32,
    pub armor_class: i32,
    pub speed: i32,
    pub hit_dice: HitDice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WeaponType {
    Melee,
    Ranged,
    Spell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DamageType {
    Acid,
    Bludgeoning,
    Cold,
    Fire,
    Force,
    Lightning,
    Necrotic,
    Piercing,
    Poison,
    Psychic,
    Radiant,
    Slashing,
    Thunder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Weapon {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: WeaponType,
    pub is_proficient: bool,
    /// Governing ability for attack and damage rolls.
    pub ability_score: Ability,
    /// Flat bonus beyond ability modifier and proficiency.
    pub attack_bonus: i32,
    /// Damage dice expression, e.g. "1d8".
    pub damage_dice: String,
    /// Flat bonus beyond ability modifier.
    pub damage_bonus: i32,
    pub damage_type: DamageType,
    /// Property tags, e.g. ["finesse", "light", "thrown"].
    pub properties: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feature {
    pub id: String,
    pub name: String,
    pub source: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentItem {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub quantity: i32,
    pub weight: f64,
    pub description: String,
    pub equipped: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpellSchool {
    Abjuration,
    Conjuration,
    Divination,
    Enchantment,
    Evocation,
    Illusion,
    Necromancy,
    Transmutation,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spell {
    pub id: String,
    pub name: String,
    /// 0 for cantrips, 1-9 for leveled spells.
    pub level: u8,
    pub school: SpellSchool,
    pub casting_time: String,
    pub range: String,
    pub components: String,
    pub duration: String,
    pub description: String,
    pub prepared: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SpellSlot {
    pub used: i32,
    pub total: i32,
}

/// Per-level slot counters, keyed by spell level 1-9. Cantrips have no slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpellSlots(IndexMap<u8, SpellSlot>);

impl SpellSlots {
    pub fn get(&self, level: u8) -> Option<&SpellSlot> {
        self.0.get(&level)
    }

    pub fn get_mut(&mut self, level: u8) -> Option<&mut SpellSlot> {
        self.0.get_mut(&level)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &SpellSlot)> {
        self.0.iter().map(|(level, slot)| (*level, slot))
    }
}

impl Default for SpellSlots {
    fn default() -> Self {
        Self((1..=9).map(|level| (level, SpellSlot::default())).collect())
    }
}

/// The character sheet aggregate. Mutated only through `CharacterStore` commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    /// Stable identifier, assigned lazily on first persist.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub level: i32,
    pub race: String,
    pub background: String,
    pub alignment: String,
    pub experience_points: String,
    pub proficiency_bonus: i32,
    pub ability_scores: AbilityScores,
    pub saving_throws: SavingThrows,
    pub skills: SkillProficiencies,
    pub combat_stats: CombatStats,
    pub weapons: Vec<Weapon>,
    pub features: Vec<Feature>,
    pub equipment: Vec<EquipmentItem>,
    pub spells: Vec<Spell>,
    pub spell_slots: SpellSlots,
}

impl Default for Character {
    fn default() -> Self {
        Self {
            id: None,
            name: "New Character".to_string(),
            class_name: "fighter".to_string(),
            level: 1,
            race: "human".to_string(),
            background: "soldier".to_string(),
            alignment: "true-neutral".to_string(),
            experience_points: "0".to_string(),
            proficiency_bonus: 2,
            ability_scores: AbilityScores::default(),
            saving_throws: SavingThrows::default(),
            skills: SkillProficiencies::default(),
            combat_stats: CombatStats {
                max_hp: 10,
                current_hp: 10,
                temporary_hp: 0,
                armor_class: 10,
                speed: 30,
                hit_dice: HitDice {
                    total: 1,
                    used: 0,
                    die_type: 10,
                },
            },
            weapons: Vec::new(),
            features: Vec::new(),
            equipment: Vec::new(),
            spells: Vec::new(),
            spell_slots: SpellSlots::default(),
        }
    }
}
