//! Shallow-merge partial updates.
//!
//! A patch carries only the top-level fields to replace; absent fields leave
//! the target untouched. Nested sub-records are replaced whole when present,
//! never merged recursively, so a caller editing one nested field must supply
//! the full sub-record.

use serde::Deserialize;

use crate::character::{
    Ability, AbilityScores, Character, CombatStats, DamageType, EquipmentItem, Feature, HitDice,
    SavingThrows, Spell, SpellSchool, SpellSlots, SkillProficiencies, Weapon, WeaponType,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterPatch {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "class")]
    pub class_name: Option<String>,
    #[serde(default)]
    pub level: Option<i32>,
    #[serde(default)]
    pub race: Option<String>,
    #[serde(default)]
    pub background: Option<String>,
    #[serde(default)]
    pub alignment: Option<String>,
    #[serde(default)]
    pub experience_points: Option<String>,
    #[serde(default)]
    pub proficiency_bonus: Option<i32>,
    #[serde(default)]
    pub ability_scores: Option<AbilityScores>,
    #[serde(default)]
    pub saving_throws: Option<SavingThrows>,
    #[serde(default)]
    pub skills: Option<SkillProficiencies>,
    #[serde(default)]
    pub combat_stats: Option<CombatStats>,
    #[serde(default)]
    pub weapons: Option<Vec<Weapon>>,
    #[serde(default)]
    pub features: Option<Vec<Feature>>,
    #[serde(default)]
    pub equipment: Option<Vec<EquipmentItem>>,
    #[serde(default)]
    pub spells: Option<Vec<Spell>>,
    #[serde(default)]
    pub spell_slots: Option<SpellSlots>,
}

impl CharacterPatch {
    pub fn apply(self, character: &mut Character) {
        if let Some(id) = self.id {
            character.id = Some(id);
        }
        if let Some(name) = self.name {
            character.name = name;
        }
        if let Some(class_name) = self.class_name {
            character.class_name = class_name;
        }
        if let Some(level) = self.level {
            character.level = level;
        }
        if let Some(race) = self.race {
            character.race = race;
        }
        if let Some(background) = self.background {
            character.background = background;
        }
        if let Some(alignment) = self.alignment {
            character.alignment = alignment;
        }
        if let Some(experience_points) = self.experience_points {
            character.experience_points = experience_points;
        }
        if let Some(proficiency_bonus) = self.proficiency_bonus {
            character.proficiency_bonus = proficiency_bonus;
        }
        if let Some(ability_scores) = self.ability_scores {
            character.ability_scores = ability_scores;
        }
        if let Some(saving_throws) = self.saving_throws {
            character.saving_throws = saving_throws;
        }
        if let Some(skills) = self.skills {
            character.skills = skills;
        }
        if let Some(combat_stats) = self.combat_stats {
            character.combat_stats = combat_stats;
        }
        if let Some(weapons) = self.weapons {
            character.weapons = weapons;
        }
        if let Some(features) = self.features {
            character.features = features;
        }
        if let Some(equipment) = self.equipment {
            character.equipment = equipment;
        }
        if let Some(spells) = self.spells {
            character.spells = spells;
        }
        if let Some(spell_slots) = self.spell_slots {
            character.spell_slots = spell_slots;
        }
    }
}

/// A character update: either a ready-made patch, or a pure function of the
/// current character that produces one.
pub enum CharacterUpdate {
    Patch(CharacterPatch),
    With(Box<dyn FnOnce(&Character) -> CharacterPatch>),
}

impl CharacterUpdate {
    pub fn with(f: impl FnOnce(&Character) -> CharacterPatch + 'static) -> Self {
        CharacterUpdate::With(Box::new(f))
    }

    pub(crate) fn resolve(self, current: &Character) -> CharacterPatch {
        match self {
            CharacterUpdate::Patch(patch) => patch,
            CharacterUpdate::With(f) => f(current),
        }
    }
}

impl From<CharacterPatch> for CharacterUpdate {
    fn from(patch: CharacterPatch) -> Self {
        CharacterUpdate::Patch(patch)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AbilityScoresPatch {
    pub strength: Option<i32>,
    pub dexterity: Option<i32>,
    pub constitution: Option<i32>,
    pub intelligence: Option<i32>,
    pub wisdom: Option<i32>,
    pub charisma: Option<i32>,
}

impl AbilityScoresPatch {
    pub fn apply(self, scores: &mut AbilityScores) {
        for ability in Ability::ALL {
            if let Some(value) = self.get(ability) {
                scores.set(ability, value);
            }
        }
    }

    fn get(&self, ability: Ability) -> Option<i32> {
        match ability {
            Ability::Strength => self.strength,
            Ability::Dexterity => self.dexterity,
            Ability::Constitution => self.constitution,
            Ability::Intelligence => self.intelligence,
            Ability::Wisdom => self.wisdom,
            Ability::Charisma => self.charisma,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CombatStatsPatch {
    pub max_hp: Option<i32>,
    pub current_hp: Option<i32>,
    pub temporary_hp: Option<i32>,
    pub armor_class: Option<i32>,
    pub speed: Option<i32>,
    /// Replaced whole when present.
    pub hit_dice: Option<HitDice>,
}

impl CombatStatsPatch {
    pub fn apply(self, stats: &mut CombatStats) {
        if let Some(max_hp) = self.max_hp {
            stats.max_hp = max_hp;
        }
        if let Some(current_hp) = self.current_hp {
            stats.current_hp = current_hp;
        }
        if let Some(temporary_hp) = self.temporary_hp {
            stats.temporary_hp = temporary_hp;
        }
        if let Some(armor_class) = self.armor_class {
            stats.armor_class = armor_class;
        }
        if let Some(speed) = self.speed {
            stats.speed = speed;
        }
        if let Some(hit_dice) = self.hit_dice {
            stats.hit_dice = hit_dice;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct WeaponPatch {
    pub name: Option<String>,
    pub kind: Option<WeaponType>,
    pub is_proficient: Option<bool>,
    pub ability_score: Option<Ability>,
    pub attack_bonus: Option<i32>,
    pub damage_dice: Option<String>,
    pub damage_bonus: Option<i32>,
    pub damage_type: Option<DamageType>,
    pub properties: Option<Vec<String>>,
    pub range: Option<String>,
    pub notes: Option<String>,
}

impl WeaponPatch {
    pub fn apply(self, weapon: &mut Weapon) {
        if let Some(name) = self.name {
            weapon.name = name;
        }
        if let Some(kind) = self.kind {
            weapon.kind = kind;
        }
        if let Some(is_proficient) = self.is_proficient {
            weapon.is_proficient = is_proficient;
        }
        if let Some(ability_score) = self.ability_score {
            weapon.ability_score = ability_score;
        }
        if let Some(attack_bonus) = self.attack_bonus {
            weapon.attack_bonus = attack_bonus;
        }
        if let Some(damage_dice) = self.damage_dice {
            weapon.damage_dice = damage_dice;
        }
        if let Some(damage_bonus) = self.damage_bonus {
            weapon.damage_bonus = damage_bonus;
        }
        if let Some(damage_type) = self.damage_type {
            weapon.damage_type = damage_type;
        }
        if let Some(properties) = self.properties {
            weapon.properties = properties;
        }
        if let Some(range) = self.range {
            weapon.range = Some(range);
        }
        if let Some(notes) = self.notes {
            weapon.notes = Some(notes);
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FeaturePatch {
    pub name: Option<String>,
    pub source: Option<String>,
    pub description: Option<String>,
}

impl FeaturePatch {
    pub fn apply(self, feature: &mut Feature) {
        if let Some(name) = self.name {
            feature.name = name;
        }
        if let Some(source) = self.source {
            feature.source = source;
        }
        if let Some(description) = self.description {
            feature.description = description;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EquipmentPatch {
    pub name: Option<String>,
    pub kind: Option<String>,
    pub quantity: Option<i32>,
    pub weight: Option<f64>,
    pub description: Option<String>,
    pub equipped: Option<bool>,
}

impl EquipmentPatch {
    pub fn apply(self, item: &mut EquipmentItem) {
        if let Some(name) = self.name {
            item.name = name;
        }
        if let Some(kind) = self.kind {
            item.kind = kind;
        }
        if let Some(quantity) = self.quantity {
            item.quantity = quantity;
        }
        if let Some(weight) = self.weight {
            item.weight = weight;
        }
        if let Some(description) = self.description {
            item.description = description;
        }
        if let Some(equipped) = self.equipped {
            item.equipped = equipped;
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SpellPatch {
    pub name: Option<String>,
    pub level: Option<u8>,
    pub school: Option<SpellSchool>,
    pub casting_time: Option<String>,
    pub range: Option<String>,
    pub components: Option<String>,
    pub duration: Option<String>,
    pub description: Option<String>,
    pub prepared: Option<bool>,
}

impl SpellPatch {
    pub fn apply(self, spell: &mut Spell) {
        if let Some(name) = self.name {
            spell.name = name;
        }
        if let Some(level) = self.level {
            spell.level = level;
        }
        if let Some(school) = self.school {
            spell.school = school;
        }
        if let Some(casting_time) = self.casting_time {
            spell.casting_time = casting_time;
        }
        if let Some(range) = self.range {
            spell.range = range;
        }
        if let Some(components) = self.components {
            spell.components = components;
        }
        if let Some(duration) = self.duration {
            spell.duration = duration;
        }
        if let Some(description) = self.description {
            spell.description = description;
        }
        if let Some(prepared) = self.prepared {
            spell.prepared = prepared;
        }
    }
}
