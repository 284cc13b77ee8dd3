pub mod character;
pub mod content;
pub mod id;
pub mod modifiers;
pub mod patch;
pub mod persist;
pub mod store;

pub use character::{
    Ability, AbilityScores, Character, CombatStats, DamageType, EquipmentItem, Feature, HitDice,
    SavingThrows, Skill, SkillProficiencies, Spell, SpellSchool, SpellSlot, SpellSlots, Weapon,
    WeaponType,
};
pub use modifiers::{
    ability_modifier, attack_bonus, damage_bonus, saving_throw_modifier, skill_modifier,
    total_carried_weight,
};
pub use patch::{
    AbilityScoresPatch, CharacterPatch, CharacterUpdate, CombatStatsPatch, EquipmentPatch,
    FeaturePatch, SpellPatch, WeaponPatch,
};
pub use persist::{
    FileStorage, MemoryStorage, PersistError, Persister, SCHEMA_VERSION, STORAGE_KEY,
    StorageBackend,
};
pub use store::{CharacterStore, Subscription};
