//! The character store: sole mutable owner of one [`Character`].
//!
//! Commands run synchronously to completion; each leaves the aggregate's
//! invariants intact, notifies subscribed watchers, and mirrors the new state
//! to the attached storage backend. Mirroring is fire-and-forget: a write
//! failure is logged and the in-memory state stays authoritative.

use tracing::warn;

use crate::character::{Ability, Character, EquipmentItem, Feature, Skill, Spell, Weapon};
use crate::id::IdGen;
use crate::modifiers::ability_modifier;
use crate::patch::{
    AbilityScoresPatch, CharacterUpdate, CombatStatsPatch, EquipmentPatch, FeaturePatch,
    SpellPatch, WeaponPatch,
};
use crate::persist::{Persister, StorageBackend, reconcile};

/// Handle returned by [`CharacterStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Subscription(u64);

type Watcher = Box<dyn FnMut(&Character)>;

pub struct CharacterStore {
    character: Character,
    ids: IdGen,
    watchers: Vec<(u64, Watcher)>,
    next_watcher: u64,
    persister: Option<Persister>,
}

impl CharacterStore {
    pub fn new() -> Self {
        Self::with_character(Character::default())
    }

    pub fn with_character(character: Character) -> Self {
        Self {
            character,
            ids: IdGen::from_entropy(),
            watchers: Vec::new(),
            next_watcher: 0,
            persister: None,
        }
    }

    /// Deterministic id generation, for tests.
    pub fn seeded(seed: u64) -> Self {
        let mut store = Self::new();
        store.ids = IdGen::from_seed(seed);
        store
    }

    /// Build a store restored from `backend`, falling back to the default
    /// template when nothing (or garbage) is persisted.
    pub fn with_storage(backend: Box<dyn StorageBackend>) -> Self {
        let mut store = Self::new();
        store.attach_storage(backend);
        store
    }

    /// Restore persisted state over the current character and mirror all
    /// subsequent mutations to `backend`.
    pub fn attach_storage(&mut self, backend: Box<dyn StorageBackend>) {
        let persister = Persister::new(backend);
        match persister.load() {
            Ok(Some(persisted)) => {
                reconcile(&mut self.character, persisted);
            }
            Ok(None) => {}
            Err(err) => warn!(error = %err, "ignoring persisted character"),
        }
        self.persister = Some(persister);
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    /// Watch a projection of the character. `on_change` fires after any
    /// command that changes the selected value (compared with `PartialEq`);
    /// commands that leave the projection untouched are silent.
    pub fn subscribe<T, S, F>(&mut self, select: S, mut on_change: F) -> Subscription
    where
        T: PartialEq + 'static,
        S: Fn(&Character) -> T + 'static,
        F: FnMut(&T) + 'static,
    {
        let mut last = select(&self.character);
        let id = self.next_watcher;
        self.next_watcher += 1;
        self.watchers.push((
            id,
            Box::new(move |character| {
                let next = select(character);
                if next != last {
                    on_change(&next);
                    last = next;
                }
            }),
        ));
        Subscription(id)
    }

    pub fn unsubscribe(&mut self, subscription: Subscription) {
        self.watchers.retain(|(id, _)| *id != subscription.0);
    }

    /* ---------------- full character ---------------- */

    pub fn set_character(&mut self, character: Character) {
        self.character = character;
        self.commit();
    }

    pub fn reset_character(&mut self) {
        self.character = Character::default();
        self.commit();
    }

    pub fn update_character(&mut self, update: impl Into<CharacterUpdate>) {
        let patch = update.into().resolve(&self.character);
        patch.apply(&mut self.character);
        self.commit();
    }

    pub fn update_ability_scores(&mut self, patch: AbilityScoresPatch) {
        patch.apply(&mut self.character.ability_scores);
        self.commit();
    }

    pub fn update_combat_stats(&mut self, patch: CombatStatsPatch) {
        patch.apply(&mut self.character.combat_stats);
        self.commit();
    }

    /* ---------------- level & abilities ---------------- */

    /// Set the level, adjusting max HP by the average hit-die roll plus CON
    /// modifier per level gained or lost. Any level change is a full heal to
    /// the new maximum; hit-dice total tracks the level.
    pub fn update_level(&mut self, new_level: i32) {
        let con_mod = self.character.ability_scores.modifier(Ability::Constitution);
        let level_diff = new_level - self.character.level;
        let stats = &mut self.character.combat_stats;
        let hp_change = (stats.hit_dice.die_type / 2 + 1 + con_mod) * level_diff;

        self.character.level = new_level;
        stats.max_hp = (stats.max_hp + hp_change).max(1);
        stats.current_hp = stats.max_hp;
        stats.hit_dice.total = new_level;
        stats.hit_dice.used = stats.hit_dice.used.min(stats.hit_dice.total).max(0);
        self.commit();
    }

    /// Set one ability score. Constitution changes shift max and current HP
    /// by the modifier delta times level, each floored at 1.
    pub fn set_ability_score(&mut self, ability: Ability, value: i32) {
        if ability == Ability::Constitution {
            let old_mod = ability_modifier(self.character.ability_scores.constitution);
            let new_mod = ability_modifier(value);
            let hp_change = (new_mod - old_mod) * self.character.level;
            let stats = &mut self.character.combat_stats;
            stats.max_hp = (stats.max_hp + hp_change).max(1);
            stats.current_hp = (stats.current_hp + hp_change).max(1);
        }
        self.character.ability_scores.set(ability, value);
        self.commit();
    }

    pub fn toggle_saving_throw_proficiency(&mut self, ability: Ability) {
        self.character.saving_throws.toggle(ability);
        self.commit();
    }

    pub fn toggle_skill_proficiency(&mut self, skill: Skill) {
        self.character.skills.toggle(skill);
        self.commit();
    }

    /* ---------------- hit points & hit dice ---------------- */

    /// Apply damage (negative) or healing (positive), clamped to `[0, max]`.
    pub fn modify_hp(&mut self, delta: i32) {
        let stats = &mut self.character.combat_stats;
        stats.current_hp = (stats.current_hp + delta).clamp(0, stats.max_hp);
        self.commit();
    }

    pub fn set_temporary_hp(&mut self, amount: i32) {
        self.character.combat_stats.temporary_hp = amount.max(0);
        self.commit();
    }

    pub fn use_hit_die(&mut self) {
        let dice = &mut self.character.combat_stats.hit_dice;
        if dice.used < dice.total {
            dice.used += 1;
        }
        self.commit();
    }

    pub fn restore_hit_die(&mut self) {
        let dice = &mut self.character.combat_stats.hit_dice;
        if dice.used > 0 {
            dice.used -= 1;
        }
        self.commit();
    }

    /* ---------------- weapons ---------------- */

    /// Append a weapon under a fresh id; returns the id.
    pub fn add_weapon(&mut self, mut weapon: Weapon) -> String {
        weapon.id = self.ids.generate();
        let id = weapon.id.clone();
        self.character.weapons.push(weapon);
        self.commit();
        id
    }

    pub fn remove_weapon(&mut self, weapon_id: &str) {
        self.character.weapons.retain(|w| w.id != weapon_id);
        self.commit();
    }

    /// Merge `patch` into the weapon with the given id; no-op when absent.
    pub fn update_weapon(&mut self, weapon_id: &str, patch: WeaponPatch) {
        if let Some(weapon) = self.character.weapons.iter_mut().find(|w| w.id == weapon_id) {
            patch.apply(weapon);
        }
        self.commit();
    }

    /* ---------------- features ---------------- */

    pub fn add_feature(&mut self, mut feature: Feature) -> String {
        feature.id = self.ids.generate();
        let id = feature.id.clone();
        self.character.features.push(feature);
        self.commit();
        id
    }

    pub fn remove_feature(&mut self, feature_id: &str) {
        self.character.features.retain(|f| f.id != feature_id);
        self.commit();
    }

    pub fn update_feature(&mut self, feature_id: &str, patch: FeaturePatch) {
        if let Some(feature) = self
            .character
            .features
            .iter_mut()
            .find(|f| f.id == feature_id)
        {
            patch.apply(feature);
        }
        self.commit();
    }

    /* ---------------- equipment ---------------- */

    pub fn add_equipment(&mut self, mut item: EquipmentItem) -> String {
        item.id = self.ids.generate();
        let id = item.id.clone();
        self.character.equipment.push(item);
        self.commit();
        id
    }

    pub fn remove_equipment(&mut self, item_id: &str) {
        self.character.equipment.retain(|i| i.id != item_id);
        self.commit();
    }

    pub fn update_equipment(&mut self, item_id: &str, patch: EquipmentPatch) {
        if let Some(item) = self.character.equipment.iter_mut().find(|i| i.id == item_id) {
            patch.apply(item);
        }
        self.commit();
    }

    /// Set an item's quantity, floored at 1.
    pub fn set_equipment_quantity(&mut self, item_id: &str, quantity: i32) {
        if let Some(item) = self.character.equipment.iter_mut().find(|i| i.id == item_id) {
            item.quantity = quantity.max(1);
        }
        self.commit();
    }

    pub fn toggle_equipped(&mut self, item_id: &str) {
        if let Some(item) = self.character.equipment.iter_mut().find(|i| i.id == item_id) {
            item.equipped = !item.equipped;
        }
        self.commit();
    }

    /* ---------------- spells & slots ---------------- */

    pub fn add_spell(&mut self, mut spell: Spell) -> String {
        spell.id = self.ids.generate();
        let id = spell.id.clone();
        self.character.spells.push(spell);
        self.commit();
        id
    }

    pub fn remove_spell(&mut self, spell_id: &str) {
        self.character.spells.retain(|s| s.id != spell_id);
        self.commit();
    }

    pub fn update_spell(&mut self, spell_id: &str, patch: SpellPatch) {
        if let Some(spell) = self.character.spells.iter_mut().find(|s| s.id == spell_id) {
            patch.apply(spell);
        }
        self.commit();
    }

    pub fn toggle_spell_prepared(&mut self, spell_id: &str) {
        if let Some(spell) = self.character.spells.iter_mut().find(|s| s.id == spell_id) {
            spell.prepared = !spell.prepared;
        }
        self.commit();
    }

    /// Spend a slot of the given level, bounded by the slot's total.
    pub fn use_spell_slot(&mut self, level: u8) {
        if let Some(slot) = self.character.spell_slots.get_mut(level) {
            if slot.used < slot.total {
                slot.used += 1;
            }
        }
        self.commit();
    }

    pub fn restore_spell_slot(&mut self, level: u8) {
        if let Some(slot) = self.character.spell_slots.get_mut(level) {
            if slot.used > 0 {
                slot.used -= 1;
            }
        }
        self.commit();
    }

    /// Direct set; callers keep `used <= total` themselves.
    pub fn set_spell_slot_total(&mut self, level: u8, total: i32) {
        if let Some(slot) = self.character.spell_slots.get_mut(level) {
            slot.total = total;
        }
        self.commit();
    }

    pub fn set_spell_slot_used(&mut self, level: u8, used: i32) {
        if let Some(slot) = self.character.spell_slots.get_mut(level) {
            slot.used = used;
        }
        self.commit();
    }

    /* ---------------- internals ---------------- */

    fn commit(&mut self) {
        // An id is minted on the first persisted write, never before.
        if self.persister.is_some() && self.character.id.is_none() {
            self.character.id = Some(self.ids.generate());
        }
        for (_, watcher) in &mut self.watchers {
            watcher(&self.character);
        }
        if let Some(persister) = &mut self.persister {
            if let Err(err) = persister.save(&self.character) {
                warn!(error = %err, "failed to mirror character to storage");
            }
        }
    }
}

impl Default for CharacterStore {
    fn default() -> Self {
        Self::new()
    }
}
