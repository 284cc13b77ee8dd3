use std::fs;

use sheet_engine::{
    Character, CharacterPatch, CharacterStore, FileStorage, MemoryStorage, Persister,
    SCHEMA_VERSION, STORAGE_KEY, persist::reconcile,
};

fn blob_path(dir: &std::path::Path) -> std::path::PathBuf {
    dir.join(format!("{STORAGE_KEY}.json"))
}

#[test]
fn every_mutation_mirrors_to_storage() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CharacterStore::with_storage(Box::new(FileStorage::new(dir.path())));

    store.modify_hp(-2);

    let text = fs::read_to_string(blob_path(dir.path())).unwrap();
    let blob: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(blob["version"], serde_json::json!(SCHEMA_VERSION));
    assert_eq!(blob["character"]["combatStats"]["currentHp"], serde_json::json!(8));
}

#[test]
fn first_persist_assigns_a_stable_id() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = CharacterStore::with_storage(Box::new(FileStorage::new(dir.path())));
    assert!(store.character().id.is_none());

    store.set_temporary_hp(1);
    let id = store.character().id.clone().expect("id assigned on first write");
    assert_eq!(id.len(), 16);

    // The same id keeps being written, not a fresh one per mutation.
    store.set_temporary_hp(2);
    assert_eq!(store.character().id.as_deref(), Some(id.as_str()));
}

#[test]
fn a_new_session_restores_the_persisted_character() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = CharacterStore::with_storage(Box::new(FileStorage::new(dir.path())));
        store.update_character(CharacterPatch {
            name: Some("Orsik".to_string()),
            ..Default::default()
        });
        store.update_level(4);
    }

    let restored = CharacterStore::with_storage(Box::new(FileStorage::new(dir.path())));
    assert_eq!(restored.character().name, "Orsik");
    assert_eq!(restored.character().level, 4);
    assert_eq!(restored.character().combat_stats.max_hp, 28);
    assert!(restored.character().id.is_some());
}

#[test]
fn missing_blob_keeps_the_default_template() {
    let dir = tempfile::tempdir().unwrap();
    let store = CharacterStore::with_storage(Box::new(FileStorage::new(dir.path())));
    assert_eq!(store.character(), &Character::default());
}

#[test]
fn malformed_blob_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(blob_path(dir.path()), "not json at all {{{").unwrap();
    let store = CharacterStore::with_storage(Box::new(FileStorage::new(dir.path())));
    assert_eq!(store.character(), &Character::default());
}

#[test]
fn non_object_blob_is_ignored() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(blob_path(dir.path()), "42").unwrap();
    let store = CharacterStore::with_storage(Box::new(FileStorage::new(dir.path())));
    assert_eq!(store.character(), &Character::default());
}

#[test]
fn persister_roundtrips_through_memory_storage() {
    let mut persister = Persister::new(Box::new(MemoryStorage::new()));
    let mut character = Character::default();
    character.id = Some("abcdef0123456789".to_string());
    character.name = "Mirelle".to_string();

    persister.save(&character).unwrap();
    let patch = persister.load().unwrap().expect("blob present");

    let mut restored = Character::default();
    patch.apply(&mut restored);
    assert_eq!(restored, character);
}

#[test]
fn reconcile_discards_a_foreign_characters_save() {
    let mut current = Character::default();
    current.id = Some("aaaa".to_string());
    current.name = "Current".to_string();

    let persisted = CharacterPatch {
        id: Some("bbbb".to_string()),
        name: Some("Stored".to_string()),
        level: Some(9),
        ..Default::default()
    };

    assert!(!reconcile(&mut current, persisted));
    assert_eq!(current.id.as_deref(), Some("aaaa"));
    assert_eq!(current.name, "Current");
    assert_eq!(current.level, 1);
}

#[test]
fn reconcile_merges_when_ids_agree_or_are_absent() {
    let mut current = Character::default();
    current.id = Some("aaaa".to_string());
    let persisted = CharacterPatch {
        id: Some("aaaa".to_string()),
        name: Some("Stored".to_string()),
        ..Default::default()
    };
    assert!(reconcile(&mut current, persisted));
    assert_eq!(current.name, "Stored");
    // Fields absent from the persisted record keep their current values.
    assert_eq!(current.race, "human");

    let mut fresh = Character::default();
    let persisted = CharacterPatch {
        id: Some("cccc".to_string()),
        name: Some("Adopted".to_string()),
        ..Default::default()
    };
    assert!(reconcile(&mut fresh, persisted));
    assert_eq!(fresh.id.as_deref(), Some("cccc"));
    assert_eq!(fresh.name, "Adopted");
}
