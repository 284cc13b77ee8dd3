use std::collections::HashMap;

use crate::character::Character;

/// Pregenerated characters bundled with the engine, as raw JSON.
pub fn builtin_characters() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("fighter", include_str!("../content/characters/fighter.json")),
        ("wizard", include_str!("../content/characters/wizard.json")),
    ])
}

/// Parse a builtin by name; `None` when no such pregen exists.
pub fn builtin_character(name: &str) -> Option<Character> {
    let json = builtin_characters().get(name).copied()?;
    let character = serde_json::from_str(json)
        .unwrap_or_else(|err| panic!("builtin character '{name}' is malformed: {err}"));
    Some(character)
}
