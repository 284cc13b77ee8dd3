use sheet_engine::content::{builtin_character, builtin_characters};
use sheet_engine::{attack_bonus, total_carried_weight};

#[test]
fn every_builtin_parses() {
    for name in builtin_characters().keys() {
        assert!(builtin_character(name).is_some(), "pregen '{name}' should parse");
    }
    assert!(builtin_character("lich").is_none());
}

#[test]
fn fighter_pregen_is_internally_consistent() {
    let fighter = builtin_character("fighter").unwrap();
    assert_eq!(fighter.class_name, "fighter");
    assert_eq!(fighter.level, 1);

    // Longsword: +3 STR, +2 proficiency.
    let longsword = fighter
        .weapons
        .iter()
        .find(|w| w.name == "Longsword")
        .unwrap();
    assert_eq!(
        attack_bonus(longsword, &fighter.ability_scores, fighter.proficiency_bonus),
        5
    );
    assert_eq!(total_carried_weight(&fighter.equipment), 60.0);
}

#[test]
fn wizard_pregen_has_first_level_slots_and_a_cantrip() {
    let wizard = builtin_character("wizard").unwrap();
    assert_eq!(wizard.spell_slots.get(1).unwrap().total, 2);
    assert!(wizard.spells.iter().any(|s| s.level == 0));
    // Slots exist for exactly levels 1-9.
    let levels: Vec<u8> = wizard.spell_slots.iter().map(|(level, _)| level).collect();
    assert_eq!(levels, (1..=9).collect::<Vec<u8>>());
}
