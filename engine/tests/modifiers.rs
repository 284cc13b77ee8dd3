use proptest::prelude::*;
use sheet_engine::{
    Ability, AbilityScores, DamageType, EquipmentItem, SavingThrows, Skill, SkillProficiencies,
    Weapon, WeaponType, ability_modifier, attack_bonus, damage_bonus, saving_throw_modifier,
    skill_modifier, total_carried_weight,
};

#[test]
fn ability_modifier_rounds_down() {
    assert_eq!(ability_modifier(1), -5);
    assert_eq!(ability_modifier(8), -1);
    assert_eq!(ability_modifier(9), -1);
    assert_eq!(ability_modifier(10), 0);
    assert_eq!(ability_modifier(11), 0);
    assert_eq!(ability_modifier(12), 1);
    assert_eq!(ability_modifier(30), 10);
}

proptest! {
    #[test]
    fn ability_modifier_matches_floor_formula(score in -50i32..=80) {
        let expected = ((score - 10) as f64 / 2.0).floor() as i32;
        prop_assert_eq!(ability_modifier(score), expected);
    }
}

#[test]
fn skill_modifier_adds_proficiency_only_when_proficient() {
    let mut scores = AbilityScores::default();
    scores.strength = 16;
    let mut skills = SkillProficiencies::default();

    assert_eq!(skill_modifier(&skills, &scores, 2, Skill::Athletics), 3);
    skills.toggle(Skill::Athletics);
    assert_eq!(skill_modifier(&skills, &scores, 2, Skill::Athletics), 5);
    // Stealth keys off dexterity, which is still 10.
    assert_eq!(skill_modifier(&skills, &scores, 2, Skill::Stealth), 0);
}

#[test]
fn saving_throw_modifier_follows_same_rule() {
    let mut scores = AbilityScores::default();
    scores.constitution = 14;
    let mut saves = SavingThrows::default();

    assert_eq!(saving_throw_modifier(&saves, &scores, 2, Ability::Constitution), 2);
    saves.toggle(Ability::Constitution);
    assert_eq!(saving_throw_modifier(&saves, &scores, 2, Ability::Constitution), 4);
    assert_eq!(saving_throw_modifier(&saves, &scores, 2, Ability::Wisdom), 0);
}

fn longsword() -> Weapon {
    Weapon {
        id: "w1".to_string(),
        name: "Longsword".to_string(),
        kind: WeaponType::Melee,
        is_proficient: true,
        ability_score: Ability::Strength,
        attack_bonus: 1,
        damage_dice: "1d8".to_string(),
        damage_bonus: 0,
        damage_type: DamageType::Slashing,
        properties: vec!["versatile".to_string()],
        range: None,
        notes: None,
    }
}

#[test]
fn weapon_bonuses_stack_ability_proficiency_and_flat() {
    let mut scores = AbilityScores::default();
    scores.strength = 16;

    let mut weapon = longsword();
    // +3 ability, +2 proficiency, +1 flat
    assert_eq!(attack_bonus(&weapon, &scores, 2), 6);
    // damage ignores proficiency
    assert_eq!(damage_bonus(&weapon, &scores), 3);

    weapon.is_proficient = false;
    assert_eq!(attack_bonus(&weapon, &scores, 2), 4);
}

#[test]
fn carried_weight_multiplies_by_quantity() {
    let item = |weight: f64, quantity: i32| EquipmentItem {
        id: String::new(),
        name: "x".to_string(),
        kind: "gear".to_string(),
        quantity,
        weight,
        description: String::new(),
        equipped: false,
    };
    let equipment = vec![item(2.0, 3), item(1.0, 1)];
    assert_eq!(total_carried_weight(&equipment), 7.0);
    assert_eq!(total_carried_weight(&[]), 0.0);
}
