use crate::character::{Ability, AbilityScores, EquipmentItem, SavingThrows, Skill, SkillProficiencies, Weapon};

/// Ability modifier = floor((score - 10) / 2) for integer scores.
pub fn ability_modifier(score: i32) -> i32 {
    // `div_euclid` with positive divisor matches mathematical floor division.
    (score - 10).div_euclid(2)
}

/// Skill modifier: governing ability's modifier, plus proficiency bonus when proficient.
pub fn skill_modifier(
    skills: &SkillProficiencies,
    scores: &AbilityScores,
    proficiency_bonus: i32,
    skill: Skill,
) -> i32 {
    let base = scores.modifier(skill.ability());
    if skills.get(skill) {
        base + proficiency_bonus
    } else {
        base
    }
}

/// Saving-throw modifier: same rule as skills, keyed by ability.
pub fn saving_throw_modifier(
    saving_throws: &SavingThrows,
    scores: &AbilityScores,
    proficiency_bonus: i32,
    ability: Ability,
) -> i32 {
    let base = scores.modifier(ability);
    if saving_throws.get(ability) {
        base + proficiency_bonus
    } else {
        base
    }
}

/// Total to-hit bonus: ability modifier + proficiency (if proficient) + the weapon's flat bonus.
pub fn attack_bonus(weapon: &Weapon, scores: &AbilityScores, proficiency_bonus: i32) -> i32 {
    let proficiency = if weapon.is_proficient {
        proficiency_bonus
    } else {
        0
    };
    scores.modifier(weapon.ability_score) + proficiency + weapon.attack_bonus
}

/// Damage bonus: ability modifier + the weapon's flat bonus. Proficiency never applies.
pub fn damage_bonus(weapon: &Weapon, scores: &AbilityScores) -> i32 {
    scores.modifier(weapon.ability_score) + weapon.damage_bonus
}

/// Sum of `weight * quantity` over all equipment entries.
pub fn total_carried_weight(equipment: &[EquipmentItem]) -> f64 {
    equipment
        .iter()
        .map(|item| item.weight * item.quantity as f64)
        .sum()
}
