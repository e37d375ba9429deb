//! Expected-damage estimation.
//!
//! Walks an action's damage shape and produces its average damage per use.
//! Reference data is uneven, so estimation never fails: anything the walker
//! cannot interpret contributes NaN (a formless action) or zero (a dangling
//! multiattack reference), and callers gate on `is_finite` before display.

use rk_dice::DiceExpr;

use crate::statblock::{Action, AttackProfile, DamageRoll};

/// Average value of a single dice expression, NaN when it does not parse.
pub fn average_damage_from_rollable(damage: &str) -> f64 {
    match DiceExpr::parse(damage) {
        Some(expr) => expr.average() as f64,
        None => f64::NAN,
    }
}

/// Average value of a damage list: plain entries sum their expression
/// averages, choose-K entries contribute the sum of their K highest
/// alternatives.
pub fn average_damage_from_damage_list(damages: &[DamageRoll]) -> f64 {
    damages
        .iter()
        .map(|roll| match roll {
            DamageRoll::Dice(dice) => average_damage_from_rollable(&dice.damage_dice),
            DamageRoll::Choose { choose, from } => sum_of_highest(
                from.iter()
                    .map(|d| average_damage_from_rollable(&d.damage_dice)),
                *choose,
            ),
        })
        .sum()
}

/// Average damage of one action.
///
/// `available` supplies the actions a multiattack may reference by name;
/// a reference that matches anything but exactly one action contributes
/// nothing.
pub fn average_damage_for_action(action: &Action, available: &[Action]) -> f64 {
    match action.profile() {
        Some(AttackProfile::Damage(damage)) => average_damage_from_damage_list(damage),
        Some(AttackProfile::Options(options)) => sum_of_highest(
            options.from.iter().map(|set| {
                set.iter()
                    .map(|attack_ref| {
                        let matches: Vec<&Action> = available
                            .iter()
                            .filter(|a| a.name.eq_ignore_ascii_case(&attack_ref.name))
                            .collect();
                        match matches.as_slice() {
                            [only] => {
                                attack_ref.count.value()
                                    * average_damage_for_action(only, available)
                            }
                            _ => 0.0,
                        }
                    })
                    .sum()
            }),
            options.choose,
        ),
        Some(AttackProfile::AttackOptions(options)) => sum_of_highest(
            options.from.iter().map(|alt| {
                alt.damage
                    .as_deref()
                    .map(average_damage_from_damage_list)
                    .unwrap_or(0.0)
            }),
            options.choose,
        ),
        None => f64::NAN,
    }
}

/// Sum the `k` highest values.
fn sum_of_highest(values: impl Iterator<Item = f64>, k: u32) -> f64 {
    let mut sorted: Vec<f64> = values.collect();
    sorted.sort_by(f64::total_cmp);
    sorted.iter().rev().take(k as usize).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::statblock::{
        ActionOptions, AttackCount, AttackOption, AttackOptions, AttackRef, AttackStyle,
        DiceDamage, ReferencedTerm,
    };

    fn term(name: &str) -> ReferencedTerm {
        ReferencedTerm {
            name: name.to_string(),
            url: format!("/api/damage-types/{}", name.to_lowercase()),
        }
    }

    fn dice(expr: &str) -> DamageRoll {
        DamageRoll::Dice(DiceDamage {
            damage_type: term("Piercing"),
            damage_dice: expr.to_string(),
        })
    }

    fn attack(name: &str, expr: &str) -> Action {
        Action {
            name: name.to_string(),
            desc: format!("Melee Weapon Attack with the {name}."),
            attack_bonus: Some(4),
            damage: Some(vec![dice(expr)]),
            usage: None,
            options: None,
            attack_options: None,
            dc: None,
        }
    }

    #[test]
    fn rollable_averages() {
        assert_eq!(average_damage_from_rollable("1d4+2"), 4.0);
        assert_eq!(average_damage_from_rollable("2d6+3"), 10.0);
        assert_eq!(average_damage_from_rollable("1d6"), 3.0);
        assert!(average_damage_from_rollable("garbage").is_nan());
    }

    #[test]
    fn damage_list_sums_entries() {
        // 1d1 averages 1, 3d4 averages 7.
        let list = vec![dice("1d1"), dice("3d4")];
        assert_eq!(average_damage_from_damage_list(&list), 8.0);
    }

    #[test]
    fn choose_takes_highest_alternatives() {
        let list = vec![DamageRoll::Choose {
            choose: 1,
            from: vec![
                DiceDamage {
                    damage_type: term("Fire"),
                    damage_dice: "1d8".to_string(), // avg 4
                },
                DiceDamage {
                    damage_type: term("Cold"),
                    damage_dice: "2d8".to_string(), // avg 9
                },
            ],
        }];
        assert_eq!(average_damage_from_damage_list(&list), 9.0);
    }

    #[test]
    fn options_multiply_counts_and_resolve_names() {
        let stab = attack("Dagger", "1d4+2"); // avg 4
        let multi = Action {
            name: "Multiattack".to_string(),
            desc: "Two dagger attacks.".to_string(),
            attack_bonus: None,
            damage: None,
            usage: None,
            options: Some(ActionOptions {
                choose: 1,
                from: vec![vec![AttackRef {
                    name: "dagger".to_string(), // matched case-insensitively
                    count: AttackCount::Number(2),
                    style: AttackStyle::Melee,
                    note: None,
                }]],
            }),
            attack_options: None,
            dc: None,
        };
        let available = vec![stab.clone(), multi.clone()];
        assert_eq!(average_damage_for_action(&multi, &available), 8.0);
    }

    #[test]
    fn dangling_reference_contributes_zero() {
        let multi = Action {
            name: "Multiattack".to_string(),
            desc: String::new(),
            attack_bonus: None,
            damage: None,
            usage: None,
            options: Some(ActionOptions {
                choose: 1,
                from: vec![vec![AttackRef {
                    name: "Ghost Blade".to_string(),
                    count: AttackCount::Number(2),
                    style: AttackStyle::Melee,
                    note: None,
                }]],
            }),
            attack_options: None,
            dc: None,
        };
        assert_eq!(average_damage_for_action(&multi, &[multi.clone()]), 0.0);
    }

    #[test]
    fn attack_options_pick_best_embedded_damage() {
        let action = Action {
            name: "Breath Weapons".to_string(),
            desc: String::new(),
            attack_bonus: None,
            damage: None,
            usage: None,
            options: None,
            attack_options: Some(AttackOptions {
                choose: 1,
                from: vec![
                    AttackOption {
                        name: "Fire Breath".to_string(),
                        dc: None,
                        damage: Some(vec![dice("2d6")]), // avg 7
                    },
                    AttackOption {
                        name: "Frost Breath".to_string(),
                        dc: None,
                        damage: Some(vec![dice("4d6")]), // avg 14
                    },
                    AttackOption {
                        name: "Sleep Breath".to_string(),
                        dc: None,
                        damage: None, // contributes 0
                    },
                ],
            }),
            dc: None,
        };
        assert_eq!(average_damage_for_action(&action, &[]), 14.0);
    }

    #[test]
    fn formless_action_is_nan() {
        let action = Action {
            name: "Keen Smell".to_string(),
            desc: "Advantage on smell checks.".to_string(),
            attack_bonus: None,
            damage: None,
            usage: None,
            options: None,
            attack_options: None,
            dc: None,
        };
        assert!(average_damage_for_action(&action, &[]).is_nan());
    }

    #[test]
    fn unparsable_dice_poison_the_sum() {
        let list = vec![dice("1d6"), dice("three dee four")];
        assert!(average_damage_from_damage_list(&list).is_nan());
    }
}
