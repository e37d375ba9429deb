//! The SRD monster record model.
//!
//! Mirrors the reference JSON shape field for field. Only the
//! damage-bearing parts of an action are interpreted by the generator; the
//! rest is carried for display. Unknown fields in reference files are
//! ignored on read.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Creature size category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Size {
    /// Tiny (2½ ft. cube).
    Tiny,
    /// Small (5 ft. cube).
    Small,
    /// Medium (5 ft. cube).
    Medium,
    /// Large (10 ft. cube).
    Large,
    /// Huge (15 ft. cube).
    Huge,
    /// Gargantuan (20 ft. or larger).
    Gargantuan,
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tiny => write!(f, "Tiny"),
            Self::Small => write!(f, "Small"),
            Self::Medium => write!(f, "Medium"),
            Self::Large => write!(f, "Large"),
            Self::Huge => write!(f, "Huge"),
            Self::Gargantuan => write!(f, "Gargantuan"),
        }
    }
}

/// A named, linkable reference (damage type, condition, proficiency).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferencedTerm {
    /// Display name.
    pub name: String,
    /// API path of the referenced term.
    pub url: String,
}

/// A skill or saving-throw proficiency with its bonus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proficiency {
    /// Display name, e.g. `Skill: Stealth`.
    pub name: String,
    /// API path of the proficiency.
    pub url: String,
    /// The bonus value.
    pub value: i64,
}

/// A movement-mode value: either a distance string or a bare flag
/// (e.g. `"hover": true`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SpeedValue {
    /// A distance such as `"30 ft."`.
    Distance(String),
    /// A boolean marker.
    Flag(bool),
}

/// A sense value: either descriptive text or a number
/// (`passive_perception`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SenseValue {
    /// Descriptive text such as `"darkvision 60 ft."`.
    Text(String),
    /// A numeric value.
    Number(f64),
}

/// A single damage component: type plus dice expression.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceDamage {
    /// The damage type.
    pub damage_type: ReferencedTerm,
    /// The dice expression, e.g. `"1d6+3"`.
    pub damage_dice: String,
}

/// One element of an action's damage list: either plain dice or a
/// choose-K-of construct over alternative dice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DamageRoll {
    /// Plain damage dice.
    Dice(DiceDamage),
    /// Choose `choose` of the listed alternatives.
    Choose {
        /// How many alternatives apply.
        choose: u32,
        /// The alternatives.
        from: Vec<DiceDamage>,
    },
}

/// Whether a successful save halves or negates the effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SaveSuccess {
    /// Half damage on a success.
    Half,
    /// No effect on a success.
    None,
}

/// A saving-throw difficulty class attached to an action.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyClass {
    /// The ability the save uses.
    pub dc_type: ReferencedTerm,
    /// The DC to beat.
    pub dc_value: i64,
    /// What a success means.
    pub success_type: SaveSuccess,
}

/// How often a limited-use action recharges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Usage {
    /// Usable a fixed number of times per day.
    #[serde(rename = "per day")]
    PerDay {
        /// Uses per day.
        times: u32,
    },
    /// Recharges when a die roll meets a minimum.
    #[serde(rename = "recharge on roll")]
    RechargeOnRoll {
        /// The recharge die.
        dice: String,
        /// Minimum roll to recharge.
        min_value: u32,
    },
    /// Recharges after a rest.
    #[serde(rename = "recharge after rest")]
    RechargeAfterRest {
        /// Which rests recharge it.
        rest_types: Vec<String>,
    },
}

/// A count in a multiattack reference: the SRD stores both numbers and
/// number-like strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttackCount {
    /// A plain number.
    Number(u32),
    /// A number carried as text.
    Text(String),
}

impl AttackCount {
    /// The numeric value; NaN when the text is not a number, which
    /// propagates through damage estimation as the usual sentinel.
    pub fn value(&self) -> f64 {
        match self {
            Self::Number(n) => f64::from(*n),
            Self::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
        }
    }
}

/// How a referenced attack is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttackStyle {
    /// A melee attack.
    Melee,
    /// A ranged attack.
    Ranged,
    /// A non-attack ability.
    Ability,
    /// A magical effect.
    Magic,
}

/// A by-name reference to another action, used inside multiattack options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackRef {
    /// Name of the referenced action.
    pub name: String,
    /// How many times it is made.
    pub count: AttackCount,
    /// Delivery style.
    #[serde(rename = "type")]
    pub style: AttackStyle,
    /// Optional qualifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A choose-K-of construct over named option sets (multiattack).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionOptions {
    /// How many option sets apply.
    pub choose: u32,
    /// Alternative sets of attack references.
    pub from: Vec<Vec<AttackRef>>,
}

/// One alternative inside an attack-options construct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackOption {
    /// Display name.
    pub name: String,
    /// Optional save.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dc: Option<DifficultyClass>,
    /// Embedded damage list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<Vec<DamageRoll>>,
}

/// A choose-K-of construct over embedded attacks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackOptions {
    /// How many alternatives apply.
    pub choose: u32,
    /// The alternatives.
    pub from: Vec<AttackOption>,
}

/// A monster action (or legendary action).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Action {
    /// Display name.
    pub name: String,
    /// Rules text.
    pub desc: String,
    /// To-hit bonus, for attacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_bonus: Option<i64>,
    /// Plain damage list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub damage: Option<Vec<DamageRoll>>,
    /// Limited-use schedule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    /// Multiattack option sets referencing other actions by name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<ActionOptions>,
    /// Choose-K over embedded attacks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_options: Option<AttackOptions>,
    /// Saving throw attached to the action.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dc: Option<DifficultyClass>,
}

/// The three recognized damage shapes of an action, as one view.
#[derive(Debug, Clone, Copy)]
pub enum AttackProfile<'a> {
    /// A direct damage-dice list.
    Damage(&'a [DamageRoll]),
    /// Choose-K over named references to other actions.
    Options(&'a ActionOptions),
    /// Choose-K over embedded attacks.
    AttackOptions(&'a AttackOptions),
}

impl Action {
    /// Classify the action's damage shape, checking the three forms in
    /// fixed priority order. `None` means the action has no recognizable
    /// damage — estimation reports NaN for it.
    pub fn profile(&self) -> Option<AttackProfile<'_>> {
        if let Some(damage) = &self.damage {
            return Some(AttackProfile::Damage(damage));
        }
        if let Some(options) = &self.options {
            return Some(AttackProfile::Options(options));
        }
        if let Some(attack_options) = &self.attack_options {
            return Some(AttackProfile::AttackOptions(attack_options));
        }
        None
    }
}

/// A special (passive or limited-use) ability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialAbility {
    /// Display name.
    pub name: String,
    /// Rules text.
    pub desc: String,
    /// Limited-use schedule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// A full monster record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    /// Stable identifier (also the catalog filename stem).
    pub index: String,
    /// Display name.
    pub name: String,
    /// Size category.
    pub size: Size,
    /// Creature type, e.g. `humanoid`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Creature subtype, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtype: Option<String>,
    /// Alignment text.
    #[serde(default)]
    pub alignment: String,
    /// Armor class.
    pub armor_class: i64,
    /// Hit points.
    pub hit_points: i64,
    /// Hit dice expression, e.g. `"8d8+16"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hit_dice: Option<String>,
    /// Movement modes.
    #[serde(default)]
    pub speed: BTreeMap<String, SpeedValue>,
    /// Strength score.
    pub strength: i64,
    /// Dexterity score.
    pub dexterity: i64,
    /// Constitution score.
    pub constitution: i64,
    /// Intelligence score.
    pub intelligence: i64,
    /// Wisdom score.
    pub wisdom: i64,
    /// Charisma score.
    pub charisma: i64,
    /// Skill and save proficiencies.
    #[serde(default)]
    pub proficiencies: Vec<Proficiency>,
    /// Damage types the monster is vulnerable to.
    #[serde(default)]
    pub damage_vulnerabilities: Vec<String>,
    /// Damage types the monster resists.
    #[serde(default)]
    pub damage_resistances: Vec<String>,
    /// Damage types the monster ignores.
    #[serde(default)]
    pub damage_immunities: Vec<String>,
    /// Conditions the monster ignores.
    #[serde(default)]
    pub condition_immunities: Vec<ReferencedTerm>,
    /// Senses, e.g. `passive_perception`.
    #[serde(default)]
    pub senses: BTreeMap<String, SenseValue>,
    /// Languages text.
    #[serde(default)]
    pub languages: String,
    /// Challenge rating.
    pub challenge_rating: f64,
    /// API path of the record.
    #[serde(default)]
    pub url: String,
    /// Actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Action>>,
    /// Legendary actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legendary_actions: Option<Vec<Action>>,
    /// Special abilities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_abilities: Option<Vec<SpecialAbility>>,
    /// Freeform note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SNAKE_JSON: &str = r#"{
        "index": "flying-snake",
        "name": "Flying Snake",
        "size": "Tiny",
        "type": "beast",
        "subtype": null,
        "alignment": "unaligned",
        "armor_class": 14,
        "hit_points": 5,
        "hit_dice": "2d4",
        "speed": { "walk": "30 ft.", "fly": "60 ft.", "swim": "30 ft." },
        "strength": 4,
        "dexterity": 18,
        "constitution": 11,
        "intelligence": 2,
        "wisdom": 12,
        "charisma": 5,
        "proficiencies": [],
        "damage_vulnerabilities": [],
        "damage_resistances": [],
        "damage_immunities": [],
        "condition_immunities": [],
        "senses": { "blindsight": "10 ft.", "passive_perception": 11 },
        "languages": "",
        "challenge_rating": 0.125,
        "url": "/api/monsters/flying-snake",
        "actions": [
            {
                "name": "Bite",
                "desc": "Melee Weapon Attack: +6 to hit.",
                "attack_bonus": 6,
                "damage": [
                    {
                        "damage_type": { "name": "Piercing", "url": "/api/damage-types/piercing" },
                        "damage_dice": "1d1"
                    },
                    {
                        "damage_type": { "name": "Poison", "url": "/api/damage-types/poison" },
                        "damage_dice": "3d4"
                    }
                ]
            }
        ]
    }"#;

    #[test]
    fn deserialize_reference_record() {
        let monster: Monster = serde_json::from_str(SNAKE_JSON).unwrap();
        assert_eq!(monster.index, "flying-snake");
        assert_eq!(monster.size, Size::Tiny);
        assert_eq!(monster.subtype, None);
        assert_eq!(monster.challenge_rating, 0.125);
        assert_eq!(
            monster.speed.get("fly"),
            Some(&SpeedValue::Distance("60 ft.".to_string()))
        );
        assert_eq!(
            monster.senses.get("passive_perception"),
            Some(&SenseValue::Number(11.0))
        );
        let actions = monster.actions.as_ref().unwrap();
        assert_eq!(actions[0].attack_bonus, Some(6));
        assert!(matches!(
            actions[0].profile(),
            Some(AttackProfile::Damage(_))
        ));
    }

    #[test]
    fn damage_roll_choose_form() {
        let json = r#"[
            { "damage_type": { "name": "Slashing", "url": "/x" }, "damage_dice": "2d6+4" },
            { "choose": 1, "from": [
                { "damage_type": { "name": "Fire", "url": "/y" }, "damage_dice": "1d8" },
                { "damage_type": { "name": "Cold", "url": "/z" }, "damage_dice": "2d8" }
            ] }
        ]"#;
        let rolls: Vec<DamageRoll> = serde_json::from_str(json).unwrap();
        assert!(matches!(rolls[0], DamageRoll::Dice(_)));
        assert!(matches!(rolls[1], DamageRoll::Choose { choose: 1, .. }));
    }

    #[test]
    fn usage_is_tagged_by_type() {
        let per_day: Usage = serde_json::from_str(r#"{"type":"per day","times":3}"#).unwrap();
        assert_eq!(per_day, Usage::PerDay { times: 3 });
        let recharge: Usage =
            serde_json::from_str(r#"{"type":"recharge on roll","dice":"1d6","min_value":5}"#)
                .unwrap();
        assert!(matches!(recharge, Usage::RechargeOnRoll { min_value: 5, .. }));
    }

    #[test]
    fn profile_priority_is_damage_first() {
        let action = Action {
            name: "Test".into(),
            desc: String::new(),
            attack_bonus: None,
            damage: Some(vec![]),
            usage: None,
            options: Some(ActionOptions {
                choose: 1,
                from: vec![],
            }),
            attack_options: None,
            dc: None,
        };
        assert!(matches!(action.profile(), Some(AttackProfile::Damage(_))));
    }

    #[test]
    fn profile_absent_for_plain_ability() {
        let action = Action {
            name: "Camouflage".into(),
            desc: "Blends in.".into(),
            attack_bonus: None,
            damage: None,
            usage: None,
            options: None,
            attack_options: None,
            dc: None,
        };
        assert!(action.profile().is_none());
    }

    #[test]
    fn attack_count_value() {
        assert_eq!(AttackCount::Number(2).value(), 2.0);
        assert_eq!(AttackCount::Text("3".into()).value(), 3.0);
        assert!(AttackCount::Text("two".into()).value().is_nan());
    }
}
