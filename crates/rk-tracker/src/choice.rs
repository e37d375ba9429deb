//! Round choices and their dice streams.
//!
//! A choice is one declaration a creature makes for the round. Each kind of
//! choice owns a fixed die size and a fixed seed offset, so the roll for
//! "Orel dashes" can never correlate with the roll for "Orel casts a spell"
//! — they are drawn from disjoint streams of the creature's generator.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::creature::CreatureId;

/// What an action or bonus action is spent on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Double movement.
    Dash,
    /// Anything without a dedicated entry (shove, hide, improvise).
    Other,
    /// A ranged weapon attack.
    Ranged,
    /// A melee weapon attack.
    Melee,
    /// Casting a spell.
    Spell,
}

impl ActionKind {
    /// Parse an action kind from user input.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dash" => Some(Self::Dash),
            "other" => Some(Self::Other),
            "ranged" => Some(Self::Ranged),
            "melee" => Some(Self::Melee),
            "spell" => Some(Self::Spell),
            _ => None,
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dash => write!(f, "dash"),
            Self::Other => write!(f, "other"),
            Self::Ranged => write!(f, "ranged"),
            Self::Melee => write!(f, "melee"),
            Self::Spell => write!(f, "spell"),
        }
    }
}

/// The category slot a choice occupies. A creature holds at most one live
/// choice per category per round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceCategory {
    /// Regular movement.
    Move,
    /// Swapping held equipment.
    Swap,
    /// The main action.
    Action,
    /// The bonus action.
    Bonus,
}

impl ChoiceCategory {
    /// Parse a category from user input.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "move" => Some(Self::Move),
            "swap" => Some(Self::Swap),
            "action" => Some(Self::Action),
            "bonus" => Some(Self::Bonus),
            _ => None,
        }
    }
}

impl fmt::Display for ChoiceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move => write!(f, "move"),
            Self::Swap => write!(f, "swap"),
            Self::Action => write!(f, "action"),
            Self::Bonus => write!(f, "bonus"),
        }
    }
}

/// A concrete choice: the category together with its sub-value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChoiceKind {
    /// Move this round.
    Move,
    /// Swap equipment this round.
    Swap,
    /// Spend the action on the given kind.
    Action(ActionKind),
    /// Spend the bonus action on the given kind.
    Bonus(ActionKind),
}

impl ChoiceKind {
    /// The category slot this choice occupies.
    pub fn category(self) -> ChoiceCategory {
        match self {
            Self::Move => ChoiceCategory::Move,
            Self::Swap => ChoiceCategory::Swap,
            Self::Action(_) => ChoiceCategory::Action,
            Self::Bonus(_) => ChoiceCategory::Bonus,
        }
    }

    /// The (seed offset, die size) pair for this choice's initiative roll.
    ///
    /// The table is exhaustive over every category/sub-value combination;
    /// there is no fall-through. Action offsets occupy 10..=14 and bonus
    /// offsets 20..=24, so an action and a bonus action of the same kind
    /// still draw from different streams.
    pub fn stream(self) -> (i64, u32) {
        match self {
            Self::Move => (1, 6),
            Self::Swap => (2, 6),
            Self::Action(ActionKind::Dash) => (10, 6),
            Self::Action(ActionKind::Other) => (11, 6),
            Self::Action(ActionKind::Ranged) => (12, 4),
            Self::Action(ActionKind::Melee) => (13, 8),
            Self::Action(ActionKind::Spell) => (14, 10),
            Self::Bonus(ActionKind::Dash) => (20, 6),
            Self::Bonus(ActionKind::Other) => (21, 6),
            Self::Bonus(ActionKind::Ranged) => (22, 4),
            Self::Bonus(ActionKind::Melee) => (23, 8),
            Self::Bonus(ActionKind::Spell) => (24, 10),
        }
    }

    /// All concrete choices, for exhaustiveness checks.
    pub fn all() -> Vec<Self> {
        let kinds = [
            ActionKind::Dash,
            ActionKind::Other,
            ActionKind::Ranged,
            ActionKind::Melee,
            ActionKind::Spell,
        ];
        let mut out = vec![Self::Move, Self::Swap];
        out.extend(kinds.iter().map(|&k| Self::Action(k)));
        out.extend(kinds.iter().map(|&k| Self::Bonus(k)));
        out
    }
}

impl fmt::Display for ChoiceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move => write!(f, "move"),
            Self::Swap => write!(f, "swap equipment"),
            Self::Action(kind) => write!(f, "{kind} action"),
            Self::Bonus(kind) => write!(f, "{kind} bonus action"),
        }
    }
}

/// A recorded choice for one creature in one round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    /// The owning creature.
    pub creature: CreatureId,
    /// What was chosen.
    pub kind: ChoiceKind,
    /// The creature total frozen at confirmation time; `None` while live.
    pub confirmed: Option<i32>,
}

impl Choice {
    /// Create a live (unconfirmed) choice.
    pub fn new(creature: CreatureId, kind: ChoiceKind) -> Self {
        Self {
            creature,
            kind,
            confirmed: None,
        }
    }

    /// Whether the choice has been confirmed.
    pub fn is_confirmed(&self) -> bool {
        self.confirmed.is_some()
    }
}
