//! Creatures, identities, and conditions.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Unique identifier for a creature within one encounter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
pub struct CreatureId(pub u32);

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Issues creature IDs. Owned by the encounter, so two encounters never
/// share a counter and IDs stay meaningful per session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdAllocator {
    next: u32,
}

impl IdAllocator {
    /// Create an allocator starting at 0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Hand out the next ID.
    pub fn allocate(&mut self) -> CreatureId {
        let id = CreatureId(self.next);
        self.next += 1;
        id
    }
}

/// Whether a creature is player-controlled or DM-controlled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatureKind {
    /// A player character.
    Player,
    /// A DM-controlled monster.
    Monster,
}

impl fmt::Display for CreatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Player => write!(f, "player"),
            Self::Monster => write!(f, "monster"),
        }
    }
}

/// A condition affecting a creature. Conditions persist across rounds until
/// explicitly cleared; `Surprised` is special-cased by the encounter, which
/// clears it everywhere when round 1 ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Caught off guard; adds a flat 10 to the round's initiative total.
    Surprised,
    /// Maintaining concentration on a spell.
    Concentrating,
}

impl Condition {
    /// Parse a condition from user input.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "surprised" => Some(Self::Surprised),
            "concentrating" => Some(Self::Concentrating),
            _ => None,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surprised => write!(f, "surprised"),
            Self::Concentrating => write!(f, "concentrating"),
        }
    }
}

/// A creature in the encounter roster.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Creature {
    /// Identity within the encounter.
    pub id: CreatureId,
    /// Display name.
    pub name: String,
    /// Player or monster.
    pub kind: CreatureKind,
    /// Active conditions.
    pub conditions: BTreeSet<Condition>,
}

impl Creature {
    /// Create a creature with no conditions.
    pub fn new(id: CreatureId, name: impl Into<String>, kind: CreatureKind) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            conditions: BTreeSet::new(),
        }
    }

    /// Whether the creature currently has the given condition.
    pub fn has_condition(&self, condition: Condition) -> bool {
        self.conditions.contains(&condition)
    }
}
