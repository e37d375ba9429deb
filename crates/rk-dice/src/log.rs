//! Ability-roll log.
//!
//! A click on a statblock number ("+4 to hit", "Stealth +6", a damage
//! expression) becomes a logged roll. Bare modifiers and plain `1d20+M`
//! expressions produce a pair of d20 results so the reader can apply
//! advantage or disadvantage after the fact; any other expression produces
//! a single result. Text that fails to parse is still recorded — with an
//! invalid outcome — rather than raised as an error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::Dice;
use crate::error::DiceResult;
use crate::expr::DiceExpr;

/// What the user asked to roll.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RollSpec {
    /// A bare bonus, rolled as `1d20 + modifier`.
    Modifier(i64),
    /// A dice-expression string, parsed at roll time.
    Expression(String),
}

/// The numeric result of a logged roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum RollOutcome {
    /// Two independent d20 results (pick one for advantage/disadvantage).
    Pair(i64, i64),
    /// A single total.
    Single(i64),
    /// The request did not parse as a dice expression.
    Invalid,
}

impl RollOutcome {
    /// The primary numeric value; NaN for an invalid request, so callers
    /// can gate display on `is_finite`.
    pub fn value(&self) -> f64 {
        match self {
            Self::Pair(first, _) => *first as f64,
            Self::Single(total) => *total as f64,
            Self::Invalid => f64::NAN,
        }
    }
}

/// One recorded ability roll.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RollEntry {
    /// Who rolled (creature or monster name).
    pub owner: String,
    /// What the roll was for.
    pub description: String,
    /// The original request.
    pub spec: RollSpec,
    /// The result.
    pub outcome: RollOutcome,
    /// When the roll was made.
    pub timestamp: DateTime<Utc>,
}

/// An append-only log of ability rolls.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RollLog {
    entries: Vec<RollEntry>,
}

impl RollLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[RollEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Roll with fresh entropy-seeded generators and append the entry.
    pub fn roll_and_append(
        &mut self,
        owner: impl Into<String>,
        description: impl Into<String>,
        spec: RollSpec,
    ) -> DiceResult<&RollEntry> {
        let outcome = resolve(&spec, |sides| Dice::from_entropy().roll(sides))?;
        self.push(owner.into(), description.into(), spec, outcome);
        Ok(self.entries.last().expect("entry was just pushed"))
    }

    /// Roll against a caller-supplied generator (reproducible) and append.
    pub fn roll_with(
        &mut self,
        owner: impl Into<String>,
        description: impl Into<String>,
        spec: RollSpec,
        dice: &mut Dice,
    ) -> DiceResult<&RollEntry> {
        let outcome = resolve(&spec, |sides| dice.roll(sides))?;
        self.push(owner.into(), description.into(), spec, outcome);
        Ok(self.entries.last().expect("entry was just pushed"))
    }

    fn push(&mut self, owner: String, description: String, spec: RollSpec, outcome: RollOutcome) {
        self.entries.push(RollEntry {
            owner,
            description,
            spec,
            outcome,
            timestamp: Utc::now(),
        });
    }
}

/// Resolve a request into an outcome; `draw` rolls one die of the given
/// number of sides.
fn resolve(
    spec: &RollSpec,
    mut draw: impl FnMut(u32) -> DiceResult<u32>,
) -> DiceResult<RollOutcome> {
    match spec {
        RollSpec::Modifier(m) => {
            let a = i64::from(draw(20)?) + m;
            let b = i64::from(draw(20)?) + m;
            Ok(RollOutcome::Pair(a, b))
        }
        RollSpec::Expression(text) => match DiceExpr::parse(text) {
            None => Ok(RollOutcome::Invalid),
            Some(expr) if expr.is_single_d20() => {
                let a = i64::from(draw(20)?) + expr.modifier;
                let b = i64::from(draw(20)?) + expr.modifier;
                Ok(RollOutcome::Pair(a, b))
            }
            Some(expr) => {
                let face = draw(expr.sides)?;
                Ok(RollOutcome::Single(
                    i64::from(expr.count) * i64::from(face) + expr.modifier,
                ))
            }
        },
    }
}
