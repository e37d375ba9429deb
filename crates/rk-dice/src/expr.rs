//! The `NdS+M` dice-expression language.
//!
//! Expressions like `2d6+3`, `d20`, or `1d8-1` appear in monster damage
//! definitions and in ability-roll requests. Parsing is lenient about case
//! and whitespace but strict about shape; anything else is simply not an
//! expression (`parse` returns `None`), which callers treat as a fail-soft
//! sentinel rather than an error.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::Dice;
use crate::error::DiceResult;

/// A parsed dice expression: `count` dice of `sides` sides plus `modifier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiceExpr {
    /// How many dice the expression names.
    pub count: u32,
    /// Sides per die.
    pub sides: u32,
    /// Flat bonus (or malus) added after the roll.
    pub modifier: i64,
}

impl DiceExpr {
    /// Build an expression directly.
    pub fn new(count: u32, sides: u32, modifier: i64) -> Self {
        Self {
            count,
            sides,
            modifier,
        }
    }

    /// Parse an expression like `2d6+3`, `d20`, or `1d4 - 1`.
    ///
    /// A missing count means one die. Returns `None` for anything that is
    /// not a dice expression, including zero-sided dice.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        let (dice_part, modifier) = match s.find(['+', '-']) {
            Some(pos) => {
                let sign = if s.as_bytes()[pos] == b'-' { -1 } else { 1 };
                let value: i64 = s[pos + 1..].trim().parse().ok()?;
                (s[..pos].trim_end(), sign * value)
            }
            None => (s.as_str(), 0),
        };

        let (count_part, sides_part) = dice_part.split_once('d')?;
        let count: u32 = if count_part.is_empty() {
            1
        } else {
            count_part.parse().ok()?
        };
        let sides: u32 = sides_part.parse().ok()?;
        if count == 0 || sides == 0 {
            return None;
        }
        Some(Self {
            count,
            sides,
            modifier,
        })
    }

    /// Expected value, floored: `floor(count * (sides + 1) / 2) + modifier`.
    pub fn average(&self) -> i64 {
        i64::from(self.count) * (i64::from(self.sides) + 1) / 2 + self.modifier
    }

    /// Roll the expression against a generator: one die roll scaled by the
    /// count, plus the modifier.
    pub fn roll(&self, dice: &mut Dice) -> DiceResult<i64> {
        let face = dice.roll(self.sides)?;
        Ok(i64::from(self.count) * i64::from(face) + self.modifier)
    }

    /// True for a plain `1d20+M` expression, which the roll log treats
    /// specially (paired results).
    pub fn is_single_d20(&self) -> bool {
        self.count == 1 && self.sides == 20
    }
}

impl fmt::Display for DiceExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)?;
        match self.modifier {
            0 => Ok(()),
            m if m > 0 => write!(f, "+{m}"),
            m => write!(f, "{m}"),
        }
    }
}
