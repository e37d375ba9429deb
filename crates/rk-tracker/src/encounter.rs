//! Encounter state: roster, round choices, and initiative.
//!
//! All dice streams hang off one encounter seed:
//!
//! ```text
//! round stream    = seed + round * 10_000
//! creature stream = round stream  + signed roster index
//! choice stream   = creature stream + choice offset
//! ```
//!
//! Roster indices are 1-based, positive for players and negative for
//! monsters, so no two creatures share a stream; choice offsets come from
//! the static table in [`ChoiceKind::stream`]. The whole derivation is pure,
//! so standings can be recomputed on every read — only confirmation stores
//! anything.

use std::collections::BTreeMap;

use rk_dice::Dice;
use serde::{Deserialize, Serialize};

use crate::choice::{Choice, ChoiceCategory, ChoiceKind};
use crate::config::TrackerConfig;
use crate::creature::{Condition, Creature, CreatureId, CreatureKind, IdAllocator};
use crate::error::{TrackerError, TrackerResult};

/// Seed distance between consecutive rounds, comfortably above every
/// creature and choice offset.
const ROUND_STRIDE: i64 = 10_000;

/// Flat initiative bonus for surprised creatures.
const SURPRISE_BONUS: i32 = 10;

/// One die rolled for one choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceRoll {
    /// The choice that produced the roll.
    pub kind: ChoiceKind,
    /// The rolled value.
    pub roll: i64,
}

/// A creature's place in the round's initiative order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Standing {
    /// The creature.
    pub creature: CreatureId,
    /// Display name, copied out for rendering.
    pub name: String,
    /// Initiative total. Lower acts first.
    pub total: i32,
    /// Whether the total is frozen.
    pub confirmed: bool,
    /// Whether the creature is surprised this round.
    pub surprised: bool,
    /// Per-choice breakdown (recomputed; informational).
    pub rolls: Vec<ChoiceRoll>,
}

/// The round's initiative picture: ranked creatures plus those that have
/// not declared anything yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Standings {
    /// Creatures with an initiative total, ascending (ties keep roster
    /// order — the deliberate stable tie-break).
    pub acting: Vec<Standing>,
    /// Creatures with no choices and no surprise bonus: nothing to rank.
    pub awaiting: Vec<CreatureId>,
}

/// An encounter: the creature roster and the current round's choices.
#[derive(Debug, Clone)]
pub struct Encounter {
    config: TrackerConfig,
    ids: IdAllocator,
    roster: Vec<Creature>,
    round: u32,
    choices: BTreeMap<(CreatureId, ChoiceCategory), Choice>,
}

impl Encounter {
    /// Create an empty encounter at round 1.
    pub fn new(config: TrackerConfig) -> Self {
        Self {
            config,
            ids: IdAllocator::new(),
            roster: Vec::new(),
            round: 1,
            choices: BTreeMap::new(),
        }
    }

    /// The encounter seed.
    pub fn seed(&self) -> i64 {
        self.config.seed
    }

    /// The current round number (starts at 1).
    pub fn round(&self) -> u32 {
        self.round
    }

    /// The roster in insertion order.
    pub fn roster(&self) -> &[Creature] {
        &self.roster
    }

    /// Add a creature and return its ID.
    pub fn add_creature(&mut self, name: impl Into<String>, kind: CreatureKind) -> CreatureId {
        let id = self.ids.allocate();
        self.roster.push(Creature::new(id, name, kind));
        id
    }

    /// Look up a creature by ID.
    pub fn creature(&self, id: CreatureId) -> TrackerResult<&Creature> {
        self.roster
            .iter()
            .find(|c| c.id == id)
            .ok_or(TrackerError::UnknownCreature(id))
    }

    /// Look up a creature by name (case-insensitive).
    pub fn find_by_name(&self, name: &str) -> Option<&Creature> {
        self.roster
            .iter()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Toggle a condition; returns whether the creature now has it.
    pub fn toggle_condition(&mut self, id: CreatureId, condition: Condition) -> TrackerResult<bool> {
        let creature = self.creature_mut(id)?;
        if creature.conditions.remove(&condition) {
            Ok(false)
        } else {
            creature.conditions.insert(condition);
            Ok(true)
        }
    }

    /// Record a choice, replacing any previous choice in the same category.
    ///
    /// A confirmed category can no longer change — the frozen total must
    /// stay truthful.
    pub fn set_choice(&mut self, id: CreatureId, kind: ChoiceKind) -> TrackerResult<()> {
        self.creature(id)?;
        let key = (id, kind.category());
        if let Some(existing) = self.choices.get(&key)
            && existing.is_confirmed()
        {
            return Err(TrackerError::ChoiceConfirmed {
                category: kind.category(),
            });
        }
        self.choices.insert(key, Choice::new(id, kind));
        Ok(())
    }

    /// Remove a live choice. Returns whether anything was removed.
    pub fn clear_choice(
        &mut self,
        id: CreatureId,
        category: ChoiceCategory,
    ) -> TrackerResult<bool> {
        self.creature(id)?;
        let key = (id, category);
        if let Some(existing) = self.choices.get(&key)
            && existing.is_confirmed()
        {
            return Err(TrackerError::ChoiceConfirmed { category });
        }
        Ok(self.choices.remove(&key).is_some())
    }

    /// The creature's choices this round, in category order.
    pub fn choices_for(&self, id: CreatureId) -> Vec<&Choice> {
        self.choices
            .range((id, ChoiceCategory::Move)..=(id, ChoiceCategory::Bonus))
            .map(|(_, choice)| choice)
            .collect()
    }

    /// Confirm a creature's round: compute the current total and freeze it
    /// into every one of its choices.
    pub fn confirm(&mut self, id: CreatureId) -> TrackerResult<i32> {
        let creature = self.creature(id)?;
        let surprised = creature.has_condition(Condition::Surprised);

        let own: Vec<(ChoiceCategory, ChoiceKind, bool)> = self
            .choices_for(id)
            .iter()
            .map(|c| (c.kind.category(), c.kind, c.is_confirmed()))
            .collect();
        if own.is_empty() {
            return Err(TrackerError::NothingToConfirm(id));
        }
        if own.iter().any(|&(_, _, confirmed)| confirmed) {
            return Err(TrackerError::AlreadyConfirmed(id));
        }

        let stream = self.creature_stream(id)?;
        let mut total = if surprised { SURPRISE_BONUS } else { 0 };
        for &(_, kind, _) in &own {
            total += roll_choice(&stream, kind)? as i32;
        }
        for &(category, _, _) in &own {
            if let Some(choice) = self.choices.get_mut(&(id, category)) {
                choice.confirmed = Some(total);
            }
        }
        Ok(total)
    }

    /// Advance to the next round: fresh choice map, and — only when leaving
    /// round 1 — the surprise condition is spent.
    pub fn next_round(&mut self) -> u32 {
        if self.round == 1 {
            for creature in &mut self.roster {
                creature.conditions.remove(&Condition::Surprised);
            }
        }
        self.round += 1;
        self.choices.clear();
        self.round
    }

    /// Compute the round's standings.
    pub fn standings(&self) -> TrackerResult<Standings> {
        let mut acting = Vec::new();
        let mut awaiting = Vec::new();

        for creature in &self.roster {
            let surprised = creature.has_condition(Condition::Surprised);
            let own = self.choices_for(creature.id);

            if own.is_empty() && !surprised {
                awaiting.push(creature.id);
                continue;
            }

            let stream = self.creature_stream(creature.id)?;
            let mut rolls = Vec::with_capacity(own.len());
            let mut live_total = if surprised { SURPRISE_BONUS } else { 0 };
            let mut frozen = None;
            for choice in &own {
                let roll = roll_choice(&stream, choice.kind)?;
                rolls.push(ChoiceRoll {
                    kind: choice.kind,
                    roll,
                });
                live_total += roll as i32;
                if choice.confirmed.is_some() {
                    frozen = choice.confirmed;
                }
            }

            acting.push(Standing {
                creature: creature.id,
                name: creature.name.clone(),
                total: frozen.unwrap_or(live_total),
                confirmed: frozen.is_some(),
                surprised,
                rolls,
            });
        }

        // Stable sort: equal totals keep roster insertion order.
        acting.sort_by_key(|s| s.total);
        Ok(Standings { acting, awaiting })
    }

    /// The dice stream for one creature in the current round.
    fn creature_stream(&self, id: CreatureId) -> TrackerResult<Dice> {
        let round_dice = Dice::seeded(
            self.config
                .seed
                .wrapping_add(i64::from(self.round).wrapping_mul(ROUND_STRIDE)),
        );
        Ok(round_dice.seed(self.signed_index(id)?))
    }

    /// 1-based roster index within the creature's kind, positive for
    /// players and negative for monsters.
    fn signed_index(&self, id: CreatureId) -> TrackerResult<i64> {
        let kind = self.creature(id)?.kind;
        let position = self
            .roster
            .iter()
            .filter(|c| c.kind == kind)
            .position(|c| c.id == id)
            .ok_or(TrackerError::UnknownCreature(id))?;
        let index = position as i64 + 1;
        Ok(match kind {
            CreatureKind::Player => index,
            CreatureKind::Monster => -index,
        })
    }

    fn creature_mut(&mut self, id: CreatureId) -> TrackerResult<&mut Creature> {
        self.roster
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(TrackerError::UnknownCreature(id))
    }
}

/// Roll the initiative die for one choice from the creature's stream.
fn roll_choice(creature_stream: &Dice, kind: ChoiceKind) -> TrackerResult<i64> {
    let (offset, die) = kind.stream();
    let mut stream = creature_stream.seed(offset);
    Ok(i64::from(stream.roll(die)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::ActionKind;

    fn encounter() -> Encounter {
        Encounter::new(TrackerConfig::default())
    }

    #[test]
    fn replace_not_duplicate() {
        let mut enc = encounter();
        let orel = enc.add_creature("Orel", CreatureKind::Player);
        enc.set_choice(orel, ChoiceKind::Action(ActionKind::Melee))
            .unwrap();
        enc.set_choice(orel, ChoiceKind::Action(ActionKind::Spell))
            .unwrap();
        let own = enc.choices_for(orel);
        assert_eq!(own.len(), 1);
        assert_eq!(own[0].kind, ChoiceKind::Action(ActionKind::Spell));
    }

    #[test]
    fn additivity_and_surprise_bonus() {
        let mut enc = encounter();
        let orel = enc.add_creature("Orel", CreatureKind::Player);
        enc.set_choice(orel, ChoiceKind::Move).unwrap();
        enc.set_choice(orel, ChoiceKind::Action(ActionKind::Melee))
            .unwrap();

        let standings = enc.standings().unwrap();
        let s = &standings.acting[0];
        let sum: i64 = s.rolls.iter().map(|r| r.roll).sum();
        assert_eq!(s.total as i64, sum);
        assert_eq!(s.rolls.len(), 2);
        for r in &s.rolls {
            let (_, die) = r.kind.stream();
            assert!((1..=i64::from(die)).contains(&r.roll));
        }

        enc.toggle_condition(orel, Condition::Surprised).unwrap();
        let with_surprise = enc.standings().unwrap();
        assert_eq!(with_surprise.acting[0].total as i64, sum + 10);
    }

    #[test]
    fn deterministic_across_recomputation() {
        let build = || {
            let mut enc = Encounter::new(TrackerConfig::default().with_seed(42));
            let orel = enc.add_creature("Orel", CreatureKind::Player);
            enc.set_choice(orel, ChoiceKind::Move).unwrap();
            enc.set_choice(orel, ChoiceKind::Action(ActionKind::Spell))
                .unwrap();
            enc.standings().unwrap().acting[0].total
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn repeated_reads_do_not_drift() {
        let mut enc = encounter();
        let orel = enc.add_creature("Orel", CreatureKind::Player);
        enc.set_choice(orel, ChoiceKind::Move).unwrap();
        let first = enc.standings().unwrap().acting[0].total;
        for _ in 0..10 {
            assert_eq!(enc.standings().unwrap().acting[0].total, first);
        }
    }

    #[test]
    fn players_and_monsters_use_distinct_streams() {
        let mut enc = encounter();
        let player = enc.add_creature("Jen", CreatureKind::Player);
        let monster = enc.add_creature("Goblin", CreatureKind::Monster);
        enc.set_choice(player, ChoiceKind::Move).unwrap();
        enc.set_choice(monster, ChoiceKind::Move).unwrap();

        assert_eq!(enc.signed_index(player).unwrap(), 1);
        assert_eq!(enc.signed_index(monster).unwrap(), -1);
    }

    #[test]
    fn confirmation_freezes_total() {
        let mut enc = encounter();
        let orel = enc.add_creature("Orel", CreatureKind::Player);
        enc.set_choice(orel, ChoiceKind::Action(ActionKind::Melee))
            .unwrap();
        let frozen = enc.confirm(orel).unwrap();

        // Changing a confirmed category is rejected...
        let err = enc
            .set_choice(orel, ChoiceKind::Action(ActionKind::Spell))
            .unwrap_err();
        assert_eq!(
            err,
            TrackerError::ChoiceConfirmed {
                category: ChoiceCategory::Action
            }
        );
        let err = enc.clear_choice(orel, ChoiceCategory::Action).unwrap_err();
        assert_eq!(
            err,
            TrackerError::ChoiceConfirmed {
                category: ChoiceCategory::Action
            }
        );

        // ...and the stored total is reported unchanged.
        let standings = enc.standings().unwrap();
        assert!(standings.acting[0].confirmed);
        assert_eq!(standings.acting[0].total, frozen);
    }

    #[test]
    fn confirm_requires_choices() {
        let mut enc = encounter();
        let orel = enc.add_creature("Orel", CreatureKind::Player);
        assert_eq!(
            enc.confirm(orel).unwrap_err(),
            TrackerError::NothingToConfirm(orel)
        );
    }

    #[test]
    fn double_confirm_rejected() {
        let mut enc = encounter();
        let orel = enc.add_creature("Orel", CreatureKind::Player);
        enc.set_choice(orel, ChoiceKind::Move).unwrap();
        enc.confirm(orel).unwrap();
        assert_eq!(
            enc.confirm(orel).unwrap_err(),
            TrackerError::AlreadyConfirmed(orel)
        );
    }

    #[test]
    fn ascending_order_with_stable_ties() {
        let mut enc = encounter();
        let a = enc.add_creature("Jen", CreatureKind::Player);
        let b = enc.add_creature("Grog", CreatureKind::Player);
        let c = enc.add_creature("Snake", CreatureKind::Monster);
        for id in [a, b, c] {
            enc.set_choice(id, ChoiceKind::Move).unwrap();
        }
        let standings = enc.standings().unwrap();
        let totals: Vec<i32> = standings.acting.iter().map(|s| s.total).collect();
        let mut sorted = totals.clone();
        sorted.sort_unstable();
        assert_eq!(totals, sorted);

        // Equal totals must preserve roster order.
        for window in standings.acting.windows(2) {
            if window[0].total == window[1].total {
                assert!(window[0].creature < window[1].creature);
            }
        }
    }

    #[test]
    fn awaiting_lists_undeclared_creatures() {
        let mut enc = encounter();
        let orel = enc.add_creature("Orel", CreatureKind::Player);
        let idle = enc.add_creature("Steve", CreatureKind::Player);
        enc.set_choice(orel, ChoiceKind::Move).unwrap();

        let standings = enc.standings().unwrap();
        assert_eq!(standings.acting.len(), 1);
        assert_eq!(standings.awaiting, vec![idle]);
    }

    #[test]
    fn surprised_without_choices_still_ranks() {
        let mut enc = encounter();
        let steve = enc.add_creature("Steve", CreatureKind::Player);
        enc.toggle_condition(steve, Condition::Surprised).unwrap();

        let standings = enc.standings().unwrap();
        assert!(standings.awaiting.is_empty());
        assert_eq!(standings.acting[0].total, 10);
        assert!(standings.acting[0].rolls.is_empty());
    }

    #[test]
    fn next_round_clears_choices_and_surprise() {
        let mut enc = encounter();
        let orel = enc.add_creature("Orel", CreatureKind::Player);
        enc.set_choice(orel, ChoiceKind::Move).unwrap();
        enc.toggle_condition(orel, Condition::Surprised).unwrap();
        enc.toggle_condition(orel, Condition::Concentrating).unwrap();

        assert_eq!(enc.next_round(), 2);
        assert!(enc.choices_for(orel).is_empty());
        let orel_ref = enc.creature(orel).unwrap();
        assert!(!orel_ref.has_condition(Condition::Surprised));
        // Other conditions persist.
        assert!(orel_ref.has_condition(Condition::Concentrating));
    }

    #[test]
    fn surprise_only_cleared_leaving_round_one() {
        let mut enc = encounter();
        let orel = enc.add_creature("Orel", CreatureKind::Player);
        enc.next_round(); // now round 2
        enc.toggle_condition(orel, Condition::Surprised).unwrap();
        enc.next_round(); // leaving round 2: surprise persists
        assert!(
            enc.creature(orel)
                .unwrap()
                .has_condition(Condition::Surprised)
        );
    }

    #[test]
    fn rounds_reroll_choices() {
        let mut enc = encounter();
        let orel = enc.add_creature("Orel", CreatureKind::Player);
        enc.set_choice(orel, ChoiceKind::Move).unwrap();
        let round1 = enc.standings().unwrap().acting[0].rolls[0].roll;

        let mut differs = false;
        for _ in 0..8 {
            enc.next_round();
            enc.set_choice(orel, ChoiceKind::Move).unwrap();
            if enc.standings().unwrap().acting[0].rolls[0].roll != round1 {
                differs = true;
            }
        }
        assert!(differs, "every round produced the same d6 roll");
    }

    #[test]
    fn unknown_creature_rejected() {
        let mut enc = encounter();
        let ghost = CreatureId(99);
        assert_eq!(
            enc.set_choice(ghost, ChoiceKind::Move).unwrap_err(),
            TrackerError::UnknownCreature(ghost)
        );
        assert!(enc.creature(ghost).is_err());
    }

    #[test]
    fn end_to_end_scenario() {
        // Round 1: Orel (player index 1) declares move + spell action with
        // the encounter seeded at 42.
        let mut enc = Encounter::new(TrackerConfig::default().with_seed(42));
        let orel = enc.add_creature("Orel", CreatureKind::Player);
        enc.set_choice(orel, ChoiceKind::Move).unwrap();
        enc.set_choice(orel, ChoiceKind::Action(ActionKind::Spell))
            .unwrap();
        enc.toggle_condition(orel, Condition::Surprised).unwrap();

        // Recomputing from scratch yields the identical total.
        let replay = {
            let mut enc2 = Encounter::new(TrackerConfig::default().with_seed(42));
            let orel2 = enc2.add_creature("Orel", CreatureKind::Player);
            enc2.set_choice(orel2, ChoiceKind::Move).unwrap();
            enc2.set_choice(orel2, ChoiceKind::Action(ActionKind::Spell))
                .unwrap();
            enc2.toggle_condition(orel2, Condition::Surprised).unwrap();
            enc2.standings().unwrap().acting[0].total
        };
        assert_eq!(enc.standings().unwrap().acting[0].total, replay);

        // Confirm freezes it.
        let frozen = enc.confirm(orel).unwrap();
        assert_eq!(frozen, replay);

        // Advancing clears Orel's choices and the surprise, not Orel.
        enc.next_round();
        assert!(enc.choices_for(orel).is_empty());
        let orel_ref = enc.creature(orel).unwrap();
        assert_eq!(orel_ref.name, "Orel");
        assert!(!orel_ref.has_condition(Condition::Surprised));
    }
}
