//! Interactive tracker session.
//!
//! `TrackerSession` wraps an [`Encounter`] with a line-oriented command
//! interface: add creatures, toggle declarations, confirm totals, advance
//! rounds, and log ability rolls. The CLI feeds it stdin lines; tests feed
//! it strings.

use chrono::Utc;

use rk_dice::{Dice, RollLog, RollOutcome, RollSpec};

use crate::choice::{ActionKind, ChoiceCategory, ChoiceKind};
use crate::config::TrackerConfig;
use crate::creature::{Condition, CreatureId, CreatureKind};
use crate::encounter::{Encounter, Standing};
use crate::error::{TrackerError, TrackerResult};
use crate::journal::{Journal, JournalEntry};

/// Seed offset reserved for ability rolls, far away from every round
/// stream.
const ABILITY_STREAM_OFFSET: i64 = -1_000_000;

/// An interactive initiative-tracker session.
pub struct TrackerSession {
    encounter: Encounter,
    rolls: RollLog,
    journal: Journal,
    ability_dice: Dice,
}

impl TrackerSession {
    /// Create a session over a fresh encounter.
    pub fn new(config: TrackerConfig) -> Self {
        let ability_dice = Dice::seeded(config.seed).seed(ABILITY_STREAM_OFFSET);
        Self {
            encounter: Encounter::new(config),
            rolls: RollLog::new(),
            journal: Journal::new(),
            ability_dice,
        }
    }

    /// The underlying encounter.
    pub fn encounter(&self) -> &Encounter {
        &self.encounter
    }

    /// The ability-roll log.
    pub fn rolls(&self) -> &RollLog {
        &self.rolls
    }

    /// The session journal.
    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    /// Process one line of input and return the text to display.
    pub fn process(&mut self, input: &str) -> TrackerResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        let parts: Vec<&str> = trimmed.splitn(2, ' ').collect();
        let cmd = parts[0].to_lowercase();
        let rest = parts.get(1).map(|s| s.trim()).unwrap_or("");

        match cmd.as_str() {
            "add" => self.do_add(rest),
            "surprise" => self.do_condition(rest, Condition::Surprised),
            "condition" => self.do_condition_named(rest),
            "move" => self.do_toggle_choice(rest, ChoiceKind::Move),
            "swap" => self.do_toggle_choice(rest, ChoiceKind::Swap),
            "action" => self.do_action(rest, false),
            "bonus" => self.do_action(rest, true),
            "clear" => self.do_clear(rest),
            "confirm" => self.do_confirm(rest),
            "order" => self.do_order(),
            "next" => self.do_next(),
            "round" => Ok(format!("Round {}", self.encounter.round())),
            "roll" => self.do_roll(rest),
            "log" => self.do_log(),
            "note" => self.do_note(rest),
            "journal" => Ok(self.journal.export_text()),
            "export" => self.do_export(rest),
            "status" => self.do_status(),
            "help" => Ok(self.do_help(rest)),
            "quit" | "q" => Ok("Goodbye!".to_string()),
            other => Err(TrackerError::InvalidCommand(other.to_string())),
        }
    }

    fn do_add(&mut self, rest: &str) -> TrackerResult<String> {
        let (kind_str, name) = split_arg(rest);
        let kind = match kind_str.to_lowercase().as_str() {
            "player" => CreatureKind::Player,
            "monster" => CreatureKind::Monster,
            _ => {
                return Err(TrackerError::InvalidCommand(
                    "usage: add player|monster <name>".to_string(),
                ));
            }
        };
        if name.is_empty() {
            return Err(TrackerError::InvalidCommand(
                "usage: add player|monster <name>".to_string(),
            ));
        }
        self.encounter.add_creature(name, kind);
        self.journal.append(JournalEntry::CreatureAdded {
            name: name.to_string(),
            kind: kind.to_string(),
            timestamp: Utc::now(),
        });
        Ok(format!("{name} joins the encounter ({kind})"))
    }

    fn do_condition(&mut self, name: &str, condition: Condition) -> TrackerResult<String> {
        let id = self.resolve(name)?;
        let now_set = self.encounter.toggle_condition(id, condition)?;
        Ok(if now_set {
            format!("{name} is now {condition}")
        } else {
            format!("{name} is no longer {condition}")
        })
    }

    fn do_condition_named(&mut self, rest: &str) -> TrackerResult<String> {
        let (name, cond_str) = split_last_arg(rest);
        let condition = Condition::parse(cond_str).ok_or_else(|| {
            TrackerError::InvalidCommand("usage: condition <name> <surprised|concentrating>".into())
        })?;
        self.do_condition(name, condition)
    }

    fn do_toggle_choice(&mut self, name: &str, kind: ChoiceKind) -> TrackerResult<String> {
        let id = self.resolve(name)?;
        let already = self
            .encounter
            .choices_for(id)
            .iter()
            .any(|c| c.kind == kind);
        if already {
            self.encounter.clear_choice(id, kind.category())?;
            Ok(format!("{name} will not {kind}"))
        } else {
            self.encounter.set_choice(id, kind)?;
            Ok(format!("{name} will {kind}"))
        }
    }

    fn do_action(&mut self, rest: &str, bonus: bool) -> TrackerResult<String> {
        let (name, kind_str) = split_last_arg(rest);
        let action = ActionKind::parse(kind_str).ok_or_else(|| {
            TrackerError::InvalidCommand(
                "usage: action|bonus <name> <dash|other|ranged|melee|spell>".into(),
            )
        })?;
        let kind = if bonus {
            ChoiceKind::Bonus(action)
        } else {
            ChoiceKind::Action(action)
        };
        self.do_toggle_choice(name, kind)
    }

    fn do_clear(&mut self, rest: &str) -> TrackerResult<String> {
        let (name, category_str) = split_last_arg(rest);
        let category = ChoiceCategory::parse(category_str).ok_or_else(|| {
            TrackerError::InvalidCommand("usage: clear <name> <move|swap|action|bonus>".into())
        })?;
        let id = self.resolve(name)?;
        if self.encounter.clear_choice(id, category)? {
            Ok(format!("cleared {name}'s {category} choice"))
        } else {
            Ok(format!("{name} had no {category} choice"))
        }
    }

    fn do_confirm(&mut self, name: &str) -> TrackerResult<String> {
        let id = self.resolve(name)?;
        let total = self.encounter.confirm(id)?;
        self.journal.append(JournalEntry::Confirmed {
            name: name.to_string(),
            total,
            round: self.encounter.round(),
            timestamp: Utc::now(),
        });
        Ok(format!("{name} locked at initiative {total}"))
    }

    fn do_order(&mut self) -> TrackerResult<String> {
        if self.encounter.roster().is_empty() {
            return Ok("No creatures yet. Try: add player Orel".to_string());
        }
        let standings = self.encounter.standings()?;
        let mut out = format!("Round {} — lower acts first\n", self.encounter.round());
        for standing in &standings.acting {
            out.push_str(&format!("  {}\n", describe_standing(standing)));
        }
        if !standings.awaiting.is_empty() {
            let names: Vec<String> = standings
                .awaiting
                .iter()
                .map(|&id| {
                    self.encounter
                        .creature(id)
                        .map(|c| c.name.clone())
                        .unwrap_or_else(|_| id.to_string())
                })
                .collect();
            out.push_str(&format!("  awaiting choice: {}\n", names.join(", ")));
        }
        Ok(out.trim_end().to_string())
    }

    fn do_next(&mut self) -> TrackerResult<String> {
        let round = self.encounter.next_round();
        self.journal.append(JournalEntry::RoundAdvanced {
            round,
            timestamp: Utc::now(),
        });
        Ok(format!("Round {round}. Choices reset."))
    }

    fn do_roll(&mut self, rest: &str) -> TrackerResult<String> {
        let (name, request) = split_last_arg(rest);
        if name.is_empty() || request.is_empty() {
            return Err(TrackerError::InvalidCommand(
                "usage: roll <name> <expression|modifier>".to_string(),
            ));
        }
        // An owner may be any name, not just roster members: the DM rolls
        // for whatever is on the table.
        let spec = match request.parse::<i64>() {
            Ok(modifier) => RollSpec::Modifier(modifier),
            Err(_) => RollSpec::Expression(request.to_string()),
        };
        let entry = self
            .rolls
            .roll_with(name, request, spec, &mut self.ability_dice)?;
        let result = describe_outcome(&entry.outcome);
        self.journal.append(JournalEntry::AbilityRoll {
            owner: name.to_string(),
            request: request.to_string(),
            result: result.clone(),
            timestamp: Utc::now(),
        });
        Ok(format!("{name} rolls {request}: {result}"))
    }

    fn do_log(&self) -> TrackerResult<String> {
        if self.rolls.is_empty() {
            return Ok("No rolls yet.".to_string());
        }
        let mut out = format!("Ability rolls ({}):\n", self.rolls.len());
        for entry in self.rolls.entries() {
            out.push_str(&format!(
                "  {} — {}: {}\n",
                entry.owner,
                entry.description,
                describe_outcome(&entry.outcome)
            ));
        }
        Ok(out.trim_end().to_string())
    }

    fn do_note(&mut self, text: &str) -> TrackerResult<String> {
        if text.is_empty() {
            return Err(TrackerError::InvalidCommand("usage: note <text>".into()));
        }
        self.journal.append(JournalEntry::Note {
            text: text.to_string(),
            timestamp: Utc::now(),
        });
        Ok("Note recorded.".to_string())
    }

    fn do_export(&self, format: &str) -> TrackerResult<String> {
        match format.to_lowercase().as_str() {
            "markdown" | "md" | "" => Ok(self.journal.export_markdown()),
            "text" | "txt" => Ok(self.journal.export_text()),
            other => Err(TrackerError::InvalidCommand(format!(
                "unknown format '{other}', use: markdown, text"
            ))),
        }
    }

    fn do_status(&self) -> TrackerResult<String> {
        let standings = self.encounter.standings()?;
        let confirmed = standings.acting.iter().filter(|s| s.confirmed).count();
        Ok(format!(
            "Round {} | seed {} | {} creatures | {} ranked ({} confirmed) | {} awaiting | {} rolls logged",
            self.encounter.round(),
            self.encounter.seed(),
            self.encounter.roster().len(),
            standings.acting.len(),
            confirmed,
            standings.awaiting.len(),
            self.rolls.len(),
        ))
    }

    fn do_help(&self, topic: &str) -> String {
        match topic.to_lowercase().as_str() {
            "choices" | "choice" => "\
Choice Commands:
  move <name>                     Toggle movement
  swap <name>                     Toggle an equipment swap
  action <name> <kind>            Set/unset the action (dash, other,
                                  ranged, melee, spell)
  bonus <name> <kind>             Set/unset the bonus action
  clear <name> <category>         Drop a choice (move, swap, action, bonus)
  confirm <name>                  Freeze the creature's total for the round"
                .to_string(),
            "rolls" | "roll" => "\
Roll Commands:
  roll <name> <expr|modifier>     Log an ability roll; bare modifiers and
                                  1d20+M roll twice (advantage-ready)
  log                             Show the ability-roll log"
                .to_string(),
            _ => "\
Tracker Commands:
  add player|monster <name>       Add a creature to the roster
  surprise <name>                 Toggle the surprised condition (+10)
  condition <name> <condition>    Toggle any condition
  move|swap <name>                Toggle a movement/swap choice
  action|bonus <name> <kind>      Declare the (bonus) action
  clear <name> <category>         Drop a choice
  confirm <name>                  Freeze the creature's total
  order                           Show the initiative order
  next                            Advance to the next round
  round                           Show the round number
  roll <name> <expr|modifier>     Log an ability roll
  log / journal / export [fmt]    Show rolls, journal, or export it
  note <text>                     Add a journal note
  status                          One-line session summary
  help [choices|rolls]            This help
  quit                            Exit"
                .to_string(),
        }
    }

    fn resolve(&self, name: &str) -> TrackerResult<CreatureId> {
        self.encounter
            .find_by_name(name)
            .map(|c| c.id)
            .ok_or_else(|| TrackerError::UnknownName(name.to_string()))
    }
}

/// Split off the first word.
fn split_arg(input: &str) -> (&str, &str) {
    match input.split_once(' ') {
        Some((head, tail)) => (head.trim(), tail.trim()),
        None => (input.trim(), ""),
    }
}

/// Split off the last word, keeping multi-word names intact.
fn split_last_arg(input: &str) -> (&str, &str) {
    match input.trim().rsplit_once(' ') {
        Some((head, tail)) => (head.trim(), tail.trim()),
        None => (input.trim(), ""),
    }
}

fn describe_standing(standing: &Standing) -> String {
    let mut line = format!("{:>3}  {}", standing.total, standing.name);
    if standing.surprised {
        line.push_str(" [surprised]");
    }
    if !standing.rolls.is_empty() {
        let choices: Vec<String> = standing
            .rolls
            .iter()
            .map(|r| format!("{} ({})", r.kind, r.roll))
            .collect();
        line.push_str(&format!("  — {}", choices.join(", ")));
    }
    if standing.confirmed {
        line.push_str("  ✔");
    }
    line
}

fn describe_outcome(outcome: &RollOutcome) -> String {
    match outcome {
        RollOutcome::Pair(a, b) => format!("{a} / {b}"),
        RollOutcome::Single(v) => v.to_string(),
        RollOutcome::Invalid => "invalid".to_string(),
    }
}
