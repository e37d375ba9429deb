//! Session journal: a chronological record of what happened at the table.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry in the session journal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum JournalEntry {
    /// A creature joined the roster.
    CreatureAdded {
        /// Creature name.
        name: String,
        /// "player" or "monster".
        kind: String,
        /// When it joined.
        timestamp: DateTime<Utc>,
    },
    /// A creature's initiative total was confirmed.
    Confirmed {
        /// Creature name.
        name: String,
        /// The frozen total.
        total: i32,
        /// Round number.
        round: u32,
        /// When it was confirmed.
        timestamp: DateTime<Utc>,
    },
    /// The encounter advanced to a new round.
    RoundAdvanced {
        /// The round that just started.
        round: u32,
        /// When it advanced.
        timestamp: DateTime<Utc>,
    },
    /// An ability roll from the roll log.
    AbilityRoll {
        /// Who rolled.
        owner: String,
        /// What was rolled (expression or modifier).
        request: String,
        /// Rendered result ("14 / 9", "7", or "invalid").
        result: String,
        /// When it was rolled.
        timestamp: DateTime<Utc>,
    },
    /// A freeform note.
    Note {
        /// The note text.
        text: String,
        /// When recorded.
        timestamp: DateTime<Utc>,
    },
}

/// A chronological log of session events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

impl Journal {
    /// Create an empty journal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn append(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[JournalEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the journal is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export the journal as plain text, one line per entry.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Encounter Journal\n");
        for entry in &self.entries {
            match entry {
                JournalEntry::CreatureAdded { name, kind, .. } => {
                    out.push_str(&format!("+ {name} joins ({kind})\n"));
                }
                JournalEntry::Confirmed {
                    name, total, round, ..
                } => {
                    out.push_str(&format!("* round {round}: {name} locked at {total}\n"));
                }
                JournalEntry::RoundAdvanced { round, .. } => {
                    out.push_str(&format!("--- round {round} ---\n"));
                }
                JournalEntry::AbilityRoll {
                    owner,
                    request,
                    result,
                    ..
                } => {
                    out.push_str(&format!("~ {owner} rolls {request}: {result}\n"));
                }
                JournalEntry::Note { text, .. } => {
                    out.push_str(&format!("> {text}\n"));
                }
            }
        }
        out
    }

    /// Export the journal as markdown.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Encounter Journal\n\n");
        for entry in &self.entries {
            match entry {
                JournalEntry::CreatureAdded { name, kind, .. } => {
                    out.push_str(&format!("- **{name}** joins the encounter ({kind})\n"));
                }
                JournalEntry::Confirmed {
                    name, total, round, ..
                } => {
                    out.push_str(&format!(
                        "- Round {round}: **{name}** confirmed at initiative **{total}**\n"
                    ));
                }
                JournalEntry::RoundAdvanced { round, .. } => {
                    out.push_str(&format!("\n## Round {round}\n\n"));
                }
                JournalEntry::AbilityRoll {
                    owner,
                    request,
                    result,
                    ..
                } => {
                    out.push_str(&format!("- *{owner}* rolls {request}: {result}\n"));
                }
                JournalEntry::Note { text, .. } => {
                    out.push_str(&format!("> {text}\n"));
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_export_lists_entries() {
        let mut journal = Journal::new();
        journal.append(JournalEntry::CreatureAdded {
            name: "Orel".into(),
            kind: "player".into(),
            timestamp: Utc::now(),
        });
        journal.append(JournalEntry::Confirmed {
            name: "Orel".into(),
            total: 12,
            round: 1,
            timestamp: Utc::now(),
        });
        let text = journal.export_text();
        assert!(text.contains("+ Orel joins (player)"));
        assert!(text.contains("round 1: Orel locked at 12"));
        assert_eq!(journal.len(), 2);
    }

    #[test]
    fn markdown_export_has_round_headings() {
        let mut journal = Journal::new();
        journal.append(JournalEntry::RoundAdvanced {
            round: 2,
            timestamp: Utc::now(),
        });
        assert!(journal.export_markdown().contains("## Round 2"));
    }

    #[test]
    fn serde_round_trip() {
        let mut journal = Journal::new();
        journal.append(JournalEntry::Note {
            text: "goblins flee".into(),
            timestamp: Utc::now(),
        });
        let json = serde_json::to_string(&journal).unwrap();
        let back: Journal = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
    }
}
