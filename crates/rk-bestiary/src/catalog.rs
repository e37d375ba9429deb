//! The on-disk SRD catalog.
//!
//! Reference data ships as two bulk JSON arrays (monsters, spells). A
//! one-time split turns each array into one file per entry plus an
//! `index.json` listing the entry names, so the viewer can load a single
//! statblock without parsing megabytes. Entries are passed through untyped
//! during the split; only the monster loader interprets them.

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::error::{BestiaryError, BestiaryResult};
use crate::statblock::Monster;

/// The catalog kinds the split understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceKind {
    /// Monster statblocks.
    Monster,
    /// Spell descriptions.
    Spell,
}

impl ReferenceKind {
    /// Subdirectory name for this kind.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Monster => "monster",
            Self::Spell => "spell",
        }
    }
}

/// Split a bulk reference array into per-entry files plus an index file.
///
/// Each entry's `index` field becomes its filename stem. Returns how many
/// entries were written.
pub fn split_reference(
    bulk_path: &Path,
    out_dir: &Path,
    kind: ReferenceKind,
) -> BestiaryResult<usize> {
    let text = read_file(bulk_path)?;
    let entries: Vec<Value> = parse_json(bulk_path, &text)?;

    let kind_dir = out_dir.join(kind.dir_name());
    fs::create_dir_all(&kind_dir).map_err(|source| BestiaryError::Io {
        path: kind_dir.clone(),
        source,
    })?;

    let mut index = Vec::with_capacity(entries.len());
    for (position, entry) in entries.iter().enumerate() {
        let stem = entry
            .get("index")
            .and_then(Value::as_str)
            .ok_or(BestiaryError::MissingIndex { position })?;
        let path = kind_dir.join(format!("{stem}.json"));
        write_json(&path, entry)?;
        index.push(stem.to_string());
    }

    let index_path = kind_dir.join("index.json");
    write_json(&index_path, &index)?;
    Ok(index.len())
}

/// Load the index listing for a catalog kind.
pub fn load_index(dir: &Path, kind: ReferenceKind) -> BestiaryResult<Vec<String>> {
    let path = dir.join(kind.dir_name()).join("index.json");
    let text = read_file(&path)?;
    parse_json(&path, &text)
}

/// Load one monster statblock by its index name.
pub fn load_monster(dir: &Path, index: &str) -> BestiaryResult<Monster> {
    let path = dir
        .join(ReferenceKind::Monster.dir_name())
        .join(format!("{index}.json"));
    if !path.is_file() {
        return Err(BestiaryError::UnknownEntry(index.to_string()));
    }
    let text = read_file(&path)?;
    parse_json(&path, &text)
}

fn read_file(path: &Path) -> BestiaryResult<String> {
    fs::read_to_string(path).map_err(|source| BestiaryError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_json<T: serde::de::DeserializeOwned>(path: &Path, text: &str) -> BestiaryResult<T> {
    serde_json::from_str(text).map_err(|source| BestiaryError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> BestiaryResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(|source| BestiaryError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, text).map_err(|source| BestiaryError::Io {
        path: path.to_path_buf(),
        source,
    })
}
