use std::path::Path;

use comfy_table::{ContentArrangement, Table};

use rk_bestiary::{ReferenceKind, load_index, load_monster, split_reference};

use crate::statblock;

pub fn split(monsters: &Path, spells: Option<&Path>, out: &Path) -> Result<(), String> {
    let written = split_reference(monsters, out, ReferenceKind::Monster)
        .map_err(|e| e.to_string())?;
    println!("  {written} monsters written to {}", out.join("monster").display());

    if let Some(spells) = spells {
        let written =
            split_reference(spells, out, ReferenceKind::Spell).map_err(|e| e.to_string())?;
        println!("  {written} spells written to {}", out.join("spell").display());
    }
    Ok(())
}

pub fn list(dir: &Path) -> Result<(), String> {
    let index = load_index(dir, ReferenceKind::Monster).map_err(|e| e.to_string())?;
    if index.is_empty() {
        println!("  Catalog is empty.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Index", "Name", "CR", "AC", "HP"]);

    for stem in &index {
        let monster = load_monster(dir, stem).map_err(|e| e.to_string())?;
        table.add_row(vec![
            monster.index.clone(),
            monster.name.clone(),
            statblock::format_challenge_rating(monster.challenge_rating),
            monster.armor_class.to_string(),
            monster.hit_points.to_string(),
        ]);
    }

    println!("{table}");
    println!();
    println!("  {} monsters", index.len());
    Ok(())
}

pub fn show(dir: &Path, index: &str) -> Result<(), String> {
    let monster = load_monster(dir, index).map_err(|e| e.to_string())?;
    statblock::render(&monster);
    Ok(())
}
