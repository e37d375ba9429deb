//! Text rendering of monster statblocks.

use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use rk_bestiary::Monster;
use rk_bestiary::format::{ability_modifier, humanize, signed};
use rk_bestiary::statblock::{SenseValue, SpeedValue};

/// Print a full statblock to stdout.
pub fn render(monster: &Monster) {
    let mut heading = format!("{} {}", monster.size, monster.kind);
    if let Some(subtype) = &monster.subtype {
        heading.push_str(&format!(" ({subtype})"));
    }
    if !monster.alignment.is_empty() {
        heading.push_str(&format!(", {}", monster.alignment));
    }
    println!("  {} [{}]", monster.name.bold(), heading.dimmed());
    println!();

    let hit_points = match &monster.hit_dice {
        Some(dice) => format!("{} ({dice})", monster.hit_points),
        None => monster.hit_points.to_string(),
    };
    println!("  Armor Class {}", monster.armor_class);
    println!("  Hit Points  {hit_points}");
    if !monster.speed.is_empty() {
        let speeds: Vec<String> = monster
            .speed
            .iter()
            .map(|(mode, value)| match value {
                SpeedValue::Distance(d) => format!("{mode} {d}"),
                SpeedValue::Flag(true) => mode.clone(),
                SpeedValue::Flag(false) => format!("no {mode}"),
            })
            .collect();
        println!("  Speed       {}", speeds.join(", "));
    }
    println!();

    let mut abilities = Table::new();
    abilities.set_content_arrangement(ContentArrangement::Dynamic);
    abilities.set_header(vec!["STR", "DEX", "CON", "INT", "WIS", "CHA"]);
    abilities.add_row(
        [
            monster.strength,
            monster.dexterity,
            monster.constitution,
            monster.intelligence,
            monster.wisdom,
            monster.charisma,
        ]
        .iter()
        .map(|&score| format!("{score} ({})", signed(ability_modifier(score))))
        .collect::<Vec<_>>(),
    );
    println!("{abilities}");
    println!();

    if !monster.proficiencies.is_empty() {
        let skills: Vec<String> = monster
            .proficiencies
            .iter()
            .map(|p| format!("{} {}", p.name.trim_start_matches("Skill: "), signed(p.value)))
            .collect();
        println!("  Skills      {}", skills.join(", "));
    }
    for (label, listing) in [
        ("Vulnerable ", &monster.damage_vulnerabilities),
        ("Resistant  ", &monster.damage_resistances),
        ("Immune     ", &monster.damage_immunities),
    ] {
        if !listing.is_empty() {
            println!("  {label} {}", listing.join(", "));
        }
    }
    if !monster.condition_immunities.is_empty() {
        let conditions: Vec<&str> = monster
            .condition_immunities
            .iter()
            .map(|term| term.name.as_str())
            .collect();
        println!("  Condition immunities  {}", conditions.join(", "));
    }
    if !monster.senses.is_empty() {
        let senses: Vec<String> = monster
            .senses
            .iter()
            .map(|(name, value)| match value {
                SenseValue::Text(t) => format!("{} {t}", humanize(name)),
                SenseValue::Number(n) => format!("{} {n}", humanize(name)),
            })
            .collect();
        println!("  Senses      {}", senses.join(", "));
    }
    if !monster.languages.is_empty() {
        println!("  Languages   {}", monster.languages);
    }
    println!(
        "  Challenge   {}",
        format_challenge_rating(monster.challenge_rating)
    );

    if let Some(abilities) = &monster.special_abilities {
        println!();
        for ability in abilities {
            println!("  {}. {}", ability.name.bold(), ability.desc);
        }
    }
    if let Some(actions) = &monster.actions {
        println!();
        println!("  {}", "Actions".bold());
        for action in actions {
            println!("  {}. {}", action.name.bold(), action.desc);
        }
    }
    if let Some(actions) = &monster.legendary_actions {
        println!();
        println!("  {}", "Legendary Actions".bold());
        for action in actions {
            println!("  {}. {}", action.name.bold(), action.desc);
        }
    }
    if let Some(note) = &monster.note {
        println!();
        println!("  {}", note.italic());
    }
}

/// Render a challenge rating the way books print it (1/8 instead of 0.125).
pub fn format_challenge_rating(cr: f64) -> String {
    if cr == 0.125 {
        "1/8".to_string()
    } else if cr == 0.25 {
        "1/4".to_string()
    } else if cr == 0.5 {
        "1/2".to_string()
    } else if cr.fract() == 0.0 {
        (cr as i64).to_string()
    } else {
        cr.to_string()
    }
}
