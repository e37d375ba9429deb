use colored::Colorize;

use rk_bestiary::{average_damage_for_action, generate, humanoid, sneak};

use crate::statblock;

pub fn run(cr: f64, name: &str, archetype: Option<&str>, json: bool) -> Result<(), String> {
    if !cr.is_finite() || cr < 0.0 {
        return Err(format!("challenge rating must be a non-negative number, got {cr}"));
    }

    let generated = match archetype {
        None => humanoid(name, cr),
        Some("sneak") => sneak(humanoid(name, cr)),
        Some(other) => return Err(format!("unknown archetype \"{other}\", try: sneak")),
    };

    if json {
        let text = serde_json::to_string_pretty(&generated).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    statblock::render(&generated.monster);

    let template = &generated.template;
    println!();
    println!("  {}", "Balance targets".bold());
    println!("  attack bonus: +{}", template.attack_bonus);
    println!("  damage quota: {:.1}/round", template.damage_quota);
    println!("  save DC:      {}", template.dc_value);

    if let Some(actions) = &generated.monster.actions {
        for action in actions {
            let average = average_damage_for_action(action, actions);
            // Reference data can defeat estimation; only show finite numbers.
            if average.is_finite() {
                println!("  {} averages {average:.1} damage", action.name);
            }
        }
    }

    let baseline = generate(cr);
    if template.damage_quota > baseline.damage_quota {
        println!(
            "  (quota raised from {:.1} by the archetype)",
            baseline.damage_quota
        );
    }
    Ok(())
}
