use colored::Colorize;

use rk_dice::{Dice, DiceExpr};

pub fn run(expression: &str, seed: Option<i64>) -> Result<(), String> {
    let expr = DiceExpr::parse(expression)
        .ok_or_else(|| format!("not a dice expression: \"{expression}\""))?;

    let mut dice = match seed {
        Some(seed) => Dice::seeded(seed),
        None => Dice::from_entropy(),
    };
    let result = expr.roll(&mut dice).map_err(|e| e.to_string())?;

    println!(
        "  {} = {}  (seed {})",
        expr.to_string().bold(),
        result.to_string().bold(),
        dice.base_seed()
    );
    Ok(())
}
