use colored::Colorize;

use umbra_mechanics::{TableConfig, evaluate_damage_with_limit};

pub fn run(config: &TableConfig, formula: &str, successes: u32, json: bool) -> Result<(), String> {
    let mut rng = config.rng();
    let result = evaluate_damage_with_limit(formula, successes, config.max_group_dice, &mut rng);

    if json {
        return super::print_json(&result);
    }

    let Some(result) = result else {
        println!("  {}", "No damage formula.".dimmed());
        return Ok(());
    };

    println!("  {} {}", "Damage".bold(), result.formula.trim());
    println!("    {}", result.breakdown().dimmed());
    match &result.error {
        Some(error) => println!("    {} {error}", "formula error:".red().bold()),
        None => println!("    {} {}", "total:".bold(), result.total),
    }
    Ok(())
}
