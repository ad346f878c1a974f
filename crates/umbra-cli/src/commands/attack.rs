use colored::Colorize;

use umbra_mechanics::{AttackRequest, PoolSpec, TableConfig, resolve_attack};

pub fn run(
    config: &TableConfig,
    attack: PoolSpec,
    defense: PoolSpec,
    absorption: PoolSpec,
    formula: &str,
    json: bool,
) -> Result<(), String> {
    let request = AttackRequest::new(attack, defense, absorption, formula).with_config(config);
    let mut rng = config.rng();
    let result = resolve_attack(&request, &mut rng);

    if json {
        return super::print_json(&result);
    }

    println!(
        "  {} {} vs {} {}",
        "Attack".bold(),
        attack,
        defense,
        format!("(difficulty {})", request.difficulty).dimmed()
    );
    println!();

    println!("  {}", "Attack roll".underline());
    super::print_outcome(&result.attack);
    println!("  {}", "Defense roll".underline());
    super::print_outcome(&result.defense);
    println!("    {:<13} {}", "net:", result.net_successes);
    println!();

    println!("  {}", "Damage".underline());
    match &result.damage {
        Some(damage) => {
            println!("    {}", damage.breakdown().dimmed());
            if let Some(error) = &damage.error {
                println!("    {} {error}", "formula error:".red().bold());
            }
        }
        None => println!("    {}", "no damage formula".dimmed()),
    }
    println!("    {:<13} {}", "weapon:", result.weapon_damage);
    println!();

    println!("  {} {}", "Absorption roll".underline(), absorption);
    super::print_outcome(&result.absorption);
    println!();

    let final_damage = result.final_damage.to_string();
    let final_damage = if result.final_damage > 0 {
        final_damage.red().bold()
    } else {
        final_damage.normal()
    };
    println!("  {} {final_damage}", "Final damage:".bold());
    Ok(())
}
