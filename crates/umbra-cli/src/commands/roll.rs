use colored::Colorize;

use umbra_mechanics::{PoolSpec, TableConfig, resolve_pool};

pub fn run(config: &TableConfig, pool: PoolSpec, json: bool) -> Result<(), String> {
    let mut rng = config.rng();
    let outcome = resolve_pool(pool, config.difficulty, &mut rng);

    if json {
        return super::print_json(&outcome);
    }

    println!(
        "  {} {} {}",
        "Roll".bold(),
        pool,
        format!("(difficulty {})", config.difficulty).dimmed()
    );
    super::print_outcome(&outcome);
    Ok(())
}
