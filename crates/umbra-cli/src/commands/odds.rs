use colored::Colorize;
use comfy_table::{ContentArrangement, Table};

use umbra_mechanics::{PoolSpec, TableConfig, estimate_odds};

pub fn run(config: &TableConfig, pool: PoolSpec, trials: u32, json: bool) -> Result<(), String> {
    if trials == 0 {
        return Err("trials must be at least 1".to_string());
    }

    let mut rng = config.rng();
    let odds = estimate_odds(pool, config.difficulty, trials, &mut rng);

    if json {
        return super::print_json(&odds);
    }

    println!(
        "  {} {} {}",
        "Odds".bold(),
        pool,
        format!("(difficulty {}, {trials} rolls)", config.difficulty).dimmed()
    );
    println!(
        "  mean {:.2} successes, success {:.1}%, botch {:.1}%",
        odds.mean_successes,
        odds.success_rate * 100.0,
        odds.botch_rate * 100.0
    );
    println!();

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Successes", "Exactly", "At least"]);
    for (&successes, &count) in &odds.histogram {
        let exactly = f64::from(count) / f64::from(trials) * 100.0;
        table.add_row(vec![
            successes.to_string(),
            format!("{exactly:.1}%"),
            format!("{:.1}%", odds.at_least(successes) * 100.0),
        ]);
    }
    println!("{table}");
    Ok(())
}
