pub mod attack;
pub mod damage;
pub mod odds;
pub mod roll;

use colored::{ColoredString, Colorize};
use serde::Serialize;

use umbra_mechanics::{DiceKind, RollOutcome, Verdict};

/// Print any result as pretty JSON on stdout.
fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let text =
        serde_json::to_string_pretty(value).map_err(|e| format!("cannot encode JSON: {e}"))?;
    println!("{text}");
    Ok(())
}

/// Render the faces of one kind: kept successes green, cancelled ones
/// struck through, 1s red.
fn render_faces(outcome: &RollOutcome, kind: DiceKind) -> String {
    let faces: Vec<String> = outcome
        .dice
        .iter()
        .filter(|d| d.face.kind == kind)
        .map(|d| {
            let text = d.face.value.to_string();
            if d.face.is_one() {
                text.red().to_string()
            } else if d.kept > 0 {
                text.green().bold().to_string()
            } else if d.cancelled() > 0 {
                text.dimmed().strikethrough().to_string()
            } else {
                text
            }
        })
        .collect();

    if faces.is_empty() {
        "-".dimmed().to_string()
    } else {
        faces.join(" ")
    }
}

fn render_verdict(verdict: Verdict) -> ColoredString {
    let text = verdict.to_string();
    match verdict {
        Verdict::Success { .. } => text.green().bold(),
        Verdict::Failure => text.yellow(),
        Verdict::Botch => text.red().bold(),
    }
}

/// Print the dice lines and verdict of a pool, indented under a heading.
fn print_outcome(outcome: &RollOutcome) {
    println!(
        "    {:<13} {}",
        "soul:",
        render_faces(outcome, DiceKind::Soul)
    );
    println!(
        "    {:<13} {}",
        "assimilation:",
        render_faces(outcome, DiceKind::Assimilation)
    );
    if outcome.madness_triggers > 0 {
        let madness = format!(
            "{} trigger(s), {} success(es) lost",
            outcome.madness_triggers, outcome.cancelled
        );
        println!("    {:<13} {}", "madness:", madness.magenta());
    }
    println!("    {:<13} {}", "result:", render_verdict(outcome.verdict()));
}
