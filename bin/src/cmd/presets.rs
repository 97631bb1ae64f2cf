//! Presets command implementation.

use anyhow::Result;
use screener_scoring::{ScoreScale, available_presets};

/// List the built-in scoring presets.
pub(crate) fn list_presets(verbose: bool) -> Result<()> {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║                    Scoring Presets                           ║");
    println!("╚══════════════════════════════════════════════════════════════╝\n");

    for info in available_presets() {
        let scale = match info.scale {
            ScoreScale::Points => "points",
            ScoreScale::Fraction => "fraction",
        };
        println!("{:12} [{scale}] {}", info.name, info.description);

        if verbose {
            let rules = info.rules();
            println!("{}", "-".repeat(60));
            for wc in &rules.criteria {
                let weight = format_weight(wc.weight, info.scale);
                println!("  {:>6}  {}", weight, wc.criterion.describe());
            }
            println!("  max score: {}", rules.max_score);
            if info.sector_relative {
                println!("  compares P/E against the batch's sector averages");
            }
            println!();
        }
    }

    if !verbose {
        println!("\nUse --verbose to list each preset's criteria.\n");
    }

    println!("Preset aliases:");
    for info in available_presets() {
        if !info.aliases.is_empty() {
            println!("  {:22} -> {}", info.aliases.join(", "), info.name);
        }
    }
    println!();

    Ok(())
}

fn format_weight(weight: f64, scale: ScoreScale) -> String {
    match scale {
        ScoreScale::Points => format!("+{weight}"),
        ScoreScale::Fraction => format!("{:.0}%", weight * 100.0),
    }
}
