//! scenario-runner: headless batch runner for the wargame scenario generator.
//!
//! Usage:
//!   scenario-runner --seed 42 --scenarios 1000
//!   scenario-runner --seed 42 --data-dir ./data --mode independent_per_side
//!   scenario-runner --seed 42 --replicates 5 --json > batches.json
//!   scenario-runner --seed 42 --json --timestamp

mod describe;

use anyhow::Result;
use chrono::{DateTime, Utc};
use std::env;
use wargame_core::{
    config::{EffectivenessMode, GeneratorConfig},
    scenario::{Column, ScenarioTable},
    synthesizer::{generate_replicates, ScenarioBatch},
};

const DURATION_BINS: usize = 10;

/// Without `--timestamp` the export is a pure function of its inputs.
#[derive(serde::Serialize)]
struct BatchExport<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    generated_at: Option<DateTime<Utc>>,
    master_seed: u64,
    replicate: u64,
    #[serde(flatten)]
    batch: &'a ScenarioBatch,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let scenarios = parse_arg(&args, "--scenarios", 1000i64);
    let replicates = parse_arg(&args, "--replicates", 1u64);
    let json_mode = args.iter().any(|a| a == "--json");
    let timestamp = args.iter().any(|a| a == "--timestamp");
    let data_dir = flag_value(&args, "--data-dir");
    let mode: EffectivenessMode = flag_value(&args, "--mode")
        .unwrap_or("shared_snapshot")
        .parse()?;

    let config = match data_dir {
        Some(dir) => {
            log::info!("Loading generator tables from {dir}");
            GeneratorConfig::load(dir)?
        }
        None => GeneratorConfig::default(),
    }
    .with_mode(mode);

    if !json_mode {
        println!("Monte Carlo Wargame Simulation — scenario-runner");
        println!("  seed:        {seed}");
        println!("  scenarios:   {scenarios}");
        println!("  replicates:  {replicates}");
        println!("  mode:        {mode:?}");
        println!("  data_dir:    {}", data_dir.unwrap_or("(built-in tables)"));
        println!();
    }

    let batches = generate_replicates(seed, &config, scenarios, replicates)?;

    if json_mode {
        let generated_at = timestamp.then(Utc::now);
        let exports = batch_exports(&batches, seed, generated_at);
        println!("{}", serde_json::to_string_pretty(&exports)?);
        return Ok(());
    }

    for (i, batch) in batches.iter().enumerate() {
        if batches.len() > 1 {
            println!("=== REPLICATE {i} (stream seed {}) ===", batch.seed);
        }
        print_snapshots(batch);
        print_summary(&batch.scenarios);
    }
    Ok(())
}

fn batch_exports(
    batches: &[ScenarioBatch],
    master_seed: u64,
    generated_at: Option<DateTime<Utc>>,
) -> Vec<BatchExport<'_>> {
    batches
        .iter()
        .enumerate()
        .map(|(i, batch)| BatchExport {
            generated_at,
            master_seed,
            replicate: i as u64,
            batch,
        })
        .collect()
}

fn print_snapshots(batch: &ScenarioBatch) {
    println!("=== WEAPON EFFECTIVENESS SNAPSHOT ===");
    for category in batch.weapon_effectiveness.categories() {
        if let Some(metrics) = batch.weapon_effectiveness.category(category) {
            let line: Vec<String> = metrics
                .iter()
                .map(|(metric, value)| format!("{metric}={value:.3}"))
                .collect();
            println!("  {category:<16} {}", line.join("  "));
        }
    }

    println!();
    println!("=== NATIONAL CAPABILITIES ===");
    for (nation, caps) in batch.national_capabilities.iter() {
        println!(
            "  {nation:<10} personnel={:>9}  budget=${:.1}bn  tech={:.2}  cyber_def={:.2}  supply={:.2}",
            caps.military_personnel,
            caps.military_budget_billion_usd,
            caps.technological_readiness,
            caps.cyber_defense_capability,
            caps.supply_chain_resilience
        );
    }
    println!();
}

fn print_summary(table: &ScenarioTable) {
    println!("=== SIMULATION SCENARIO OVERVIEW ({} rows) ===", table.len());
    if table.is_empty() {
        println!("  (No scenarios generated)");
        println!();
        return;
    }

    println!(
        "  {:<34} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12} {:>12}",
        "column", "mean", "std", "min", "25%", "50%", "75%", "max"
    );
    for s in describe::describe(table) {
        println!(
            "  {:<34} {:>12.3} {:>12.3} {:>12.3} {:>12.3} {:>12.3} {:>12.3} {:>12.3}",
            s.name, s.mean, s.std, s.min, s.p25, s.p50, s.p75, s.max
        );
    }

    println!();
    println!("=== INITIAL AGGRESSOR ===");
    if let Some(Column::Text(names)) = table.column("initial_aggressor") {
        for nation in ["Nation_A", "Nation_B"] {
            let n = names.iter().filter(|name| *name == nation).count();
            println!("  {nation:<10} {n:>6}  ({:.1}%)", 100.0 * n as f64 / names.len() as f64);
        }
    }

    println!();
    println!("=== CONFLICT TYPE PROBABILITIES ===");
    for (label, share) in describe::conflict_type_shares(table) {
        println!("  {label:<20} {:.1}%", share * 100.0);
    }

    println!();
    println!("=== CONFLICT DURATION DISTRIBUTION (days) ===");
    if let Some(durations) = table.column("conflict_duration_days") {
        let values = durations.as_real().unwrap_or_default();
        for (lo, hi, n) in describe::histogram(values, DURATION_BINS) {
            println!("  {lo:>6.1} – {hi:>6.1}  {n:>6}  {}", "#".repeat(bar_width(n, values.len())));
        }
    }

    println!();
    println!("=== CYBER DISRUPTION VS ECONOMIC DAMAGE ===");
    let cyber = table.column("cyber_disruption_potential_A");
    let damage = table.column("economic_damage_billion_usd");
    if let (Some(cyber), Some(damage)) = (cyber, damage) {
        let r = describe::correlation(
            cyber.as_real().unwrap_or_default(),
            damage.as_real().unwrap_or_default(),
        );
        if r.is_nan() {
            println!("  correlation: undefined (cyber disruption is constant across scenarios)");
        } else {
            println!("  correlation: {r:.3}");
        }
    }
    println!();
}

fn bar_width(n: usize, total: usize) -> usize {
    if total == 0 {
        return 0;
    }
    (n * 50).div_ceil(total)
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export_json(generated_at: Option<DateTime<Utc>>) -> String {
        let batches = generate_replicates(42, &GeneratorConfig::default(), 5, 2).unwrap();
        serde_json::to_string_pretty(&batch_exports(&batches, 42, generated_at)).unwrap()
    }

    #[test]
    fn unstamped_exports_are_byte_identical() {
        let first = export_json(None);
        let second = export_json(None);
        assert_eq!(first, second);
        assert!(!first.contains("generated_at"));
    }

    #[test]
    fn timestamp_is_added_only_when_requested() {
        let stamped: serde_json::Value = serde_json::from_str(&export_json(Some(Utc::now()))).unwrap();
        let exports = stamped.as_array().unwrap();
        assert_eq!(exports.len(), 2);
        assert!(exports.iter().all(|e| e["generated_at"].is_string()));
        assert_eq!(exports[1]["replicate"], 1);
        assert_eq!(exports[0]["master_seed"], 42);
    }
}
