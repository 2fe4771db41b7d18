use std::path::PathBuf;

use clap::Parser;

use stormhold_bench::config::BenchConfig;
use stormhold_bench::logging::init_logging;
use stormhold_bench::scenario::ScenarioRunner;

/// Scenario harness for stormhold bots.
#[derive(Debug, Parser)]
#[command(
    name = "stormhold-bench",
    author,
    version,
    about = "Scripted decision-point harness for stormhold bots"
)]
struct Cli {
    /// Path to the YAML configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "bench/bench.yaml")]
    config: PathBuf,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Override the RNG seed for bot construction.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Exit after validating the configuration (nothing is run).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = BenchConfig::from_path(&cli.config)?;

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }
    if let Some(seed) = cli.seed {
        config.seed = seed;
    }
    config.validate()?;

    if cli.validate_only {
        println!("configuration ok: {} scenario(s)", config.scenarios.len());
        return Ok(());
    }

    let _logging = init_logging(&config.logging, &config.resolved_output())?;

    let output = config.resolved_output();
    let runner = ScenarioRunner::new(config);
    let rows = runner.run()?;

    let passes = rows.iter().filter(|row| row.passed).count();
    println!(
        "{} decision(s) recorded to {} ({} passed)",
        rows.len(),
        output.display(),
        passes,
    );
    Ok(())
}
