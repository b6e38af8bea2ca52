use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use oxiguess::{guess_oxidation_states, ChargeSolutions, EngineBackend, GuessConfig, OxidationPolicy};
use tracing_subscriber::EnvFilter;

/// Guess oxidation states of a compound by charge balance
#[derive(Parser)]
#[command(name = "oxiguess", version, about)]
struct Cli {
    /// Chemical formula, e.g. Fe3O4 or Ca3(PO4)2
    formula: String,

    /// Candidate oxidation states: common, all or shannon
    #[arg(long, value_name = "POLICY")]
    policy: Option<OxidationPolicy>,

    /// Maximum number of solutions to enumerate
    #[arg(long, value_name = "N")]
    max_results: Option<usize>,

    /// Constraint engine: backtracking, cbc or highs
    #[arg(long, value_name = "ENGINE")]
    backend: Option<EngineBackend>,

    /// Exclude solution multiples k for 1 <= k < K (default: total atom count)
    #[arg(long, value_name = "K")]
    multiplier_bound: Option<u32>,

    /// Branching steps allowed per engine check
    #[arg(long, value_name = "N")]
    step_limit: Option<u64>,

    /// TOML configuration file; flags override its values
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn guess_config(&self) -> Result<GuessConfig> {
        let mut config = match &self.config {
            Some(path) => GuessConfig::load(path)
                .with_context(|| format!("loading configuration from {}", path.display()))?,
            None => GuessConfig::default(),
        };
        if let Some(policy) = self.policy {
            config = config.with_policy(policy);
        }
        if let Some(max_results) = self.max_results {
            config = config.with_max_results(max_results);
        }
        if let Some(backend) = self.backend {
            config = config.with_backend(backend);
        }
        if let Some(bound) = self.multiplier_bound {
            config = config.with_multiplier_bound(bound);
        }
        if let Some(limit) = self.step_limit {
            config = config.with_step_limit(limit);
        }
        Ok(config)
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_solutions(solutions: &ChargeSolutions) {
    if solutions.is_empty() {
        println!("No solutions found.");
    }
    for (i, solution) in solutions.iter().enumerate() {
        println!("({}) {}", i + 1, solution);
    }
    if solutions.truncated {
        println!(
            "Stopped after {} solutions; more charge-balanced assignments exist.",
            solutions.len()
        );
    }
    if solutions.exhausted {
        println!("Search step limit reached; the list may be incomplete.");
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.guess_config()?;
    let solutions = guess_oxidation_states(&cli.formula, &config)
        .with_context(|| format!("guessing oxidation states for {}", cli.formula))?;
    print_solutions(&solutions);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
