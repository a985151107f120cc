//! Stratscore CLI: score, filter and synth commands.
//!
//! Commands:
//! - `score`: compute every metric and the composite score for an order file
//! - `filter`: pass/fail a strategy against a composite score threshold
//! - `synth`: write a deterministic synthetic order file

mod evaluate;
mod loader;
mod logging;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use stratscore_core::stats::keys;
use stratscore_core::synthetic::generate_orders;
use stratscore_core::{Direction, PlType, SampleType};
use stratscore_metrics::{MetricRegistry, ScoreConfig, StrategyFilter};

use crate::evaluate::{evaluate, Evaluation};

#[derive(Parser)]
#[command(name = "stratscore", about = "Stratscore CLI: strategy metrics and composite scoring")]
struct Cli {
    /// Default log level when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// Inputs shared by `score` and `filter`.
#[derive(clap::Args)]
struct EvalArgs {
    /// Order files: CSV, or JSON when the extension is `.json`. Repeat to
    /// evaluate several strategies in parallel.
    #[arg(long, required = true)]
    orders: Vec<PathBuf>,

    /// Out-of-sample ranges (JSON array). Overrides ranges in --config.
    #[arg(long)]
    oos: Option<PathBuf>,

    /// Scoring config (TOML).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Trade direction to evaluate.
    #[arg(long, value_enum)]
    direction: Option<DirectionArg>,

    /// P/L column to evaluate.
    #[arg(long, value_enum)]
    pl_type: Option<PlTypeArg>,

    /// Sample to evaluate.
    #[arg(long, value_enum)]
    sample: Option<SampleArg>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute all metrics and the composite score.
    Score {
        #[command(flatten)]
        eval: EvalArgs,

        /// Print the full statistics map as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Check the composite score against a threshold.
    Filter {
        #[command(flatten)]
        eval: EvalArgs,

        /// Minimum composite score (0..100). Overrides the config threshold.
        #[arg(long)]
        threshold: Option<String>,
    },
    /// Write a deterministic synthetic order history as CSV.
    Synth {
        /// Number of trades.
        #[arg(long, default_value_t = 500)]
        trades: usize,

        /// RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// First trade open time (RFC 3339).
        #[arg(long, default_value = "2020-01-06T09:30:00Z")]
        start: String,

        /// Output CSV path.
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum DirectionArg {
    Both,
    Long,
    Short,
}

impl From<DirectionArg> for Direction {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Both => Direction::Both,
            DirectionArg::Long => Direction::LongOnly,
            DirectionArg::Short => Direction::ShortOnly,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum PlTypeArg {
    Money,
    Percent,
}

impl From<PlTypeArg> for PlType {
    fn from(arg: PlTypeArg) -> Self {
        match arg {
            PlTypeArg::Money => PlType::Money,
            PlTypeArg::Percent => PlType::Percent,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum SampleArg {
    In,
    Out,
}

impl From<SampleArg> for SampleType {
    fn from(arg: SampleArg) -> Self {
        match arg {
            SampleArg::In => SampleType::InSample,
            SampleArg::Out => SampleType::OutOfSample,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level);

    match cli.command {
        Commands::Score { eval, json } => run_score(&eval, json),
        Commands::Filter { eval, threshold } => run_filter(&eval, threshold),
        Commands::Synth {
            trades,
            seed,
            start,
            out,
        } => run_synth(trades, seed, &start, &out),
    }
}

/// A scored order file.
struct Scored {
    path: PathBuf,
    evaluation: Evaluation,
}

/// Resolve config, flags and input files, then score every order file.
fn run_eval(args: &EvalArgs) -> Result<(ScoreConfig, MetricRegistry, Vec<Scored>)> {
    let mut config = match &args.config {
        Some(path) => ScoreConfig::load(path)?,
        None => ScoreConfig::default(),
    };
    if let Some(direction) = args.direction {
        config.selector.direction = direction.into();
    }
    if let Some(pl_type) = args.pl_type {
        config.selector.pl_type = pl_type.into();
    }
    if let Some(sample) = args.sample {
        config.selector.sample = sample.into();
    }
    if let Some(path) = &args.oos {
        config.oos = Some(loader::load_oos(path)?);
    }
    if config.selector.sample == SampleType::OutOfSample && config.oos.is_none() {
        bail!("--sample out requires out-of-sample ranges (--oos or [[oos]] in --config)");
    }

    let registry = MetricRegistry::standard();
    let scored = args
        .orders
        .par_iter()
        .map(|path| -> Result<Scored> {
            let orders = loader::load_orders(path)?;
            let evaluation = evaluate(
                &registry,
                &orders,
                config.selector,
                config.oos.as_ref(),
                &config.weights,
            );
            Ok(Scored {
                path: path.clone(),
                evaluation,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((config, registry, scored))
}

fn run_score(args: &EvalArgs, json: bool) -> Result<()> {
    let (_, registry, scored) = run_eval(args)?;

    if json {
        let text = match scored.as_slice() {
            [single] => serde_json::to_string_pretty(&single.evaluation),
            many => {
                let by_path: BTreeMap<String, &Evaluation> = many
                    .iter()
                    .map(|s| (s.path.display().to_string(), &s.evaluation))
                    .collect();
                serde_json::to_string_pretty(&by_path)
            }
        }
        .context("failed to serialize evaluation to JSON")?;
        println!("{text}");
        return Ok(());
    }

    for (i, s) in scored.iter().enumerate() {
        if scored.len() > 1 {
            if i > 0 {
                println!();
            }
            println!("== {} ==", s.path.display());
        }
        print_summary(&registry, &s.evaluation);
    }
    Ok(())
}

fn run_filter(args: &EvalArgs, threshold: Option<String>) -> Result<()> {
    let (config, _, scored) = run_eval(args)?;
    let Some(threshold) = threshold.or(config.threshold) else {
        bail!("a threshold is required (--threshold or `threshold` in --config)");
    };

    let filter = StrategyFilter::new(config.weights);
    let mut passed_paths = Vec::new();
    for s in &scored {
        let passed = filter.filter_strategy(&s.evaluation.stats, &threshold)?;
        println!(
            "{} score={:.2} threshold={} {}",
            if passed { "PASS" } else { "FAIL" },
            s.evaluation.score,
            threshold.trim(),
            s.path.display()
        );
        if passed {
            passed_paths.push(&s.path);
        }
    }
    let kept = filter.process_batch(passed_paths);
    tracing::info!(passed = kept.len(), total = scored.len(), "filter done");
    Ok(())
}

fn run_synth(trades: usize, seed: u64, start: &str, out: &Path) -> Result<()> {
    let start: DateTime<Utc> = DateTime::parse_from_rfc3339(start)
        .with_context(|| format!("invalid --start '{start}'"))?
        .with_timezone(&Utc);

    let orders = generate_orders(trades, start, seed);
    loader::write_orders_csv(out, &orders)?;
    println!("Wrote {} synthetic orders to {}", orders.len(), out.display());
    Ok(())
}

fn print_summary(registry: &MetricRegistry, evaluation: &Evaluation) {
    let selector = &evaluation.selector;
    println!(
        "Orders: {}  (direction={:?}, pl={:?}, sample={:?})",
        evaluation.orders, selector.direction, selector.pl_type, selector.sample
    );
    println!("{}", "-".repeat(40));
    for info in registry.infos() {
        let Some(value) = evaluation.stats.get(info.name) else {
            continue;
        };
        println!("{:<24} {:>14}", info.label, info.format(value));
    }
    if let Some(pct) = evaluation.stats.get(keys::STAGNATION_PERIOD_PCT) {
        println!("{:<24} {:>13.2}%", "Stagnation share", pct);
    }
    println!("{}", "-".repeat(40));
    println!("{:<24} {:>14.2}", "Composite score", evaluation.score);
}
