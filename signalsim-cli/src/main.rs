//! SignalSim CLI: headless runs of the simulated signal flow.
//!
//! Commands:
//! - `simulate`: run one full pair → timeframe → analysis → signal cycle on virtual time
//! - `sample`: draw many signals in parallel and print the distribution
//! - `catalog`: list the available pairs and timeframes

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{bail, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use signalsim_core::catalog::{self, CURRENCY_PAIRS, TIMEFRAMES};
use signalsim_core::clock::SessionClock;
use signalsim_core::rng::{RngHierarchy, Stream};
use signalsim_core::signal::generate;
use signalsim_core::{
    CurrencyPair, Direction, FlowVariant, Screen, Session, Signal, SimConfig, Timeframe,
};

/// Virtual-time step used when driving a session to completion.
const STEP_MS: u64 = 50;
/// Upper bound on one simulated cycle.
const CYCLE_LIMIT_MS: u64 = 120_000;

#[derive(Parser)]
#[command(
    name = "signalsim",
    about = "Simulated trading-signal flow. Every signal is a random draw, not advice."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one full cycle and print the resulting signal.
    Simulate {
        /// Currency pair symbol, e.g. EUR/USD.
        #[arg(long)]
        pair: String,

        /// Timeframe from the catalog: 5s, 10s, 15s or 30s.
        #[arg(long)]
        timeframe: String,

        /// Master seed. Overrides the config file.
        #[arg(long)]
        seed: Option<u64>,

        /// Flow variant. Overrides the config file.
        #[arg(long, value_enum)]
        variant: Option<VariantArg>,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Generate many signals and print the direction/confidence/strength distribution.
    Sample {
        #[arg(long, default_value_t = 10_000)]
        count: u64,

        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// List currency pairs and timeframes.
    Catalog,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum VariantArg {
    Manual,
    Auto,
}

impl From<VariantArg> for FlowVariant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::Manual => FlowVariant::Manual,
            VariantArg::Auto => FlowVariant::Auto,
        }
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            pair,
            timeframe,
            seed,
            variant,
            config,
            json,
        } => {
            let mut cfg = match &config {
                Some(path) => SimConfig::load(path)?,
                None => SimConfig::default(),
            };
            if let Some(seed) = seed {
                cfg.seed = Some(seed);
            }
            if let Some(variant) = variant {
                cfg.flow = variant.into();
            }
            let pair = catalog::find_pair(&pair)?;
            let timeframe = catalog::find_timeframe(&timeframe)?;
            let report = simulate(cfg, pair, timeframe)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print_report(&report);
            }
            Ok(())
        }
        Commands::Sample { count, seed } => {
            if count == 0 {
                bail!("--count must be at least 1");
            }
            print_distribution(&sample(count, seed));
            Ok(())
        }
        Commands::Catalog => {
            print_catalog();
            Ok(())
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// ── simulate ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct SimulationReport {
    seed: u64,
    variant: FlowVariant,
    pair: &'static str,
    timeframe: Timeframe,
    signal: Signal,
    trace: Vec<Screen>,
    elapsed_ms: u64,
}

fn simulate(config: SimConfig, pair: CurrencyPair, timeframe: Timeframe) -> Result<SimulationReport> {
    let variant = config.flow;
    let mut session = Session::new(config, SessionClock::utc(Utc::now()));
    session.mount();

    session.select_pair(pair)?;
    if variant == FlowVariant::Manual {
        session.proceed_to_timeframe()?;
    }
    session.select_timeframe(timeframe)?;
    if variant == FlowVariant::Manual {
        session.start_analysis()?;
    }

    let reached = session.advance_until(STEP_MS, CYCLE_LIMIT_MS, |s| s.screen() == Screen::Signal);
    let Some(signal) = session.signal().copied().filter(|_| reached) else {
        bail!("no signal after {CYCLE_LIMIT_MS} ms of virtual time");
    };
    debug!(elapsed_ms = session.now(), "cycle complete");

    let report = SimulationReport {
        seed: session.seed(),
        variant,
        pair: pair.symbol,
        timeframe,
        signal,
        trace: session.trace().to_vec(),
        elapsed_ms: session.now(),
    };
    session.unmount();
    Ok(report)
}

fn print_report(report: &SimulationReport) {
    let trace: Vec<&str> = report.trace.iter().map(|s| s.label()).collect();
    println!("SIMULATION - random output, not financial advice");
    println!("  pair        {}", report.pair);
    println!("  timeframe   {}", report.timeframe);
    println!("  variant     {:?}", report.variant);
    println!("  seed        {}", report.seed);
    println!("  action      {}", report.signal.direction.action_label());
    println!("  confidence  {}% (random draw)", report.signal.confidence);
    println!("  strength    {}/{}", report.signal.strength, Signal::MAX_STRENGTH);
    println!("  trace       {}", trace.join(" -> "));
    println!("  elapsed     {} ms virtual", report.elapsed_ms);
}

// ── sample ──────────────────────────────────────────────────────────

#[derive(Debug, Default, PartialEq, Eq)]
struct Distribution {
    total: u64,
    up: u64,
    confidence: BTreeMap<u8, u64>,
    strength: BTreeMap<u8, u64>,
}

impl Distribution {
    fn add(&mut self, signal: &Signal) {
        self.total += 1;
        if signal.direction == Direction::Up {
            self.up += 1;
        }
        *self.confidence.entry(signal.confidence).or_default() += 1;
        *self.strength.entry(signal.strength).or_default() += 1;
    }

    fn merge(mut self, other: Distribution) -> Distribution {
        self.total += other.total;
        self.up += other.up;
        for (k, v) in other.confidence {
            *self.confidence.entry(k).or_default() += v;
        }
        for (k, v) in other.strength {
            *self.strength.entry(k).or_default() += v;
        }
        self
    }

    fn up_share(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.up as f64 / self.total as f64
        }
    }
}

/// Each draw gets its own sub-seeded generator, so the result does not
/// depend on how rayon splits the range.
fn sample(count: u64, seed: u64) -> Distribution {
    let hierarchy = RngHierarchy::new(seed);
    let timestamp = Utc::now();
    info!(count, seed, "sampling signals");
    (0..count)
        .into_par_iter()
        .fold(Distribution::default, |mut dist, i| {
            let mut rng = hierarchy.rng_for(Stream::Signal, i);
            dist.add(&generate(&mut rng, timestamp));
            dist
        })
        .reduce(Distribution::default, Distribution::merge)
}

fn print_distribution(dist: &Distribution) {
    println!("SIMULATION - random output, not financial advice");
    println!("{} signals", dist.total);
    println!(
        "  up {:.2}%  down {:.2}%",
        dist.up_share() * 100.0,
        (1.0 - dist.up_share()) * 100.0
    );
    println!("  confidence:");
    for (value, n) in &dist.confidence {
        println!("    {value:>3}%  {n}");
    }
    println!("  strength:");
    for (value, n) in &dist.strength {
        println!("    {value}/{}  {n}", Signal::MAX_STRENGTH);
    }
}

// ── catalog ─────────────────────────────────────────────────────────

fn print_catalog() {
    println!("Pairs:");
    for pair in &CURRENCY_PAIRS {
        let tags = if pair.tags.is_empty() {
            String::new()
        } else {
            format!("  [{}]", pair.tags.join(", "))
        };
        println!("  {:<9} {:<28} {:>7}{tags}", pair.symbol, pair.name, pair.change);
    }
    println!("Timeframes:");
    for option in &TIMEFRAMES {
        println!("  {:<4} {:<11} {}", option.timeframe.to_string(), option.label, option.description);
    }
}
