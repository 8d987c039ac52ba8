//! Load monitor entry point: CLI wiring, tick scheduling and report display.

use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::{Local, NaiveDateTime, Timelike};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use load_monitor::config::MonitorConfig;
use load_monitor::io::export::{export_history_csv, export_ticks_csv};
use load_monitor::monitor::clock::TickClock;
use load_monitor::monitor::{MonitorEngine, SessionStats, TickReport};
use load_monitor::readings::{ConfiguredSource, ReadingSource};

/// Seed offset for the overload draw so it does not mirror the reading RNG.
const OVERLOAD_SEED_OFFSET: u64 = 101;

/// Household electrical-load monitor.
#[derive(Debug, Parser)]
#[command(name = "load-monitor", version, about)]
struct Args {
    /// Load configuration from a TOML file.
    #[arg(long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Use a built-in preset (household, scripted_demo, tight_main).
    #[arg(long)]
    preset: Option<String>,

    /// Number of ticks to evaluate.
    #[arg(long, default_value_t = 60)]
    ticks: u64,

    /// Simulated start instant, e.g. 2024-03-01T08:00:00. Defaults to now.
    #[arg(long, value_parser = parse_start)]
    start: Option<NaiveDateTime>,

    /// Override the random seed.
    #[arg(long)]
    seed: Option<u64>,

    /// Change a setting before the first tick, e.g. `--set main_limit_a=20`.
    #[arg(long = "set", value_name = "FIELD=VALUE")]
    assignments: Vec<String>,

    /// Follow the local wall clock, sleeping one tick interval between ticks.
    #[arg(long, conflicts_with = "start")]
    realtime: bool,

    /// Print each tick report as a JSON line.
    #[arg(long)]
    json: bool,

    /// Only print the session report.
    #[arg(long, short)]
    quiet: bool,

    /// Export the history log to CSV.
    #[arg(long)]
    history_out: Option<PathBuf>,

    /// Export per-tick summaries to CSV.
    #[arg(long)]
    ticks_out: Option<PathBuf>,
}

fn parse_start(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map_err(|e| format!("expected YYYY-MM-DDTHH:MM:SS: {e}"))
}

fn load_config(args: &Args) -> Result<MonitorConfig> {
    let mut cfg = match (&args.config, &args.preset) {
        (Some(path), _) => MonitorConfig::from_toml_file(path)?,
        (None, Some(name)) => MonitorConfig::from_preset(name)?,
        (None, None) => MonitorConfig::household(),
    };

    if let Some(seed) = args.seed {
        cfg.randomness.seed = seed;
    }
    for assignment in &args.assignments {
        cfg.settings = cfg
            .settings
            .with_assignment(assignment)
            .with_context(|| format!("invalid --set {assignment}"))?;
    }

    let errors = cfg.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        bail!("configuration has {} error(s)", errors.len());
    }
    Ok(cfg)
}

fn publish(report: &TickReport, args: &Args) -> Result<()> {
    if args.quiet {
        return Ok(());
    }
    if args.json {
        println!("{}", serde_json::to_string(report)?);
        return Ok(());
    }

    println!("{report}");
    for alert in &report.alerts {
        println!("    ! {alert}");
    }
    for rec in &report.recommendations {
        println!("    > {rec}");
    }
    if let Some(entry) = &report.snapshot {
        println!("    # {entry}");
    }
    Ok(())
}

fn run(
    engine: &mut MonitorEngine<ConfiguredSource>,
    cfg: &MonitorConfig,
    args: &Args,
) -> Result<Vec<TickReport>> {
    let mut reports = Vec::with_capacity(usize::try_from(args.ticks.min(1 << 16)).unwrap_or(0));

    if args.realtime {
        let pause = Duration::from_secs_f64(cfg.settings.tick_seconds);
        for i in 0..args.ticks {
            let now = Local::now().naive_local();
            let report = engine.tick(now, &cfg.settings);
            publish(&report, args)?;
            reports.push(report);
            if i + 1 < args.ticks {
                thread::sleep(pause);
            }
        }
        return Ok(reports);
    }

    let start = match args.start {
        Some(start) => start,
        None => {
            let now = Local::now().naive_local();
            now.with_nanosecond(0).unwrap_or(now)
        }
    };
    let clock = TickClock::new(start, cfg.settings.tick_interval(), args.ticks);
    for now in clock {
        let report = engine.tick(now, &cfg.settings);
        publish(&report, args)?;
        reports.push(report);
    }
    Ok(reports)
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let cfg = load_config(&args)?;

    info!(
        appliances = cfg.appliances.len(),
        mode = %cfg.settings.mode,
        seed = cfg.randomness.seed,
        "starting monitor"
    );

    let mut engine = MonitorEngine::seeded(
        cfg.build_household(),
        cfg.build_source(),
        cfg.randomness.overload_one_in,
        cfg.randomness.seed.wrapping_add(OVERLOAD_SEED_OFFSET),
    );
    info!(source = engine.source().source_type(), "reading source ready");

    let reports = run(&mut engine, &cfg, &args)?;
    let stats = SessionStats::from_reports(&reports);

    if args.json {
        println!("{}", serde_json::to_string(&stats)?);
    } else {
        if !engine.history().is_empty() {
            println!("\n--- History ---");
            for entry in engine.history().iter() {
                println!("{entry}");
            }
        }
        println!("\n{stats}");
    }

    if let Some(path) = &args.history_out {
        export_history_csv(engine.history().iter(), path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("History written to {}", path.display());
    }
    if let Some(path) = &args.ticks_out {
        export_ticks_csv(&reports, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        eprintln!("Tick summaries written to {}", path.display());
    }

    Ok(())
}
