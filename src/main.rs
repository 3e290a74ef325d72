//! Main entry point for the Combine Tracker command line tool
//!
//! Loads the event configuration, builds the scoring engine, and runs one
//! command against a roster file: normalizing a single value, ranking a
//! cohort, or summarizing a player.

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use combine_tracker::config::AppConfig;
use combine_tracker::metrics::MetricsCollector;
use combine_tracker::scoring::ScoringEngine;
use combine_tracker::service::{import_roster, CombineService, ImportReport, RosterFile};
use combine_tracker::types::{AgeGroup, DrillType, PlayerId};
use combine_tracker::InMemoryCombineStorage;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Combine Tracker - Youth Sports Combine Scoring
#[derive(Parser)]
#[command(
    name = "combine-tracker",
    version,
    about = "Score and rank players across youth sports combine drills",
    long_about = "Combine Tracker normalizes raw drill measurements (sprint times, jump heights, \
                 catch counts) onto a 0-100 scale using per-event calibration, combines each \
                 player's best results into a weighted composite score, and ranks players \
                 within age-group cohorts."
)]
struct Args {
    /// Configuration file path
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Path to configuration file (TOML format)",
        global = true
    )]
    config: Option<PathBuf>,

    /// Log level override
    #[arg(
        short,
        long,
        value_name = "LEVEL",
        help = "Override log level (trace, debug, info, warn, error)",
        global = true
    )]
    log_level: Option<String>,

    /// Enable debug mode
    #[arg(short, long, help = "Enable debug mode with verbose logging", global = true)]
    debug: bool,

    /// Dry run mode (validate config and exit)
    #[arg(long, help = "Validate configuration and exit without running a command")]
    dry_run: bool,

    /// Print metrics after the command
    #[arg(long, help = "Print Prometheus metrics after the command completes", global = true)]
    metrics: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Normalize one raw value for a drill
    Normalize {
        /// Drill name (40m_dash, vertical_jump, agility, throwing, catching)
        drill: String,
        /// Raw measurement, e.g. "5.5" or "5.5 sec"
        raw: String,
    },

    /// Import a roster and print the ranking
    Rank {
        #[arg(long, value_name = "FILE", help = "Roster file (JSON)")]
        roster: PathBuf,

        #[arg(long, value_name = "MIN-MAX", help = "Limit the ranking to one age group, e.g. 6-8")]
        age_group: Option<String>,

        #[arg(long, help = "Print JSON instead of a table")]
        json: bool,
    },

    /// Import a roster and print one player's composite breakdown
    Summary {
        #[arg(long, value_name = "FILE", help = "Roster file (JSON)")]
        roster: PathBuf,

        #[arg(long, value_name = "ID", help = "Player id assigned by the import")]
        player: PlayerId,

        #[arg(long, help = "Print JSON instead of text")]
        json: bool,
    },
}

/// Initialize structured logging with the configured level
fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| log_level.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_line_number(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| anyhow!("Failed to initialize logging: {}", e))?;

    Ok(())
}

/// Display configuration summary
fn display_startup_banner(config: &AppConfig) {
    info!("Combine Tracker {}", combine_tracker::VERSION);
    info!("   Service: {}", config.service.name);
    info!("   Log level: {}", config.service.log_level);
    for drill in DrillType::ALL {
        match config.scoring.calibration.get(drill) {
            Some(cal) => info!(
                "   {}: {:?} [{}, {}] weight {}",
                drill,
                cal.direction,
                cal.min,
                cal.max,
                config.scoring.weights.get(drill)
            ),
            None => info!(
                "   {}: no calibration, weight {}",
                drill,
                config.scoring.weights.get(drill)
            ),
        }
    }
    for drill in config.scoring.unconfigured_drills() {
        warn!("Drill {} is weighted but has no calibration; its results score 0", drill);
    }
}

/// Load and merge configuration from file or environment and CLI arguments
fn load_config(args: &Args) -> Result<AppConfig> {
    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path)?
    } else {
        AppConfig::from_env()?
    };

    // Apply CLI overrides
    if let Some(log_level) = &args.log_level {
        config.service.log_level = log_level.clone();
    }

    if args.debug {
        config.service.log_level = "debug".to_string();
    }

    combine_tracker::config::validate_config(&config)?;
    Ok(config)
}

fn load_roster(service: &CombineService, path: &Path) -> Result<ImportReport> {
    info!("Importing roster from: {}", path.display());
    let roster = RosterFile::from_path(path)?;
    let report = import_roster(service, &roster)?;

    eprintln!(
        "Imported {} players and {} results ({} warnings, {} failures)",
        report.players_created(),
        report.results_recorded,
        report.warnings.len(),
        report.failures.len()
    );
    for issue in report.warnings.iter().chain(&report.failures) {
        eprintln!(
            "  entry {} ({}): {}",
            issue.player_index, issue.player_name, issue.message
        );
    }
    Ok(report)
}

fn run(command: Command, service: &CombineService) -> Result<()> {
    match command {
        Command::Normalize { drill, raw } => {
            let drill: DrillType = drill.parse()?;
            let normalized = service.engine().normalize(drill, &raw);
            println!("{} {}", normalized.score, normalized.status.as_str());
        }
        Command::Rank {
            roster,
            age_group,
            json,
        } => {
            let age_group = age_group
                .as_deref()
                .map(str::parse::<AgeGroup>)
                .transpose()?;
            load_roster(service, &roster)?;
            let rankings = service.rankings(age_group.as_ref())?;

            if json {
                println!("{}", serde_json::to_string_pretty(&rankings)?);
            } else {
                for row in &rankings {
                    let player = &row.summary.player;
                    let number = player
                        .number
                        .map_or_else(|| "-".to_string(), |n| format!("#{}", n));
                    println!(
                        "{:>3}. {:<24} {:>4}  age {:>2}  {:>6.2}",
                        row.rank, player.name, number, player.age, row.summary.composite_score
                    );
                }
            }
        }
        Command::Summary {
            roster,
            player,
            json,
        } => {
            load_roster(service, &roster)?;
            let summary = service.player_summary(player)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!(
                    "{} (age {}): composite {:.2}",
                    summary.player.name, summary.player.age, summary.composite_score
                );
                for drill in DrillType::ALL {
                    match (
                        summary.best_normalized.get(&drill),
                        summary.best_raw.get(&drill),
                    ) {
                        (Some(score), Some(raw)) => {
                            println!("  {:<14} {:>3}  (raw {})", drill, score, raw)
                        }
                        _ => println!("  {:<14}   -", drill),
                    }
                }
            }
        }
    }
    Ok(())
}

fn main() {
    let args = Args::parse();

    let config = load_config(&args).unwrap_or_else(|e| {
        eprintln!("Configuration error: {:#}", e);
        std::process::exit(1);
    });

    // Initialize logging early (before any other operations)
    if let Err(e) = init_logging(&config.service.log_level) {
        eprintln!("Failed to initialize logging: {}", e);
        std::process::exit(1);
    }

    if args.dry_run {
        display_startup_banner(&config);
        info!("Configuration validation successful");
        return;
    }

    let Some(command) = args.command else {
        eprintln!("No command given; see --help");
        std::process::exit(1);
    };

    let metrics = match MetricsCollector::new() {
        Ok(metrics) => Arc::new(metrics),
        Err(e) => {
            error!("Failed to initialize metrics: {}", e);
            std::process::exit(1);
        }
    };

    let service = CombineService::new(
        Arc::new(InMemoryCombineStorage::new()),
        ScoringEngine::from_config(&config.scoring),
    )
    .with_metrics(metrics.clone());

    if let Err(e) = run(command, &service) {
        error!("{:#}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    if args.metrics {
        match metrics.gather_text() {
            Ok(text) => print!("{}", text),
            Err(e) => warn!("Failed to render metrics: {}", e),
        }
    }
}
