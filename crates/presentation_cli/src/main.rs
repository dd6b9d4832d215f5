//! AirCheck CLI
//!
//! Reports the current air quality at the device's last-known location.
//! `check` runs once (app start); `interactive` runs at start and again on
//! every Enter key press (manual refresh).

#![allow(clippy::print_stdout)]

mod reporter;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use application::{AirQualityService, RefreshError, RefreshPolicy, RunState};
use clap::{Args, Parser, Subcommand, ValueEnum};
use domain::value_objects::GeoLocation;
use infrastructure::{AppConfig, build_service, init_telemetry};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::{JoinError, JoinSet};
use tracing::{debug, error, info, warn};

use crate::reporter::{OutputFormat, StdoutReporter};

/// AirCheck CLI
#[derive(Parser)]
#[command(name = "aircheck")]
#[command(author, version, about = "Current air quality at your location", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./config.toml if present)
    #[arg(short, long, global = true, env = "AIRCHECK_CONFIG")]
    config: Option<PathBuf>,

    /// Print one JSON object per outcome instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the air quality once and exit
    ///
    /// Exits with status 1 when the check fails.
    Check {
        #[command(flatten)]
        location: LocationArgs,
    },

    /// Check at start, then again every time Enter is pressed
    ///
    /// Type `q` or close standard input to quit.
    Interactive {
        #[command(flatten)]
        location: LocationArgs,

        /// What a refresh does while a check is still running
        #[arg(long, value_enum)]
        policy: Option<PolicyArg>,
    },
}

/// Fixed location overriding the configured providers
#[derive(Args)]
struct LocationArgs {
    /// Latitude in degrees
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude in degrees
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,
}

#[derive(Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Ignore the refresh
    Reject,
    /// Cancel the running check and start over
    Supersede,
}

impl From<PolicyArg> for RefreshPolicy {
    fn from(policy: PolicyArg) -> Self {
        match policy {
            PolicyArg::Reject => Self::Reject,
            PolicyArg::Supersede => Self::Supersede,
        }
    }
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Put a `--lat/--lon` override in front of the configured providers
fn apply_location(config: &mut AppConfig, location: &LocationArgs) -> anyhow::Result<()> {
    if let (Some(lat), Some(lon)) = (location.lat, location.lon) {
        let location =
            GeoLocation::new(lat, lon).map_err(|e| anyhow::anyhow!("Invalid --lat/--lon: {e}"))?;
        config
            .location
            .override_fix(location.latitude(), location.longitude());
    }
    Ok(())
}

fn exit_code(state: RunState) -> ExitCode {
    match state {
        RunState::Failed(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}

fn is_quit(line: &str) -> bool {
    matches!(line.trim(), "q" | "quit" | "exit")
}

type CheckResult = Result<Result<RunState, RefreshError>, JoinError>;

fn spawn_check(
    checks: &mut JoinSet<Result<RunState, RefreshError>>,
    service: &Arc<AirQualityService>,
) {
    let service = Arc::clone(service);
    checks.spawn(async move { service.refresh().await });
}

fn log_check(result: CheckResult) {
    match result {
        Ok(Ok(state)) => debug!(?state, "Check finished"),
        Ok(Err(RefreshError::Busy)) => warn!("A check is already in progress, refresh ignored"),
        Ok(Err(RefreshError::Superseded)) => debug!("Check superseded by a newer refresh"),
        Err(e) => error!(error = %e, "Check task failed"),
    }
}

async fn run_interactive(
    service: Arc<AirQualityService>,
    format: OutputFormat,
) -> anyhow::Result<ExitCode> {
    if format == OutputFormat::Text {
        println!("Press Enter to refresh, q to quit.");
    }

    let mut checks = JoinSet::new();
    spawn_check(&mut checks, &service);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line.context("Failed to read standard input")? {
                Some(line) if !is_quit(&line) => spawn_check(&mut checks, &service),
                _ => break,
            },
            Some(result) = checks.join_next(), if !checks.is_empty() => log_check(result),
        }
    }

    while let Some(result) = checks.join_next().await {
        log_check(result);
    }

    Ok(exit_code(service.state()))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config =
        AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if cli.verbose > 0 {
        config.telemetry.log_filter = log_filter_from_verbosity(cli.verbose).to_string();
    }
    let _telemetry = init_telemetry(&config.telemetry)?;

    info!("AirCheck v{} starting...", env!("CARGO_PKG_VERSION"));

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let reporter = Arc::new(StdoutReporter::new(format));

    match cli.command {
        Commands::Check { location } => {
            apply_location(&mut config, &location)?;
            config.validate()?;

            let service = build_service(&config, reporter)?;
            let state = service.refresh().await?;
            Ok(exit_code(state))
        },

        Commands::Interactive { location, policy } => {
            apply_location(&mut config, &location)?;
            if let Some(policy) = policy {
                config.refresh.policy = policy.into();
            }
            config.validate()?;

            let service = Arc::new(build_service(&config, reporter)?);
            run_interactive(service, format).await
        },
    }
}
