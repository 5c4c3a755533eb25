//! Truck journey planner CLI
//!
//! Plans heavy-goods-vehicle journeys with driving-time regulations applied.

#![allow(clippy::print_stdout)]

mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use application::{JourneyPlannerService, JourneyRequest, parse_departure_time};
use chrono::NaiveTime;
use clap::{Parser, Subcommand};
use domain::VehicleProfile;
use infrastructure::{AppConfig, OpenRouteAdapter, init_logging};
use tracing::debug;

/// Truck journey planner
#[derive(Parser)]
#[command(name = "truckplanner")]
#[command(author, version, about = "Truck route and arrival-time planner", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Configuration file (default: ./truckplanner.toml if present)
    #[arg(short, long, global = true, env = "TRUCKPLANNER_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a journey between two places
    ///
    /// Example: truckplanner plan "Valencia, España" "Madrid, España" --stop "Albacete, España"
    Plan {
        /// Starting address
        origin: String,

        /// Final address
        destination: String,

        /// Intermediate stop, in visiting order (repeatable)
        #[arg(short, long = "stop")]
        stops: Vec<String>,

        /// File with one intermediate stop per line
        #[arg(long)]
        stops_file: Option<PathBuf>,

        /// Departure time, HH:MM (default from configuration)
        #[arg(short, long)]
        departure: Option<String>,

        /// Vehicle profile: driving-hgv or driving-car
        #[arg(long)]
        profile: Option<VehicleProfile>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply the rest rules to a known driving time, without any lookups
    ///
    /// Example: truckplanner estimate --driving-hours 15 --departure 06:00
    Estimate {
        /// Pure driving time in hours
        #[arg(long)]
        driving_hours: f64,

        /// Route distance in kilometers
        #[arg(long, default_value = "0")]
        distance_km: f64,

        /// Departure time, HH:MM (default from configuration)
        #[arg(short, long)]
        departure: Option<String>,

        /// Print the estimate as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that the routing service answers
    Health,
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

/// Departure from the command line, falling back to the configured default
fn resolve_departure(arg: Option<&str>, config: &AppConfig) -> anyhow::Result<NaiveTime> {
    match arg {
        Some(text) => Ok(parse_departure_time(text)?),
        None => config
            .planner
            .departure_time()
            .map_err(anyhow::Error::msg),
    }
}

/// Read stops from a file, one per line
fn read_stops_file(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read stops file {}", path.display()))
}

fn planner(config: &AppConfig) -> anyhow::Result<JourneyPlannerService> {
    let client_config = config.openroute_client_config()?;
    let adapter = Arc::new(OpenRouteAdapter::new(&client_config)?);

    Ok(JourneyPlannerService::new(adapter.clone(), adapter)
        .with_profile(config.planner.vehicle_profile)
        .with_policy(config.planner.rest_policy))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let mut logging = config.logging.clone();
    if cli.verbose > 0 {
        logging = logging.with_filter(log_filter_from_verbosity(cli.verbose));
    }
    init_logging(&logging)?;

    config.validate()?;
    debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Plan {
            origin,
            destination,
            stops,
            stops_file,
            departure,
            profile,
            json,
        } => {
            let departure_time = resolve_departure(departure.as_deref(), &config)?;

            let mut request = stops
                .into_iter()
                .fold(JourneyRequest::new(origin, destination, departure_time), |r, s| {
                    r.with_stop(s)
                });
            if let Some(path) = stops_file {
                request = request.with_stops_text(&read_stops_file(&path)?);
            }

            let mut service = planner(&config)?;
            if let Some(profile) = profile {
                service = service.with_profile(profile);
            }

            let plan = service.plan(&request).await?;

            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                println!("{}", render::render_plan(&plan));
            }
        },

        Commands::Estimate {
            driving_hours,
            distance_km,
            departure,
            json,
        } => {
            let departure_time = resolve_departure(departure.as_deref(), &config)?;
            let estimate = config
                .planner
                .rest_policy
                .estimate(driving_hours, distance_km, departure_time)?;

            if json {
                println!("{}", serde_json::to_string_pretty(&estimate)?);
            } else {
                println!("{}", render::render_estimate(&estimate));
            }
        },

        Commands::Health => {
            let service = planner(&config)?;
            if service.is_routing_available().await {
                println!("✅ Routing service is available");
            } else {
                anyhow::bail!("Routing service is not available");
            }
        },
    }

    Ok(())
}
