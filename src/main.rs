use std::fmt::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tourism_planner::{GeocoderBackend, PlannerConfig, TripPlan, TripPlanner, logging, web};

/// Tourism planner: weather and major attractions for any place name
///
/// Examples:
///   tourplan plan Munnar
///   tourplan plan "Fort Kochi" --json
///   tourplan plan Delhi --geocoder nominatim
///   tourplan serve --port 8080
#[derive(Parser)]
#[command(name = "tourplan", version, about, long_about = None)]
struct Cli {
    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve a place and show its weather and attractions
    Plan {
        /// Place name, e.g. Munnar
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,

        /// Print the plan as JSON
        #[arg(long)]
        json: bool,

        /// Geocoder override: open-meteo or nominatim
        #[arg(long)]
        geocoder: Option<GeocoderBackend>,
    },
    /// Serve the planner as a JSON API
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(long)]
        port: Option<u16>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let mut config = match PlannerConfig::load_from_path(cli.config.clone()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.logging, cli.verbose);

    match cli.command {
        Command::Plan {
            query,
            json,
            geocoder,
        } => {
            if let Some(backend) = geocoder {
                config.geocoding.backend = backend;
            }
            plan(&config, &query.join(" "), json).await
        }
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config).await
        }
    }
}

async fn plan(config: &PlannerConfig, query: &str, json: bool) -> ExitCode {
    let planner = match TripPlanner::from_config(config) {
        Ok(planner) => planner,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let plan = match planner.plan_trip(query).await {
        Ok(plan) => plan,
        Err(e) => {
            eprintln!("Error: {}", e.user_message());
            return ExitCode::FAILURE;
        }
    };

    if json {
        match serde_json::to_string_pretty(&plan) {
            Ok(body) => println!("{body}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        print!("{}", render(&plan, config.attractions.radius_m));
    }

    if plan.is_located() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

async fn serve(config: PlannerConfig) -> ExitCode {
    let planner = match TripPlanner::from_config(&config) {
        Ok(planner) => planner,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    eprintln!(
        "  Tourism planner listening on http://{}:{}",
        config.server.host, config.server.port
    );
    match web::run(planner, &config.server).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Human-readable plan for the terminal
fn render(plan: &TripPlan, radius_m: u32) -> String {
    let mut out = String::new();
    match plan {
        TripPlan::NotFound { query } => {
            let _ = writeln!(out, "\u{1F6AB} I couldn't locate '{query}'.");
        }
        TripPlan::Located {
            place,
            weather,
            attractions,
            ..
        } => {
            let _ = writeln!(
                out,
                "\u{1F4CD} Found: {} ({})",
                place.display_name,
                place.point()
            );

            let _ = write!(out, "\u{1F321}\u{FE0F}  Current Weather: {weather}");
            if let tourism_planner::WeatherReading::Current(current) = weather {
                if let Some(conditions) = &current.conditions {
                    let _ = write!(out, " ({conditions})");
                }
            }
            out.push('\n');

            let _ = writeln!(out, "\u{1F3DB}\u{FE0F}  Major Attractions");
            if attractions.is_empty() {
                let scope = if place.resolution.extent().is_some() {
                    "within this area".to_string()
                } else {
                    format!("in this {}km radius", radius_m / 1000)
                };
                let _ = writeln!(
                    out,
                    "  No major museums, forts, or famous spots found {scope}."
                );
            } else {
                for name in attractions.iter() {
                    let _ = writeln!(out, "  \u{2022} {name}");
                }
            }
        }
    }
    out
}
