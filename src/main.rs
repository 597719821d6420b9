use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::debug;

use wayfarer::config::Config;
use wayfarer::record::TerminalOutcome;
use wayfarer::workflow::{planner_from_config, PlanRequest};

/// Plan trips as reproducible stage pipelines
#[derive(Parser)]
#[command(name = "wayfarer")]
#[command(about = "Budget-aware trip planning from the command line", long_about = None)]
struct Cli {
    /// Enable verbose output (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan a trip for a destination, budget, and duration
    Plan {
        /// Destination, e.g. "Paris, France"
        #[arg(short, long)]
        destination: String,

        /// Total budget in USD
        #[arg(short, long, allow_negative_numbers = true)]
        budget: f64,

        /// Trip duration in days
        #[arg(short = 'n', long)]
        days: u32,

        /// Path to a configuration file
        #[arg(short = 'c', long)]
        config: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .init();

    let result = match cli.command {
        Commands::Plan {
            destination,
            budget,
            days,
            config,
        } => run_plan(destination, budget, days, config).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run_plan(
    destination: String,
    budget: f64,
    days: u32,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = Config::load(config_path.as_deref())?;
    debug!(model = %config.generation.model, "configuration loaded");

    let planner = planner_from_config(&config)?;
    let outcome = planner
        .plan(PlanRequest {
            destination,
            total_budget: budget,
            duration_days: days,
        })
        .await?;

    let record = &outcome.record;

    if let Some(analysis) = &record.analysis {
        println!("Region: {} (${:.2}/day minimum)", analysis.region_tag, analysis.per_day_minimum);
        println!(
            "Minimum for trip: ${:.2} ({})",
            analysis.minimum_requirement,
            if analysis.feasible { "within budget" } else { "over budget" }
        );
        let b = &analysis.breakdown;
        println!(
            "Budget split: flights ${:.2} | stay ${:.2} | activities ${:.2} | food ${:.2}",
            b.flights, b.accommodation, b.activities, b.food
        );
        println!();
    }

    match record.terminal_outcome() {
        TerminalOutcome::Itinerary => {
            if let Some(flight) = &record.selected_flight {
                println!(
                    "✈️  Flight {}: ${:.2}, {} stop(s)",
                    flight.id, flight.price, flight.stops
                );
            } else if let Some(note) = &record.flight_note {
                println!("✈️  {note}");
            }
            if let Some(hotel) = &record.selected_hotel {
                println!(
                    "🏨 Hotel {}: ${:.2}/night, rated {:.1}",
                    hotel.id, hotel.nightly_rate, hotel.rating
                );
            } else if let Some(note) = &record.hotel_note {
                println!("🏨 {note}");
            }
            println!();
            println!("{}", record.itinerary.as_deref().unwrap_or_default());
        }
        TerminalOutcome::Alternatives => {
            println!("{}", record.alternatives.as_deref().unwrap_or_default());
        }
        TerminalOutcome::Error => {
            eprintln!("{}", record.error.as_deref().unwrap_or_default());
            std::process::exit(1);
        }
        TerminalOutcome::Pending => {
            anyhow::bail!("planning run ended without a terminal outcome");
        }
    }

    if outcome.usage.total() > 0 {
        debug!(
            input_tokens = outcome.usage.input_tokens,
            output_tokens = outcome.usage.output_tokens,
            "generation token usage"
        );
    }

    Ok(())
}
