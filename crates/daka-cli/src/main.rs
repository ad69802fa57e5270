use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

#[derive(Parser)]
#[command(name = "daka", version, about = "Daka habit check-in calendar")]
struct Cli {
    /// Treat this day (YYYY-MM-DD) as today
    #[arg(long, global = true, value_parser = commands::parse_date)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project management
    Project {
        #[command(subcommand)]
        action: commands::project::ProjectAction,
    },
    /// Show the check-in heatmap for the active project
    Grid(commands::grid::GridArgs),
    /// Check in (or undo a check-in) for a day
    Toggle(commands::toggle::ToggleArgs),
    /// Show whether a day is checked in
    Status(commands::toggle::StatusArgs),
    /// Totals and streak for the active project
    Stats(commands::stats::StatsArgs),
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("DAKA_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let today = cli.today.unwrap_or_else(daka_core::today);
    let result = match cli.command {
        Commands::Project { action } => commands::project::run(action),
        Commands::Grid(args) => commands::grid::run(args, today),
        Commands::Toggle(args) => commands::toggle::run(args, today),
        Commands::Status(args) => commands::toggle::status(args, today),
        Commands::Stats(args) => commands::stats::run(args, today),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
