use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod store;

#[derive(Parser)]
#[command(name = "dayplan", version, about = "Plan your day around focus blocks and breaks")]
struct Cli {
    /// Board file (default: ~/.config/dayplan/board.json)
    #[arg(long, global = true, env = "DAYPLAN_BOARD")]
    board: Option<PathBuf>,
    /// Planner config file (default: ~/.config/dayplan/config.toml)
    #[arg(long, global = true, env = "DAYPLAN_CONFIG")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the plan for the day
    Plan {
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
        /// Start planning at the current time instead of the day start
        #[arg(long)]
        from_now: bool,
    },
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Day window management
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Summary and tips for the day
    Insights {
        /// Seed for the motivational message (default: day of year)
        #[arg(long)]
        seed: Option<u64>,
        /// Print insights as JSON
        #[arg(long)]
        json: bool,
    },
    /// HH:MM conversions
    Time {
        #[command(subcommand)]
        action: commands::time::TimeAction,
    },
    /// Planner configuration
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let ctx = commands::Context::new(cli.board, cli.config);
    let result = match cli.command {
        Commands::Plan { json, from_now } => commands::plan::run(&ctx, json, from_now),
        Commands::Task { action } => commands::task::run(&ctx, action),
        Commands::Day { action } => commands::day::run(&ctx, action),
        Commands::Insights { seed, json } => commands::insights::run(&ctx, seed, json),
        Commands::Time { action } => commands::time::run(action),
        Commands::Config { action } => commands::config::run(&ctx, action),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
