use clap::Subcommand;
use dayplan_core::{minutes_to_time, time_to_minutes};

use super::CmdResult;

#[derive(Subcommand)]
pub enum TimeAction {
    /// Convert HH:MM to minutes since midnight
    ToMinutes {
        /// HH:MM
        time: String,
    },
    /// Convert minutes since midnight to HH:MM (clamped to 00:00-23:59)
    FromMinutes {
        #[arg(allow_hyphen_values = true)]
        minutes: i64,
    },
}

pub fn run(action: TimeAction) -> CmdResult {
    match action {
        TimeAction::ToMinutes { time } => println!("{}", time_to_minutes(&time)?),
        TimeAction::FromMinutes { minutes } => println!("{}", minutes_to_time(minutes)),
    }
    Ok(())
}
