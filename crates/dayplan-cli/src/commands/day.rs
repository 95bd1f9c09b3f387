use clap::Subcommand;
use dayplan_core::BoardStore;

use super::{CmdResult, Context};

#[derive(Subcommand)]
pub enum DayAction {
    /// Show the day window and per-category progress
    Show,
    /// Set the start of the day (pushes the end forward if needed)
    Start {
        /// HH:MM
        time: String,
    },
    /// Set the end of the day
    End {
        /// HH:MM
        time: String,
    },
}

pub fn run(ctx: &Context, action: DayAction) -> CmdResult {
    let store = ctx.store()?;
    let mut board = store.load_or_default()?;

    match action {
        DayAction::Show => {
            let (start, end) = board.window_labels();
            println!("Day: {start}-{end}");
            for (category, stats) in board.category_stats() {
                println!(
                    "  {category}: {}/{} done ({:.0}%)",
                    stats.done,
                    stats.total,
                    stats.completion_ratio() * 100.0
                );
            }
        }
        DayAction::Start { time } => {
            board.set_day_start(&time)?;
            store.save(&board)?;
            let (start, end) = board.window_labels();
            println!("day window {start}-{end}");
        }
        DayAction::End { time } => {
            board.set_day_end(&time)?;
            store.save(&board)?;
            let (start, end) = board.window_labels();
            println!("day window {start}-{end}");
        }
    }
    Ok(())
}
