//! # dayplan core library
//!
//! Turns a list of tasks into a single-day, non-overlapping timeline with
//! rest breaks. The CLI (and any other front end) is a thin layer over this
//! crate.
//!
//! ## Architecture
//!
//! - **Time**: "HH:MM" <-> minute-offset conversion used at every boundary
//! - **Planner**: pure plan generator ordering, placing and pacing tasks
//! - **Board**: the editable task list and day window, stored through an
//!   injected [`BoardStore`]
//! - **Insights**: summary numbers and tips derived from a plan
//!
//! ## Key Components
//!
//! - [`generate_plan`] / [`DayPlanner`]: plan generation
//! - [`DayBoard`]: task list and window editing
//! - [`PlannerConfig`]: break and slot tuning

pub mod board;
pub mod config;
pub mod error;
pub mod insights;
pub mod planner;
pub mod task;
pub mod time;

pub use board::{load_and_plan, BoardStore, CategoryStats, DayBoard, MemoryBoardStore};
pub use config::PlannerConfig;
pub use error::{BoardError, ConfigError, CoreError, PlanError, ValidationError};
pub use insights::DayInsights;
pub use planner::{generate_plan, BreakBlock, DayPlanner, ScheduleItem, SchedulePlan, TaskBlock};
pub use task::{Energy, PreferredSlot, Priority, Task, TaskDraft};
pub use time::{minutes_to_time, time_to_minutes};

use std::path::PathBuf;

/// Returns `~/.config/dayplan[-dev]/` based on DAYPLAN_ENV.
///
/// Set DAYPLAN_ENV=dev to use development data directory.
///
/// # Errors
/// Returns an error if creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DAYPLAN_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("dayplan-dev")
    } else {
        base_dir.join("dayplan")
    };

    std::fs::create_dir_all(&dir).map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
