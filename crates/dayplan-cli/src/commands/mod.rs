//! Subcommand implementations.

pub mod config;
pub mod day;
pub mod insights;
pub mod plan;
pub mod task;
pub mod time;

use std::path::PathBuf;

use dayplan_core::{DayBoard, DayPlanner, PlannerConfig};

use crate::store::JsonFileStore;

pub type CmdResult = Result<(), Box<dyn std::error::Error>>;

/// Paths from the global flags, resolved on first use.
pub struct Context {
    board_path: Option<PathBuf>,
    config_path: Option<PathBuf>,
}

impl Context {
    pub fn new(board_path: Option<PathBuf>, config_path: Option<PathBuf>) -> Self {
        Self {
            board_path,
            config_path,
        }
    }

    pub fn store(&self) -> Result<JsonFileStore, Box<dyn std::error::Error>> {
        let path = match &self.board_path {
            Some(path) => path.clone(),
            None => dayplan_core::data_dir()?.join("board.json"),
        };
        Ok(JsonFileStore::new(path))
    }

    /// Explicit `--config` files must load; the default location falls back
    /// to built-in values.
    pub fn planner_config(&self) -> Result<PlannerConfig, Box<dyn std::error::Error>> {
        match &self.config_path {
            Some(path) => Ok(PlannerConfig::load_from(path)?),
            None => Ok(PlannerConfig::load_or_default()),
        }
    }

    pub fn config_path(&self) -> Result<PathBuf, Box<dyn std::error::Error>> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => Ok(PlannerConfig::default_path()?),
        }
    }

    pub fn planner(&self) -> Result<DayPlanner, Box<dyn std::error::Error>> {
        Ok(DayPlanner::with_config(self.planner_config()?))
    }
}

/// Find a task by full id or unique id prefix.
pub fn resolve_task_id(board: &DayBoard, needle: &str) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(task) = board.task(needle) {
        return Ok(task.id.clone());
    }
    let matches: Vec<&str> = board
        .tasks()
        .iter()
        .filter(|t| t.id.starts_with(needle))
        .map(|t| t.id.as_str())
        .collect();
    match matches.as_slice() {
        [only] => Ok((*only).to_string()),
        [] => Err(format!("no task matches '{needle}'").into()),
        _ => Err(format!("'{needle}' matches {} tasks, use a longer prefix", matches.len()).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayplan_core::TaskDraft;

    #[test]
    fn resolves_unique_prefix() {
        let mut board = DayBoard::new();
        let id = board.add_task(TaskDraft::new("A", 30)).unwrap().id.clone();

        assert_eq!(resolve_task_id(&board, &id).unwrap(), id);
        assert_eq!(resolve_task_id(&board, &id[..8]).unwrap(), id);
        assert!(resolve_task_id(&board, "zzzz").is_err());
    }

    #[test]
    fn ambiguous_prefix_is_rejected() {
        let mut board = DayBoard::new();
        board.add_task(TaskDraft::new("A", 30)).unwrap();
        board.add_task(TaskDraft::new("B", 30)).unwrap();
        assert!(resolve_task_id(&board, "").is_err());
    }
}
