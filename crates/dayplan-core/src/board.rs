//! Day board: the task list and day window a front end edits between plans.
//!
//! The board keeps the planner's preconditions intact (valid window, unique
//! ids, normalized tasks). Storage goes through the [`BoardStore`] port so the
//! core never touches the file system for it.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

use crate::error::{BoardError, PlanError};
use crate::planner::{DayPlanner, SchedulePlan};
use crate::task::{Task, TaskDraft};
use crate::time::{self, minutes_to_time, time_to_minutes};

/// Default window start (08:00).
pub const DEFAULT_DAY_START: i64 = 8 * 60;
/// Default window end (18:00).
pub const DEFAULT_DAY_END: i64 = 18 * 60;
/// How far the end is pushed when the start moves past it.
pub const WINDOW_PUSH_MINUTES: i64 = 8 * 60;
/// Latest end the push may produce (23:00).
pub const WINDOW_PUSH_CAP: i64 = 23 * 60;

/// Completion counts for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStats {
    pub total: usize,
    pub done: usize,
}

impl CategoryStats {
    /// Share of done tasks, 0.0-1.0.
    pub fn completion_ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.done as f64 / self.total as f64
        }
    }
}

/// Tasks plus day window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayBoard {
    #[serde(default)]
    tasks: Vec<Task>,
    #[serde(with = "time::hhmm", default = "default_start")]
    day_start: i64,
    #[serde(with = "time::hhmm", default = "default_end")]
    day_end: i64,
}

fn default_start() -> i64 {
    DEFAULT_DAY_START
}
fn default_end() -> i64 {
    DEFAULT_DAY_END
}

impl Default for DayBoard {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            day_start: DEFAULT_DAY_START,
            day_end: DEFAULT_DAY_END,
        }
    }
}

impl DayBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn day_start(&self) -> i64 {
        self.day_start
    }

    pub fn day_end(&self) -> i64 {
        self.day_end
    }

    /// Window as ("HH:MM", "HH:MM").
    pub fn window_labels(&self) -> (String, String) {
        (minutes_to_time(self.day_start), minutes_to_time(self.day_end))
    }

    /// Add a task from user input, assigning a fresh id.
    pub fn add_task(&mut self, draft: TaskDraft) -> Result<&Task, BoardError> {
        let task = draft.into_task(uuid::Uuid::new_v4().to_string())?;
        tracing::debug!(task_id = %task.id, title = %task.title, "task added");
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Flip the done flag. Returns the new value.
    pub fn toggle_done(&mut self, id: &str) -> Result<bool, BoardError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| BoardError::TaskNotFound(id.to_string()))?;
        task.done = !task.done;
        Ok(task.done)
    }

    pub fn remove_task(&mut self, id: &str) -> Result<Task, BoardError> {
        let index = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| BoardError::TaskNotFound(id.to_string()))?;
        Ok(self.tasks.remove(index))
    }

    /// Drop all done tasks. Returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(Task::is_open);
        before - self.tasks.len()
    }

    /// Move the start of the day.
    ///
    /// When the new start is at or after the current end, the end is pushed
    /// to `start + 8h`, capped at 23:00. A start of 23:00 or later leaves no
    /// room for that push and is rejected.
    pub fn set_day_start(&mut self, value: &str) -> Result<(), BoardError> {
        let start = time_to_minutes(value)?;
        let end = if self.day_end <= start {
            (start + WINDOW_PUSH_MINUTES).min(WINDOW_PUSH_CAP)
        } else {
            self.day_end
        };
        if end <= start {
            return Err(PlanError::InvalidWindow {
                start: minutes_to_time(start),
                end: minutes_to_time(end),
            }
            .into());
        }
        if end != self.day_end {
            tracing::debug!(
                from = %minutes_to_time(self.day_end),
                to = %minutes_to_time(end),
                "day end pushed past new start"
            );
        }
        self.day_start = start;
        self.day_end = end;
        Ok(())
    }

    /// Move the end of the day. It must stay after the start.
    pub fn set_day_end(&mut self, value: &str) -> Result<(), BoardError> {
        let end = time_to_minutes(value)?;
        if end <= self.day_start {
            return Err(PlanError::InvalidWindow {
                start: minutes_to_time(self.day_start),
                end: minutes_to_time(end),
            }
            .into());
        }
        self.day_end = end;
        Ok(())
    }

    /// Recompute the plan for the current tasks and window.
    pub fn plan(&self, planner: &DayPlanner) -> Result<SchedulePlan, PlanError> {
        planner.generate_in_window(&self.tasks, self.day_start, self.day_end)
    }

    /// Per-category totals in first-seen order.
    pub fn category_stats(&self) -> IndexMap<String, CategoryStats> {
        let mut stats: IndexMap<String, CategoryStats> = IndexMap::new();
        for task in &self.tasks {
            let entry = stats.entry(task.category.clone()).or_default();
            entry.total += 1;
            if task.done {
                entry.done += 1;
            }
        }
        stats
    }
}

/// Persistence port for the board.
///
/// Implementations live with the front end; the core ships only
/// [`MemoryBoardStore`].
pub trait BoardStore {
    /// Stored board, or `None` if nothing was saved yet.
    fn load(&self) -> Result<Option<DayBoard>, BoardError>;

    fn save(&self, board: &DayBoard) -> Result<(), BoardError>;

    /// Stored board or a fresh default one.
    fn load_or_default(&self) -> Result<DayBoard, BoardError> {
        Ok(self.load()?.unwrap_or_default())
    }
}

/// Load the stored board and plan it in one step.
pub fn load_and_plan(
    store: &dyn BoardStore,
    planner: &DayPlanner,
) -> crate::error::Result<(DayBoard, SchedulePlan)> {
    let board = store.load_or_default()?;
    let plan = board.plan(planner)?;
    Ok((board, plan))
}

/// In-process store, used by tests and embedding front ends.
#[derive(Debug, Default)]
pub struct MemoryBoardStore {
    board: Mutex<Option<DayBoard>>,
}

impl MemoryBoardStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BoardStore for MemoryBoardStore {
    fn load(&self) -> Result<Option<DayBoard>, BoardError> {
        let guard = self.board.lock().map_err(|e| BoardError::Store {
            message: e.to_string(),
            source: None,
        })?;
        Ok(guard.clone())
    }

    fn save(&self, board: &DayBoard) -> Result<(), BoardError> {
        let mut guard = self.board.lock().map_err(|e| BoardError::Store {
            message: e.to_string(),
            source: None,
        })?;
        *guard = Some(board.clone());
        Ok(())
    }
}
