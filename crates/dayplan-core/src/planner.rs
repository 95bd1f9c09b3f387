//! Single-day plan generator.
//!
//! Places open tasks back-to-back into a day window:
//! - orders tasks by must-do, priority, due time, then slot affinity
//! - drops tasks that no longer fit before the end of the window
//! - inserts a rest break once continuous focus crosses a threshold
//! - reports focus minutes, idle buffer and the finish time of task work
//!
//! Generation is a pure function of its inputs; nothing is cached between
//! calls.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::config::PlannerConfig;
use crate::error::PlanError;
use crate::task::{PreferredSlot, Task};
use crate::time::{self, minutes_to_time, time_to_minutes};

/// A focus block assigned to one task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBlock {
    pub id: String,
    #[serde(with = "time::hhmm")]
    pub start: i64,
    #[serde(with = "time::hhmm")]
    pub end: i64,
    pub task: Task,
}

/// A rest block between two task blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakBlock {
    pub id: String,
    #[serde(with = "time::hhmm")]
    pub start: i64,
    #[serde(with = "time::hhmm")]
    pub end: i64,
    pub label: String,
}

/// One entry of the day's timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ScheduleItem {
    Task(TaskBlock),
    Break(BreakBlock),
}

impl ScheduleItem {
    pub fn id(&self) -> &str {
        match self {
            ScheduleItem::Task(b) => &b.id,
            ScheduleItem::Break(b) => &b.id,
        }
    }

    pub fn start(&self) -> i64 {
        match self {
            ScheduleItem::Task(b) => b.start,
            ScheduleItem::Break(b) => b.start,
        }
    }

    pub fn end(&self) -> i64 {
        match self {
            ScheduleItem::Task(b) => b.end,
            ScheduleItem::Break(b) => b.end,
        }
    }

    /// Get total duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        self.end() - self.start()
    }

    pub fn is_break(&self) -> bool {
        matches!(self, ScheduleItem::Break(_))
    }

    /// Source task of a task block.
    pub fn task(&self) -> Option<&Task> {
        match self {
            ScheduleItem::Task(b) => Some(&b.task),
            ScheduleItem::Break(_) => None,
        }
    }
}

/// Result of one planning pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePlan {
    /// Earliest first, each item starting where the previous one ended.
    pub items: Vec<ScheduleItem>,
    /// Minutes spent in task blocks.
    pub focus_minutes: i64,
    /// Idle minutes left after the last item.
    pub buffer_minutes: i64,
    /// End of the last task block, or day start when nothing was placed.
    #[serde(with = "time::hhmm")]
    pub finish_time: i64,
    /// Ids of open tasks that did not fit, in selection order.
    #[serde(default)]
    pub unscheduled: Vec<String>,
}

impl SchedulePlan {
    /// Finish time as "HH:MM".
    pub fn finish_time_label(&self) -> String {
        minutes_to_time(self.finish_time)
    }

    pub fn task_blocks(&self) -> impl Iterator<Item = &TaskBlock> {
        self.items.iter().filter_map(|item| match item {
            ScheduleItem::Task(b) => Some(b),
            ScheduleItem::Break(_) => None,
        })
    }

    pub fn break_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_break()).count()
    }

    /// Task blocks that end after their task's due time.
    ///
    /// Deadlines are soft: the generator places these anyway.
    pub fn late_tasks(&self) -> Vec<&TaskBlock> {
        self.task_blocks()
            .filter(|b| b.task.due_time.is_some_and(|due| b.end > due))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Plan generator with tunable constants.
#[derive(Debug, Clone, Default)]
pub struct DayPlanner {
    config: PlannerConfig,
}

impl DayPlanner {
    /// Create a planner with default config
    pub fn new() -> Self {
        Self {
            config: PlannerConfig::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Generate a plan for a window given as "HH:MM" strings.
    ///
    /// # Errors
    /// `InvalidTimeFormat` if either bound does not parse, `InvalidWindow` if
    /// the end is not after the start.
    pub fn generate(
        &self,
        tasks: &[Task],
        day_start: &str,
        day_end: &str,
    ) -> Result<SchedulePlan, PlanError> {
        let start = time_to_minutes(day_start)?;
        let end = time_to_minutes(day_end)?;
        self.generate_in_window(tasks, start, end)
    }

    /// Generate a plan for a window given as minute offsets.
    pub fn generate_in_window(
        &self,
        tasks: &[Task],
        day_start: i64,
        day_end: i64,
    ) -> Result<SchedulePlan, PlanError> {
        if day_start < 0 || day_end > time::LAST_MINUTE || day_end <= day_start {
            return Err(PlanError::InvalidWindow {
                start: minutes_to_time(day_start),
                end: minutes_to_time(day_end),
            });
        }

        let _span = tracing::debug_span!(
            "generate_plan",
            tasks = tasks.len(),
            start = %minutes_to_time(day_start),
            end = %minutes_to_time(day_end),
        )
        .entered();

        let mut queue: Vec<&Task> = tasks.iter().filter(|t| t.is_open()).collect();
        queue.sort_by(|a, b| rank_tasks(a, b));

        let mut items = Vec::new();
        let mut unscheduled = Vec::new();
        let mut cursor = day_start;
        let mut finish_time = day_start;
        let mut focus_minutes = 0;
        let mut focus_since_break = 0;
        let mut placed_any = false;

        while !queue.is_empty() && cursor < day_end {
            let slot = self.slot_at(cursor, day_start, day_end);
            let task = queue.remove(pick_next(&queue, slot));
            let minutes = task.planned_minutes();

            // A break that cannot fit before day end is skipped, not waited for.
            let break_due = placed_any
                && self.config.break_minutes > 0
                && focus_since_break >= self.config.focus_threshold_minutes
                && self.config.break_minutes <= day_end - cursor;
            let task_start = if break_due {
                cursor + self.config.break_minutes
            } else {
                cursor
            };

            // Compare against the remaining time so huge durations cannot overflow.
            if minutes > day_end - task_start {
                tracing::debug!(
                    task_id = %task.id,
                    minutes,
                    at = %minutes_to_time(task_start),
                    "task does not fit before day end, leaving it unscheduled"
                );
                unscheduled.push(task.id.clone());
                continue;
            }

            if break_due {
                tracing::debug!(
                    at = %minutes_to_time(cursor),
                    focus_since_break,
                    "inserting break"
                );
                items.push(ScheduleItem::Break(BreakBlock {
                    id: format!("break@{}", minutes_to_time(cursor)),
                    start: cursor,
                    end: task_start,
                    label: self.config.break_label.clone(),
                }));
                focus_since_break = 0;
                cursor = task_start;
            }

            tracing::trace!(task_id = %task.id, slot = %slot, at = %minutes_to_time(cursor), "placing task");
            items.push(ScheduleItem::Task(TaskBlock {
                id: format!("{}@{}", task.id, minutes_to_time(cursor)),
                start: cursor,
                end: cursor + minutes,
                task: task.clone(),
            }));
            cursor += minutes;
            finish_time = cursor;
            focus_minutes += minutes;
            focus_since_break += minutes;
            placed_any = true;
        }

        unscheduled.extend(queue.iter().map(|t| t.id.clone()));

        Ok(SchedulePlan {
            items,
            focus_minutes,
            buffer_minutes: (day_end - cursor).max(0),
            finish_time,
            unscheduled,
        })
    }

    /// Third of the window the cursor falls into.
    fn slot_at(&self, cursor: i64, day_start: i64, day_end: i64) -> PreferredSlot {
        let position = (cursor - day_start) as f64 / (day_end - day_start) as f64;
        if position < self.config.morning_end_ratio {
            PreferredSlot::Morning
        } else if position < self.config.afternoon_end_ratio {
            PreferredSlot::Afternoon
        } else {
            PreferredSlot::Evening
        }
    }
}

/// Generate a plan with the default configuration.
pub fn generate_plan(
    tasks: &[Task],
    day_start: &str,
    day_end: &str,
) -> Result<SchedulePlan, PlanError> {
    DayPlanner::new().generate(tasks, day_start, day_end)
}

/// Cursor-independent part of the order: must-do, priority, due time.
fn rank_tasks(a: &Task, b: &Task) -> Ordering {
    b.must_do
        .cmp(&a.must_do)
        .then_with(|| b.priority.rank().cmp(&a.priority.rank()))
        .then_with(|| match (a.due_time, b.due_time) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

/// Index of the next task to place.
///
/// Within the leading group of equally ranked tasks, the first one preferring
/// the current slot wins; otherwise the head of the queue.
fn pick_next(queue: &[&Task], slot: PreferredSlot) -> usize {
    let head = queue[0];
    queue
        .iter()
        .take_while(|t| rank_tasks(head, t) == Ordering::Equal)
        .position(|t| t.preferred_slot == Some(slot))
        .unwrap_or(0)
}
