//! Task model shared by the board, the planner and the insights.
//!
//! The planner only reads tasks. Creating and mutating them is the board's
//! job (see [`crate::board`]).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::time;

/// Shortest task the board accepts (minutes).
pub const MIN_TASK_MINUTES: i64 = 10;

/// Category used when the user leaves it blank.
pub const DEFAULT_CATEGORY: &str = "Other";

/// Scheduling priority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Higher rank sorts earlier.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 2,
            Priority::Medium => 1,
            Priority::Low => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Priority::High => "high",
            Priority::Medium => "medium",
            Priority::Low => "low",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Cognitive cost of a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Energy {
    /// Deep focus required
    High,
    /// Full energy, default
    Medium,
    /// Can be done on autopilot
    Low,
}

impl Energy {
    pub fn as_str(self) -> &'static str {
        match self {
            Energy::High => "high",
            Energy::Medium => "medium",
            Energy::Low => "low",
        }
    }
}

impl Default for Energy {
    fn default() -> Self {
        Energy::Medium
    }
}

/// Soft time-of-day affinity, used only as a tie-break.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PreferredSlot {
    Morning,
    Afternoon,
    Evening,
}

impl PreferredSlot {
    pub fn as_str(self) -> &'static str {
        match self {
            PreferredSlot::Morning => "morning",
            PreferredSlot::Afternoon => "afternoon",
            PreferredSlot::Evening => "evening",
        }
    }
}

macro_rules! impl_text_enum {
    ($ty:ty, $field:literal, [$($text:literal => $variant:expr),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_ascii_lowercase().as_str() {
                    $($text => Ok($variant),)+
                    other => Err(ValidationError::InvalidValue {
                        field: $field.to_string(),
                        message: format!("unknown value '{other}'"),
                    }),
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_text_enum!(Priority, "priority", [
    "high" => Priority::High,
    "medium" => Priority::Medium,
    "low" => Priority::Low,
]);
impl_text_enum!(Energy, "energy", [
    "high" => Energy::High,
    "medium" => Energy::Medium,
    "low" => Energy::Low,
]);
impl_text_enum!(PreferredSlot, "preferred_slot", [
    "morning" => PreferredSlot::Morning,
    "afternoon" => PreferredSlot::Afternoon,
    "evening" => PreferredSlot::Evening,
]);

/// A discrete piece of work for the day.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Minutes.
    pub duration: i64,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub energy: Energy,
    #[serde(default = "default_category")]
    pub category: String,
    /// Soft deadline as a minute offset; serialized "HH:MM".
    #[serde(default, with = "time::hhmm_option", skip_serializing_if = "Option::is_none")]
    pub due_time: Option<i64>,
    #[serde(default)]
    pub must_do: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_slot: Option<PreferredSlot>,
    #[serde(default)]
    pub done: bool,
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

impl Task {
    /// Create an open task with default attributes.
    pub fn new(id: impl Into<String>, title: impl Into<String>, duration: i64) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration,
            priority: Priority::default(),
            energy: Energy::default(),
            category: default_category(),
            due_time: None,
            must_do: false,
            notes: None,
            preferred_slot: None,
            done: false,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_energy(mut self, energy: Energy) -> Self {
        self.energy = energy;
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_due_time(mut self, minutes: i64) -> Self {
        self.due_time = Some(minutes);
        self
    }

    pub fn with_must_do(mut self, must_do: bool) -> Self {
        self.must_do = must_do;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_preferred_slot(mut self, slot: PreferredSlot) -> Self {
        self.preferred_slot = Some(slot);
        self
    }

    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// Duration the planner books, never below [`MIN_TASK_MINUTES`].
    pub fn planned_minutes(&self) -> i64 {
        self.duration.max(MIN_TASK_MINUTES)
    }

    pub fn is_open(&self) -> bool {
        !self.done
    }
}

/// User input for a new task, before it gets an id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub duration: i64,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub energy: Energy,
    #[serde(default)]
    pub category: String,
    #[serde(default, with = "time::hhmm_option")]
    pub due_time: Option<i64>,
    #[serde(default)]
    pub must_do: bool,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub preferred_slot: Option<PreferredSlot>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>, duration: i64) -> Self {
        Self {
            title: title.into(),
            duration,
            ..Self::default()
        }
    }

    /// Normalize the draft into an open task.
    ///
    /// The title is trimmed and must not be empty, the duration is raised to
    /// [`MIN_TASK_MINUTES`], a blank category becomes [`DEFAULT_CATEGORY`] and
    /// blank notes are dropped.
    pub fn into_task(self, id: impl Into<String>) -> Result<Task, ValidationError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(ValidationError::Empty("title".to_string()));
        }
        if let Some(due) = self.due_time {
            if !(0..=time::LAST_MINUTE).contains(&due) {
                return Err(ValidationError::InvalidValue {
                    field: "due_time".to_string(),
                    message: format!("{due} is outside 00:00-23:59"),
                });
            }
        }

        let category = match self.category.trim() {
            "" => default_category(),
            c => c.to_string(),
        };
        let notes = self
            .notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(Task {
            id: id.into(),
            title: title.to_string(),
            duration: self.duration.max(MIN_TASK_MINUTES),
            priority: self.priority,
            energy: self.energy,
            category,
            due_time: self.due_time,
            must_do: self.must_do,
            notes,
            preferred_slot: self.preferred_slot,
            done: false,
        })
    }
}
