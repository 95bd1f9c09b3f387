//! Day summary shown next to the plan.
//!
//! Everything here is derived from the plan and the task list. The
//! motivational line is picked with a seeded PRNG so callers (and tests)
//! control which message appears.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

use crate::planner::SchedulePlan;
use crate::task::{Energy, Priority, Task};
use crate::time;

pub const MOTIVATION_POOL: &[&str] = &[
    "Focus on one task at a time; the plan already picked the best order.",
    "Short breaks after each block give your brain a chance to reset.",
    "Plan a reward for the end of the day once the key task is done.",
    "Start with whatever brings the most peace of mind; the rest gets easier.",
    "Match your playlist to the energy level of the current block.",
];

pub fn energy_tip(energy: Energy) -> &'static str {
    match energy {
        Energy::High => {
            "These tasks need deep focus. Fit them in early, before distractions show up."
        }
        Energy::Medium => {
            "Medium-energy tasks work well after lunch and in shorter time windows."
        }
        Energy::Low => "Low energy cost? Use them to fill the buffer or travel time.",
    }
}

pub fn priority_tip(priority: Priority) -> &'static str {
    match priority {
        Priority::High => {
            "High priority: plan a checkpoint to make sure you are on track."
        }
        Priority::Medium => "Medium priority: make sure you know what \"done\" means.",
        Priority::Low => {
            "Low priority: good for closing the day when energy drops but you still want progress."
        }
    }
}

/// Summary of the open work and the current plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayInsights {
    pub open_tasks: usize,
    pub must_do_count: usize,
    /// Total duration of open tasks, scheduled or not.
    pub open_minutes: i64,
    pub focus_minutes: i64,
    pub buffer_minutes: i64,
    #[serde(with = "time::hhmm")]
    pub finish_time: i64,
    pub dominant_energy: Option<Energy>,
    pub dominant_priority: Option<Priority>,
    pub energy_tip: Option<String>,
    pub priority_tip: Option<String>,
    pub motivation: String,
}

impl DayInsights {
    /// Summarize `tasks` and `plan`; `seed` selects the motivational line.
    pub fn compute(plan: &SchedulePlan, tasks: &[Task], seed: u64) -> Self {
        let open: Vec<&Task> = tasks.iter().filter(|t| t.is_open()).collect();

        let dominant_energy = dominant(
            &open,
            [Energy::High, Energy::Medium, Energy::Low],
            |t| t.energy,
        );
        let dominant_priority = dominant(
            &open,
            [Priority::High, Priority::Medium, Priority::Low],
            |t| t.priority,
        );

        let mut rng = Pcg64::seed_from_u64(seed);
        let motivation = MOTIVATION_POOL
            .choose(&mut rng)
            .copied()
            .unwrap_or_default()
            .to_string();

        Self {
            open_tasks: open.len(),
            must_do_count: open.iter().filter(|t| t.must_do).count(),
            open_minutes: open
                .iter()
                .fold(0i64, |acc, t| acc.saturating_add(t.duration)),
            focus_minutes: plan.focus_minutes,
            buffer_minutes: plan.buffer_minutes,
            finish_time: plan.finish_time,
            dominant_energy,
            dominant_priority,
            energy_tip: dominant_energy.map(|e| energy_tip(e).to_string()),
            priority_tip: dominant_priority.map(|p| priority_tip(p).to_string()),
            motivation,
        }
    }
}

/// Most frequent level; ties go to the level listed first.
fn dominant<L, F>(tasks: &[&Task], levels: [L; 3], level_of: F) -> Option<L>
where
    L: Copy + PartialEq,
    F: Fn(&Task) -> L,
{
    let mut best: Option<(L, usize)> = None;
    for level in levels {
        let count = tasks.iter().filter(|t| level_of(**t) == level).count();
        if count > 0 && best.map_or(true, |(_, c)| count > c) {
            best = Some((level, count));
        }
    }
    best.map(|(level, _)| level)
}
