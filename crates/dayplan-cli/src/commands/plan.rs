use dayplan_core::time::minutes_from_naive;
use dayplan_core::{minutes_to_time, BoardStore, DayBoard, PlanError, ScheduleItem, SchedulePlan};

use super::{CmdResult, Context};

pub fn run(ctx: &Context, json: bool, from_now: bool) -> CmdResult {
    let board = ctx.store()?.load_or_default()?;
    let planner = ctx.planner()?;

    let start = if from_now {
        let now = minutes_from_naive(chrono::Local::now().time());
        now.max(board.day_start())
    } else {
        board.day_start()
    };
    if start >= board.day_end() {
        return Err(PlanError::InvalidWindow {
            start: minutes_to_time(start),
            end: minutes_to_time(board.day_end()),
        }
        .into());
    }
    let plan = planner.generate_in_window(board.tasks(), start, board.day_end())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print!("{}", render_plan(&board, &plan, start));
    }
    Ok(())
}

/// Human-readable timeline for a plan that started at `start`.
pub fn render_plan(board: &DayBoard, plan: &SchedulePlan, start: i64) -> String {
    let mut out = format!(
        "Plan {}-{}\n",
        minutes_to_time(start),
        minutes_to_time(board.day_end())
    );

    if plan.is_empty() {
        out.push_str("  (nothing scheduled)\n");
    }

    for item in &plan.items {
        let span = format!(
            "{}-{}",
            minutes_to_time(item.start()),
            minutes_to_time(item.end())
        );
        match item {
            ScheduleItem::Task(block) => {
                let task = &block.task;
                let mut line = format!(
                    "  {span}  {} [{}] {} min, {}",
                    task.title, task.category, task.duration, task.priority
                );
                if task.must_do {
                    line.push_str(", must-do");
                }
                if let Some(due) = task.due_time {
                    line.push_str(&format!(", due {}", minutes_to_time(due)));
                    if block.end > due {
                        line.push_str(" (late)");
                    }
                }
                out.push_str(&line);
                out.push('\n');
            }
            ScheduleItem::Break(block) => {
                out.push_str(&format!("  {span}  -- {} --\n", block.label));
            }
        }
    }

    out.push_str(&format!(
        "Focus: {} min | Buffer: {} min | Finish: {}\n",
        plan.focus_minutes,
        plan.buffer_minutes,
        plan.finish_time_label()
    ));

    if !plan.unscheduled.is_empty() {
        let titles: Vec<&str> = plan
            .unscheduled
            .iter()
            .filter_map(|id| board.task(id))
            .map(|t| t.title.as_str())
            .collect();
        out.push_str(&format!("Does not fit: {}\n", titles.join(", ")));
    }
    out
}
