//! Task management commands for CLI.

use clap::Subcommand;
use dayplan_core::{
    minutes_to_time, time_to_minutes, BoardStore, Energy, PreferredSlot, Priority, Task,
    TaskDraft,
};

use super::{resolve_task_id, CmdResult, Context};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task title
        title: String,
        /// Duration in minutes (minimum 10)
        #[arg(long, default_value_t = 45)]
        duration: i64,
        /// high, medium or low
        #[arg(long, default_value = "medium")]
        priority: Priority,
        /// Energy cost: high, medium or low
        #[arg(long, default_value = "medium")]
        energy: Energy,
        /// Category label (default: Other)
        #[arg(long, default_value = "")]
        category: String,
        /// Soft deadline, HH:MM
        #[arg(long)]
        due: Option<String>,
        /// Mark as a key task for the day
        #[arg(long)]
        must_do: bool,
        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
        /// Preferred time of day: morning, afternoon or evening
        #[arg(long)]
        slot: Option<PreferredSlot>,
    },
    /// List tasks
    List {
        /// Print tasks as JSON
        #[arg(long)]
        json: bool,
    },
    /// Toggle a task between done and open
    Done {
        /// Task ID or unique prefix
        id: String,
    },
    /// Remove a task
    Remove {
        /// Task ID or unique prefix
        id: String,
    },
    /// Remove all done tasks
    ClearDone,
}

pub fn run(ctx: &Context, action: TaskAction) -> CmdResult {
    let store = ctx.store()?;
    let mut board = store.load_or_default()?;

    match action {
        TaskAction::Add {
            title,
            duration,
            priority,
            energy,
            category,
            due,
            must_do,
            notes,
            slot,
        } => {
            let due_time = due.as_deref().map(time_to_minutes).transpose()?;
            let draft = TaskDraft {
                title,
                duration,
                priority,
                energy,
                category,
                due_time,
                must_do,
                notes,
                preferred_slot: slot,
            };
            let task = board.add_task(draft)?.clone();
            store.save(&board)?;
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(board.tasks())?);
            } else if board.tasks().is_empty() {
                println!("no tasks");
            } else {
                for task in board.tasks() {
                    println!("{}", task_line(task));
                }
            }
        }
        TaskAction::Done { id } => {
            let id = resolve_task_id(&board, &id)?;
            let done = board.toggle_done(&id)?;
            store.save(&board)?;
            println!("{} {id}", if done { "done" } else { "reopened" });
        }
        TaskAction::Remove { id } => {
            let id = resolve_task_id(&board, &id)?;
            let task = board.remove_task(&id)?;
            store.save(&board)?;
            println!("removed {} ({})", task.id, task.title);
        }
        TaskAction::ClearDone => {
            let removed = board.clear_completed();
            store.save(&board)?;
            println!("removed {removed} done task(s)");
        }
    }
    Ok(())
}

fn task_line(task: &Task) -> String {
    let mark = if task.done { "x" } else { " " };
    let short_id: String = task.id.chars().take(8).collect();
    let mut line = format!(
        "[{mark}] {short_id}  {} [{}] {} min, priority {}, energy {}",
        task.title, task.category, task.duration, task.priority, task.energy
    );
    if task.must_do {
        line.push_str(", must-do");
    }
    if let Some(due) = task.due_time {
        line.push_str(&format!(", due {}", minutes_to_time(due)));
    }
    if let Some(slot) = task.preferred_slot {
        line.push_str(&format!(", {slot}"));
    }
    if let Some(notes) = &task.notes {
        line.push_str(&format!("\n      {notes}"));
    }
    line
}
