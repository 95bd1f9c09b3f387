use chrono::Datelike;
use dayplan_core::{load_and_plan, minutes_to_time, DayInsights};

use super::{CmdResult, Context};

pub fn run(ctx: &Context, seed: Option<u64>, json: bool) -> CmdResult {
    let (board, plan) = load_and_plan(&ctx.store()?, &ctx.planner()?)?;

    // One message per day unless a seed is given.
    let seed = seed.unwrap_or_else(|| u64::from(chrono::Local::now().ordinal()));
    let insights = DayInsights::compute(&plan, board.tasks(), seed);

    if json {
        println!("{}", serde_json::to_string_pretty(&insights)?);
        return Ok(());
    }

    println!("Focus time:   {} min", insights.focus_minutes);
    println!(
        "Must-do:      {} (aim to finish by {})",
        insights.must_do_count,
        minutes_to_time(insights.finish_time)
    );
    println!("Buffer:       {} min", insights.buffer_minutes);
    println!();
    println!(
        "{} {} min of open work left to plan.",
        insights.motivation, insights.open_minutes
    );
    if let (Some(energy), Some(tip)) = (insights.dominant_energy, &insights.energy_tip) {
        println!("Energy ({energy}): {tip}");
    }
    if let (Some(priority), Some(tip)) = (insights.dominant_priority, &insights.priority_tip) {
        println!("Priority ({priority}): {tip}");
    }
    Ok(())
}
