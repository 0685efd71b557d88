//! `tempo schedule` — compute a value-maximizing schedule.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tempo_core::{Algorithm, ScheduleRequest, ScheduleResult};

use crate::output::{OutputMode, kv, render};
use crate::snapshot;

/// Arguments for `tempo schedule`.
#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Path to the task snapshot JSON (reads stdin when omitted).
    #[arg(long, value_name = "FILE")]
    pub tasks: Option<PathBuf>,

    /// Time budget in minutes.
    #[arg(long, value_name = "MINUTES")]
    pub time: u32,

    /// Energy budget (nominally the 1-5 scale).
    #[arg(long)]
    pub energy: u32,

    /// Solver to use: greedy, knapsack, or auto.
    #[arg(long, default_value = "auto")]
    pub algorithm: Algorithm,

    /// Restrict scheduling to these task ids (comma-separated).
    #[arg(long = "task-ids", value_delimiter = ',', value_name = "IDS")]
    pub task_ids: Option<Vec<String>>,
}

/// Execute `tempo schedule`.
///
/// # Errors
///
/// Returns snapshot or request-validation failures.
pub fn run(args: &ScheduleArgs, mode: OutputMode) -> anyhow::Result<()> {
    let tasks = snapshot::load(args.tasks.as_deref())?;

    let request = ScheduleRequest {
        time_budget_minutes: args.time,
        energy_budget: args.energy,
        task_ids: args.task_ids.clone(),
        algorithm: args.algorithm,
    };

    let result = tempo_engine::schedule(&tasks, &request)?;
    render(mode, &result, render_human)
}

fn render_human(result: &ScheduleResult, w: &mut dyn Write) -> std::io::Result<()> {
    if result.selected_tasks.is_empty() {
        writeln!(w, "No tasks fit the budgets.")?;
    } else {
        writeln!(w, "Selected {} task(s):", result.selected_tasks.len())?;
        for task in &result.selected_tasks {
            writeln!(
                w,
                "  {} — {} ({}min, energy {}, value {})",
                task.id, task.title, task.duration_minutes, task.energy_cost, task.value
            )?;
        }
    }

    writeln!(w)?;
    kv(w, "duration", format!("{}min", result.total_duration))?;
    kv(w, "energy", result.total_energy.to_string())?;
    kv(w, "value", result.total_value.to_string())?;
    kv(w, "algorithm", result.algorithm.as_str())?;
    writeln!(w, "\n{}", result.explanation)
}
