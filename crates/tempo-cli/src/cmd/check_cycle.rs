//! `tempo check-cycle` — validate one proposed dependency edge.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tempo_core::GraphError;
use tempo_engine::TaskGraph;
use tempo_engine::graph::would_create_cycle;

use crate::output::{OutputMode, render};
use crate::snapshot;

/// Arguments for `tempo check-cycle`.
#[derive(Args, Debug)]
pub struct CheckCycleArgs {
    /// Path to the task snapshot JSON (reads stdin when omitted).
    #[arg(long, value_name = "FILE")]
    pub tasks: Option<PathBuf>,

    /// The task that would gain a dependency.
    #[arg(long, value_name = "ID")]
    pub task: String,

    /// The proposed dependency.
    #[arg(long = "depends-on", value_name = "ID")]
    pub depends_on: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckCycleOutput {
    task_id: String,
    dependency_id: String,
    would_create_cycle: bool,
    /// Concrete witness path when a cycle would be created.
    #[serde(skip_serializing_if = "Option::is_none")]
    cycle: Option<Vec<String>>,
}

/// Execute `tempo check-cycle`.
///
/// # Errors
///
/// Returns snapshot failures or unknown task ids.
pub fn run(args: &CheckCycleArgs, mode: OutputMode) -> anyhow::Result<()> {
    let tasks = snapshot::load(args.tasks.as_deref())?;
    let graph = TaskGraph::from_tasks(&tasks);

    for id in [&args.task, &args.depends_on] {
        if graph.task(id).is_none() {
            return Err(GraphError::UnknownTask { id: id.clone() }.into());
        }
    }

    let cycle = would_create_cycle(&graph, &args.task, &args.depends_on);
    let payload = CheckCycleOutput {
        task_id: args.task.clone(),
        dependency_id: args.depends_on.clone(),
        would_create_cycle: cycle.is_some(),
        cycle,
    };

    render(mode, &payload, render_human)
}

fn render_human(payload: &CheckCycleOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if let Some(cycle) = &payload.cycle {
        writeln!(
            w,
            "Adding {} -> {} would create a cycle: {}",
            payload.dependency_id,
            payload.task_id,
            cycle.join(" -> ")
        )
    } else {
        writeln!(
            w,
            "{} may depend on {}: no cycle would be created.",
            payload.task_id, payload.dependency_id
        )
    }
}
