//! `tempo cycles` — list dependency cycles (strongly connected components).

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tempo_engine::TaskGraph;
use tempo_engine::graph::find_cycles;

use crate::output::{OutputMode, render};
use crate::snapshot;

/// Arguments for `tempo cycles`.
#[derive(Args, Debug)]
pub struct CyclesArgs {
    /// Path to the task snapshot JSON (reads stdin when omitted).
    #[arg(long, value_name = "FILE")]
    pub tasks: Option<PathBuf>,
}

#[derive(Debug, Serialize)]
struct CyclesOutput {
    cycles: Vec<Vec<String>>,
}

/// Execute `tempo cycles`.
///
/// # Errors
///
/// Returns snapshot loading failures.
pub fn run(args: &CyclesArgs, mode: OutputMode) -> anyhow::Result<()> {
    let tasks = snapshot::load(args.tasks.as_deref())?;
    let graph = TaskGraph::from_tasks(&tasks);

    let payload = CyclesOutput {
        cycles: find_cycles(&graph),
    };
    render(mode, &payload, render_human)
}

fn render_human(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if payload.cycles.is_empty() {
        writeln!(w, "No dependency cycles found.")?;
        return Ok(());
    }

    writeln!(w, "Dependency cycles ({})", payload.cycles.len())?;
    for (idx, cycle) in payload.cycles.iter().enumerate() {
        writeln!(w, "\nCycle {}:", idx + 1)?;
        for task_id in cycle {
            writeln!(w, "  - {task_id}")?;
        }
    }

    Ok(())
}
