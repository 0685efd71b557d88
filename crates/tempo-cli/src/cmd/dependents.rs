//! `tempo dependents` — list transitive dependents of a task.
//!
//! This is the deletion pre-check: a task with dependents must not be
//! deleted, and the blocking tasks are surfaced so the caller can report
//! them.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use serde::Serialize;
use tempo_core::GraphError;
use tempo_engine::{TaskGraph, dependent_tasks};

use crate::output::{OutputMode, render};
use crate::snapshot;

/// Arguments for `tempo dependents`.
#[derive(Args, Debug)]
pub struct DependentsArgs {
    /// Path to the task snapshot JSON (reads stdin when omitted).
    #[arg(long, value_name = "FILE")]
    pub tasks: Option<PathBuf>,

    /// The task to inspect.
    #[arg(long, value_name = "ID")]
    pub task: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DependentRef {
    id: String,
    title: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct DependentsOutput {
    task_id: String,
    dependents: Vec<DependentRef>,
    deletable: bool,
}

/// Execute `tempo dependents`.
///
/// # Errors
///
/// Returns snapshot failures or an unknown task id.
pub fn run(args: &DependentsArgs, mode: OutputMode) -> anyhow::Result<()> {
    let tasks = snapshot::load(args.tasks.as_deref())?;
    let graph = TaskGraph::from_tasks(&tasks);

    if graph.task(&args.task).is_none() {
        return Err(GraphError::UnknownTask {
            id: args.task.clone(),
        }
        .into());
    }

    let dependents: Vec<DependentRef> = dependent_tasks(&graph, &args.task)
        .into_iter()
        .map(|t| DependentRef {
            id: t.id.clone(),
            title: t.title.clone(),
        })
        .collect();

    let payload = DependentsOutput {
        task_id: args.task.clone(),
        deletable: dependents.is_empty(),
        dependents,
    };
    render(mode, &payload, render_human)
}

fn render_human(payload: &DependentsOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if payload.deletable {
        return writeln!(
            w,
            "No tasks depend on {}; it is safe to delete.",
            payload.task_id
        );
    }

    writeln!(
        w,
        "Cannot delete {}: {} task(s) depend on it:",
        payload.task_id,
        payload.dependents.len()
    )?;
    for dep in &payload.dependents {
        writeln!(w, "  - {} — {}", dep.id, dep.title)?;
    }

    Ok(())
}
