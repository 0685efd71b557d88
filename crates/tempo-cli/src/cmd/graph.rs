//! `tempo graph` — dependency-graph inspection.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use tempo_core::GraphAnalysis;
use tempo_engine::analyze;

use crate::output::{OutputMode, render};
use crate::snapshot;

/// Arguments for `tempo graph`.
#[derive(Args, Debug)]
pub struct GraphArgs {
    /// Path to the task snapshot JSON (reads stdin when omitted).
    #[arg(long, value_name = "FILE")]
    pub tasks: Option<PathBuf>,
}

/// Execute `tempo graph`.
///
/// # Errors
///
/// Returns snapshot loading failures.
pub fn run(args: &GraphArgs, mode: OutputMode) -> anyhow::Result<()> {
    let tasks = snapshot::load(args.tasks.as_deref())?;
    let analysis = analyze(&tasks);
    render(mode, &analysis, render_human)
}

fn render_human(analysis: &GraphAnalysis, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "Nodes ({}):", analysis.nodes.len())?;
    for node in &analysis.nodes {
        let mark = if node.completed { "x" } else { " " };
        if node.depends_on.is_empty() {
            writeln!(w, "  [{mark}] {} — {} (value {})", node.id, node.title, node.value)?;
        } else {
            writeln!(
                w,
                "  [{mark}] {} — {} (value {}, after {})",
                node.id,
                node.title,
                node.value,
                node.depends_on.join(", ")
            )?;
        }
    }

    if analysis.has_cycle {
        writeln!(w, "\nCycle detected: no valid scheduling order exists.")?;
    } else if let Some(order) = &analysis.topological_order {
        writeln!(w, "\nTopological order: {}", order.join(" -> "))?;
    }

    Ok(())
}
