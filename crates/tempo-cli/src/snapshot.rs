//! Task snapshot loading and request-side validation.
//!
//! The engine trusts its input; this module is the validation boundary:
//! field bounds and unique ids are checked here, before any algorithm
//! runs.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use anyhow::Context;
use tempo_core::Task;

/// Load a snapshot from a JSON file, or from stdin when no path is given.
///
/// # Errors
///
/// Returns read, parse, or validation failures with context.
pub fn load(path: Option<&Path>) -> anyhow::Result<Vec<Task>> {
    let raw = match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("read snapshot {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("read snapshot from stdin")?;
            buf
        }
    };

    parse(&raw)
}

/// Parse and validate a snapshot from raw JSON.
///
/// # Errors
///
/// Returns parse failures, out-of-range task fields, or duplicate ids.
pub fn parse(raw: &str) -> anyhow::Result<Vec<Task>> {
    let tasks: Vec<Task> =
        serde_json::from_str(raw).context("parse snapshot as a JSON array of tasks")?;

    let mut seen: HashSet<&str> = HashSet::with_capacity(tasks.len());
    for task in &tasks {
        task.validate()
            .with_context(|| format!("invalid task {}", task.id))?;
        if !seen.insert(task.id.as_str()) {
            anyhow::bail!("duplicate task id: {}", task.id);
        }
    }

    Ok(tasks)
}
