//! Shared output layer for human/JSON parity across all commands.
//!
//! Every command handler receives an [`OutputMode`] and formats its payload
//! accordingly: readable text for humans, or stable JSON for pipes and
//! scripted callers.

use std::io::{self, Write};

use serde::Serialize;

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Human,
    /// Machine-readable JSON (one pretty-printed object per result).
    Json,
}

/// Render `payload` to stdout in the selected mode.
///
/// JSON mode serializes the payload; human mode delegates to `human_fn`.
///
/// # Errors
///
/// Returns serialization or write failures.
pub fn render<T, F>(mode: OutputMode, payload: &T, human_fn: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T, &mut dyn Write) -> io::Result<()>,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, payload)?;
            writeln!(out)?;
        }
        OutputMode::Human => human_fn(payload, &mut out)?,
    }

    Ok(())
}

/// Render a left-aligned key/value line in human output.
///
/// # Errors
///
/// Returns write failures.
pub fn kv(w: &mut dyn Write, key: &str, value: impl AsRef<str>) -> io::Result<()> {
    writeln!(w, "{:<14} {}", format!("{key}:"), value.as_ref())
}
