use serde::{Deserialize, Serialize};

/// Upper bound on task duration in minutes (8 hours).
pub const MAX_DURATION_MINUTES: u32 = 480;
/// Upper bound on the 1–5 energy-cost scale.
pub const MAX_ENERGY_COST: u32 = 5;
/// Upper bound on the 1–100 value (priority) score.
pub const MAX_VALUE: u32 = 100;

/// A single task in an immutable snapshot.
///
/// Tasks form a directed precedence graph: an edge runs from each id in
/// `depends_on` to the task that lists it. A task may only be scheduled
/// once every dependency is completed or selected earlier in the same run.
///
/// Wire field names are camelCase to match the snapshot JSON produced by
/// the task-store layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Opaque unique identifier.
    pub id: String,
    /// Display title; carried through for graph/result output.
    pub title: String,
    /// Free-form notes. Never read by the engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Estimated duration in minutes (1..=480, validated upstream).
    pub duration_minutes: u32,
    /// Energy cost on a 1..=5 scale.
    pub energy_cost: u32,
    /// Priority score on a 1..=100 scale.
    pub value: u32,
    /// Ids of tasks that must precede this one. Set semantics: duplicates
    /// are meaningless and order is irrelevant.
    #[serde(default)]
    pub depends_on: Vec<String>,
    /// Whether the task is already done.
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    /// Value per minute, the greedy ranking key.
    ///
    /// `duration_minutes` is validated as positive upstream; a zero duration
    /// would rank as infinitely dense, which is the conservative direction
    /// (such a task costs nothing to take).
    #[must_use]
    pub fn value_density(&self) -> f64 {
        f64::from(self.value) / f64::from(self.duration_minutes.max(1))
    }

    /// Validate the field bounds the task store promises.
    ///
    /// The engine itself tolerates out-of-range values; this exists for
    /// callers (the CLI snapshot loader) that sit at the request boundary.
    ///
    /// # Errors
    ///
    /// Returns the first [`TaskFieldError`] encountered.
    pub fn validate(&self) -> Result<(), TaskFieldError> {
        if self.id.is_empty() {
            return Err(TaskFieldError::EmptyId);
        }
        if self.duration_minutes == 0 || self.duration_minutes > MAX_DURATION_MINUTES {
            return Err(TaskFieldError::DurationOutOfRange {
                id: self.id.clone(),
                got: self.duration_minutes,
            });
        }
        if self.energy_cost == 0 || self.energy_cost > MAX_ENERGY_COST {
            return Err(TaskFieldError::EnergyOutOfRange {
                id: self.id.clone(),
                got: self.energy_cost,
            });
        }
        if self.value == 0 || self.value > MAX_VALUE {
            return Err(TaskFieldError::ValueOutOfRange {
                id: self.id.clone(),
                got: self.value,
            });
        }
        Ok(())
    }
}

/// A task field outside the documented bounds.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskFieldError {
    #[error("task id must not be empty")]
    EmptyId,
    #[error("task {id}: durationMinutes must be 1..={max} (got {got})", max = MAX_DURATION_MINUTES)]
    DurationOutOfRange { id: String, got: u32 },
    #[error("task {id}: energyCost must be 1..={max} (got {got})", max = MAX_ENERGY_COST)]
    EnergyOutOfRange { id: String, got: u32 },
    #[error("task {id}: value must be 1..={max} (got {got})", max = MAX_VALUE)]
    ValueOutOfRange { id: String, got: u32 },
}
