use std::fmt;

/// Machine-readable error codes for API-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidTimeBudget,
    InvalidEnergyBudget,
    InvalidTaskField,
    UnknownTask,
    CycleDetected,
    HasDependents,
    SnapshotParseError,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidTimeBudget => "E1001",
            Self::InvalidEnergyBudget => "E1002",
            Self::InvalidTaskField => "E1003",
            Self::UnknownTask => "E2001",
            Self::CycleDetected => "E2002",
            Self::HasDependents => "E2003",
            Self::SnapshotParseError => "E3001",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidTimeBudget => "Time budget must be positive",
            Self::InvalidEnergyBudget => "Energy budget must be positive",
            Self::InvalidTaskField => "Task field out of range",
            Self::UnknownTask => "Task not found",
            Self::CycleDetected => "Cycle would be created",
            Self::HasDependents => "Other tasks depend on this task",
            Self::SnapshotParseError => "Task snapshot parse error",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to callers.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidTimeBudget => Some("Pass timeBudgetMinutes as a positive integer."),
            Self::InvalidEnergyBudget => Some("Pass energyBudget as a positive integer."),
            Self::InvalidTaskField => {
                Some("Durations are 1..=480 minutes, energy 1..=5, value 1..=100.")
            }
            Self::UnknownTask => None,
            Self::CycleDetected => {
                Some("Remove/adjust dependency links to keep the graph acyclic.")
            }
            Self::HasDependents => {
                Some("Remove the dependency links from the blocking tasks first.")
            }
            Self::SnapshotParseError => Some("Check that the snapshot is a JSON array of tasks."),
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Graph-integrity failures: rejected mutations of the precedence graph.
///
/// These surface *before* commit — the cycle check runs against a
/// hypothetical graph, and the dependents check runs before a deletion.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError {
    /// The proposed dependency edge would close a cycle. `path` is a
    /// concrete cycle witness, `a -> b -> ... -> a`.
    #[error("dependency cycle detected: {}", .path.join(" -> "))]
    CycleDetected { path: Vec<String> },

    /// The task cannot be deleted: other tasks still depend on it,
    /// directly or transitively.
    #[error("cannot delete task {id}: {} task(s) depend on it", .dependents.len())]
    HasDependents { id: String, dependents: Vec<String> },

    /// The referenced task id is not in the snapshot.
    #[error("unknown task id: {id}")]
    UnknownTask { id: String },
}

impl GraphError {
    /// The machine-readable code for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::CycleDetected { .. } => ErrorCode::CycleDetected,
            Self::HasDependents { .. } => ErrorCode::HasDependents,
            Self::UnknownTask { .. } => ErrorCode::UnknownTask,
        }
    }
}

/// Request-validation failures, owned by the calling layer.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("timeBudgetMinutes must be positive")]
    InvalidTimeBudget,

    #[error("energyBudget must be positive")]
    InvalidEnergyBudget,

    /// A `taskIds` filter named an id that is not in the snapshot.
    #[error("unknown task id in filter: {id}")]
    UnknownTaskInFilter { id: String },
}

impl RequestError {
    /// The machine-readable code for this failure.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidTimeBudget => ErrorCode::InvalidTimeBudget,
            Self::InvalidEnergyBudget => ErrorCode::InvalidEnergyBudget,
            Self::UnknownTaskInFilter { .. } => ErrorCode::UnknownTask,
        }
    }
}
