//! Request/response types for scheduling and graph inspection.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::task::Task;

/// Which solver the caller asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Value-density heuristic (fast, approximate).
    Greedy,
    /// Exact 2-constraint knapsack DP (small instances only).
    Knapsack,
    /// Let the engine pick based on instance size.
    #[default]
    Auto,
}

impl Algorithm {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Greedy => "greedy",
            Self::Knapsack => "knapsack",
            Self::Auto => "auto",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greedy" => Ok(Self::Greedy),
            "knapsack" => Ok(Self::Knapsack),
            "auto" => Ok(Self::Auto),
            other => Err(format!(
                "unknown algorithm {other:?} (expected greedy, knapsack, or auto)"
            )),
        }
    }
}

/// Which solver actually produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlgorithmTag {
    #[serde(rename = "greedy")]
    Greedy,
    #[serde(rename = "knapsack_dp")]
    KnapsackDp,
}

impl AlgorithmTag {
    /// Stable wire identifier for the tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Greedy => "greedy",
            Self::KnapsackDp => "knapsack_dp",
        }
    }
}

impl fmt::Display for AlgorithmTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A scheduling request: dual budgets plus optional filter and solver choice.
///
/// Budget validation (both must be positive) is the caller's responsibility
/// and is enforced by [`RequestError`](crate::error::RequestError) at the
/// request boundary, not inside the solvers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRequest {
    /// Total minutes available.
    pub time_budget_minutes: u32,
    /// Total energy available (nominally the 1–5 scale, but the solvers
    /// treat it as an arbitrary positive bound).
    pub energy_budget: u32,
    /// Optional restriction to a subset of task ids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task_ids: Option<Vec<String>>,
    /// Requested solver; defaults to auto-selection.
    #[serde(default)]
    pub algorithm: Algorithm,
}

/// The outcome of one scheduling run.
///
/// `selected_tasks` is in selection order: always a topological order on the
/// knapsack path (it scans a dependencies-first ordering), and for greedy the
/// order tasks were picked, which satisfies precedence but is not necessarily
/// topological over the whole snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleResult {
    /// Full records of the selected tasks, in selection order.
    pub selected_tasks: Vec<Task>,
    /// Sum of selected durations in minutes. Never exceeds the time budget.
    pub total_duration: u32,
    /// Sum of selected energy costs. Never exceeds the energy budget.
    pub total_energy: u32,
    /// Sum of selected values.
    pub total_value: u32,
    /// Which solver produced this result.
    pub algorithm: AlgorithmTag,
    /// Human-readable summary of the inputs and selection size.
    pub explanation: String,
}

impl ScheduleResult {
    /// An empty selection (valid, not an error — see "infeasible scheduling").
    #[must_use]
    pub const fn empty(algorithm: AlgorithmTag, explanation: String) -> Self {
        Self {
            selected_tasks: Vec::new(),
            total_duration: 0,
            total_energy: 0,
            total_value: 0,
            algorithm,
            explanation,
        }
    }
}

/// One node of the dependency graph, as exposed to graph-inspection callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: String,
    pub title: String,
    pub completed: bool,
    pub value: u32,
    pub depends_on: Vec<String>,
}

impl From<&Task> for GraphNode {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            completed: task.completed,
            value: task.value,
            depends_on: task.depends_on.clone(),
        }
    }
}

/// Full graph-inspection response: nodes, cycle flag, and (if acyclic) a
/// topological order of task ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphAnalysis {
    pub nodes: Vec<GraphNode>,
    pub has_cycle: bool,
    /// `None` when the graph is cyclic — callers must treat a null ordering
    /// as "graph invalid for scheduling".
    pub topological_order: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn algorithm_round_trips_through_from_str() {
        for alg in [Algorithm::Greedy, Algorithm::Knapsack, Algorithm::Auto] {
            let parsed: Algorithm = alg.to_string().parse().expect("parse");
            assert_eq!(parsed, alg);
        }
    }

    #[test]
    fn algorithm_rejects_unknown_name() {
        assert!("fastest".parse::<Algorithm>().is_err());
    }

    #[test]
    fn algorithm_defaults_to_auto() {
        assert_eq!(Algorithm::default(), Algorithm::Auto);
    }

    #[test]
    fn tag_serializes_to_stable_wire_names() {
        assert_eq!(
            serde_json::to_value(AlgorithmTag::KnapsackDp).expect("serialize"),
            serde_json::json!("knapsack_dp")
        );
        assert_eq!(
            serde_json::to_value(AlgorithmTag::Greedy).expect("serialize"),
            serde_json::json!("greedy")
        );
    }

    #[test]
    fn request_accepts_minimal_json() {
        let req: ScheduleRequest = serde_json::from_value(serde_json::json!({
            "timeBudgetMinutes": 120,
            "energyBudget": 5,
        }))
        .expect("deserialize");
        assert_eq!(req.algorithm, Algorithm::Auto);
        assert!(req.task_ids.is_none());
    }

    #[test]
    fn empty_result_has_zero_totals() {
        let result = ScheduleResult::empty(AlgorithmTag::Greedy, "nothing fits".to_string());
        assert!(result.selected_tasks.is_empty());
        assert_eq!(result.total_duration, 0);
        assert_eq!(result.total_energy, 0);
        assert_eq!(result.total_value, 0);
    }
}
