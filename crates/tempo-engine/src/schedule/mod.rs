//! Budgeted task-subset schedulers and the size-based selector.
//!
//! # Overview
//!
//! Two solvers share one contract — never exceed either budget, never
//! select a task before its dependencies are satisfied:
//!
//! - [`schedule_greedy`]: value-density heuristic, any instance size.
//! - [`schedule_knapsack`]: exact `O(n·T·E)` DP, small instances only.
//!
//! [`schedule_auto`] picks between them on instance size; [`schedule`]
//! additionally handles the request envelope (budget validation, optional
//! task-id filter, explicit algorithm choice) for callers that pass a raw
//! [`ScheduleRequest`].

pub mod greedy;
pub mod knapsack;

use std::collections::HashSet;

use tempo_core::{Algorithm, RequestError, ScheduleRequest, ScheduleResult, Task};
use tracing::instrument;

pub use greedy::schedule_greedy;
pub use knapsack::{KnapsackConfig, MASK_WIDTH, schedule_knapsack, schedule_knapsack_with_config};

/// Largest incomplete-task count still routed to the exact DP solver.
///
/// A performance/optimality trade-off, not a correctness boundary: both
/// solvers uphold the budget and precedence invariants at any size.
pub const DP_TASK_LIMIT: usize = 40;

/// Schedule with automatic solver selection: exact DP when the incomplete
/// set is small enough to be tractable, greedy otherwise.
#[must_use]
#[instrument(skip(tasks), fields(tasks = tasks.len(), time_budget, energy_budget))]
pub fn schedule_auto(tasks: &[Task], time_budget: u32, energy_budget: u32) -> ScheduleResult {
    let incomplete = tasks.iter().filter(|t| !t.completed).count();

    if incomplete <= DP_TASK_LIMIT {
        schedule_knapsack(tasks, time_budget, energy_budget)
    } else {
        schedule_greedy(tasks, time_budget, energy_budget)
    }
}

/// Handle a full scheduling request: validate budgets, apply the optional
/// task-id filter, and dispatch to the requested solver.
///
/// # Errors
///
/// - [`RequestError::InvalidTimeBudget`] / [`RequestError::InvalidEnergyBudget`]
///   when a budget is zero.
/// - [`RequestError::UnknownTaskInFilter`] when `task_ids` names an id not
///   present in the snapshot.
#[instrument(skip(tasks, request), fields(tasks = tasks.len()))]
pub fn schedule(tasks: &[Task], request: &ScheduleRequest) -> Result<ScheduleResult, RequestError> {
    if request.time_budget_minutes == 0 {
        return Err(RequestError::InvalidTimeBudget);
    }
    if request.energy_budget == 0 {
        return Err(RequestError::InvalidEnergyBudget);
    }

    let filtered: Vec<Task>;
    let snapshot: &[Task] = match &request.task_ids {
        None => tasks,
        Some(ids) => {
            let known: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
            if let Some(unknown) = ids.iter().find(|id| !known.contains(id.as_str())) {
                return Err(RequestError::UnknownTaskInFilter {
                    id: unknown.clone(),
                });
            }
            let wanted: HashSet<&str> = ids.iter().map(String::as_str).collect();
            filtered = tasks
                .iter()
                .filter(|t| wanted.contains(t.id.as_str()))
                .cloned()
                .collect();
            &filtered
        }
    };

    let result = match request.algorithm {
        Algorithm::Greedy => {
            schedule_greedy(snapshot, request.time_budget_minutes, request.energy_budget)
        }
        Algorithm::Knapsack => {
            schedule_knapsack(snapshot, request.time_budget_minutes, request.energy_budget)
        }
        Algorithm::Auto => {
            schedule_auto(snapshot, request.time_budget_minutes, request.energy_budget)
        }
    };

    Ok(result)
}
