//! Value-density greedy scheduler.
//!
//! # Algorithm
//!
//! Repeats rounds until one makes no selection:
//!
//! 1. Collect the *schedulable set*: incomplete, unselected tasks whose
//!    every dependency is completed or already selected this run.
//! 2. Sort it descending by value/duration ratio (stable — ties keep
//!    snapshot order).
//! 3. Select the first task that fits both remaining budgets, deduct its
//!    costs, and restart, so tasks it unblocks join the next round.
//!
//! Not optimal; roughly `O(n² log n)` worst case from the per-round
//! re-filter and re-sort. Used for instances too large for the exact DP.

use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use tempo_core::{AlgorithmTag, ScheduleResult, Task};
use tracing::debug;

/// Run the greedy scheduler over the snapshot with the given budgets.
///
/// The selection never exceeds either budget, and every selected task's
/// dependencies are each completed or selected earlier in the result.
/// A snapshot where nothing fits yields a valid empty result.
#[must_use]
pub fn schedule_greedy(tasks: &[Task], time_budget: u32, energy_budget: u32) -> ScheduleResult {
    let task_by_id: HashMap<&str, &Task> =
        tasks.iter().map(|t| (t.id.as_str(), t)).collect();

    let mut selected: Vec<&Task> = Vec::new();
    let mut selected_ids: HashSet<&str> = HashSet::new();
    let mut time_left = time_budget;
    let mut energy_left = energy_budget;

    loop {
        let mut candidates: Vec<&Task> = tasks
            .iter()
            .filter(|t| is_schedulable(t, &task_by_id, &selected_ids))
            .collect();

        // Stable sort: equal ratios keep snapshot order (documented
        // tie-break, so repeated runs agree).
        candidates.sort_by(|a, b| {
            b.value_density()
                .partial_cmp(&a.value_density())
                .unwrap_or(Ordering::Equal)
        });

        let Some(pick) = candidates
            .into_iter()
            .find(|t| t.duration_minutes <= time_left && t.energy_cost <= energy_left)
        else {
            // No schedulable task fits: the round made no progress.
            break;
        };

        time_left -= pick.duration_minutes;
        energy_left -= pick.energy_cost;
        selected_ids.insert(pick.id.as_str());
        selected.push(pick);
    }

    debug!(
        selected = selected.len(),
        time_left, energy_left, "greedy selection finished"
    );

    let total_duration: u32 = selected.iter().map(|t| t.duration_minutes).sum();
    let total_energy: u32 = selected.iter().map(|t| t.energy_cost).sum();
    let total_value: u32 = selected.iter().map(|t| t.value).sum();

    let explanation = format!(
        "Greedy scheduling selected {} task(s) by value/duration ratio, respecting dependencies, \
         to maximize value ({total_value} points) within {time_budget}min and energy level {energy_budget}.",
        selected.len(),
    );

    ScheduleResult {
        selected_tasks: selected.into_iter().cloned().collect(),
        total_duration,
        total_energy,
        total_value,
        algorithm: AlgorithmTag::Greedy,
        explanation,
    }
}

/// An incomplete, unselected task is schedulable once every dependency id
/// resolves to a completed task or one already selected this run. An id
/// that resolves to no snapshot task never becomes satisfiable.
fn is_schedulable(
    task: &Task,
    task_by_id: &HashMap<&str, &Task>,
    selected_ids: &HashSet<&str>,
) -> bool {
    if task.completed || selected_ids.contains(task.id.as_str()) {
        return false;
    }

    task.depends_on.iter().all(|dep_id| {
        selected_ids.contains(dep_id.as_str())
            || task_by_id
                .get(dep_id.as_str())
                .is_some_and(|dep| dep.completed)
    })
}
