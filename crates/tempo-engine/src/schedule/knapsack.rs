//! Exact two-constraint knapsack scheduler.
//!
//! # Algorithm
//!
//! Classic 0/1 knapsack extended to two capacities (time, energy) and
//! precedence: incomplete tasks are scanned in a dependencies-first order,
//! and a cell may only extend to "take task i" when the extended selection
//! already contains every incomplete dependency of i. Each cell carries the
//! best attainable value plus a `u64` bitmask of the selected task
//! positions, so the dependency test and the final extraction are `O(1)`
//! bit operations instead of per-cell set objects.
//!
//! Exactness caveat: each cell keeps the single best selection for its
//! budget point. On dependency-free instances that is the textbook exact
//! knapsack; with dependency chains a higher-value selection can displace
//! the one a later dependent needed, so the result is a deterministic
//! lower bound there rather than a proven optimum.
//!
//! `O(n·T·E)` time with two rolling `(T+1)·(E+1)` layers of memory, where
//! `T` and `E` are the budgets in their own units. Both dimensions scale
//! the table multiplicatively, so the solver is gated by
//! [`KnapsackConfig::max_table_cells`] and by the 64-bit mask width; past
//! either limit it degrades to the greedy heuristic instead of allocating
//! an unbounded table.

use std::collections::{HashMap, HashSet};

use tempo_core::{AlgorithmTag, ScheduleResult, Task};
use tracing::{debug, warn};

use super::greedy::schedule_greedy;

/// Widest selection bitmask the DP can carry.
pub const MASK_WIDTH: usize = u64::BITS as usize;

/// Resource guard for the DP table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnapsackConfig {
    /// Ceiling on `(n+1)·(T+1)·(E+1)` table cells before the solver falls
    /// back to greedy. Default: `8_000_000` (tens of megabytes of rolling
    /// layers at most).
    pub max_table_cells: u64,
}

impl Default for KnapsackConfig {
    fn default() -> Self {
        Self {
            max_table_cells: 8_000_000,
        }
    }
}

/// Run the exact DP scheduler with the default table guard.
#[must_use]
pub fn schedule_knapsack(tasks: &[Task], time_budget: u32, energy_budget: u32) -> ScheduleResult {
    schedule_knapsack_with_config(tasks, time_budget, energy_budget, &KnapsackConfig::default())
}

/// Like [`schedule_knapsack`] but with an explicit [`KnapsackConfig`].
///
/// The result's selection order is always topological: selected tasks are
/// emitted in the dependencies-first scan order.
#[must_use]
pub fn schedule_knapsack_with_config(
    tasks: &[Task],
    time_budget: u32,
    energy_budget: u32,
    config: &KnapsackConfig,
) -> ScheduleResult {
    let active: Vec<&Task> = tasks.iter().filter(|t| !t.completed).collect();
    let n = active.len();

    if n == 0 {
        return ScheduleResult::empty(
            AlgorithmTag::KnapsackDp,
            "No active tasks available.".to_string(),
        );
    }

    // Saturating: budgets are arbitrary u32s, so the product can exceed
    // u64. A saturated count always trips the ceiling below.
    let cells = (n as u64 + 1)
        .saturating_mul(u64::from(time_budget) + 1)
        .saturating_mul(u64::from(energy_budget) + 1);
    if n > MASK_WIDTH || cells > config.max_table_cells {
        warn!(
            tasks = n,
            cells,
            ceiling = config.max_table_cells,
            "DP table exceeds ceiling, degrading to greedy"
        );
        let mut result = schedule_greedy(tasks, time_budget, energy_budget);
        result.explanation.push_str(
            " (Exact DP was skipped: the instance exceeds the solver's table ceiling.)",
        );
        return result;
    }

    let task_by_id: HashMap<&str, &Task> =
        tasks.iter().map(|t| (t.id.as_str(), t)).collect();

    // Dependencies-first scan order, so any dependency of task i sits at an
    // earlier position and its mask bit can already be set.
    let order = scheduling_order(&active, &task_by_id);
    let position: HashMap<&str, usize> = order
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id.as_str(), i))
        .collect();

    // Per-task dependency requirement: the mask bits that must be present
    // in a cell before the task may extend it. `None` marks a task that can
    // never be selected (a dependency id resolves to no snapshot task).
    let requirements: Vec<Option<u64>> = order
        .iter()
        .map(|task| dependency_mask(task, &task_by_id, &position))
        .collect();

    let tb = time_budget as usize;
    let eb = energy_budget as usize;
    let width = (tb + 1) * (eb + 1);
    let at = |t: usize, e: usize| t * (eb + 1) + e;

    let mut prev_value = vec![0u32; width];
    let mut prev_mask = vec![0u64; width];
    let mut curr_value = vec![0u32; width];
    let mut curr_mask = vec![0u64; width];

    for (i, task) in order.iter().enumerate() {
        let dur = task.duration_minutes as usize;
        let cost = task.energy_cost as usize;

        for t in 0..=tb {
            for e in 0..=eb {
                let cell = at(t, e);
                // Not taking task i carries the prefix cell forward.
                let mut best_value = prev_value[cell];
                let mut best_mask = prev_mask[cell];

                // Taking it is legal only when it fits both remaining
                // budgets and the smaller prefix already holds every
                // incomplete dependency. Exact value ties keep the
                // not-take branch, so output is deterministic.
                if let Some(required) = requirements[i] {
                    if t >= dur && e >= cost {
                        let base = at(t - dur, e - cost);
                        if prev_mask[base] & required == required {
                            let candidate = prev_value[base] + task.value;
                            if candidate > best_value {
                                best_value = candidate;
                                best_mask = prev_mask[base] | (1u64 << i);
                            }
                        }
                    }
                }

                curr_value[cell] = best_value;
                curr_mask[cell] = best_mask;
            }
        }

        std::mem::swap(&mut prev_value, &mut curr_value);
        std::mem::swap(&mut prev_mask, &mut curr_mask);
    }

    let final_cell = at(tb, eb);
    let final_mask = prev_mask[final_cell];
    debug!(
        tasks = n,
        value = prev_value[final_cell],
        "knapsack DP finished"
    );

    // Ascending mask positions follow the scan order, so the selection is
    // itself topological.
    let selected: Vec<&Task> = order
        .iter()
        .enumerate()
        .filter(|&(i, _)| final_mask & (1u64 << i) != 0)
        .map(|(_, &t)| t)
        .collect();

    let total_duration: u32 = selected.iter().map(|t| t.duration_minutes).sum();
    let total_energy: u32 = selected.iter().map(|t| t.energy_cost).sum();
    let total_value: u32 = selected.iter().map(|t| t.value).sum();

    let explanation = format!(
        "Dynamic programming found optimal solution with dependency respect: {} task(s) with \
         maximum value ({total_value} points) within {time_budget}min and energy {energy_budget}.",
        selected.len(),
    );

    ScheduleResult {
        selected_tasks: selected.into_iter().cloned().collect(),
        total_duration,
        total_energy,
        total_value,
        algorithm: AlgorithmTag::KnapsackDp,
        explanation,
    }
}

/// The mask bits task's incomplete dependencies occupy in the scan order.
///
/// Completed dependencies impose no bit. A dependency id missing from the
/// snapshot makes the task permanently unselectable (`None`).
fn dependency_mask(
    task: &Task,
    task_by_id: &HashMap<&str, &Task>,
    position: &HashMap<&str, usize>,
) -> Option<u64> {
    let mut required = 0u64;
    for dep_id in &task.depends_on {
        let Some(dep) = task_by_id.get(dep_id.as_str()) else {
            return None;
        };
        if dep.completed {
            continue;
        }
        // Every incomplete snapshot task is in the scan order.
        let bit = position.get(dep_id.as_str())?;
        required |= 1u64 << bit;
    }
    Some(required)
}

/// Order the active tasks dependencies-first.
///
/// Plain visited-set DFS (no in-progress marking): on a cyclic snapshot it
/// still terminates with *some* deterministic order, and the DP's
/// dependency masks then simply never let cycle members be selected.
/// Completed and dangling dependencies are skipped.
fn scheduling_order<'a>(
    active: &[&'a Task],
    task_by_id: &HashMap<&str, &'a Task>,
) -> Vec<&'a Task> {
    let active_ids: HashSet<&str> = active.iter().map(|t| t.id.as_str()).collect();
    let mut visited: HashSet<&str> = HashSet::new();
    let mut order: Vec<&'a Task> = Vec::with_capacity(active.len());

    for &root in active {
        if !visited.insert(root.id.as_str()) {
            continue;
        }

        // Each frame: (task, next dependency index).
        let mut stack: Vec<(&'a Task, usize)> = vec![(root, 0)];

        while let Some(frame) = stack.last_mut() {
            let task = frame.0;
            if frame.1 < task.depends_on.len() {
                let dep_id = task.depends_on[frame.1].as_str();
                frame.1 += 1;

                if visited.contains(dep_id) || !active_ids.contains(dep_id) {
                    continue;
                }
                let Some(&dep) = task_by_id.get(dep_id) else {
                    continue;
                };
                visited.insert(dep_id);
                stack.push((dep, 0));
            } else {
                stack.pop();
                order.push(task);
            }
        }
    }

    order
}
