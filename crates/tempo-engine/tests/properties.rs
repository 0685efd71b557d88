//! Property-based checks for the graph analyzer and both schedulers.

use std::collections::{HashMap, HashSet};

use proptest::prelude::*;
use tempo_core::{ScheduleResult, Task};
use tempo_engine::graph::{TaskGraph, has_cycle, topological_sort, would_create_cycle};
use tempo_engine::{schedule_greedy, schedule_knapsack};

use generators::{arb_dag_tasks, arb_independent_tasks, arb_small_budgets};

/// Every selected task's dependencies must each be completed in the
/// snapshot or selected at an earlier position of the result.
fn precedence_satisfied(tasks: &[Task], result: &ScheduleResult) -> bool {
    let by_id: HashMap<&str, &Task> = tasks.iter().map(|t| (t.id.as_str(), t)).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    for task in &result.selected_tasks {
        for dep in &task.depends_on {
            let completed = by_id.get(dep.as_str()).is_some_and(|d| d.completed);
            if !completed && !seen.contains(dep.as_str()) {
                return false;
            }
        }
        seen.insert(task.id.as_str());
    }

    true
}

fn within_budgets(result: &ScheduleResult, time_budget: u32, energy_budget: u32) -> bool {
    result.total_duration <= time_budget && result.total_energy <= energy_budget
}

/// Exhaustive optimum for dependency-free instances (subset enumeration).
fn brute_force_best_value(tasks: &[Task], time_budget: u32, energy_budget: u32) -> u32 {
    let active: Vec<&Task> = tasks.iter().filter(|t| !t.completed).collect();
    assert!(active.len() <= 16, "enumeration only meant for tiny instances");

    let mut best = 0u32;
    for subset in 0u32..(1 << active.len()) {
        let (mut time, mut energy, mut value) = (0u32, 0u32, 0u32);
        for (i, task) in active.iter().enumerate() {
            if subset & (1 << i) != 0 {
                time += task.duration_minutes;
                energy += task.energy_cost;
                value += task.value;
            }
        }
        if time <= time_budget && energy <= energy_budget {
            best = best.max(value);
        }
    }
    best
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(256))]

    // -----------------------------------------------------------------------
    // Graph analyzer
    // -----------------------------------------------------------------------

    #[test]
    fn dag_snapshots_have_no_cycle(tasks in arb_dag_tasks(20)) {
        let graph = TaskGraph::from_tasks(&tasks);
        prop_assert!(!has_cycle(&graph));
    }

    #[test]
    fn topological_order_exists_iff_acyclic(tasks in arb_dag_tasks(20)) {
        let graph = TaskGraph::from_tasks(&tasks);
        let order = topological_sort(&graph);
        prop_assert_eq!(order.is_none(), has_cycle(&graph));
    }

    #[test]
    fn topological_order_puts_dependencies_first(tasks in arb_dag_tasks(20)) {
        let graph = TaskGraph::from_tasks(&tasks);
        let order = topological_sort(&graph).expect("DAG by construction");
        let pos: HashMap<&str, usize> = order
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.as_str(), i))
            .collect();

        for task in &tasks {
            for dep in &task.depends_on {
                prop_assert!(pos[dep.as_str()] < pos[task.id.as_str()]);
            }
        }
    }

    // `would_create_cycle` must agree with re-running the full cycle check
    // on a snapshot that actually contains the proposed edge.
    #[test]
    fn would_create_cycle_matches_full_check(
        tasks in arb_dag_tasks(12),
        a in any::<prop::sample::Index>(),
        b in any::<prop::sample::Index>(),
    ) {
        prop_assume!(!tasks.is_empty());
        let task_id = tasks[a.index(tasks.len())].id.clone();
        let dep_id = tasks[b.index(tasks.len())].id.clone();

        let graph = TaskGraph::from_tasks(&tasks);
        let predicted = would_create_cycle(&graph, &task_id, &dep_id).is_some();

        let mut mutated = tasks.clone();
        let target = mutated
            .iter_mut()
            .find(|t| t.id == task_id)
            .expect("task exists");
        target.depends_on.push(dep_id);
        let actual = has_cycle(&TaskGraph::from_tasks(&mutated));

        prop_assert_eq!(predicted, actual);
    }

    // -----------------------------------------------------------------------
    // Greedy scheduler
    // -----------------------------------------------------------------------

    #[test]
    fn greedy_respects_budgets_and_precedence(
        tasks in arb_dag_tasks(30),
        (time, energy) in arb_small_budgets(),
    ) {
        let result = schedule_greedy(&tasks, time, energy);
        prop_assert!(within_budgets(&result, time, energy));
        prop_assert!(precedence_satisfied(&tasks, &result));
    }

    #[test]
    fn greedy_never_selects_completed_tasks(
        tasks in arb_dag_tasks(30),
        (time, energy) in arb_small_budgets(),
    ) {
        let result = schedule_greedy(&tasks, time, energy);
        prop_assert!(result.selected_tasks.iter().all(|t| !t.completed));
    }

    #[test]
    fn greedy_is_deterministic(
        tasks in arb_dag_tasks(30),
        (time, energy) in arb_small_budgets(),
    ) {
        let first = schedule_greedy(&tasks, time, energy);
        let second = schedule_greedy(&tasks, time, energy);
        prop_assert_eq!(first, second);
    }

    // -----------------------------------------------------------------------
    // Knapsack scheduler
    // -----------------------------------------------------------------------

    #[test]
    fn knapsack_respects_budgets_and_precedence(
        tasks in arb_dag_tasks(10),
        (time, energy) in arb_small_budgets(),
    ) {
        let result = schedule_knapsack(&tasks, time, energy);
        prop_assert!(within_budgets(&result, time, energy));
        prop_assert!(precedence_satisfied(&tasks, &result));
    }

    // Without dependencies the DP is the classic two-constraint knapsack;
    // it must match the exhaustive optimum, and hence never lose to greedy.
    #[test]
    fn knapsack_is_optimal_without_dependencies(
        tasks in arb_independent_tasks(10),
        (time, energy) in arb_small_budgets(),
    ) {
        let dp = schedule_knapsack(&tasks, time, energy);
        let best = brute_force_best_value(&tasks, time, energy);
        prop_assert_eq!(dp.total_value, best);
    }

    #[test]
    fn knapsack_value_never_below_greedy_without_dependencies(
        tasks in arb_independent_tasks(10),
        (time, energy) in arb_small_budgets(),
    ) {
        let greedy = schedule_greedy(&tasks, time, energy);
        let dp = schedule_knapsack(&tasks, time, energy);
        prop_assert!(
            dp.total_value >= greedy.total_value,
            "DP {} < greedy {}",
            dp.total_value,
            greedy.total_value
        );
    }

    #[test]
    fn knapsack_is_deterministic(
        tasks in arb_dag_tasks(10),
        (time, energy) in arb_small_budgets(),
    ) {
        let first = schedule_knapsack(&tasks, time, energy);
        let second = schedule_knapsack(&tasks, time, energy);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn knapsack_selection_is_topological(
        tasks in arb_dag_tasks(10),
        (time, energy) in arb_small_budgets(),
    ) {
        let result = schedule_knapsack(&tasks, time, energy);
        let pos: HashMap<&str, usize> = result
            .selected_tasks
            .iter()
            .enumerate()
            .map(|(i, t)| (t.id.as_str(), i))
            .collect();

        for task in &result.selected_tasks {
            for dep in &task.depends_on {
                if let Some(&dep_pos) = pos.get(dep.as_str()) {
                    prop_assert!(dep_pos < pos[task.id.as_str()]);
                }
            }
        }
    }
}
