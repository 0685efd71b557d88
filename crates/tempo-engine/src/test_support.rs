//! Shared task builders for unit tests.

use tempo_core::Task;

/// A 30-minute, energy-2, value-50 task with the given dependencies.
pub fn task_with_deps(id: &str, deps: &[&str]) -> Task {
    task_full(id, 30, 2, 50, deps)
}

/// A task with explicit duration/energy/value and dependencies.
pub fn task_full(id: &str, duration: u32, energy: u32, value: u32, deps: &[&str]) -> Task {
    Task {
        id: id.to_string(),
        title: format!("Task {id}"),
        notes: None,
        duration_minutes: duration,
        energy_cost: energy,
        value,
        depends_on: deps.iter().map(ToString::to_string).collect(),
        completed: false,
    }
}

/// Mark a task as already completed.
pub fn completed(mut task: Task) -> Task {
    task.completed = true;
    task
}
