//! Transitive-dependent computation, used to block unsafe deletions.

use std::collections::HashSet;

use petgraph::Direction;
use tempo_core::{GraphError, Task};

use super::build::TaskGraph;

/// All tasks that directly or transitively depend on `task_id`, in snapshot
/// order.
///
/// Since edges run `dependency → dependent`, this is exactly the set of
/// task nodes reachable from `task_id` (excluding itself). An unknown id
/// has no dependents.
#[must_use]
pub fn dependent_tasks<'a>(graph: &TaskGraph<'a>, task_id: &str) -> Vec<&'a Task> {
    let Some(start) = graph.node_index(task_id) else {
        return Vec::new();
    };

    let mut reachable: HashSet<&str> = HashSet::new();
    let mut stack = vec![start];
    let mut visited = HashSet::from([start]);

    while let Some(current) = stack.pop() {
        for next in graph.graph.neighbors_directed(current, Direction::Outgoing) {
            if visited.insert(next) {
                if let Some(id) = graph.task_id(next) {
                    reachable.insert(id);
                }
                stack.push(next);
            }
        }
    }

    graph
        .tasks()
        .iter()
        .filter(|t| reachable.contains(t.id.as_str()))
        .collect()
}

/// Check that `task_id` can be deleted from the snapshot.
///
/// # Errors
///
/// - [`GraphError::UnknownTask`] if the id is not a snapshot task.
/// - [`GraphError::HasDependents`] with the blocking ids (snapshot order)
///   if any task still depends on it, so the caller can report them.
pub fn check_deletable(graph: &TaskGraph<'_>, task_id: &str) -> Result<(), GraphError> {
    if graph.task(task_id).is_none() {
        return Err(GraphError::UnknownTask {
            id: task_id.to_string(),
        });
    }

    let dependents = dependent_tasks(graph, task_id);
    if dependents.is_empty() {
        Ok(())
    } else {
        Err(GraphError::HasDependents {
            id: task_id.to_string(),
            dependents: dependents.iter().map(|t| t.id.clone()).collect(),
        })
    }
}
