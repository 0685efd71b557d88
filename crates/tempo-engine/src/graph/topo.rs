//! DFS-based topological ordering of a task snapshot.

use petgraph::graph::NodeIndex;
use tempo_core::Task;

use super::build::TaskGraph;
use super::cycles::{Mark, has_cycle};

/// Compute a topological order of the snapshot: every dependency strictly
/// precedes every dependent.
///
/// Returns `None` when the graph is cyclic — the "ordering undefined"
/// sentinel. Callers must treat that as "graph invalid for scheduling" and
/// surface it upstream rather than scheduling anyway.
///
/// Ties among independent tasks are broken by snapshot order: the outer
/// scan walks tasks in input order and the post-order emit preserves it.
/// Dangling dependency ids have no task record and are skipped; they
/// cannot appear in the output.
#[must_use]
pub fn topological_sort<'a>(graph: &TaskGraph<'a>) -> Option<Vec<&'a Task>> {
    if has_cycle(graph) {
        return None;
    }

    let tasks = graph.tasks();
    let mut marks = vec![Mark::Unvisited; graph.node_count()];
    let mut sorted: Vec<&'a Task> = Vec::with_capacity(tasks.len());

    for task in tasks {
        let node = graph.node_index(&task.id)?;
        if marks[node.index()] == Mark::Unvisited {
            visit(graph, task, node, &mut marks, &mut sorted)?;
        }
    }

    Some(sorted)
}

/// Iterative post-order visit: dependencies first, then the task itself.
///
/// The `InProgress` mark still guards against a back-edge even though
/// [`has_cycle`] ran first — a second line of defence against a snapshot
/// mutated between the two passes.
fn visit<'a>(
    graph: &TaskGraph<'a>,
    root: &'a Task,
    root_node: NodeIndex,
    marks: &mut [Mark],
    sorted: &mut Vec<&'a Task>,
) -> Option<()> {
    // Each frame: (task, its node, next dependency index).
    let mut stack: Vec<(&'a Task, NodeIndex, usize)> = vec![(root, root_node, 0)];
    marks[root_node.index()] = Mark::InProgress;

    loop {
        let Some(frame) = stack.last_mut() else {
            return Some(());
        };

        let task = frame.0;
        if frame.2 < task.depends_on.len() {
            let dep_id = &task.depends_on[frame.2];
            frame.2 += 1;

            // Dangling dependency: a node exists but there is no task to
            // order, so there is nothing to visit.
            let Some(dep_task) = graph.task(dep_id) else {
                continue;
            };
            let dep_node = graph.node_index(dep_id)?;

            match marks[dep_node.index()] {
                Mark::InProgress => return None,
                Mark::Unvisited => {
                    marks[dep_node.index()] = Mark::InProgress;
                    stack.push((dep_task, dep_node, 0));
                }
                Mark::Done => {}
            }
        } else {
            let node = frame.1;
            stack.pop();
            marks[node.index()] = Mark::Done;
            sorted.push(task);
        }
    }
}
