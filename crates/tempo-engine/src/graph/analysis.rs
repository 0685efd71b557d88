//! Assembles the graph-inspection response for callers.

use tempo_core::{GraphAnalysis, GraphNode, Task};
use tracing::instrument;

use super::build::TaskGraph;
use super::topo::topological_sort;

/// Analyze a snapshot: nodes, cycle flag, and (if acyclic) a topological
/// order of task ids.
///
/// Nodes are emitted in snapshot order, one per task; dangling dependency
/// ids are not nodes here (they have no record to display). The cycle flag
/// is derived from the sort itself — an order exists exactly when the
/// graph is acyclic, so no separate cycle pass is needed.
#[must_use]
#[instrument(skip(tasks), fields(tasks = tasks.len()))]
pub fn analyze(tasks: &[Task]) -> GraphAnalysis {
    let graph = TaskGraph::from_tasks(tasks);
    let topological_order: Option<Vec<String>> = topological_sort(&graph)
        .map(|order| order.iter().map(|t| t.id.clone()).collect());

    GraphAnalysis {
        nodes: tasks.iter().map(GraphNode::from).collect(),
        has_cycle: topological_order.is_none(),
        topological_order,
    }
}
