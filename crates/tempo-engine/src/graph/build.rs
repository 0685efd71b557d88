//! Graph construction from a task snapshot.
//!
//! Task ids are opaque strings; the graph translates them once into dense
//! petgraph node indices so every later traversal works on arrays instead
//! of hash maps keyed by strings.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;

use petgraph::graph::{DiGraph, NodeIndex};
use tempo_core::Task;
use tracing::instrument;

/// A directed precedence graph over a borrowed task snapshot.
///
/// Nodes are task ids. An edge `A → B` means "A must precede B". Every task
/// in the snapshot is a node, including tasks with no dependencies. Ids
/// referenced in some `depends_on` but absent from the snapshot ("dangling"
/// dependencies) are also added as nodes so traversals see them; they have
/// no task record and are never schedulable.
#[derive(Debug)]
pub struct TaskGraph<'a> {
    tasks: &'a [Task],
    /// Directed graph: node weights are task ids, edges are precedence.
    pub graph: DiGraph<&'a str, ()>,
    node_map: HashMap<&'a str, NodeIndex>,
    task_map: HashMap<&'a str, &'a Task>,
}

impl<'a> TaskGraph<'a> {
    /// Build the precedence graph for `tasks`.
    ///
    /// Duplicate `depends_on` entries collapse to a single edge (set
    /// semantics). A self-dependency becomes a self-loop edge, which the
    /// cycle checks report as a cycle.
    #[must_use]
    #[instrument(skip(tasks), fields(tasks = tasks.len()))]
    pub fn from_tasks(tasks: &'a [Task]) -> Self {
        let mut graph = DiGraph::<&'a str, ()>::new();
        let mut node_map: HashMap<&'a str, NodeIndex> = HashMap::with_capacity(tasks.len());
        let mut task_map: HashMap<&'a str, &'a Task> = HashMap::with_capacity(tasks.len());

        // All snapshot tasks become nodes first, in snapshot order, so node
        // indices are stable with respect to the input.
        for task in tasks {
            node_map
                .entry(task.id.as_str())
                .or_insert_with(|| graph.add_node(task.id.as_str()));
            task_map.entry(task.id.as_str()).or_insert(task);
        }

        for task in tasks {
            let dependent = node_map[task.id.as_str()];
            for dep_id in &task.depends_on {
                let dependency = *node_map
                    .entry(dep_id.as_str())
                    .or_insert_with(|| graph.add_node(dep_id.as_str()));
                // Edge direction: dependency → dependent.
                if !graph.contains_edge(dependency, dependent) {
                    graph.add_edge(dependency, dependent, ());
                }
            }
        }

        Self {
            tasks,
            graph,
            node_map,
            task_map,
        }
    }

    /// The snapshot this graph was built from, in original order.
    #[must_use]
    pub const fn tasks(&self) -> &'a [Task] {
        self.tasks
    }

    /// Number of nodes (snapshot tasks plus dangling dependency ids).
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Number of distinct precedence edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Look up the node index for a task id.
    #[must_use]
    pub fn node_index(&self, task_id: &str) -> Option<NodeIndex> {
        self.node_map.get(task_id).copied()
    }

    /// The task id labelling a node.
    #[must_use]
    pub fn task_id(&self, idx: NodeIndex) -> Option<&'a str> {
        self.graph.node_weight(idx).copied()
    }

    /// The snapshot task for an id, if the id is not dangling.
    #[must_use]
    pub fn task(&self, task_id: &str) -> Option<&'a Task> {
        self.task_map.get(task_id).copied()
    }
}
