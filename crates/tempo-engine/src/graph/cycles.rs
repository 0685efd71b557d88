//! Full and incremental cycle detection for the precedence graph.
//!
//! # Edge Direction
//!
//! Edges run `dependency → dependent`. A proposed dependency
//! `task depends-on dep` adds edge `dep → task`, which closes a cycle
//! exactly when `dep` is already reachable from `task`.

#![allow(clippy::module_name_repetitions)]

use std::collections::{HashMap, HashSet, VecDeque};

use petgraph::algo::tarjan_scc;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use tempo_core::GraphError;

use super::build::TaskGraph;

/// Three-state DFS marking. `InProgress` means "on the current DFS path";
/// revisiting an `InProgress` node is a back-edge, hence a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Check whether the snapshot's precedence graph contains any cycle,
/// including self-loops. `O(V + E)`.
///
/// Conservative in the sense the scheduling layer requires: a snapshot that
/// is already a DAG always returns `false`; any back-edge returns `true`.
#[must_use]
pub fn has_cycle(graph: &TaskGraph<'_>) -> bool {
    let mut marks = vec![Mark::Unvisited; graph.node_count()];

    for start in graph.graph.node_indices() {
        if marks[start.index()] == Mark::Unvisited
            && dfs_finds_back_edge(&graph.graph, start, &mut marks)
        {
            return true;
        }
    }

    false
}

/// Iterative DFS from `start` with an explicit frame stack.
///
/// Explicit frames instead of recursion: snapshots can chain thousands of
/// tasks deep, and the three-state array keeps the ancestor check `O(1)`.
fn dfs_finds_back_edge(
    graph: &DiGraph<&str, ()>,
    start: NodeIndex,
    marks: &mut [Mark],
) -> bool {
    // Each frame: (node, its outgoing neighbors, next neighbor index).
    let mut stack: Vec<(NodeIndex, Vec<NodeIndex>, usize)> =
        vec![(start, outgoing(graph, start), 0)];
    marks[start.index()] = Mark::InProgress;

    loop {
        let Some(frame) = stack.last_mut() else {
            return false;
        };

        if frame.2 < frame.1.len() {
            let next = frame.1[frame.2];
            frame.2 += 1;

            match marks[next.index()] {
                Mark::InProgress => return true,
                Mark::Unvisited => {
                    marks[next.index()] = Mark::InProgress;
                    let neighbors = outgoing(graph, next);
                    stack.push((next, neighbors, 0));
                }
                Mark::Done => {}
            }
        } else {
            let node = frame.0;
            stack.pop();
            marks[node.index()] = Mark::Done;
        }
    }
}

fn outgoing(graph: &DiGraph<&str, ()>, node: NodeIndex) -> Vec<NodeIndex> {
    graph
        .neighbors_directed(node, petgraph::Direction::Outgoing)
        .collect()
}

/// Check whether adding the dependency `task_id depends-on dependency_id`
/// would introduce a cycle, without mutating the real graph.
///
/// Returns a concrete cycle witness when a cycle would be created,
/// formatted as `dep -> task -> ... -> dep`. A self-dependency
/// (`task_id == dependency_id`) is always a cycle. If the edge already
/// exists, returns `None` — no *new* cycle is created. Ids absent from the
/// graph cannot close a cycle and also return `None`.
#[must_use]
pub fn would_create_cycle(
    graph: &TaskGraph<'_>,
    task_id: &str,
    dependency_id: &str,
) -> Option<Vec<String>> {
    if task_id == dependency_id {
        return Some(vec![task_id.to_string(), task_id.to_string()]);
    }

    let task = graph.node_index(task_id)?;
    let dep = graph.node_index(dependency_id)?;

    if graph.graph.contains_edge(dep, task) {
        return None;
    }

    // BFS from `task` looking for `dep`.
    // If reachable, then adding `dep -> task` closes a cycle.
    let mut queue: VecDeque<NodeIndex> = VecDeque::from([task]);
    let mut visited: HashSet<NodeIndex> = HashSet::from([task]);
    let mut parent: HashMap<NodeIndex, NodeIndex> = HashMap::new();

    while let Some(current) = queue.pop_front() {
        if current == dep {
            return Some(reconstruct_cycle_path(graph, task, dep, &parent));
        }

        for edge in graph.graph.edges(current) {
            let next = edge.target();
            if visited.insert(next) {
                parent.insert(next, current);
                queue.push_back(next);
            }
        }
    }

    None
}

/// Validate a proposed new dependency edge before it is committed upstream.
///
/// # Errors
///
/// - [`GraphError::UnknownTask`] if either id is not a snapshot task.
/// - [`GraphError::CycleDetected`] (with a concrete witness path) if the
///   edge would close a cycle.
pub fn validate_new_dependency(
    graph: &TaskGraph<'_>,
    task_id: &str,
    dependency_id: &str,
) -> Result<(), GraphError> {
    for id in [task_id, dependency_id] {
        if graph.task(id).is_none() {
            return Err(GraphError::UnknownTask { id: id.to_string() });
        }
    }

    match would_create_cycle(graph, task_id, dependency_id) {
        Some(path) => Err(GraphError::CycleDetected { path }),
        None => Ok(()),
    }
}

/// List all cycles currently present in the graph.
///
/// Each entry is the sorted id set of one strongly connected component;
/// self-loops are reported as one-element cycles. Used for diagnostics when
/// a snapshot fails the acyclicity check.
#[must_use]
pub fn find_cycles(graph: &TaskGraph<'_>) -> Vec<Vec<String>> {
    let mut cycles: Vec<Vec<String>> = tarjan_scc(&graph.graph)
        .into_iter()
        .filter(|component| {
            component.len() > 1
                || component
                    .first()
                    .is_some_and(|&node| graph.graph.find_edge(node, node).is_some())
        })
        .map(|component| {
            let mut ids: Vec<String> = component
                .into_iter()
                .filter_map(|idx| graph.task_id(idx).map(ToString::to_string))
                .collect();
            ids.sort_unstable();
            ids
        })
        .collect();

    cycles.sort_unstable();
    cycles
}

fn reconstruct_cycle_path(
    graph: &TaskGraph<'_>,
    task: NodeIndex,
    dep: NodeIndex,
    parent: &HashMap<NodeIndex, NodeIndex>,
) -> Vec<String> {
    // Parent links represent a path: task -> ... -> dep. Rebuild it and
    // prepend `dep` to represent the newly added edge `dep -> task` that
    // closes the cycle.
    let mut task_to_dep: Vec<NodeIndex> = vec![dep];
    let mut cursor = dep;

    while cursor != task {
        if let Some(next) = parent.get(&cursor) {
            cursor = *next;
            task_to_dep.push(cursor);
        } else {
            break;
        }
    }

    task_to_dep.reverse();

    let mut cycle: Vec<String> = Vec::with_capacity(task_to_dep.len() + 1);
    cycle.push(node_label(graph, dep));
    cycle.extend(task_to_dep.into_iter().map(|idx| node_label(graph, idx)));
    cycle
}

fn node_label(graph: &TaskGraph<'_>, idx: NodeIndex) -> String {
    graph
        .task_id(idx)
        .map_or_else(|| format!("#{}", idx.index()), ToString::to_string)
}
