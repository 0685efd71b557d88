//! Dependency graph analysis for task snapshots.
//!
//! # Overview
//!
//! This module builds a petgraph-based directed precedence graph from an
//! immutable task snapshot and answers the graph questions the rest of the
//! engine (and the task-store layer upstream) needs: is the graph acyclic,
//! what is a topological order, what transitively depends on a given task,
//! and would a proposed new edge close a cycle.
//!
//! ## Edge Direction
//!
//! An edge `A → B` means "A **must precede** B": B lists A in its
//! `depends_on`. Topological order therefore emits dependencies before
//! dependents, and the set of nodes reachable from A is exactly the set of
//! A's transitive dependents.
//!
//! ## Typical Usage
//!
//! ```rust,ignore
//! use tempo_engine::graph::{TaskGraph, analyze, cycles, topo};
//!
//! let graph = TaskGraph::from_tasks(&tasks);
//! if cycles::has_cycle(&graph) {
//!     // ordering undefined; reject the snapshot upstream
//! }
//! let order = topo::topological_sort(&graph);
//! ```

pub mod analysis;
pub mod build;
pub mod cycles;
pub mod dependents;
pub mod topo;

// Re-export primary entry points at module level for convenience.
pub use analysis::analyze;
pub use build::TaskGraph;
pub use cycles::{find_cycles, has_cycle, validate_new_dependency, would_create_cycle};
pub use dependents::{check_deletable, dependent_tasks};
pub use topo::topological_sort;
