#![forbid(unsafe_code)]
//! tempo-engine library.
//!
//! The scheduling engine proper: dependency-graph analysis (cycle detection,
//! topological ordering, transitive dependents) and two budget-constrained
//! subset schedulers (value-density greedy and an exact two-constraint
//! knapsack DP) behind a size-based selector.
//!
//! Every entry point is a pure function over an immutable `&[Task]`
//! snapshot — no I/O, no shared state, nothing retained between calls.
//! Fetching the snapshot and persisting results belong to the caller.
//!
//! # Conventions
//!
//! - **Errors**: typed enums from `tempo-core`; solvers themselves are
//!   infallible (infeasible scheduling is an empty result, not an error).
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).

pub mod graph;
pub mod schedule;

#[cfg(test)]
pub(crate) mod test_support;

pub use graph::{TaskGraph, analyze, check_deletable, dependent_tasks};
pub use schedule::{KnapsackConfig, schedule, schedule_auto, schedule_greedy, schedule_knapsack};
