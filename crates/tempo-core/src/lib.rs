#![forbid(unsafe_code)]
//! tempo-core library.
//!
//! Shared data model (task snapshot, schedule results, graph analysis) and
//! the error taxonomy used across the tempo workspace.
//!
//! # Conventions
//!
//! - **Errors**: typed `thiserror` enums here; `anyhow::Result` at CLI seams.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod error;
pub mod model;

pub use error::{ErrorCode, GraphError, RequestError};
pub use model::{
    Algorithm, AlgorithmTag, GraphAnalysis, GraphNode, ScheduleRequest, ScheduleResult, Task,
};
