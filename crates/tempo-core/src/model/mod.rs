//! Data model for the scheduling engine.
//!
//! Everything here is a plain, serde-serializable value type. The engine is
//! a pure function over an immutable `&[Task]` snapshot; nothing in this
//! module is cached or mutated by the engine itself.

pub mod schedule;
pub mod task;

pub use schedule::{Algorithm, AlgorithmTag, GraphAnalysis, GraphNode, ScheduleRequest, ScheduleResult};
pub use task::{Task, TaskFieldError};
