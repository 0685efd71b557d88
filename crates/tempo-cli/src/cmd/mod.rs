//! One module per subcommand.

pub mod check_cycle;
pub mod cycles;
pub mod dependents;
pub mod graph;
pub mod schedule;
