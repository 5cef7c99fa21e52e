mod graph;
mod run_log;
mod schedule;
mod sweep;

pub use graph::graph;
pub use schedule::schedule;
pub use sweep::sweep;
