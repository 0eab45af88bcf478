//! Route search from the depot.

mod engine;
mod progress;

pub use engine::{Route, ShortestPathEngine};
pub use progress::{NoProgress, ProgressSink, TracingProgress};
