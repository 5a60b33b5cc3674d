// mod.rs - Core computation module

pub mod distance;
pub mod driver;
pub mod resolver;

// Re-export main types for convenience
pub use distance::{pairwise_distance, SATURATION_DISTANCE};
pub use driver::{run_pairwise, NoProgress, ProgressSink, RunConfig, RunStats, BATCH_SIZE};
pub use resolver::{count_pair, AmbiguityMode, PairCounts};
