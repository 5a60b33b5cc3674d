// lib.rs - tn93dist library root

//! # tn93dist - Parallel pairwise genetic distance calculator
//!
//! This library computes Tamura-Nei 93 (TN93) genetic distances between all
//! pairs of aligned nucleotide sequences, with a Kimura 2-parameter fallback
//! for degenerate base compositions. IUPAC ambiguity codes and alignment gaps
//! are handled under four selectable policies, pairs are computed in parallel
//! on a bounded worker pool, and threshold-passing edges are streamed to a
//! CSV edge list while progress is reported incrementally.
//!
//! ## Features
//!
//! - **Full TN93 model**: purine/pyrimidine-specific transition rates with
//!   automatic K2P fallback on zero marginal base frequencies
//! - **Ambiguity policies**: resolve, average, gapmm, skip
//! - **Bounded parallelism**: batched dispatch over a fixed worker pool
//! - **Streaming output**: edges written as they complete, memory stays flat
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use tn93dist::prelude::*;
//!
//! let seqs = read_fasta(std::path::Path::new("sequences.fasta"))?;
//! let config = RunConfig {
//!     edge_threshold: 0.015,
//!     mode: AmbiguityMode::Resolve,
//!     max_ambiguity_fraction: None,
//!     worker_count: 8,
//! };
//! let out = std::fs::File::create("edges.csv")
//!     .map_err(|e| DistError::Output(e.to_string()))?;
//! let stats = run_pairwise(&seqs, &config, out, &NoProgress)?;
//! println!("{} of {} pairs kept", stats.edges, stats.pairs);
//! # Ok::<(), tn93dist::DistError>(())
//! ```

// Re-export all main modules
pub mod cli;
pub mod core;
pub mod data;
pub mod error;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, Config};
    pub use crate::core::{
        count_pair, pairwise_distance, run_pairwise, AmbiguityMode, NoProgress, PairCounts,
        ProgressSink, RunConfig, RunStats,
    };
    pub use crate::data::{read_fasta, read_seqs, Seq};
    pub use crate::error::DistError;
    pub use crate::output::EdgeWriter;
}

// Re-export main types at the root level for convenience
pub use crate::core::{run_pairwise, AmbiguityMode, RunConfig, RunStats};
pub use crate::data::{read_fasta, Seq};
pub use crate::error::DistError;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
