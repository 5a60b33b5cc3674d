// validation.rs - Argument validation into an engine run configuration

use crate::cli::args::Args;
use crate::core::{AmbiguityMode, RunConfig};
use crate::error::DistError;

/// Validate all command line arguments and build the run configuration.
/// Raised before any I/O begins; an invalid surface never starts a run.
pub fn validate_args(args: &Args) -> Result<RunConfig, DistError> {
    let mode: AmbiguityMode = args.mode.parse().map_err(DistError::Config)?;

    if !args.threshold.is_finite() || args.threshold < 0.0 {
        return Err(DistError::Config(format!(
            "Threshold must be a non-negative number, got {}",
            args.threshold
        )));
    }

    // -1 is the documented "no limit" sentinel on the CLI surface.
    let max_ambiguity_fraction = if args.max_ambiguity_fraction == -1.0 {
        None
    } else if (0.0..=1.0).contains(&args.max_ambiguity_fraction) {
        Some(args.max_ambiguity_fraction)
    } else {
        return Err(DistError::Config(format!(
            "Max ambiguity fraction must be between 0.0 and 1.0 (or -1 to disable), got {}",
            args.max_ambiguity_fraction
        )));
    };

    let worker_count = match args.threads {
        Some(0) => {
            return Err(DistError::Config(
                "Thread count must be at least 1".to_string(),
            ))
        }
        Some(n) => n,
        None => rayon::current_num_threads(),
    };

    let config = RunConfig {
        edge_threshold: args.threshold,
        mode,
        max_ambiguity_fraction,
        worker_count,
    };
    config.validate()?;
    Ok(config)
}
