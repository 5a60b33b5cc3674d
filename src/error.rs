// error.rs - Run error taxonomy

use std::fmt;

/// Fatal errors a run can surface to the caller.
///
/// `Config` is raised before any I/O begins, `Input` before any computation
/// starts, and `Output` when the edge sink cannot be created or written.
/// Model breakdown inside a single pair is never an error; it yields a finite
/// sentinel distance instead (see `core::distance`).
#[derive(Debug)]
pub enum DistError {
    Config(String),
    Input(String),
    Output(String),
}

impl fmt::Display for DistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DistError::Config(msg) => write!(f, "Configuration error: {}", msg),
            DistError::Input(msg) => write!(f, "Input error: {}", msg),
            DistError::Output(msg) => write!(f, "Output error: {}", msg),
        }
    }
}

impl std::error::Error for DistError {}
