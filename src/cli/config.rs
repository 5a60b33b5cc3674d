// config.rs - Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    // Input/Output
    pub input: Option<String>,
    pub output: Option<String>,

    // Core settings
    pub threshold: Option<f64>,
    pub mode: Option<String>,
    pub max_ambiguity_fraction: Option<f64>,

    // Performance
    pub threads: Option<usize>,
}

impl Config {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path.display(), e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path.display(), e))?;

        println!("📄 Loaded configuration from: {}", path.display());
        Ok(config)
    }

    /// Generate a sample configuration file with comments
    pub fn generate_sample() -> String {
        r#"# tn93dist.toml - Configuration file for tn93dist
# Command line arguments will override these settings

# =============================================================================
# INPUT/OUTPUT
# =============================================================================

# Path to input FASTA file of aligned nucleotide sequences
input = "/path/to/sequences.fasta"

# Output CSV edge list file
output = "edges.csv"

# =============================================================================
# CORE SETTINGS
# =============================================================================

# Edge distance threshold: pairs farther apart are omitted from the output
threshold = 0.015

# Ambiguity handling mode: resolve, average, gapmm, skip
mode = "resolve"

# Resolve mode only: pairs where either sequence has a larger ambiguous
# fraction are averaged instead; -1 disables the limit
max_ambiguity_fraction = -1.0

# =============================================================================
# PERFORMANCE
# =============================================================================

# Number of worker threads (omit for auto-detection)
# threads = 16
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_config_parses() {
        let sample = Config::generate_sample();
        let config: Config = toml::from_str(&sample).unwrap();
        assert_eq!(config.mode.as_deref(), Some("resolve"));
        assert_eq!(config.threshold, Some(0.015));
        assert_eq!(config.threads, None);
    }

    #[test]
    fn test_partial_config_parses() {
        let config: Config = toml::from_str("threshold = 0.05\n").unwrap();
        assert_eq!(config.threshold, Some(0.05));
        assert!(config.input.is_none());
    }
}
