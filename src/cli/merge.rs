// merge.rs - Merge configuration file with CLI arguments

use crate::cli::{Args, Config};

impl Args {
    /// Merge with configuration from file.
    /// CLI arguments take precedence over config file values.
    pub fn merge_with_config(mut self, config: Config) -> Self {
        // Input/Output
        if self.input.is_none() {
            self.input = config.input;
        }
        if self.output.is_none() {
            self.output = config.output;
        }

        // Core settings (only override defaults, not explicit CLI values)
        if self.threshold == 1.0 && config.threshold.is_some() {
            self.threshold = config.threshold.unwrap();
        }
        if self.mode == "resolve" && config.mode.is_some() {
            self.mode = config.mode.unwrap();
        }
        if self.max_ambiguity_fraction == -1.0 && config.max_ambiguity_fraction.is_some() {
            self.max_ambiguity_fraction = config.max_ambiguity_fraction.unwrap();
        }

        // Performance
        if self.threads.is_none() {
            self.threads = config.threads;
        }

        self
    }

    /// Load configuration and merge with CLI args
    pub fn with_config_file(self, config_path: &str) -> Result<Self, String> {
        let config = Config::from_file(config_path)?;
        Ok(self.merge_with_config(config))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_args() -> Args {
        Args {
            input: None,
            output: None,
            threshold: 1.0,
            mode: "resolve".to_string(),
            max_ambiguity_fraction: -1.0,
            threads: None,
            dry_run: false,
            config: None,
            generate_config: false,
        }
    }

    #[test]
    fn test_config_fills_unset_values() {
        let config = Config {
            input: Some("in.fasta".to_string()),
            output: Some("out.csv".to_string()),
            threshold: Some(0.05),
            mode: Some("skip".to_string()),
            max_ambiguity_fraction: Some(0.3),
            threads: Some(8),
        };
        let args = default_args().merge_with_config(config);
        assert_eq!(args.input.as_deref(), Some("in.fasta"));
        assert_eq!(args.threshold, 0.05);
        assert_eq!(args.mode, "skip");
        assert_eq!(args.max_ambiguity_fraction, 0.3);
        assert_eq!(args.threads, Some(8));
    }

    #[test]
    fn test_cli_values_take_precedence() {
        let mut args = default_args();
        args.input = Some("cli.fasta".to_string());
        args.threshold = 0.02;
        args.mode = "gapmm".to_string();

        let config = Config {
            input: Some("config.fasta".to_string()),
            output: None,
            threshold: Some(0.9),
            mode: Some("skip".to_string()),
            max_ambiguity_fraction: None,
            threads: None,
        };
        let args = args.merge_with_config(config);
        assert_eq!(args.input.as_deref(), Some("cli.fasta"));
        assert_eq!(args.threshold, 0.02);
        assert_eq!(args.mode, "gapmm");
    }
}
