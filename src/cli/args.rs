// args.rs - Command line arguments definition

use argh::FromArgs;

#[derive(FromArgs)]
/// tn93dist - Parallel pairwise TN93/K2P genetic distance calculator
pub struct Args {
    /// path to input FASTA file of aligned nucleotide sequences
    #[argh(option)]
    pub input: Option<String>,

    /// output CSV edge list file
    #[argh(option)]
    pub output: Option<String>,

    /// edge distance threshold: pairs farther apart are omitted (default: 1.0)
    #[argh(option, default = "1.0")]
    pub threshold: f64,

    /// ambiguity handling mode: resolve, average, gapmm, skip (default: resolve)
    #[argh(option, default = "String::from(\"resolve\")")]
    pub mode: String,

    /// resolve mode only: pairs where either sequence has a larger ambiguous
    /// fraction are averaged instead; -1 disables the limit (default: -1)
    #[argh(option, default = "-1.0")]
    pub max_ambiguity_fraction: f64,

    /// number of worker threads (default: auto-detect)
    #[argh(option)]
    pub threads: Option<usize>,

    /// validate inputs without computing distances (dry run)
    #[argh(switch)]
    pub dry_run: bool,

    /// path to TOML configuration file
    #[argh(option)]
    pub config: Option<String>,

    /// generate sample configuration file and exit
    #[argh(switch)]
    pub generate_config: bool,
}
