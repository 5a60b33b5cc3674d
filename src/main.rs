// main.rs - CLI entry point

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};

use tn93dist::cli::Config;
use tn93dist::data::read_fasta;
use tn93dist::error::DistError;
use tn93dist::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), DistError> {
    let mut args: Args = argh::from_env();

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path).map_err(DistError::Config)?;
    }

    let input = args
        .input
        .as_ref()
        .ok_or_else(|| DistError::Config("--input is required".to_string()))?
        .clone();
    let output = if args.dry_run {
        None
    } else {
        Some(
            args.output
                .as_ref()
                .ok_or_else(|| DistError::Config("--output is required".to_string()))?
                .clone(),
        )
    };

    // Validate all arguments before touching any file
    let run_config = validate_args(&args)?;

    println!("🚀 tn93dist v{}", tn93dist::VERSION);
    println!(
        "🕒 Started: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    println!("🧵 Threads: {}", run_config.worker_count);
    println!("🎯 Ambiguity mode: {}", run_config.mode.as_str());
    println!("📏 Edge threshold: {}", run_config.edge_threshold);
    if let Some(max) = run_config.max_ambiguity_fraction {
        println!("🔍 Max ambiguity fraction: {}", max);
    }

    let total_start = Instant::now();

    println!("📖 Reading input file: {}", input);
    let seqs = read_fasta(Path::new(&input))?;
    println!("✅ Loaded {} sequences", seqs.len());

    if args.dry_run {
        println!("✅ Dry run completed successfully");
        return Ok(());
    }

    let n = seqs.len() as u64;
    let pairs = n * n.saturating_sub(1) / 2;
    println!("🧮 Computing {} pairwise distances...", pairs);

    // The output sink is created only after the input was read successfully,
    // so a bad input never leaves a half-made output file behind.
    let output = output.unwrap();
    let out_file = File::create(&output)
        .map_err(|e| DistError::Output(format!("Failed to create output file '{}': {}", output, e)))?;

    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% completed")
            .unwrap(),
    );
    let progress = |percent: u8| pb.set_position(percent as u64);

    let stats = run_pairwise(&seqs, &run_config, BufWriter::new(out_file), &progress)?;
    pb.finish_with_message("done");

    let elapsed = total_start.elapsed();
    println!(
        "✅ {} of {} pairs passed the threshold in {:.2}s",
        stats.edges,
        stats.pairs,
        elapsed.as_secs_f64()
    );
    println!("💾 Edge list written to: {}", output);
    Ok(())
}
