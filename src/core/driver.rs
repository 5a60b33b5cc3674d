// driver.rs - Parallel pairwise distance matrix driver

use std::io::Write;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use rayon::prelude::*;

use crate::core::distance::pairwise_distance;
use crate::core::resolver::{count_pair, AmbiguityMode};
use crate::data::Seq;
use crate::error::DistError;
use crate::output::EdgeWriter;

/// Maximum number of in-flight pair computations per batch. Each batch is
/// fully drained before the next is submitted, bounding memory for large
/// matrices.
pub const BATCH_SIZE: usize = 1000;

/// Immutable configuration for one pairwise run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Pairs with distance greater than this are omitted from the edge list
    /// (inclusive boundary: a distance exactly equal to the threshold stays).
    pub edge_threshold: f64,
    pub mode: AmbiguityMode,
    /// Resolve-mode only: pairs where either sequence's ambiguous fraction
    /// exceeds this are computed as if the mode were Average.
    pub max_ambiguity_fraction: Option<f64>,
    /// Requested parallelism; clamped to [1, sequence_count - 1] at run time.
    pub worker_count: usize,
}

impl RunConfig {
    pub fn validate(&self) -> Result<(), DistError> {
        if !self.edge_threshold.is_finite() || self.edge_threshold < 0.0 {
            return Err(DistError::Config(format!(
                "Edge threshold must be a non-negative number, got {}",
                self.edge_threshold
            )));
        }
        if let Some(max) = self.max_ambiguity_fraction {
            if !(0.0..=1.0).contains(&max) {
                return Err(DistError::Config(format!(
                    "Max ambiguity fraction must be between 0.0 and 1.0, got {}",
                    max
                )));
            }
        }
        if self.worker_count == 0 {
            return Err(DistError::Config(
                "Worker count must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Outbound progress stream: integer percent complete, 0-100, monotonically
/// increasing, reaching exactly 100 once. The engine holds no reference to
/// any presentation object; callers pass a closure or their own sink.
pub trait ProgressSink: Sync {
    fn update(&self, percent: u8);
}

impl<F: Fn(u8) + Sync> ProgressSink for F {
    fn update(&self, percent: u8) {
        self(percent)
    }
}

/// Sink that discards all updates.
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn update(&self, _percent: u8) {}
}

/// Summary of a completed run.
#[derive(Debug, Clone, Copy)]
pub struct RunStats {
    pub pairs: u64,
    pub edges: u64,
}

/// Tracks completed pairs and reports whole-percent boundary crossings.
struct ProgressTracker {
    total: u64,
    done: AtomicU64,
    last_percent: Mutex<u64>,
}

impl ProgressTracker {
    fn new(total: u64) -> Self {
        Self {
            total,
            done: AtomicU64::new(0),
            last_percent: Mutex::new(0),
        }
    }

    /// Record one completed pair, emitting a progress update when a new 1%
    /// boundary is crossed (every completion for small totals). The final
    /// 100 is reserved for `finish` so it is emitted exactly once.
    fn tick(&self, sink: &dyn ProgressSink) {
        let done = self.done.fetch_add(1, Ordering::Relaxed) + 1;
        let on_boundary = self.total < 100 || done % (self.total / 100) == 0;
        if !on_boundary {
            return;
        }
        let percent = done * 100 / self.total;
        let mut last = self.last_percent.lock().unwrap();
        if percent > *last && percent < 100 {
            *last = percent;
            sink.update(percent as u8);
        }
    }

    fn finish(&self, sink: &dyn ProgressSink) {
        let mut last = self.last_percent.lock().unwrap();
        if *last < 100 {
            *last = 100;
            sink.update(100);
        }
    }
}

/// Compute all N·(N−1)/2 pairwise distances and stream threshold-passing
/// edges to `out`.
///
/// Pairs are dispatched to a dedicated worker pool in batches of
/// [`BATCH_SIZE`]; each batch is drained before the next is submitted. Rows
/// may appear in any order relative to pair enumeration once more than one
/// worker is active, but each row is written atomically. The writer is
/// flushed exactly once, after draining.
pub fn run_pairwise<W: Write + Send>(
    seqs: &[Seq],
    config: &RunConfig,
    out: W,
    progress: &dyn ProgressSink,
) -> Result<RunStats, DistError> {
    config.validate()?;

    let n = seqs.len();
    let total_pairs = (n as u64 * (n as u64).saturating_sub(1)) / 2;

    let mut writer = EdgeWriter::new(out).map_err(DistError::Output)?;
    if total_pairs == 0 {
        writer.flush().map_err(DistError::Output)?;
        progress.update(100);
        return Ok(RunStats { pairs: 0, edges: 0 });
    }

    let workers = config.worker_count.min(n - 1).max(1);
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| DistError::Config(format!("Failed to build worker pool: {}", e)))?;

    // Per-sequence ambiguous fractions, read-only during the parallel phase.
    let fractions: Option<Vec<f64>> =
        if config.mode == AmbiguityMode::Resolve && config.max_ambiguity_fraction.is_some() {
            Some(seqs.iter().map(|s| s.ambiguous_fraction()).collect())
        } else {
            None
        };

    let tracker = ProgressTracker::new(total_pairs);
    let writer = Mutex::new(writer);
    let edges = AtomicU64::new(0);

    let mut batch: Vec<(usize, usize)> = Vec::with_capacity(BATCH_SIZE.min(total_pairs as usize));
    for i in 1..n {
        for j in 0..i {
            batch.push((i, j));
            if batch.len() == BATCH_SIZE {
                run_batch(
                    &pool, &batch, seqs, config, fractions.as_deref(), &writer, &edges, &tracker,
                    progress,
                )?;
                batch.clear();
            }
        }
    }
    if !batch.is_empty() {
        run_batch(
            &pool, &batch, seqs, config, fractions.as_deref(), &writer, &edges, &tracker,
            progress,
        )?;
    }

    writer
        .into_inner()
        .map_err(|_| DistError::Output("Edge writer lock poisoned".to_string()))?
        .flush()
        .map_err(DistError::Output)?;
    tracker.finish(progress);

    Ok(RunStats {
        pairs: total_pairs,
        edges: edges.load(Ordering::Relaxed),
    })
}

/// Submit one batch to the pool and wait for every pair in it to complete.
#[allow(clippy::too_many_arguments)]
fn run_batch<W: Write + Send>(
    pool: &rayon::ThreadPool,
    batch: &[(usize, usize)],
    seqs: &[Seq],
    config: &RunConfig,
    fractions: Option<&[f64]>,
    writer: &Mutex<EdgeWriter<W>>,
    edges: &AtomicU64,
    tracker: &ProgressTracker,
    progress: &dyn ProgressSink,
) -> Result<(), DistError> {
    pool.install(|| {
        batch.par_iter().try_for_each(|&(i, j)| {
            let mode = effective_mode(config, fractions, i, j);
            let counts = count_pair(seqs[i].codes(), seqs[j].codes(), mode);
            let d = pairwise_distance(&counts);

            if d <= config.edge_threshold {
                let mut w = writer.lock().unwrap();
                w.write_edge(seqs[i].name(), seqs[j].name(), d)?;
                edges.fetch_add(1, Ordering::Relaxed);
            }
            tracker.tick(progress);
            Ok(())
        })
    })
    .map_err(DistError::Output)
}

/// Resolve-mode pairs exceeding the ambiguity budget downgrade to Average
/// for that pair only.
fn effective_mode(
    config: &RunConfig,
    fractions: Option<&[f64]>,
    i: usize,
    j: usize,
) -> AmbiguityMode {
    if config.mode == AmbiguityMode::Resolve {
        if let (Some(fracs), Some(max)) = (fractions, config.max_ambiguity_fraction) {
            if fracs[i] > max || fracs[j] > max {
                return AmbiguityMode::Average;
            }
        }
    }
    config.mode
}
