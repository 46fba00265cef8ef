//! Run metrics for training sessions.
//!
//! Provides structured logging and counters for monitoring how a run is
//! progressing.

use neurodrive_data::{GenerationReport, Termination};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Metrics collector for a training run.
pub struct Metrics {
    genomes_evaluated: AtomicU64,
    generations: AtomicU64,
    degenerate_pairs: AtomicU64,
    best_fitness: Mutex<Option<f32>>,
    pub terminations: Mutex<HashMap<Termination, u64>>,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Metrics {
    /// Creates a new metrics collector.
    #[must_use]
    pub fn new() -> Self {
        Self {
            genomes_evaluated: AtomicU64::new(0),
            generations: AtomicU64::new(0),
            degenerate_pairs: AtomicU64::new(0),
            best_fitness: Mutex::new(None),
            terminations: Mutex::new(HashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Records one finished episode.
    pub fn record_episode(&self, fitness: f32, termination: Termination) {
        self.genomes_evaluated.fetch_add(1, Ordering::Relaxed);
        {
            let mut terminations = self.terminations.lock().unwrap_or_else(|e| e.into_inner());
            *terminations.entry(termination).or_insert(0) += 1;
        }

        let mut best = self.best_fitness.lock().unwrap_or_else(|e| e.into_inner());
        if best.map_or(true, |b| fitness > b) {
            *best = Some(fitness);
            tracing::debug!(fitness, "New best fitness");
        }
    }

    /// Records a generational turnover.
    pub fn record_generation(&self, report: &GenerationReport, duration: Duration) {
        self.generations.fetch_add(1, Ordering::Relaxed);
        self.degenerate_pairs
            .fetch_add(report.degenerate_pairs as u64, Ordering::Relaxed);

        tracing::info!(
            generation = report.generation,
            best_fitness = report.best_fitness,
            mean_fitness = report.mean_fitness,
            evaluated = self.genomes_evaluated(),
            duration_ms = duration.as_millis() as u64,
            "Generation turnover"
        );
    }

    #[must_use]
    pub fn genomes_evaluated(&self) -> u64 {
        self.genomes_evaluated.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn generations(&self) -> u64 {
        self.generations.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn degenerate_pairs(&self) -> u64 {
        self.degenerate_pairs.load(Ordering::Relaxed)
    }

    /// Best fitness reported so far, across all generations.
    #[must_use]
    pub fn best_fitness(&self) -> Option<f32> {
        *self.best_fitness.lock().unwrap_or_else(|e| e.into_inner())
    }

    #[must_use]
    pub fn termination_count(&self, termination: Termination) -> u64 {
        let terminations = self.terminations.lock().unwrap_or_else(|e| e.into_inner());
        terminations.get(&termination).copied().unwrap_or(0)
    }

    /// Gets elapsed time since metrics creation.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

/// Initialize tracing subscriber for logging.
///
/// Honours `RUST_LOG`; defaults to `info`.
pub fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_env_filter(filter)
            .finish(),
    )
    .ok();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new() {
        let metrics = Metrics::new();
        assert_eq!(metrics.genomes_evaluated(), 0);
        assert_eq!(metrics.best_fitness(), None);
    }

    #[test]
    fn test_record_episode_tracks_best() {
        let metrics = Metrics::new();
        metrics.record_episode(12.0, Termination::Collision);
        metrics.record_episode(4.0, Termination::FitnessFloor);
        metrics.record_episode(30.0, Termination::Collision);
        assert_eq!(metrics.genomes_evaluated(), 3);
        assert_eq!(metrics.best_fitness(), Some(30.0));
        assert_eq!(metrics.termination_count(Termination::Collision), 2);
        assert_eq!(metrics.termination_count(Termination::Timeout), 0);
    }

    #[test]
    fn test_record_generation() {
        let metrics = Metrics::new();
        let report = GenerationReport {
            generation: 1,
            degenerate_pairs: 2,
            ..Default::default()
        };
        metrics.record_generation(&report, Duration::from_millis(5));
        assert_eq!(metrics.generations(), 1);
        assert_eq!(metrics.degenerate_pairs(), 2);
    }
}
