pub mod shutdown;

pub use shutdown::ShutdownManager;

use anyhow::Result;
use neurodrive_core::{Advance, AppConfig, EvolutionEngine, Metrics};
use neurodrive_io::HistoryLogger;
use serde::Serialize;
use std::time::Instant;

use crate::model::{Car, TrainingSession};

/// What a finished (or interrupted) run achieved.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub generations: u64,
    pub genomes_evaluated: u64,
    pub best_fitness: Option<f32>,
    pub degenerate_pairs: u64,
    pub interrupted: bool,
}

/// A training run: one engine, one car, history and metrics.
pub struct App {
    pub config: AppConfig,
    pub session: TrainingSession<EvolutionEngine>,
    pub metrics: Metrics,
    pub history: HistoryLogger,
    pub shutdown: ShutdownManager,
}

impl App {
    pub fn new(config: AppConfig, history: HistoryLogger) -> Result<Self> {
        let engine = EvolutionEngine::new(&config)?;
        let car = Car::new(&config);
        Ok(Self {
            session: TrainingSession::new(engine, car),
            config,
            metrics: Metrics::new(),
            history,
            shutdown: ShutdownManager::new(),
        })
    }

    /// Trains until `simulation.max_generations` turnovers have happened or a
    /// shutdown is requested. Without a generation limit only a shutdown
    /// stops the run.
    pub fn run(&mut self) -> Result<RunSummary> {
        let limit = self.config.simulation.max_generations;
        self.history
            .log_run_started(self.config.simulation.seed, &self.config.fingerprint())?;
        tracing::info!(
            seed = ?self.config.simulation.seed,
            max_generations = ?limit,
            population = self.config.evolution.population_size,
            "Training started"
        );

        let mut generation_start = Instant::now();
        let mut interrupted = false;

        while limit.map_or(true, |max| self.metrics.generations() < max) {
            if self.shutdown.is_shutdown_requested() {
                interrupted = true;
                self.shutdown.set_exit_code(130);
                break;
            }

            let outcome = self.session.run_episode()?;
            self.metrics
                .record_episode(outcome.fitness, outcome.termination);

            if let Advance::NewGeneration(report) = &outcome.advance {
                self.metrics
                    .record_generation(report, generation_start.elapsed());
                self.history.log_generation(report)?;
                generation_start = Instant::now();
            }
        }

        let summary = RunSummary {
            generations: self.metrics.generations(),
            genomes_evaluated: self.metrics.genomes_evaluated(),
            best_fitness: self.metrics.best_fitness(),
            degenerate_pairs: self.metrics.degenerate_pairs(),
            interrupted,
        };
        tracing::info!(
            generations = summary.generations,
            evaluated = summary.genomes_evaluated,
            interrupted,
            "Training finished"
        );
        Ok(summary)
    }
}
