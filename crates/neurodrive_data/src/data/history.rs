use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Why the environment stopped driving a genome.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// The agent hit a wall.
    Collision,
    /// Too little progress after the grace period.
    FitnessFloor,
    /// Fitness reached the configured ceiling.
    FitnessCeiling,
    /// The episode ran out of time.
    Timeout,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Collision => "collision",
            Self::FitnessFloor => "fitness floor",
            Self::FitnessCeiling => "fitness ceiling",
            Self::Timeout => "timeout",
        };
        f.write_str(label)
    }
}

/// Summary of one generational turnover.
///
/// The fitness figures describe the generation that just finished; the
/// remaining counts describe how the next generation was assembled.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct GenerationReport {
    /// Generation number of the population that was just built.
    pub generation: u64,
    pub best_fitness: f32,
    pub mean_fitness: f32,
    pub worst_fitness: f32,
    pub best_genome: Uuid,
    pub gene_pool_size: usize,
    pub elites: usize,
    pub crossover_children: usize,
    pub random_fill: usize,
    pub mutated_matrices: usize,
    /// Crossover pairs that fell back to adjacent indices.
    pub degenerate_pairs: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "event")]
/// Tagged union of run events written to the history log.
///
/// Serialised with `#[serde(tag = "event")]` for streaming JSONL output.
pub enum LiveEvent {
    /// A training run started.
    RunStarted {
        seed: Option<u64>,
        fingerprint: String,
        timestamp: String,
    },
    /// A generation finished and the next one was built.
    Generation {
        report: GenerationReport,
        timestamp: String,
    },
}
