//! The two seams between the evolution engine and whatever drives genomes.
//!
//! The environment never looks the engine up: it is handed something that
//! implements [`PopulationCoordinator`] and reports back through it. The
//! engine, in turn, only knows the environment as an [`Environment`] it can
//! bind genomes to.

use crate::error::Result;
use neurodrive_data::{GenerationReport, Genome};
use uuid::Uuid;

/// Environment side of the contract.
pub trait Environment {
    /// Drive `genome` next and reset the agent to its initial state.
    fn bind_active_genome(&mut self, genome: &Genome);
}

/// What a fitness report did to the engine.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    /// The cursor moved to the next genome of the same generation.
    NextGenome { index: usize },
    /// The generation was exhausted and a new one was bred.
    NewGeneration(GenerationReport),
}

/// Engine side of the contract, as seen by the environment.
pub trait PopulationCoordinator {
    /// Genome currently under evaluation.
    fn active_genome(&self) -> &Genome;

    /// Index of the active genome within the population.
    fn current_genome(&self) -> usize;

    fn generation(&self) -> u64;

    /// Binds the first genome. Must be called once before any report.
    fn start(&mut self, env: &mut dyn Environment);

    /// Records the terminal fitness of the active genome, then advances to
    /// the next genome (or breeds a new generation) and rebinds `env`.
    ///
    /// A report for any genome other than the bound one, a second report for
    /// the same genome, a report before [`start`](Self::start), or a
    /// non-finite fitness is a protocol violation: the call fails and the
    /// engine state is left untouched.
    fn report_fitness(
        &mut self,
        handle: Uuid,
        fitness: f32,
        env: &mut dyn Environment,
    ) -> Result<Advance>;
}
