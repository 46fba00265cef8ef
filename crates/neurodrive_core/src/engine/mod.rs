//! Population manager running the generational genetic algorithm.
//!
//! The engine owns the population outright. Genomes are evaluated one at a
//! time in population order; once the last one reports, the engine sorts,
//! selects, breeds, mutates and fills a brand new population, swaps it in,
//! and starts over at index 0.

pub mod gene_pool;
pub mod repopulate;
pub mod selection;

pub use gene_pool::{GenePool, ParentPair};
pub use repopulate::{breed_next_generation, Breeding};
pub use selection::sort_by_fitness_desc;

use crate::config::{AppConfig, EvolutionConfig};
use crate::coordinator::{Advance, Environment, PopulationCoordinator};
use crate::error::{ensure_config, EngineError, Result};
use crate::genome::{Genome, GenomeLogic, Topology};
use crate::rng::seeded_rng;
use neurodrive_data::GenerationReport;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

#[derive(Debug)]
pub struct EvolutionEngine {
    evolution: EvolutionConfig,
    topology: Topology,
    population: Vec<Genome>,
    current_genome: usize,
    generation: u64,
    gene_pool: GenePool,
    rng: ChaCha8Rng,
    /// Handle of the genome the environment is currently driving.
    bound: Option<Uuid>,
    last_report: Option<GenerationReport>,
}

impl EvolutionEngine {
    /// Validates `config` and creates a random initial population, seeded
    /// from `config.simulation.seed`.
    pub fn new(config: &AppConfig) -> Result<Self> {
        Self::with_rng(config, seeded_rng(config.simulation.seed))
    }

    pub fn with_rng(config: &AppConfig, mut rng: ChaCha8Rng) -> Result<Self> {
        config.validate()?;
        let topology = config.topology()?;
        let population = (0..config.evolution.population_size)
            .map(|_| Genome::new_random_with_rng(&topology, &mut rng))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::assemble(config, topology, population, rng))
    }

    /// Starts from an explicit population instead of a random one.
    ///
    /// The population must have exactly `population_size` genomes, each
    /// matching the configured topology and carrying a finite fitness.
    pub fn from_population(
        config: &AppConfig,
        population: Vec<Genome>,
        rng: ChaCha8Rng,
    ) -> Result<Self> {
        config.validate()?;
        let topology = config.topology()?;
        ensure_config!(
            population.len() == config.evolution.population_size,
            "Population has {} genomes, expected {}",
            population.len(),
            config.evolution.population_size
        );
        if let Some(index) = population.iter().position(|g| !topology.matches(g)) {
            return Err(EngineError::configuration(format!(
                "Genome {index} does not match topology {topology:?}"
            )));
        }
        if let Some(index) = population.iter().position(|g| !g.fitness.is_finite()) {
            return Err(EngineError::configuration(format!(
                "Genome {index} has non-finite fitness {}",
                population[index].fitness
            )));
        }
        Ok(Self::assemble(config, topology, population, rng))
    }

    fn assemble(
        config: &AppConfig,
        topology: Topology,
        population: Vec<Genome>,
        rng: ChaCha8Rng,
    ) -> Self {
        tracing::info!(
            population = population.len(),
            hidden_layers = topology.network_layers(),
            hidden_neurons = topology.hidden_neurons,
            "Population created"
        );
        Self {
            evolution: config.evolution.clone(),
            topology,
            population,
            current_genome: 0,
            generation: 0,
            gene_pool: GenePool::new(),
            rng,
            bound: None,
            last_report: None,
        }
    }

    #[must_use]
    pub fn population(&self) -> &[Genome] {
        &self.population
    }

    #[must_use]
    pub fn topology(&self) -> Topology {
        self.topology
    }

    #[must_use]
    pub fn evolution_config(&self) -> &EvolutionConfig {
        &self.evolution
    }

    /// Gene pool built during the most recent turnover.
    #[must_use]
    pub fn gene_pool(&self) -> &GenePool {
        &self.gene_pool
    }

    #[must_use]
    pub fn last_report(&self) -> Option<&GenerationReport> {
        self.last_report.as_ref()
    }

    /// Handle currently bound to the environment, if any.
    #[must_use]
    pub fn bound_handle(&self) -> Option<Uuid> {
        self.bound
    }

    fn bind(&mut self, env: &mut dyn Environment) {
        let genome = &self.population[self.current_genome];
        self.bound = Some(genome.id);
        env.bind_active_genome(genome);
    }

    /// Runs one generational turnover on the current population.
    ///
    /// Fitness values already stored on the population are used as-is. The
    /// cursor is reset to 0 but nothing is rebound; callers driving an
    /// environment go through [`PopulationCoordinator::report_fitness`].
    pub fn repopulate(&mut self) -> GenerationReport {
        self.gene_pool.clear();
        self.generation += 1;

        sort_by_fitness_desc(&mut self.population);

        let count = self.population.len().max(1) as f32;
        let best = &self.population[0];
        let best_fitness = best.fitness;
        let best_genome = best.id;
        let worst_fitness = self.population[self.population.len() - 1].fitness;
        let mean_fitness = self.population.iter().map(|g| g.fitness).sum::<f32>() / count;

        let breeding = breed_next_generation(
            &self.population,
            &mut self.gene_pool,
            &self.evolution,
            &self.topology,
            &mut self.rng,
        );

        self.population = breeding.population;
        self.current_genome = 0;
        self.bound = None;

        let report = GenerationReport {
            generation: self.generation,
            best_fitness,
            mean_fitness,
            worst_fitness,
            best_genome,
            gene_pool_size: self.gene_pool.len(),
            elites: breeding.elites,
            crossover_children: breeding.crossover_children,
            random_fill: breeding.random_fill,
            mutated_matrices: breeding.mutated_matrices,
            degenerate_pairs: breeding.degenerate_pairs,
        };

        tracing::info!(
            generation = report.generation,
            best_fitness = report.best_fitness,
            mean_fitness = report.mean_fitness,
            gene_pool = report.gene_pool_size,
            mutated = report.mutated_matrices,
            degenerate_pairs = report.degenerate_pairs,
            "Generation complete"
        );

        self.last_report = Some(report.clone());
        report
    }

    fn check_report(&self, handle: Uuid, fitness: f32) -> Result<()> {
        let Some(active) = self.bound else {
            return Err(EngineError::protocol(format!(
                "Fitness reported for {handle} but no genome is bound"
            )));
        };
        if handle != active {
            return Err(EngineError::protocol(format!(
                "Fitness reported for {handle}, active genome is {active}"
            )));
        }
        if !fitness.is_finite() {
            return Err(EngineError::protocol(format!(
                "Non-finite fitness {fitness} reported for {handle}"
            )));
        }
        Ok(())
    }
}

impl PopulationCoordinator for EvolutionEngine {
    fn active_genome(&self) -> &Genome {
        &self.population[self.current_genome]
    }

    fn current_genome(&self) -> usize {
        self.current_genome
    }

    fn generation(&self) -> u64 {
        self.generation
    }

    fn start(&mut self, env: &mut dyn Environment) {
        self.current_genome = 0;
        self.bind(env);
    }

    fn report_fitness(
        &mut self,
        handle: Uuid,
        fitness: f32,
        env: &mut dyn Environment,
    ) -> Result<Advance> {
        if let Err(e) = self.check_report(handle, fitness) {
            tracing::warn!(error = %e, "Rejected fitness report");
            return Err(e);
        }

        // Stored before any turnover, so the last genome of a generation is
        // ranked with the others instead of being dropped.
        self.population[self.current_genome].fitness = fitness;
        tracing::debug!(
            generation = self.generation,
            genome = self.current_genome,
            fitness,
            "Genome evaluated"
        );

        if self.current_genome + 1 < self.population.len() {
            self.current_genome += 1;
            self.bind(env);
            Ok(Advance::NextGenome {
                index: self.current_genome,
            })
        } else {
            let report = self.repopulate();
            self.bind(env);
            Ok(Advance::NewGeneration(report))
        }
    }
}
