use neurodrive_core::config::{AppConfig, EvolutionConfig, NetworkConfig};
use neurodrive_core::{Advance, Environment, EvolutionEngine, PopulationCoordinator};
use neurodrive_data::{GenerationReport, Genome, Topology};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

/// Environment that only remembers what it was asked to drive.
#[allow(dead_code)]
#[derive(Default)]
pub struct RecordingEnv {
    pub bound: Vec<Uuid>,
}

impl Environment for RecordingEnv {
    fn bind_active_genome(&mut self, genome: &Genome) {
        self.bound.push(genome.id);
    }
}

#[allow(dead_code)]
pub struct EngineBuilder {
    config: AppConfig,
    seed: u64,
}

#[allow(dead_code)]
impl EngineBuilder {
    pub fn new() -> Self {
        Self {
            config: AppConfig {
                network: NetworkConfig {
                    hidden_layers: 0,
                    hidden_neurons: 4,
                },
                evolution: EvolutionConfig {
                    population_size: 10,
                    mutation_rate: 0.055,
                    best_agent_selection_count: 2,
                    worst_agent_selection_count: 2,
                    number_to_crossover: 4,
                    mutate_elites: true,
                },
                ..Default::default()
            },
            seed: 42,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self.config.simulation.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn with_topology(mut self, hidden_layers: usize, hidden_neurons: usize) -> Self {
        self.config.network = NetworkConfig {
            hidden_layers,
            hidden_neurons,
        };
        self
    }

    pub fn with_evolution(mut self, evolution: EvolutionConfig) -> Self {
        self.config.evolution = evolution;
        self
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn topology(&self) -> Topology {
        self.config.topology().expect("valid topology")
    }

    pub fn build(self) -> EvolutionEngine {
        EvolutionEngine::with_rng(&self.config, ChaCha8Rng::seed_from_u64(self.seed))
            .expect("Failed to build engine")
    }
}

/// Reports `fitness[i]` for the i-th genome of the current generation and
/// returns the turnover report. `fitness` must cover the whole population.
#[allow(dead_code)]
pub fn drive_generation(
    engine: &mut EvolutionEngine,
    env: &mut RecordingEnv,
    fitness: &[f32],
) -> GenerationReport {
    assert_eq!(fitness.len(), engine.population().len());
    if engine.bound_handle().is_none() {
        engine.start(env);
    }
    for &f in fitness {
        let handle = engine.active_genome().id;
        if let Advance::NewGeneration(report) = engine
            .report_fitness(handle, f, env)
            .expect("valid report")
        {
            return report;
        }
    }
    panic!("population exhausted without a new generation");
}

/// Same as [`drive_generation`] with fitness derived from the genome itself.
#[allow(dead_code)]
pub fn drive_generation_with<F>(
    engine: &mut EvolutionEngine,
    env: &mut RecordingEnv,
    mut score: F,
) -> GenerationReport
where
    F: FnMut(&Genome) -> f32,
{
    if engine.bound_handle().is_none() {
        engine.start(env);
    }
    loop {
        let handle = engine.active_genome().id;
        let fitness = score(engine.active_genome());
        if let Advance::NewGeneration(report) = engine
            .report_fitness(handle, fitness, env)
            .expect("valid report")
        {
            return report;
        }
    }
}
