mod common;

use common::{drive_generation, drive_generation_with, EngineBuilder, RecordingEnv};
use neurodrive_core::config::EvolutionConfig;
use neurodrive_core::{
    Advance, EvolutionEngine, GenePool, Genome, GenomeLogic, PopulationCoordinator,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_population_size_is_conserved() {
    let mut engine = EngineBuilder::new().with_seed(1).build();
    let mut env = RecordingEnv::default();
    let topology = engine.topology();

    for generation in 1..=5u64 {
        let report = drive_generation_with(&mut engine, &mut env, |g| g.infer(0.5, 1.0, 0.5).0);
        assert_eq!(report.generation, generation);
        assert_eq!(engine.population().len(), 10);
        assert!(engine.population().iter().all(|g| topology.matches(g)));
        assert_eq!(report.elites + report.crossover_children + report.random_fill, 10);
    }
    assert_eq!(engine.generation(), 5);
}

#[test]
fn test_every_genome_is_bound_once_per_generation() {
    let mut engine = EngineBuilder::new().with_seed(2).build();
    let mut env = RecordingEnv::default();
    let first_generation: Vec<_> = engine.population().iter().map(|g| g.id).collect();

    drive_generation(&mut engine, &mut env, &[1.0; 10]);

    assert_eq!(&env.bound[..10], first_generation.as_slice());
    assert_eq!(env.bound[10], engine.population()[0].id);
}

#[test]
fn test_elitism_without_mutation() {
    let mut engine = EngineBuilder::new()
        .with_seed(3)
        .with_config(|c| c.evolution.mutation_rate = 0.0)
        .build();
    let mut env = RecordingEnv::default();

    let fitness: Vec<f32> = (0..10).map(|i| i as f32).collect();
    let best = engine.population()[9].clone();
    let runner_up = engine.population()[8].clone();
    let report = drive_generation(&mut engine, &mut env, &fitness);

    assert_eq!(report.best_fitness, 9.0);
    assert_eq!(report.best_genome, best.id);
    assert_eq!(report.mutated_matrices, 0);

    let next = engine.population();
    assert_eq!(next[0].weights, best.weights);
    assert_eq!(next[0].biases, best.biases);
    assert_ne!(next[0].id, best.id);
    assert_eq!(next[1].weights, runner_up.weights);
}

#[test]
fn test_elites_can_be_protected_from_mutation() {
    let evolution = EvolutionConfig {
        population_size: 6,
        mutation_rate: 1.0,
        best_agent_selection_count: 2,
        worst_agent_selection_count: 1,
        number_to_crossover: 2,
        mutate_elites: false,
    };
    let mut engine = EngineBuilder::new().with_seed(4).with_evolution(evolution).build();
    let mut env = RecordingEnv::default();
    let best = engine.population()[0].clone();

    let report = drive_generation(&mut engine, &mut env, &[50.0, 1.0, 1.0, 1.0, 1.0, 1.0]);

    assert_eq!(engine.population()[0].weights, best.weights);
    // Only the two crossover children were mutated, every matrix of each.
    assert_eq!(report.mutated_matrices, 2 * engine.topology().weight_count());
}

#[test]
fn test_gene_pool_matches_weighted_counts() {
    let mut engine = EngineBuilder::new().with_seed(5).build();
    let mut env = RecordingEnv::default();
    let fitness = [0.25, 3.0, 0.0, 1.5, 7.2, -4.0, 0.9, 2.0, 0.05, 0.3];
    let report = drive_generation(&mut engine, &mut env, &fitness);

    // Sorted: 7.2, 3.0 | ... | 0.0, -4.0  (E = 2, W = 2)
    let expected: usize = [7.2f32, 3.0, 0.0, -4.0]
        .iter()
        .map(|&f| GenePool::repeat_count(f))
        .sum();
    assert_eq!(expected, 72 + 30);
    assert_eq!(report.gene_pool_size, expected);
    assert_eq!(engine.gene_pool().count_of(0), 72);
    assert_eq!(engine.gene_pool().count_of(1), 30);
}

#[test]
fn test_fitness_resets_after_turnover() {
    let mut engine = EngineBuilder::new().with_seed(6).build();
    let mut env = RecordingEnv::default();
    drive_generation(&mut engine, &mut env, &[5.0; 10]);
    assert!(engine.population().iter().all(|g| g.fitness == 0.0));
    assert_eq!(engine.current_genome(), 0);
}

#[test]
fn test_protocol_violation_leaves_state_unchanged() {
    let mut engine = EngineBuilder::new().with_seed(7).build();
    let mut env = RecordingEnv::default();
    engine.start(&mut env);

    let first = engine.active_genome().id;
    engine.report_fitness(first, 2.0, &mut env).unwrap();

    let before: Vec<_> = engine.population().to_vec();
    let bound_before = env.bound.len();

    assert!(engine
        .report_fitness(first, 3.0, &mut env)
        .unwrap_err()
        .is_protocol_violation());
    let active = engine.active_genome().id;
    assert!(engine
        .report_fitness(active, f32::NEG_INFINITY, &mut env)
        .unwrap_err()
        .is_protocol_violation());

    assert_eq!(engine.population(), before.as_slice());
    assert_eq!(engine.current_genome(), 1);
    assert_eq!(env.bound.len(), bound_before);

    let advance = engine.report_fitness(active, 1.0, &mut env).unwrap();
    assert_eq!(advance, Advance::NextGenome { index: 2 });
}

#[test]
fn test_all_zero_fitness_still_breeds() {
    let mut engine = EngineBuilder::new().with_seed(8).build();
    let mut env = RecordingEnv::default();
    let report = drive_generation(&mut engine, &mut env, &[0.0; 10]);
    assert_eq!(report.gene_pool_size, 0);
    assert_eq!(report.degenerate_pairs, 2);
    assert_eq!(report.crossover_children, 4);
    assert_eq!(engine.population().len(), 10);
}

#[test]
fn test_imported_population_needs_finite_fitness() {
    let builder = EngineBuilder::new();
    let config = builder.config().clone();
    let topology = builder.topology();
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let mut population: Vec<Genome> = (0..10)
        .map(|_| Genome::new_random_with_rng(&topology, &mut rng).unwrap())
        .collect();
    population[0].fitness = 10.0;

    let mut poisoned = population.clone();
    poisoned[2].fitness = f32::NAN;
    let err = EvolutionEngine::from_population(&config, poisoned, rng.clone()).unwrap_err();
    assert!(err.is_configuration());

    let best = population[0].id;
    let mut engine = EvolutionEngine::from_population(&config, population, rng).unwrap();
    let report = engine.repopulate();
    assert_eq!(report.best_fitness, 10.0);
    assert_eq!(report.best_genome, best);
    assert!(report.mean_fitness.is_finite());
}
