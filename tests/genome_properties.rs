use ndarray::Array2;
use neurodrive_core::genome::{sigmoid, GenomeLogic};
use neurodrive_data::{Activations, Genome, Topology};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn topology(hidden_layers: usize, hidden_neurons: usize) -> Topology {
    Topology {
        hidden_layers,
        hidden_neurons,
    }
}

#[test]
fn test_random_genome_shapes() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for (layers, neurons) in [(0, 1), (1, 10), (3, 7)] {
        let topology = topology(layers, neurons);
        let genome = Genome::new_random_with_rng(&topology, &mut rng).unwrap();
        assert!(topology.matches(&genome));
        assert_eq!(genome.weights.len(), layers + 3);
        assert_eq!(genome.biases.len(), layers + 2);
        assert_eq!(genome.fitness, 0.0);
        assert!(genome
            .weights
            .iter()
            .flat_map(|w| w.iter())
            .chain(genome.biases.iter())
            .all(|v| (-1.0..=1.0).contains(v)));
    }
}

#[test]
fn test_zero_width_topology_is_rejected() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    for (layers, neurons) in [(0, 0), (2, 0)] {
        let err = Genome::new_random_with_rng(&topology(layers, neurons), &mut rng).unwrap_err();
        assert!(err.is_configuration());
    }
}

#[test]
fn test_zero_network_outputs_midpoint() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let topology = topology(1, 5);
    let genome = Genome::from_parts(
        topology.weight_shapes().into_iter().map(Array2::zeros).collect(),
        vec![0.0; topology.bias_count()],
        &mut rng,
    )
    .unwrap();
    assert_eq!(genome.infer(0.3, -2.0, 7.0), (0.5, 0.0));
}

#[test]
fn test_steering_is_squashed_twice() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let topology = topology(0, 3);
    let output_bias = 0.8f32;
    let genome = Genome::from_parts(
        topology.weight_shapes().into_iter().map(Array2::zeros).collect(),
        vec![0.1, output_bias],
        &mut rng,
    )
    .unwrap();
    let (throttle, steering) = genome.infer(1.0, 1.0, 1.0);
    assert!((throttle - sigmoid(output_bias.tanh())).abs() < 1e-6);
    assert!((steering - output_bias.tanh().tanh()).abs() < 1e-6);
}

#[test]
fn test_inference_is_deterministic_and_buffer_independent() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let topology = topology(2, 6);
    let genome = Genome::new_random_with_rng(&topology, &mut rng).unwrap();

    let fresh = genome.infer(0.4, 1.1, 0.2);
    let mut activations = Activations::new(&topology);
    let first = genome.infer_internal([0.4, 1.1, 0.2], &mut activations);
    let second = genome.infer_internal([0.4, 1.1, 0.2], &mut activations);
    assert_eq!(fresh, first);
    assert_eq!(first, second);
    assert_eq!(activations.hidden.len(), topology.network_layers());
}

#[test]
fn test_dormant_matrix_does_not_affect_output() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let topology = topology(1, 4);
    let genome = Genome::new_random_with_rng(&topology, &mut rng).unwrap();
    let mut altered = genome.clone();
    let dormant = altered.weights.len() - 2;
    altered.weights[dormant].fill(0.9);
    assert_eq!(genome.infer(0.5, 1.0, 0.5), altered.infer(0.5, 1.0, 0.5));
}

#[test]
fn test_elite_copy_is_independent() {
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let topology = topology(1, 4);
    let mut source = Genome::new_random_with_rng(&topology, &mut rng).unwrap();
    source.fitness = 12.5;

    let copy = source.initialise_copy_with_rng(&mut rng);
    assert_ne!(copy.id, source.id);
    assert_eq!(copy.fitness, 0.0);
    assert_eq!(copy.weights, source.weights);
    assert_eq!(copy.biases, source.biases);

    let snapshot = copy.clone();
    source.weights[0].fill(0.0);
    source.biases[0] = 0.0;
    assert_eq!(copy, snapshot);
}

#[test]
fn test_crossover_inherits_whole_tensors() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let topology = topology(2, 5);
    let a = Genome::new_random_with_rng(&topology, &mut rng).unwrap();
    let b = Genome::new_random_with_rng(&topology, &mut rng).unwrap();

    let (c1, c2) = a.crossover_with_rng(&b, &mut rng);
    for i in 0..topology.weight_count() {
        let from_a = c1.weights[i] == a.weights[i] && c2.weights[i] == b.weights[i];
        let from_b = c1.weights[i] == b.weights[i] && c2.weights[i] == a.weights[i];
        assert!(from_a || from_b, "weight slot {i} was blended");
    }
    for i in 0..topology.bias_count() {
        let pair = (c1.biases[i], c2.biases[i]);
        assert!(pair == (a.biases[i], b.biases[i]) || pair == (b.biases[i], a.biases[i]));
    }
    assert_eq!(c1.fitness, 0.0);
    assert_ne!(c1.id, c2.id);
    assert_ne!(c1.id, a.id);
}

#[test]
fn test_mutation_rate_extremes() {
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let topology = topology(1, 10);
    let mut genome = Genome::new_random_with_rng(&topology, &mut rng).unwrap();
    let original = genome.clone();

    assert_eq!(genome.mutate_with_rng(0.0, &mut rng), 0);
    assert_eq!(genome, original);

    assert_eq!(genome.mutate_with_rng(1.0, &mut rng), topology.weight_count());
    assert_eq!(genome.biases, original.biases);
    assert!(genome
        .weights
        .iter()
        .flat_map(|w| w.iter())
        .all(|v| (-1.0..=1.0).contains(v)));
}

#[test]
fn test_from_parts_rejects_bad_shapes() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let topology = topology(1, 3);
    let weights: Vec<Array2<f32>> = topology
        .weight_shapes()
        .into_iter()
        .map(Array2::zeros)
        .collect();

    let err = Genome::from_parts(weights.clone(), vec![0.0; 2], &mut rng).unwrap_err();
    assert!(err.is_configuration());

    let mut wrong = weights;
    wrong[1] = Array2::zeros((3, 2));
    let err = Genome::from_parts(wrong, vec![0.0; 3], &mut rng).unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_extreme_sensors_saturate_without_nan() {
    let mut rng = ChaCha8Rng::seed_from_u64(10);
    let genome = Genome::new_random_with_rng(&topology(2, 8), &mut rng).unwrap();
    for sensors in [[1000.0, 1000.0, 1000.0], [-1e30, 0.0, 1e30]] {
        let (throttle, steering) = genome.infer(sensors[0], sensors[1], sensors[2]);
        assert!(throttle.is_finite() && steering.is_finite());
        assert!(throttle > 0.0 && throttle < 1.0);
        assert!((-1.0..=1.0).contains(&steering));
    }
}
