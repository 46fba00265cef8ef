use super::*;
use ndarray::Array2;
use rand::Rng;
use crate::error::{ensure_config, Result};
use crate::rng::{genome_id, symmetric_unit};

/// Largest accepted hidden layer width.
pub const MAX_HIDDEN_NEURONS: usize = 1024;
/// Largest accepted configured hidden layer count.
pub const MAX_HIDDEN_LAYERS: usize = 64;

/// Builds a [`Topology`], rejecting zero-width and oversized shapes.
pub fn checked_topology(hidden_layers: usize, hidden_neurons: usize) -> Result<Topology> {
    ensure_config!(hidden_neurons > 0, "Hidden neuron count must be positive");
    ensure_config!(
        hidden_neurons <= MAX_HIDDEN_NEURONS,
        "Hidden neuron count too large (max {})",
        MAX_HIDDEN_NEURONS
    );
    ensure_config!(
        hidden_layers <= MAX_HIDDEN_LAYERS,
        "Hidden layer count too large (max {})",
        MAX_HIDDEN_LAYERS
    );
    Ok(Topology {
        hidden_layers,
        hidden_neurons,
    })
}

/// Fresh genome with every weight cell and bias drawn from `[-1, 1]`.
pub fn create_genome_random_with_rng<R: Rng>(
    topology: &Topology,
    rng: &mut R,
) -> Result<Genome> {
    let topology = checked_topology(topology.hidden_layers, topology.hidden_neurons)?;
    Ok(random_genome(&topology, rng))
}

/// Random genome for a topology that has already passed [`checked_topology`].
pub(crate) fn random_genome<R: Rng>(topology: &Topology, rng: &mut R) -> Genome {
    let id = genome_id(rng);
    let biases = (0..topology.bias_count())
        .map(|_| symmetric_unit(rng))
        .collect();
    let weights = topology
        .weight_shapes()
        .into_iter()
        .map(|shape| Array2::from_shape_simple_fn(shape, || symmetric_unit(rng)))
        .collect();

    Genome {
        id,
        weights,
        biases,
        fitness: 0.0,
    }
}

/// Value copy of the source tensors. Nothing is shared with `genome`.
pub fn initialise_copy_with_rng<R: Rng>(genome: &Genome, rng: &mut R) -> Genome {
    Genome {
        id: genome_id(rng),
        weights: genome.weights.iter().map(|w| w.to_owned()).collect(),
        biases: genome.biases.clone(),
        fitness: 0.0,
    }
}

pub fn genome_from_parts<R: Rng>(
    weights: Vec<Array2<f32>>,
    biases: Vec<f32>,
    rng: &mut R,
) -> Result<Genome> {
    ensure_config!(
        biases.len() >= 2,
        "A genome needs at least one hidden bias and an output bias, got {}",
        biases.len()
    );
    ensure_config!(
        weights.len() == biases.len() + 1,
        "Weight/bias count mismatch: {} weight matrices for {} biases",
        weights.len(),
        biases.len()
    );
    let topology = checked_topology(biases.len() - 2, weights[0].ncols())?;

    for (index, (matrix, expected)) in weights.iter().zip(topology.weight_shapes()).enumerate() {
        ensure_config!(
            matrix.dim() == expected,
            "Weight matrix {} has shape {:?}, expected {:?}",
            index,
            matrix.dim(),
            expected
        );
    }

    Ok(Genome {
        id: genome_id(rng),
        weights,
        biases,
        fitness: 0.0,
    })
}
