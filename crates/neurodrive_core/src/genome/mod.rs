pub mod crossover;
pub mod forward;
pub mod mutation;
pub mod topology;

pub use neurodrive_data::{Activations, Genome, Topology, CONTROL_OUTPUTS, SENSOR_INPUTS};
use ndarray::Array2;
use rand::Rng;

pub use forward::sigmoid;
pub use topology::{checked_topology, create_genome_random_with_rng, genome_from_parts};

/// Trait defining the core logic for genome networks.
pub trait GenomeLogic: Sized {
    /// Random genome in `[-1, 1]`. Zero-width or oversized topologies are
    /// rejected with a configuration error.
    fn new_random_with_rng<R: Rng>(
        topology: &Topology,
        rng: &mut R,
    ) -> crate::error::Result<Self>;

    /// Builds a genome from explicit tensors, rejecting mismatched shapes.
    fn from_parts<R: Rng>(
        weights: Vec<Array2<f32>>,
        biases: Vec<f32>,
        rng: &mut R,
    ) -> crate::error::Result<Self>;

    /// Forward pass: `(sensorA, sensorB, sensorC) -> (throttle, steering)`.
    #[must_use]
    fn infer(&self, a: f32, b: f32, c: f32) -> (f32, f32);

    #[must_use]
    fn infer_internal(
        &self,
        sensors: [f32; SENSOR_INPUTS],
        activations: &mut Activations,
    ) -> (f32, f32);

    /// Deep copy of the tensors under a fresh handle, fitness reset to zero.
    #[must_use]
    fn initialise_copy_with_rng<R: Rng>(&self, rng: &mut R) -> Self;

    /// Breeds two children by inheriting whole tensors from either parent.
    fn crossover_with_rng<R: Rng>(&self, other: &Self, rng: &mut R) -> (Self, Self);

    /// Mutates each weight matrix with probability `rate`.
    /// Returns the number of matrices that were touched.
    fn mutate_with_rng<R: Rng>(&mut self, rate: f32, rng: &mut R) -> usize;
}

impl GenomeLogic for Genome {
    fn new_random_with_rng<R: Rng>(
        topology: &Topology,
        rng: &mut R,
    ) -> crate::error::Result<Self> {
        topology::create_genome_random_with_rng(topology, rng)
    }

    fn from_parts<R: Rng>(
        weights: Vec<Array2<f32>>,
        biases: Vec<f32>,
        rng: &mut R,
    ) -> crate::error::Result<Self> {
        topology::genome_from_parts(weights, biases, rng)
    }

    fn infer(&self, a: f32, b: f32, c: f32) -> (f32, f32) {
        forward::infer(self, [a, b, c])
    }

    fn infer_internal(
        &self,
        sensors: [f32; SENSOR_INPUTS],
        activations: &mut Activations,
    ) -> (f32, f32) {
        forward::infer_internal(self, sensors, activations)
    }

    fn initialise_copy_with_rng<R: Rng>(&self, rng: &mut R) -> Self {
        topology::initialise_copy_with_rng(self, rng)
    }

    fn crossover_with_rng<R: Rng>(&self, other: &Self, rng: &mut R) -> (Self, Self) {
        crossover::genome_crossover_with_rng(self, other, rng)
    }

    fn mutate_with_rng<R: Rng>(&mut self, rate: f32, rng: &mut R) -> usize {
        mutation::mutate_with_rng(self, rate, rng)
    }
}
