use super::*;
use crate::rng::{coin_flip, genome_id};
use rand::Rng;

/// Slot-wise uniform crossover.
///
/// For every weight slot, and then every bias slot, a coin decides whether
/// child one takes the tensor from `genome` and child two from `other`, or
/// the other way round. Tensors are copied whole, never blended.
pub fn genome_crossover_with_rng<R: Rng>(
    genome: &Genome,
    other: &Genome,
    rng: &mut R,
) -> (Genome, Genome) {
    let slots = genome.weights.len().min(other.weights.len());
    let mut child1_weights = Vec::with_capacity(slots);
    let mut child2_weights = Vec::with_capacity(slots);
    for w in 0..slots {
        let (a, b) = (&genome.weights[w], &other.weights[w]);
        if coin_flip(rng) {
            child1_weights.push(a.to_owned());
            child2_weights.push(b.to_owned());
        } else {
            child1_weights.push(b.to_owned());
            child2_weights.push(a.to_owned());
        }
    }

    let slots = genome.biases.len().min(other.biases.len());
    let mut child1_biases = Vec::with_capacity(slots);
    let mut child2_biases = Vec::with_capacity(slots);
    for b in 0..slots {
        if coin_flip(rng) {
            child1_biases.push(genome.biases[b]);
            child2_biases.push(other.biases[b]);
        } else {
            child1_biases.push(other.biases[b]);
            child2_biases.push(genome.biases[b]);
        }
    }

    let child1 = Genome {
        id: genome_id(rng),
        weights: child1_weights,
        biases: child1_biases,
        fitness: 0.0,
    };
    let child2 = Genome {
        id: genome_id(rng),
        weights: child2_weights,
        biases: child2_biases,
        fitness: 0.0,
    };
    (child1, child2)
}
