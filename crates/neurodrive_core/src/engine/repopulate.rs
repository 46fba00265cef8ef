use super::gene_pool::GenePool;
use super::selection::{select_elites, select_worst};
use crate::config::EvolutionConfig;
use crate::genome::topology::random_genome;
use crate::genome::{Genome, GenomeLogic, Topology};
use rand::Rng;

/// A freshly bred generation and how it was assembled.
#[derive(Debug, Clone)]
pub struct Breeding {
    pub population: Vec<Genome>,
    pub elites: usize,
    pub crossover_children: usize,
    pub random_fill: usize,
    pub mutated_matrices: usize,
    pub degenerate_pairs: usize,
}

/// Builds the next generation from a population sorted best first.
///
/// Elites are copied, the tail feeds the gene pool, children are bred in
/// pairs from gene-pool parents, elites and children are mutated, and any
/// remaining slots get fresh random genomes. The returned population never
/// shares tensors with `sorted`. `topology` must come from a validated
/// configuration.
pub fn breed_next_generation<R: Rng>(
    sorted: &[Genome],
    gene_pool: &mut GenePool,
    evolution: &EvolutionConfig,
    topology: &Topology,
    rng: &mut R,
) -> Breeding {
    let size = sorted.len();
    let mut next = Vec::with_capacity(size);

    next.extend(select_elites(
        sorted,
        evolution.best_agent_selection_count,
        gene_pool,
        rng,
    ));
    let elites = next.len();
    select_worst(sorted, evolution.worst_agent_selection_count, gene_pool);

    let mut degenerate_pairs = 0;
    for i in (0..evolution.number_to_crossover).step_by(2) {
        let pair = gene_pool.select_parents((i, i + 1), rng);
        if pair.degenerate {
            degenerate_pairs += 1;
            tracing::debug!(
                pair = i / 2,
                gene_pool = gene_pool.len(),
                "Degenerate gene pool, pairing adjacent genomes"
            );
        }
        let (child1, child2) = sorted[pair.a].crossover_with_rng(&sorted[pair.b], rng);
        next.push(child1);
        next.push(child2);
    }
    let naturally_selected = next.len();

    let first_mutated = if evolution.mutate_elites { 0 } else { elites };
    let mut mutated_matrices = 0;
    for genome in &mut next[first_mutated..naturally_selected] {
        mutated_matrices += genome.mutate_with_rng(evolution.mutation_rate, rng);
    }

    while next.len() < size {
        next.push(random_genome(topology, rng));
    }

    Breeding {
        population: next,
        elites,
        crossover_children: naturally_selected - elites,
        random_fill: size - naturally_selected,
        mutated_matrices,
        degenerate_pairs,
    }
}
