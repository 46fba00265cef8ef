use super::gene_pool::GenePool;
use crate::genome::{Genome, GenomeLogic};
use rand::Rng;

/// Sorts by fitness, highest first.
///
/// Relative order among genomes with equal fitness is unspecified. Under
/// `total_cmp` a NaN would rank above every real value, so callers must keep
/// fitness finite; the engine rejects non-finite reports and populations.
pub fn sort_by_fitness_desc(population: &mut [Genome]) {
    population.sort_by(|a, b| b.fitness.total_cmp(&a.fitness));
}

/// Deep-copies the top `count` genomes and feeds their indices to the pool.
///
/// Expects `population` sorted by [`sort_by_fitness_desc`].
pub fn select_elites<R: Rng>(
    population: &[Genome],
    count: usize,
    gene_pool: &mut GenePool,
    rng: &mut R,
) -> Vec<Genome> {
    population
        .iter()
        .take(count)
        .enumerate()
        .map(|(index, genome)| {
            gene_pool.add_weighted(index, genome.fitness);
            genome.initialise_copy_with_rng(rng)
        })
        .collect()
}

/// Feeds the bottom `count` indices to the pool, worst first.
pub fn select_worst(population: &[Genome], count: usize, gene_pool: &mut GenePool) {
    let last = population.len().saturating_sub(1);
    for offset in 0..count.min(population.len()) {
        let index = last - offset;
        gene_pool.add_weighted(index, population[index].fitness);
    }
}
