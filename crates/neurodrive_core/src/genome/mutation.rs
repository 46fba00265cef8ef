use super::*;
use crate::rng::symmetric_unit;
use ndarray::Array2;
use rand::Rng;

/// Mutates each weight matrix independently with probability `rate`.
///
/// Biases are never mutated. Returns the number of matrices touched.
pub fn mutate_with_rng<R: Rng>(genome: &mut Genome, rate: f32, rng: &mut R) -> usize {
    let mut mutated = 0;
    for matrix in &mut genome.weights {
        if rng.gen::<f32>() < rate {
            mutate_matrix(matrix, rng);
            mutated += 1;
        }
    }
    mutated
}

/// Number of cells a single matrix mutation perturbs: uniform in
/// `[1, cells / 7)`, or exactly one when that range is empty.
pub fn mutation_points<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> usize {
    let upper = rows * cols / 7;
    if upper > 1 {
        rng.gen_range(1..upper)
    } else {
        1
    }
}

/// Adds a `[-1, 1]` perturbation to random cells, clamping each to `[-1, 1]`.
/// Returns the number of perturbations applied.
pub fn mutate_matrix<R: Rng>(matrix: &mut Array2<f32>, rng: &mut R) -> usize {
    let (rows, cols) = matrix.dim();
    if rows == 0 || cols == 0 {
        return 0;
    }
    let points = mutation_points(rows, cols, rng);
    for _ in 0..points {
        let col = rng.gen_range(0..cols);
        let row = rng.gen_range(0..rows);
        let cell = &mut matrix[[row, col]];
        *cell = (*cell + symmetric_unit(rng)).clamp(-1.0, 1.0);
    }
    points
}
