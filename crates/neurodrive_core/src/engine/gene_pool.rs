use rand::Rng;

/// Attempts at drawing two distinct parents before falling back.
pub const PARENT_RETRIES: usize = 100;

/// Upper bound on the copies a single genome may contribute.
pub const MAX_REPEATS_PER_GENOME: usize = 1_000_000;

/// Weighted multiset of population indices, rebuilt every generation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenePool {
    indices: Vec<usize>,
}

/// Parent indices chosen for one crossover pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParentPair {
    pub a: usize,
    pub b: usize,
    /// `true` when the pool could not supply two distinct parents.
    pub degenerate: bool,
}

impl GenePool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.indices.clear();
    }

    /// Copies contributed by a genome: `fitness * 10` rounded half-to-even.
    /// Negative or non-finite fitness contributes nothing.
    #[must_use]
    pub fn repeat_count(fitness: f32) -> usize {
        let scaled = (fitness * 10.0).round_ties_even();
        if scaled.is_finite() && scaled > 0.0 {
            (scaled as usize).min(MAX_REPEATS_PER_GENOME)
        } else {
            0
        }
    }

    /// Appends `repeat_count(fitness)` copies of `index`. Returns the count.
    pub fn add_weighted(&mut self, index: usize, fitness: f32) -> usize {
        let copies = Self::repeat_count(fitness);
        self.indices.extend(std::iter::repeat(index).take(copies));
        copies
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// How many copies of `index` the pool holds.
    #[must_use]
    pub fn count_of(&self, index: usize) -> usize {
        self.indices.iter().filter(|&&i| i == index).count()
    }

    /// Draws two distinct parents, retrying up to [`PARENT_RETRIES`] times.
    ///
    /// An empty pool, or one that never yields a distinct pair, returns
    /// `fallback` marked as degenerate.
    pub fn select_parents<R: Rng + ?Sized>(
        &self,
        fallback: (usize, usize),
        rng: &mut R,
    ) -> ParentPair {
        if !self.indices.is_empty() {
            for _ in 0..PARENT_RETRIES {
                let a = self.indices[rng.gen_range(0..self.indices.len())];
                let b = self.indices[rng.gen_range(0..self.indices.len())];
                if a != b {
                    return ParentPair {
                        a,
                        b,
                        degenerate: false,
                    };
                }
            }
        }
        ParentPair {
            a: fallback.0,
            b: fallback.1,
            degenerate: true,
        }
    }
}
