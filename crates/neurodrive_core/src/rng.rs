//! Random number helpers shared by initialisation, selection, crossover and
//! mutation.
//!
//! Every random draw in the engine goes through a caller-supplied `Rng`, so a
//! seeded [`ChaCha8Rng`] reproduces a whole run, genome handles included.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use uuid::Uuid;

/// Returns a generator seeded from `seed`, or from OS entropy when `None`.
#[must_use]
pub fn seeded_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Uniform draw from `[-1, 1]`.
pub fn symmetric_unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    rng.gen_range(-1.0..=1.0)
}

/// Fair coin used by crossover slot assignment.
pub fn coin_flip<R: Rng + ?Sized>(rng: &mut R) -> bool {
    rng.gen::<f32>() < 0.5
}

/// Genome handle drawn from the run's generator.
pub fn genome_id<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    Uuid::from_u128(rng.gen::<u128>())
}
