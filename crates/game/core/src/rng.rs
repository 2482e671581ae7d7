//! Seeded random number generation.
//!
//! Every random decision in the crate (partition splits, room sizes, door
//! placement, spawn tables) draws from a single [`GameRng`] owned by the
//! game. Given the same seed, generation and population are reproducible,
//! and the generator state travels with saved snapshots so a restored game
//! continues the same sequence.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic generator used throughout the simulation.
pub type GameRng = ChaCha8Rng;

/// Creates a generator from a 64-bit seed.
pub fn seeded(seed: u64) -> GameRng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Uniform integer in `[min, max]`; collapses to `min` when the range is empty.
pub fn range_inclusive<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    if min >= max {
        return min;
    }
    rng.gen_range(min..=max)
}

/// Bernoulli trial; probabilities outside `[0, 1]` are clamped.
pub fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.gen_bool(probability.clamp(0.0, 1.0))
}

/// Picks an index from a weighted table. Returns `None` when every weight is zero.
pub fn weighted_index<R, T, F>(rng: &mut R, entries: &[T], weight: F) -> Option<usize>
where
    R: Rng + ?Sized,
    F: Fn(&T) -> u32,
{
    let total: u64 = entries.iter().map(|entry| u64::from(weight(entry))).sum();
    if total == 0 {
        return None;
    }

    let mut roll = rng.gen_range(0..total);
    for (index, entry) in entries.iter().enumerate() {
        let w = u64::from(weight(entry));
        if roll < w {
            return Some(index);
        }
        roll -= w;
    }
    None
}
