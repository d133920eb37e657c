//! Seed derivation for independent replicate streams.

use rand::rngs::OsRng;
use rand::RngCore;

/// SplitMix64 finalizer: one step of the generator applied to `z`.
#[inline]
pub fn splitmix64(z: u64) -> u64 {
    let mut z = z.wrapping_add(0x9e3779b97f4a7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

/// Seed for replicate `replicate` of problem `problem` under `base`.
///
/// Distinct `(problem, replicate)` pairs give unrelated streams, and the result
/// does not depend on the order in which replicates are executed.
pub fn replicate_seed(base: u64, problem: usize, replicate: usize) -> u64 {
    let z = splitmix64(base);
    let z = splitmix64(z ^ problem as u64);
    splitmix64(z ^ (replicate as u64).rotate_left(32))
}

/// Use `seed` when given, otherwise draw one from OS entropy.
///
/// A drawn seed is logged at debug level so the run can be replayed.
pub fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(|| {
        let drawn = OsRng.next_u64();
        tracing::debug!(seed = drawn, "no seed configured; drew one from OS entropy");
        drawn
    })
}
