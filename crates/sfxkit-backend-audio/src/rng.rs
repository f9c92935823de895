//! Seedable random streams for synthesis.
//!
//! Every random draw made by the engine goes through a PCG32 generator built
//! here. A single base seed fans out into independent streams (noise
//! refills, mutation draws) by hashing the seed together with a stream key,
//! so two sounds rendered from the same seed are bit-identical.

use rand::SeedableRng;
use rand_pcg::Pcg32;

/// Stream key for noise buffer refills.
pub const NOISE_STREAM: &str = "noise";

/// Stream key for parameter mutation.
pub const MUTATION_STREAM: &str = "mutation";

/// Creates a PCG32 RNG from a 32-bit seed.
///
/// The seed is duplicated into both halves of the 64-bit PCG state.
pub fn create_rng(seed: u32) -> Pcg32 {
    let seed64 = (seed as u64) | ((seed as u64) << 32);
    Pcg32::seed_from_u64(seed64)
}

/// Derives the seed of a named stream from a base seed.
///
/// The base seed (little-endian) and the key bytes are hashed with BLAKE3 and
/// the first four bytes of the digest become the stream seed.
pub fn derive_stream_seed(base_seed: u32, key: &str) -> u32 {
    let mut input = Vec::with_capacity(4 + key.len());
    input.extend_from_slice(&base_seed.to_le_bytes());
    input.extend_from_slice(key.as_bytes());

    let hash = blake3::hash(&input);
    let bytes = hash.as_bytes();
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Creates the RNG for a named stream.
pub fn create_stream_rng(base_seed: u32, key: &str) -> Pcg32 {
    create_rng(derive_stream_seed(base_seed, key))
}

/// Draws a fresh base seed from the thread-local entropy source.
pub fn random_seed() -> u32 {
    rand::random()
}
