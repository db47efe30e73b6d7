//! Hash functions for Bloom filter index derivation
//!
//! Indices are derived by seed chaining rather than double hashing:
//! `seed_0 = H(id, 0)`, `seed_i = H(id, seed_{i-1})`, `index_i = seed_i mod M`.
//! Every node must derive identical indices for the same identifier, so
//! the identifier is always hashed in little-endian byte order.

use std::io::Cursor;

/// Hash a 16-bit identifier with MurmurHash3 (32-bit) under `seed`.
pub fn murmur_hash(id: u16, seed: u32) -> u32 {
    let bytes = id.to_le_bytes();
    let mut cursor = Cursor::new(&bytes[..]);
    // Reading from an in-memory cursor cannot fail
    murmur3::murmur3_32(&mut cursor, seed).unwrap_or(0)
}

/// Iterator over the `k` chained seeds for an identifier.
#[derive(Debug, Clone)]
pub struct SeedChain {
    id: u16,
    seed: u32,
    remaining: usize,
}

impl Iterator for SeedChain {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.seed = murmur_hash(self.id, self.seed);
        Some(self.seed)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SeedChain {}

/// Chain `k` seeds for `id`, starting from seed 0.
pub fn seed_chain(id: u16, k: usize) -> SeedChain {
    SeedChain {
        id,
        seed: 0,
        remaining: k,
    }
}

/// Compute the `k` table indices for `id` in a table of `m` cells.
///
/// Returns an empty vector for `m == 0`.
pub fn compute_indices(id: u16, k: usize, m: usize) -> Vec<usize> {
    if m == 0 {
        return Vec::new();
    }
    seed_chain(id, k).map(|seed| seed as usize % m).collect()
}
