//! Domain Layer - Pure filter logic
//!
//! This layer contains:
//! - Counting Bloom filter and its set algebra
//! - MurmurHash index derivation
//! - Parameter sizing with a memo cache
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod counting_bloom;
pub mod hash_functions;
pub mod parameters;

pub use counting_bloom::CountingBloomFilter;
pub use parameters::{
    calculate_parameters, BloomParameters, DEFAULT_FALSE_POSITIVE_RATE,
    DEFAULT_PREDICTED_ELEMENT_COUNT,
};
