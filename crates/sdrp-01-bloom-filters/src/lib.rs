//! # SDRP-01 Bloom Filters
//!
//! Counting Bloom filters used as the wire currency of the Service Discovery
//! Routing Protocol. Neighbour sets, service sets and relay selections all
//! travel between nodes as filters built by this crate.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): Pure filter logic, no I/O
//!   - `CountingBloomFilter`: counters per cell, set algebra, removal
//!   - `BloomParameters`: `(M, k)` sizing from `(n, p)`, memoized
//!   - `hash_functions`: MurmurHash seed chaining for index derivation
//!
//! - **Codec Layer** (`codec/`): Fixed-width big-endian primitives
//!   - `WireWriter` / `WireReader`: bounded buffers with offset tracking
//!   - `WireEncode` / `WireDecode`: implemented by filters and packets
//!   - `checksum`: RFC 1071 one's-complement checksum
//!
//! ## Invariants
//!
//! - No false negatives: after `insert(id)`, `contains(id)` is true.
//! - Table sizes computed from `(n, p)` are multiples of 8.
//! - Only the presence predicate crosses the wire. A filter decoded from
//!   bytes has every counter in `{0, 1}`; multiplicities are local state.
//!
//! ## Usage Example
//!
//! ```
//! use sdrp_01_bloom_filters::{CountingBloomFilter, WireDecode, WireEncode, WireReader, WireWriter};
//!
//! let mut filter = CountingBloomFilter::with_capacity(10, 0.1);
//! filter.insert(42);
//! assert!(filter.contains(42));
//!
//! let mut writer = WireWriter::new(1024);
//! filter.encode(&mut writer).unwrap();
//! let bytes = writer.into_bytes();
//!
//! let decoded = CountingBloomFilter::decode(&mut WireReader::new(&bytes)).unwrap();
//! assert!(decoded.contains(42));
//! ```

pub mod codec;
pub mod domain;
pub mod error;

pub use codec::{checksum, WireDecode, WireEncode, WireReader, WireWriter};
pub use domain::{
    calculate_parameters, BloomParameters, CountingBloomFilter, DEFAULT_FALSE_POSITIVE_RATE,
    DEFAULT_PREDICTED_ELEMENT_COUNT,
};
pub use error::FilterError;
