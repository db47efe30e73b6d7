//! # Counting Bloom Filter
//!
//! A Bloom filter with a small counter per cell instead of a single bit.
//!
//! - Insert: increment the counters at the hashed positions
//! - Remove: decrement them, only if the element is currently contained
//! - Membership: true if every hashed counter is nonzero
//!
//! ## Wire Form
//!
//! Only the presence predicate (`counter > 0`) is transmitted, as a
//! bitmask with index `i` at byte `i / 8`, bit `i % 8` (LSB first).
//! Decoding rebuilds each present cell with a counter of 1, so counts
//! above one never survive a round trip. Multiplicities only exist to
//! support local removal bookkeeping before a filter is sent.
//!
//! ## Special Filters
//!
//! - `M = 0` ([`CountingBloomFilter::empty`]) contains nothing.
//! - `M = 1, k = 0` with its counter set ([`CountingBloomFilter::universal`])
//!   contains every id. Any filter with `k = 0` and `M > 0` behaves this
//!   way, which is how high false-positive targets degrade to flooding.

use std::cmp::Ordering;
use std::fmt;

use bitvec::prelude::*;

use crate::codec::{WireDecode, WireEncode, WireReader, WireWriter};
use crate::domain::hash_functions::compute_indices;
use crate::domain::parameters::{
    calculate_parameters, BITS_PER_BYTE, DEFAULT_FALSE_POSITIVE_RATE,
    DEFAULT_PREDICTED_ELEMENT_COUNT,
};
use crate::error::FilterError;

/// Largest table a peer may announce on the wire.
pub const MAX_DECODED_TABLE_SIZE: u64 = 1 << 20;

/// Largest hash count a peer may announce on the wire.
pub const MAX_DECODED_HASH_COUNT: u64 = 64;

/// Width of the `M` and `k` header fields.
const SIZE_FIELD_LEN: usize = 8;

/// Counting Bloom filter over 16-bit ids (addresses and service ids).
///
/// The derived `PartialEq` compares raw counters. Protocol code compares
/// filters with [`try_eq`](Self::try_eq), which looks at presence only.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct CountingBloomFilter {
    /// One counter per cell; `counters.len()` is the table size M
    counters: Vec<u8>,
    /// Number of chained hashes per element (k)
    hash_count: usize,
}

impl CountingBloomFilter {
    /// Size a filter for `num_elements` at `false_positive_rate`.
    pub fn with_capacity(num_elements: usize, false_positive_rate: f64) -> Self {
        let params = calculate_parameters(num_elements, false_positive_rate);
        Self::with_dimensions(params.table_size, params.hash_count)
    }

    /// Build a zeroed filter with explicit `(M, k)`.
    pub fn with_dimensions(table_size: usize, hash_count: usize) -> Self {
        Self {
            counters: vec![0; table_size],
            hash_count,
        }
    }

    /// The canonical empty filter (`M = 0`).
    pub fn empty() -> Self {
        Self::with_dimensions(0, 0)
    }

    /// The 1-cell, 0-hash filter that contains every id.
    pub fn universal() -> Self {
        let mut filter = Self::with_dimensions(1, 0);
        filter.universe();
        filter
    }

    /// Table size (M).
    pub fn table_size(&self) -> usize {
        self.counters.len()
    }

    /// Hash count (k).
    pub fn hash_count(&self) -> usize {
        self.hash_count
    }

    /// Whether any counter is nonzero.
    pub fn has_elements(&self) -> bool {
        self.counters.iter().any(|&c| c != 0)
    }

    fn indices(&self, id: u16) -> Vec<usize> {
        compute_indices(id, self.hash_count, self.table_size())
    }

    fn require_same_size(&self, other: &Self) -> Result<(), FilterError> {
        if self.table_size() == other.table_size() {
            Ok(())
        } else {
            Err(FilterError::mismatch(self.table_size(), other.table_size()))
        }
    }

    fn presence(&self) -> impl Iterator<Item = bool> + '_ {
        self.counters.iter().map(|&c| c > 0)
    }

    /// Add `id`, incrementing each of its k counters.
    pub fn insert(&mut self, id: u16) {
        for index in self.indices(id) {
            self.counters[index] = self.counters[index].saturating_add(1);
        }
    }

    /// Whether `id` may be in the set. An `M = 0` filter contains nothing.
    pub fn contains(&self, id: u16) -> bool {
        if self.counters.is_empty() {
            return false;
        }
        self.indices(id)
            .into_iter()
            .all(|index| self.counters[index] > 0)
    }

    /// Superset test: every cell present in `other` is present in `self`.
    ///
    /// Filters of different sizes, or empty tables, are never supersets.
    pub fn contains_filter(&self, other: &Self) -> bool {
        if self.table_size() != other.table_size() || self.counters.is_empty() {
            return false;
        }
        self.presence()
            .zip(other.presence())
            .all(|(mine, theirs)| mine || !theirs)
    }

    /// Remove `id` if it is contained; counters never drop below zero.
    pub fn remove(&mut self, id: u16) {
        if !self.contains(id) {
            return;
        }
        for index in self.indices(id) {
            self.counters[index] = self.counters[index].saturating_sub(1);
        }
    }

    /// Subtract `other`'s counters cell by cell, clamped at zero.
    pub fn remove_filter(&mut self, other: &Self) -> Result<(), FilterError> {
        self.require_same_size(other)?;
        for (mine, &theirs) in self.counters.iter_mut().zip(&other.counters) {
            *mine = mine.saturating_sub(theirs);
        }
        Ok(())
    }

    /// In-place union: counters are added cell by cell.
    pub fn union(&mut self, other: &Self) -> Result<(), FilterError> {
        self.require_same_size(other)?;
        for (mine, &theirs) in self.counters.iter_mut().zip(&other.counters) {
            *mine = mine.saturating_add(theirs);
        }
        Ok(())
    }

    /// In-place intersection. Counts are not preserved: every cell becomes 0 or 1.
    pub fn intersection(&mut self, other: &Self) -> Result<(), FilterError> {
        self.require_same_size(other)?;
        for (mine, &theirs) in self.counters.iter_mut().zip(&other.counters) {
            *mine = u8::from(*mine > 0 && theirs > 0);
        }
        Ok(())
    }

    /// Hamming distance between the presence predicates of two filters.
    pub fn difference(&self, other: &Self) -> Result<usize, FilterError> {
        self.require_same_size(other)?;
        Ok(self
            .presence()
            .zip(other.presence())
            .filter(|(mine, theirs)| mine != theirs)
            .count())
    }

    /// Same computation as [`difference`](Self::difference).
    pub fn set_difference(&self, other: &Self) -> Result<usize, FilterError> {
        self.difference(other)
    }

    /// Whether subtracting `other` from `self` would clear at least one
    /// present cell, i.e. some cell has `0 < self[i] <= other[i]`.
    pub fn removal_results_in_difference(&self, other: &Self) -> Result<bool, FilterError> {
        self.require_same_size(other)?;
        Ok(self
            .counters
            .iter()
            .zip(&other.counters)
            .any(|(&mine, &theirs)| mine > 0 && mine <= theirs))
    }

    /// Number of cells whose presence predicate is true.
    pub fn set_bytes(&self) -> usize {
        self.presence().filter(|&present| present).count()
    }

    /// Set every counter to 1.
    pub fn universe(&mut self) {
        self.counters.fill(1);
    }

    /// Zero every counter, keeping the dimensions.
    pub fn clear(&mut self) {
        self.counters.fill(0);
    }

    /// Replace the table with a zeroed one of the given dimensions.
    pub fn destructive_resize(&mut self, table_size: usize, hash_count: usize) {
        self.counters = vec![0; table_size];
        self.hash_count = hash_count;
    }

    /// Re-size for `(n, p)`, discarding all counters.
    pub fn reset_with_parameters(&mut self, num_elements: usize, false_positive_rate: f64) {
        let params = calculate_parameters(num_elements, false_positive_rate);
        self.destructive_resize(params.table_size, params.hash_count);
    }

    /// Presence of the cell at `index % M`. Always false for `M = 0`.
    pub fn check(&self, index: usize) -> bool {
        match self.table_size() {
            0 => false,
            m => self.counters[index % m] > 0,
        }
    }

    /// Increment the cell at `index % M`. No-op for `M = 0`.
    pub fn set(&mut self, index: usize) {
        let m = self.table_size();
        if m > 0 {
            let cell = &mut self.counters[index % m];
            *cell = cell.saturating_add(1);
        }
    }

    /// Raw counter at `index`, if in range.
    pub fn counter(&self, index: usize) -> Option<u8> {
        self.counters.get(index).copied()
    }

    /// Presence equality. Filters of different sizes are not comparable.
    pub fn try_eq(&self, other: &Self) -> Result<bool, FilterError> {
        Ok(self.difference(other)? == 0)
    }

    /// Order by number of present cells. Filters of different sizes are not comparable.
    pub fn try_cmp(&self, other: &Self) -> Result<Ordering, FilterError> {
        self.require_same_size(other)?;
        Ok(self.set_bytes().cmp(&other.set_bytes()))
    }

    fn presence_byte_len(&self) -> usize {
        self.table_size().div_ceil(BITS_PER_BYTE).max(1)
    }

    /// Bytes produced by [`WireEncode::encode`].
    pub fn encoded_len(&self) -> usize {
        2 * SIZE_FIELD_LEN + self.presence_byte_len()
    }
}

impl Default for CountingBloomFilter {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_PREDICTED_ELEMENT_COUNT, DEFAULT_FALSE_POSITIVE_RATE)
    }
}

impl fmt::Display for CountingBloomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.presence()
            .try_for_each(|present| f.write_str(if present { "1" } else { "0" }))
    }
}

impl WireEncode for CountingBloomFilter {
    fn encode(&self, writer: &mut WireWriter) -> Result<(), FilterError> {
        if writer.remaining() < self.encoded_len() {
            return Err(FilterError::BufferTooSmall {
                needed: self.encoded_len(),
                available: writer.remaining(),
            });
        }

        let mut bits: BitVec<u8, Lsb0> =
            BitVec::repeat(false, self.presence_byte_len() * BITS_PER_BYTE);
        for (index, present) in self.presence().enumerate() {
            bits.set(index, present);
        }

        writer.write_u64(self.table_size() as u64)?;
        writer.write_u64(self.hash_count as u64)?;
        writer.pack(bits.as_raw_slice())
    }
}

impl WireDecode for CountingBloomFilter {
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, FilterError> {
        let table_size = reader.read_u64()?;
        if table_size > MAX_DECODED_TABLE_SIZE {
            return Err(FilterError::TableTooLarge { size: table_size });
        }
        let hash_count = reader.read_u64()?;
        if hash_count > MAX_DECODED_HASH_COUNT {
            return Err(FilterError::TableTooLarge { size: hash_count });
        }

        let mut filter = Self::with_dimensions(table_size as usize, hash_count as usize);
        let raw = reader.unpack(filter.presence_byte_len())?;
        let bits = BitSlice::<u8, Lsb0>::from_slice(raw);

        for (counter, present) in filter.counters.iter_mut().zip(bits.iter().by_vals()) {
            *counter = u8::from(present);
        }
        Ok(filter)
    }
}
