//! Bloom filter parameter sizing
//!
//! Formulas, for predicted element count `n` and false-positive rate `p`:
//! - `M = ceil(-n * ln(p) / ln(2)^2)` -- table size in cells
//! - `k = floor((M / n) * ln(2))`     -- hash count
//! - `M` is then rounded up to the next multiple of 8
//!
//! Every `(n, p)` pair is computed once and then served from a shared
//! memo cache; nodes size many filters with the same few pairs.

use std::f64::consts::LN_2;
use std::num::NonZeroUsize;
use std::sync::OnceLock;

use lru::LruCache;
use parking_lot::Mutex;

/// Predicted element count used when no better estimate is known.
pub const DEFAULT_PREDICTED_ELEMENT_COUNT: usize = 30;

/// False-positive rate used when no better target is known.
/// Also the fallback for out-of-range rates (`p >= 1`).
pub const DEFAULT_FALSE_POSITIVE_RATE: f64 = 0.1;

/// Cells per wire byte.
pub const BITS_PER_BYTE: usize = 8;

/// Memo cache capacity (distinct `(n, p)` pairs kept).
const PARAMETER_CACHE_CAPACITY: usize = 256;

/// Table size and hash count for a filter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BloomParameters {
    /// Number of counters (M)
    pub table_size: usize,
    /// Number of chained hashes per element (k)
    pub hash_count: usize,
}

impl BloomParameters {
    /// Parameters of the canonical empty filter.
    pub const EMPTY: Self = Self {
        table_size: 0,
        hash_count: 0,
    };

    /// Theoretical false-positive rate after inserting `n` elements.
    ///
    /// FPR = (1 - e^(-kn/m))^k
    pub fn expected_false_positive_rate(&self, n: usize) -> f64 {
        calculate_fpr(self.table_size, n, self.hash_count)
    }
}

type CacheKey = (usize, u64);

fn parameter_cache() -> &'static Mutex<LruCache<CacheKey, BloomParameters>> {
    static CACHE: OnceLock<Mutex<LruCache<CacheKey, BloomParameters>>> = OnceLock::new();
    CACHE.get_or_init(|| {
        let capacity = NonZeroUsize::new(PARAMETER_CACHE_CAPACITY).unwrap_or(NonZeroUsize::MIN);
        Mutex::new(LruCache::new(capacity))
    })
}

/// Clamp a requested rate into `(0, 1)`.
fn sanitize_rate(false_positive_rate: f64) -> f64 {
    if false_positive_rate > 0.0 && false_positive_rate < 1.0 {
        false_positive_rate
    } else {
        DEFAULT_FALSE_POSITIVE_RATE
    }
}

/// Compute `(M, k)` for `num_elements` at `false_positive_rate`, memoized.
///
/// Rates outside `(0, 1)` fall back to [`DEFAULT_FALSE_POSITIVE_RATE`].
/// `num_elements == 0` yields the empty-filter parameters.
pub fn calculate_parameters(num_elements: usize, false_positive_rate: f64) -> BloomParameters {
    if num_elements == 0 {
        return BloomParameters::EMPTY;
    }

    let rate = sanitize_rate(false_positive_rate);
    let key = (num_elements, rate.to_bits());

    let mut cache = parameter_cache().lock();
    if let Some(params) = cache.get(&key) {
        return *params;
    }

    let params = compute_parameters(num_elements, rate);
    tracing::trace!(
        n = num_elements,
        p = rate,
        m = params.table_size,
        k = params.hash_count,
        expected_fpr = params.expected_false_positive_rate(num_elements),
        "computed bloom parameters"
    );
    cache.put(key, params);
    params
}

fn compute_parameters(num_elements: usize, rate: f64) -> BloomParameters {
    let n = num_elements as f64;
    let raw_size = (-n * rate.ln() / (LN_2 * LN_2)).ceil() as usize;
    let hash_count = ((raw_size as f64 / n) * LN_2).floor() as usize;

    BloomParameters {
        table_size: round_up_to_byte(raw_size),
        hash_count,
    }
}

/// Round a cell count up to the next multiple of [`BITS_PER_BYTE`].
pub fn round_up_to_byte(cells: usize) -> usize {
    cells.div_ceil(BITS_PER_BYTE) * BITS_PER_BYTE
}

fn calculate_fpr(m: usize, n: usize, k: usize) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
