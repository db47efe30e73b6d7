//! Wire codec for fixed-width primitives
//!
//! All integers are written in network byte order (big-endian) regardless
//! of host endianness. Writers are bounded by a fixed capacity, mirroring
//! the fixed-size packet buffer a node serializes into; exceeding it is a
//! recoverable `BufferTooSmall` error.

mod checksum;
mod reader;
mod writer;

pub use checksum::checksum;
pub use reader::WireReader;
pub use writer::WireWriter;

use crate::error::FilterError;

/// Types with a fixed binary layout that can be written to a [`WireWriter`].
pub trait WireEncode {
    /// Append this value's wire form to `writer`.
    fn encode(&self, writer: &mut WireWriter) -> Result<(), FilterError>;
}

/// Types that can be read back from a [`WireReader`].
pub trait WireDecode: Sized {
    /// Consume this value's wire form from `reader`.
    fn decode(reader: &mut WireReader<'_>) -> Result<Self, FilterError>;
}
