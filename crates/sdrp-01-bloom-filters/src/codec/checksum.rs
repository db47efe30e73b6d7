//! RFC 1071 Internet checksum

/// One's-complement sum of big-endian 16-bit words, complemented.
///
/// An odd trailing byte is padded with zero on the right.
pub fn checksum(bytes: &[u8]) -> u16 {
    let mut sum: u32 = bytes
        .chunks(2)
        .map(|chunk| {
            let high = u32::from(chunk[0]) << 8;
            let low = chunk.get(1).copied().map(u32::from).unwrap_or(0);
            high | low
        })
        .fold(0u32, |acc, word| acc.wrapping_add(word));

    while sum >> 16 != 0 {
        sum = (sum & 0xFFFF) + (sum >> 16);
    }

    !(sum as u16)
}
