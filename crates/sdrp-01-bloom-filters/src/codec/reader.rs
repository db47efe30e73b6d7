//! Big-endian reader with offset tracking

use crate::error::FilterError;

/// Cursor over received bytes.
#[derive(Debug, Clone)]
pub struct WireReader<'a> {
    buffer: &'a [u8],
    offset: usize,
}

impl<'a> WireReader<'a> {
    pub fn new(buffer: &'a [u8]) -> Self {
        Self { buffer, offset: 0 }
    }

    /// Current read offset.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.offset
    }

    /// Borrow the next `len` bytes and advance past them.
    pub fn unpack(&mut self, len: usize) -> Result<&'a [u8], FilterError> {
        if len > self.remaining() {
            return Err(FilterError::TruncatedInput {
                needed: len,
                available: self.remaining(),
            });
        }
        let bytes = &self.buffer[self.offset..self.offset + len];
        self.offset += len;
        Ok(bytes)
    }

    /// Look at the next byte without consuming it.
    pub fn peek_u8(&self) -> Option<u8> {
        self.buffer.get(self.offset).copied()
    }

    pub fn read_u8(&mut self) -> Result<u8, FilterError> {
        Ok(self.unpack(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16, FilterError> {
        let mut raw = [0u8; 2];
        raw.copy_from_slice(self.unpack(2)?);
        Ok(u16::from_be_bytes(raw))
    }

    pub fn read_u32(&mut self) -> Result<u32, FilterError> {
        let mut raw = [0u8; 4];
        raw.copy_from_slice(self.unpack(4)?);
        Ok(u32::from_be_bytes(raw))
    }

    pub fn read_u64(&mut self) -> Result<u64, FilterError> {
        let mut raw = [0u8; 8];
        raw.copy_from_slice(self.unpack(8)?);
        Ok(u64::from_be_bytes(raw))
    }
}
