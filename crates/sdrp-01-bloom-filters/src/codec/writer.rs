//! Bounded big-endian writer

use crate::error::FilterError;

/// Append-only writer over a buffer with a hard capacity.
#[derive(Debug, Clone)]
pub struct WireWriter {
    buffer: Vec<u8>,
    capacity: usize,
}

impl WireWriter {
    /// Create a writer that refuses to grow beyond `capacity` bytes.
    pub fn new(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity.min(4096)),
            capacity,
        }
    }

    /// Bytes written so far (the current offset).
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Bytes still available before the capacity is reached.
    pub fn remaining(&self) -> usize {
        self.capacity - self.buffer.len()
    }

    /// Copy raw bytes into the buffer.
    pub fn pack(&mut self, bytes: &[u8]) -> Result<(), FilterError> {
        if bytes.len() > self.remaining() {
            return Err(FilterError::BufferTooSmall {
                needed: bytes.len(),
                available: self.remaining(),
            });
        }
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    pub fn write_u8(&mut self, value: u8) -> Result<(), FilterError> {
        self.pack(&[value])
    }

    pub fn write_u16(&mut self, value: u16) -> Result<(), FilterError> {
        self.pack(&value.to_be_bytes())
    }

    pub fn write_u32(&mut self, value: u32) -> Result<(), FilterError> {
        self.pack(&value.to_be_bytes())
    }

    pub fn write_u64(&mut self, value: u64) -> Result<(), FilterError> {
        self.pack(&value.to_be_bytes())
    }

    /// View the written bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    /// Consume the writer and return the written bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buffer
    }
}
