//! Beacon: periodic announcement of a node's 1-hop neighbourhood

use sdrp_01_bloom_filters::{CountingBloomFilter, FilterError, WireDecode, WireEncode, WireReader, WireWriter};

use super::{expect_type, PacketType};
use crate::domain::errors::ProtocolError;
use crate::domain::types::NetworkAddress;

/// Wire layout: `type (u8) | source (u16) | neighbours (filter)`.
#[derive(Debug, Clone)]
pub struct Beacon {
    pub source: NetworkAddress,
    /// Addresses of the sender's 1-hop neighbours
    pub neighbours: CountingBloomFilter,
}

impl Beacon {
    pub fn new(source: NetworkAddress, neighbours: CountingBloomFilter) -> Self {
        Self { source, neighbours }
    }

    pub fn decode(reader: &mut WireReader<'_>) -> Result<Self, ProtocolError> {
        expect_type(reader, PacketType::Beacon)?;
        let source = reader
            .read_u16()
            .map(NetworkAddress::new)
            .map_err(ProtocolError::Deserialization)?;
        let neighbours =
            CountingBloomFilter::decode(reader).map_err(ProtocolError::Deserialization)?;
        Ok(Self { source, neighbours })
    }
}

impl WireEncode for Beacon {
    fn encode(&self, writer: &mut WireWriter) -> Result<(), FilterError> {
        writer.write_u8(PacketType::Beacon.tag())?;
        writer.write_u16(self.source.as_u16())?;
        self.neighbours.encode(writer)
    }
}
