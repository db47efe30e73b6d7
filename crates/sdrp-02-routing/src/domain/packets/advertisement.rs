//! Service advertisement: a node's services, flooded through selected relays

use sdrp_01_bloom_filters::{CountingBloomFilter, FilterError, WireDecode, WireEncode, WireReader, WireWriter};

use super::{expect_type, PacketType};
use crate::domain::errors::ProtocolError;
use crate::domain::types::NetworkAddress;

/// Wire layout, in order:
///
/// ```text
/// type (u8) | source (u16) | destinations | neighbours | services
///           | sequence (u8) | hops (u8) | max_ttl (u8)
/// ```
#[derive(Debug, Clone)]
pub struct ServiceAdvertisement {
    /// Originator of the advertisement (not the last relay)
    pub source: NetworkAddress,
    /// Relays selected by the last sender
    pub destinations: CountingBloomFilter,
    /// Services offered by `source`
    pub services: CountingBloomFilter,
    /// Last sender's 1-hop neighbours; only populated in reduced MPR mode
    pub neighbours: CountingBloomFilter,
    pub sequence: u8,
    pub hops: u8,
    pub max_ttl: u8,
}

impl ServiceAdvertisement {
    /// A fresh advertisement with zero hops.
    pub fn new(
        source: NetworkAddress,
        destinations: CountingBloomFilter,
        services: CountingBloomFilter,
        neighbours: CountingBloomFilter,
        sequence: u8,
        max_ttl: u8,
    ) -> Self {
        Self {
            source,
            destinations,
            services,
            neighbours,
            sequence,
            hops: 0,
            max_ttl,
        }
    }

    pub fn increment_hops(&mut self) {
        self.hops = self.hops.saturating_add(1);
    }

    pub fn decode(reader: &mut WireReader<'_>) -> Result<Self, ProtocolError> {
        expect_type(reader, PacketType::ServiceAdvertisement)?;
        Self::decode_body(reader).map_err(ProtocolError::Deserialization)
    }

    fn decode_body(reader: &mut WireReader<'_>) -> Result<Self, FilterError> {
        let source = NetworkAddress::new(reader.read_u16()?);
        let destinations = CountingBloomFilter::decode(reader)?;
        let neighbours = CountingBloomFilter::decode(reader)?;
        let services = CountingBloomFilter::decode(reader)?;
        Ok(Self {
            source,
            destinations,
            services,
            neighbours,
            sequence: reader.read_u8()?,
            hops: reader.read_u8()?,
            max_ttl: reader.read_u8()?,
        })
    }
}

impl WireEncode for ServiceAdvertisement {
    fn encode(&self, writer: &mut WireWriter) -> Result<(), FilterError> {
        writer.write_u8(PacketType::ServiceAdvertisement.tag())?;
        writer.write_u16(self.source.as_u16())?;
        self.destinations.encode(writer)?;
        self.neighbours.encode(writer)?;
        self.services.encode(writer)?;
        writer.write_u8(self.sequence)?;
        writer.write_u8(self.hops)?;
        writer.write_u8(self.max_ttl)
    }
}
