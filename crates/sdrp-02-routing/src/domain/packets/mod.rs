//! # Packets
//!
//! Every packet starts with a one-byte type tag:
//!
//! | Tag    | Packet                   |
//! |--------|--------------------------|
//! | `0x00` | [`Beacon`]               |
//! | `0x01` | [`ServiceAdvertisement`] |
//!
//! Multi-byte integers are big-endian; filters use the presence-bit
//! encoding of `sdrp-01-bloom-filters`.

mod advertisement;
mod beacon;

pub use advertisement::ServiceAdvertisement;
pub use beacon::Beacon;

use sdrp_01_bloom_filters::{WireEncode, WireReader, WireWriter};

use super::errors::ProtocolError;

/// Leading type tag of a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PacketType {
    Beacon = 0x00,
    ServiceAdvertisement = 0x01,
}

impl PacketType {
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for PacketType {
    type Error = ProtocolError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        match tag {
            0x00 => Ok(Self::Beacon),
            0x01 => Ok(Self::ServiceAdvertisement),
            other => Err(ProtocolError::UnknownPacketType(other)),
        }
    }
}

/// A decoded packet of either type.
#[derive(Debug, Clone)]
pub enum Packet {
    Beacon(Beacon),
    Advertisement(ServiceAdvertisement),
}

impl Packet {
    /// Decode a packet, dispatching on its type tag.
    pub fn decode(bytes: &[u8]) -> Result<Self, ProtocolError> {
        let mut reader = WireReader::new(bytes);
        let tag = reader.peek_u8().ok_or(ProtocolError::EmptyPacket)?;

        match PacketType::try_from(tag)? {
            PacketType::Beacon => Beacon::decode(&mut reader).map(Self::Beacon),
            PacketType::ServiceAdvertisement => {
                ServiceAdvertisement::decode(&mut reader).map(Self::Advertisement)
            }
        }
    }

    pub fn packet_type(&self) -> PacketType {
        match self {
            Self::Beacon(_) => PacketType::Beacon,
            Self::Advertisement(_) => PacketType::ServiceAdvertisement,
        }
    }
}

/// Read and check the leading type tag.
fn expect_type(reader: &mut WireReader<'_>, expected: PacketType) -> Result<(), ProtocolError> {
    let actual = reader.read_u8().map_err(ProtocolError::Deserialization)?;
    if actual != expected.tag() {
        return Err(ProtocolError::WrongPacketType {
            expected: expected.tag(),
            actual,
        });
    }
    Ok(())
}

/// Serialize `packet` into a buffer of at most `packet_size` bytes.
pub fn encode_packet<P: WireEncode>(packet: &P, packet_size: usize) -> Result<Vec<u8>, ProtocolError> {
    let mut writer = WireWriter::new(packet_size);
    packet
        .encode(&mut writer)
        .map_err(ProtocolError::Serialization)?;
    Ok(writer.into_bytes())
}
