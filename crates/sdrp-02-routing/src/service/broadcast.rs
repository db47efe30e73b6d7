use sdrp_01_bloom_filters::{CountingBloomFilter, WireEncode};
use tracing::trace;

use crate::domain::{
    encode_packet, Beacon, MprSelectionMode, NetworkAddress, PacketType, ProtocolError,
    ServiceAdvertisement,
};
use crate::service::RoutingManager;

impl RoutingManager {
    pub(crate) fn broadcast_beacon(&mut self) -> Result<(), ProtocolError> {
        if self.monitor.mode() != MprSelectionMode::Mpr {
            return Ok(());
        }

        assert!(
            self.local.neighbours.table_size() > 0,
            "local neighbours filter of node {} has size 0",
            self.local.address
        );

        let beacon = Beacon::new(self.local.address, self.local.neighbours.clone());
        self.transmit(&beacon, PacketType::Beacon)
    }

    pub(crate) fn originate_advertisement(&mut self) -> Result<(), ProtocolError> {
        if !self.local.services.has_elements() {
            return Ok(());
        }

        self.sequence = self.sequence.wrapping_add(1);
        let advertisement = ServiceAdvertisement::new(
            self.local.address,
            CountingBloomFilter::empty(),
            self.local.services.clone(),
            CountingBloomFilter::empty(),
            self.sequence,
            self.config.max_ttl,
        );
        self.forward_advertisement(advertisement)
    }

    /// Shared send path for originated and relayed advertisements.
    ///
    /// Stamps the current relay selection, and in reduced MPR mode the
    /// local neighbourhood, before broadcasting.
    pub(crate) fn forward_advertisement(
        &mut self,
        mut advertisement: ServiceAdvertisement,
    ) -> Result<(), ProtocolError> {
        advertisement.destinations = self.monitor.mpr_filter();
        advertisement.neighbours = if self.monitor.mode() == MprSelectionMode::ReducedMpr {
            self.monitor.neighbour_filter().clone()
        } else {
            CountingBloomFilter::empty()
        };

        self.transmit(&advertisement, PacketType::ServiceAdvertisement)
    }

    fn transmit<P: WireEncode>(
        &self,
        packet: &P,
        packet_type: PacketType,
    ) -> Result<(), ProtocolError> {
        match encode_packet(packet, self.config.packet_size) {
            Ok(bytes) => {
                trace!(?packet_type, size = bytes.len(), "broadcasting");
                self.host.send(&bytes, NetworkAddress::BROADCAST);
                self.diagnostics
                    .packet_sent(packet_type, bytes.len(), self.now());
                Ok(())
            }
            Err(error) => {
                self.diagnostics.protocol_error(&error);
                Err(error)
            }
        }
    }
}
