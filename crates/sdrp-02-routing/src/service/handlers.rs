use tracing::{debug, trace};

use crate::domain::{
    Beacon, MprSelectionMode, NetworkAddress, Node, Packet, ProtocolError, Route,
    ServiceAdvertisement,
};
use crate::ports::DropReason;
use crate::service::RoutingManager;

/// Whether `received` repeats `recorded` or trails it by less than `tolerance`.
pub(crate) fn is_duplicate_sequence(recorded: u8, received: u8, tolerance: u8) -> bool {
    received == recorded || (recorded > received && recorded - received < tolerance)
}

impl RoutingManager {
    pub(crate) fn dispatch(
        &mut self,
        source: NetworkAddress,
        packet: &[u8],
    ) -> Result<(), ProtocolError> {
        match Packet::decode(packet) {
            Ok(Packet::Beacon(beacon)) => {
                trace!(%source, "beacon received");
                self.handle_beacon(source, beacon);
                Ok(())
            }
            Ok(Packet::Advertisement(advertisement)) => {
                self.handle_advertisement(source, advertisement)
            }
            Err(error) => {
                self.diagnostics.protocol_error(&error);
                Err(error)
            }
        }
    }

    /// Record the sender as a neighbour with the topology it announced.
    pub(crate) fn handle_beacon(&mut self, source: NetworkAddress, beacon: Beacon) {
        assert!(
            beacon.neighbours.table_size() > 0,
            "beacon from {source} carries a neighbours filter of size 0"
        );

        let neighbour = Node::sighting(source, beacon.neighbours, self.now());
        let events = self.monitor.node_was_seen(neighbour);
        self.apply_neighbour_events(&events);
    }

    pub(crate) fn handle_advertisement(
        &mut self,
        source: NetworkAddress,
        mut advertisement: ServiceAdvertisement,
    ) -> Result<(), ProtocolError> {
        let now = self.now();
        let reduced = self.monitor.mode() == MprSelectionMode::ReducedMpr;

        if reduced {
            let neighbour = Node::sighting(source, advertisement.neighbours.clone(), now);
            let events = self.monitor.node_was_seen(neighbour);
            self.apply_neighbour_events(&events);
        }

        if advertisement.source == self.local.address {
            self.diagnostics
                .packet_dropped(source, DropReason::OwnAdvertisement);
            return Ok(());
        }

        self.routes.add(Route::new(
            advertisement.source,
            source,
            advertisement.services.clone(),
            advertisement.hops,
            now,
        ));

        if let Some(&recorded) = self.sequence_records.get(&advertisement.source) {
            if is_duplicate_sequence(
                recorded,
                advertisement.sequence,
                self.config.sequence_drift_tolerance,
            ) {
                self.diagnostics
                    .packet_dropped(advertisement.source, DropReason::DuplicateSequence);
                return Ok(());
            }
        }
        self.sequence_records
            .insert(advertisement.source, advertisement.sequence);

        if advertisement.hops > advertisement.max_ttl {
            self.diagnostics
                .packet_dropped(advertisement.source, DropReason::TtlExceeded);
            return Ok(());
        }

        let local = self.local.address.as_u16();
        let selected = advertisement.destinations.contains(local);
        let beyond_sender = reduced && !advertisement.neighbours.contains(local);

        if selected || beyond_sender {
            debug!(
                origin = %advertisement.source,
                via = %source,
                sequence = advertisement.sequence,
                hops = advertisement.hops,
                "relaying advertisement"
            );
            advertisement.increment_hops();
            self.forward_advertisement(advertisement)?;
        }
        Ok(())
    }
}
