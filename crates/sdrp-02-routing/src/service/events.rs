use std::sync::Arc;

use crate::domain::{ListenerId, NeighbourEvent, NeighbourListener};
use crate::service::RoutingManager;

impl RoutingManager {
    /// Mirror neighbour table changes into the local neighbours filter.
    ///
    /// Removal is best effort: a counting filter cannot tell which
    /// insertions share a cell with the removed address.
    pub(crate) fn apply_neighbour_events(&mut self, events: &[NeighbourEvent]) {
        for event in events {
            match event {
                NeighbourEvent::Added(node) => self.local.neighbours.insert(node.address.as_u16()),
                NeighbourEvent::Lost(node) => self.local.neighbours.remove(node.address.as_u16()),
            }
        }
    }

    /// Register an observer of neighbour additions and losses.
    ///
    /// Only a weak handle is kept; dropping the listener unsubscribes it.
    pub fn subscribe(&mut self, listener: &Arc<dyn NeighbourListener>) -> ListenerId {
        self.monitor.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.monitor.unsubscribe(id)
    }
}
