//! Neighbour change notifications
//!
//! The registry holds `Weak` handles: it never keeps a subscriber alive,
//! and entries whose subscriber has been dropped are pruned on the next
//! notification.

use std::sync::{Arc, Weak};

use crate::domain::node::Node;

/// Observable neighbour table change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NeighbourEvent {
    Added(Node),
    Lost(Node),
}

impl NeighbourEvent {
    pub fn node(&self) -> &Node {
        match self {
            Self::Added(node) | Self::Lost(node) => node,
        }
    }
}

/// Receiver of neighbour table changes.
pub trait NeighbourListener: Send + Sync {
    fn on_neighbour_added(&self, neighbour: &Node);

    fn on_neighbour_lost(&self, neighbour: &Node);
}

/// Handle returned by [`ListenerRegistry::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub struct ListenerRegistry {
    next_id: u64,
    listeners: Vec<(ListenerId, Weak<dyn NeighbourListener>)>,
}

impl ListenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: &Arc<dyn NeighbourListener>) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Arc::downgrade(listener)));
        id
    }

    /// Returns whether `id` was registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(entry, _)| *entry != id);
        before != self.listeners.len()
    }

    /// Number of registered subscribers that are still alive.
    pub fn len(&self) -> usize {
        self.listeners
            .iter()
            .filter(|(_, listener)| listener.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Deliver `events` in order to every live subscriber.
    pub fn notify(&mut self, events: &[NeighbourEvent]) {
        if events.is_empty() {
            return;
        }
        self.listeners.retain(|(_, listener)| {
            let Some(listener) = listener.upgrade() else {
                return false;
            };
            for event in events {
                match event {
                    NeighbourEvent::Added(node) => listener.on_neighbour_added(node),
                    NeighbourEvent::Lost(node) => listener.on_neighbour_lost(node),
                }
            }
            true
        });
    }
}

impl std::fmt::Debug for ListenerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerRegistry")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
