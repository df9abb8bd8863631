//! Host-to-engine structural events.
//!
//! Resize and text-change notifications are queued and drained once per
//! frame; they are never processed synchronously inside the notification,
//! because re-measurement needs the next paint boundary for accurate box
//! sizes. Pointer motion does NOT go through this channel - it writes the
//! shared pointer cell directly (see [`crate::pointer`]).

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use glyphpress_core::Rect;

/// Default in-flight capacity; structural events are rare.
pub const EVENT_CAPACITY: usize = 64;

/// Events that restructure the block.
#[derive(Clone, Debug)]
pub enum StructuralEvent {
    /// The container was resized or moved.
    Resized {
        /// New container rectangle in viewport coordinates.
        container: Rect,
    },
    /// The text content changed.
    TextChanged {
        /// New text content.
        text: String,
    },
}

/// Event channel between host notifications and the engine.
pub struct EventBus {
    /// Sender end - cloned out to the host.
    sender: Sender<StructuralEvent>,
    /// Receiver end - drained by the engine each frame.
    receiver: Receiver<StructuralEvent>,
}

impl EventBus {
    /// Creates a bus with the default capacity.
    #[must_use]
    pub fn new() -> Self {
        let (sender, receiver) = bounded(EVENT_CAPACITY);
        Self { sender, receiver }
    }

    /// Creates a sender handle for host notification callbacks.
    #[must_use]
    pub fn sender(&self) -> EventSender {
        EventSender {
            sender: self.sender.clone(),
        }
    }

    /// Receives one pending event (non-blocking).
    #[must_use]
    pub fn try_recv(&self) -> Option<StructuralEvent> {
        self.receiver.try_recv().ok()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Cloneable handle for host resize/text-change callbacks.
#[derive(Clone)]
pub struct EventSender {
    /// Channel sender.
    sender: Sender<StructuralEvent>,
}

impl EventSender {
    /// Sends an event (non-blocking).
    ///
    /// Returns `false` if the channel is full or the engine is disposed; the
    /// event is dropped rather than blocking a host callback.
    #[inline]
    pub fn send(&self, event: StructuralEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_) | TrySendError::Disconnected(_)) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_and_drain() {
        let bus = EventBus::new();
        let sender = bus.sender();

        assert!(sender.send(StructuralEvent::Resized {
            container: Rect::new(0.0, 0.0, 800.0, 400.0),
        }));
        assert!(sender.send(StructuralEvent::TextChanged {
            text: "StarScope".to_string(),
        }));

        assert!(matches!(
            bus.try_recv(),
            Some(StructuralEvent::Resized { .. })
        ));
        assert!(matches!(
            bus.try_recv(),
            Some(StructuralEvent::TextChanged { .. })
        ));
        assert!(bus.try_recv().is_none());
    }

    #[test]
    fn test_send_after_bus_drop_reports_failure() {
        let bus = EventBus::new();
        let sender = bus.sender();
        drop(bus);

        assert!(!sender.send(StructuralEvent::TextChanged {
            text: String::new(),
        }));
    }
}
