//! In-memory event sink that records emissions for assertions.
//!
//! # Security Note
//!
//! This adapter is for **testing only**. It never delivers anything and it
//! uses `.expect()` on lock operations, which will panic if locks are
//! poisoned. Production code should use the WebSocket connection registry.

use std::sync::Mutex;

use crate::domain::broker::{BrokerEvent, Emission, Target};
use crate::domain::foundation::ConnectionId;
use crate::ports::EventSink;

/// Event sink that keeps every emission in order.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use live_chat_broker::adapters::memory::RecordingSink;
/// use live_chat_broker::application::SessionBroker;
/// use live_chat_broker::domain::broker::MatchPolicy;
/// use live_chat_broker::domain::foundation::ConnectionId;
///
/// let sink = Arc::new(RecordingSink::new());
/// let broker = SessionBroker::new(MatchPolicy::Shared, sink.clone());
/// broker.request_live_chat(ConnectionId::new());
/// assert_eq!(sink.len(), 1);
/// ```
#[derive(Debug, Default)]
pub struct RecordingSink {
    emissions: Mutex<Vec<Emission>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    // === Test Helpers ===

    /// All emissions so far, oldest first.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn emissions(&self) -> Vec<Emission> {
        self.emissions
            .lock()
            .expect("RecordingSink: emissions lock poisoned")
            .clone()
    }

    /// Events addressed directly to `id` (broadcasts excluded).
    pub fn sent_to(&self, id: &ConnectionId) -> Vec<BrokerEvent> {
        self.emissions()
            .into_iter()
            .filter(|e| e.target == Target::Connection(*id))
            .map(|e| e.event)
            .collect()
    }

    /// Events broadcast to all connections.
    pub fn broadcasts(&self) -> Vec<BrokerEvent> {
        self.emissions()
            .into_iter()
            .filter(|e| e.target == Target::All)
            .map(|e| e.event)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.emissions().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Forgets everything recorded so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.emissions
            .lock()
            .expect("RecordingSink: emissions lock poisoned")
            .clear();
    }

    fn record(&self, emission: Emission) {
        self.emissions
            .lock()
            .expect("RecordingSink: emissions lock poisoned")
            .push(emission);
    }
}

impl EventSink for RecordingSink {
    fn send_to(&self, target: ConnectionId, event: &BrokerEvent) {
        self.record(Emission::to(target, event.clone()));
    }

    fn broadcast(&self, event: &BrokerEvent) {
        self.record(Emission::broadcast(event.clone()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order_and_filters_by_target() {
        let sink = RecordingSink::new();
        let a = ConnectionId::new();
        let b = ConnectionId::new();

        sink.send_to(a, &BrokerEvent::NoAgentsAvailable);
        sink.broadcast(&BrokerEvent::ChatEnded);
        sink.send_to(b, &BrokerEvent::ChatEnded);

        assert_eq!(sink.len(), 3);
        assert_eq!(sink.sent_to(&a), vec![BrokerEvent::NoAgentsAvailable]);
        assert_eq!(sink.sent_to(&b), vec![BrokerEvent::ChatEnded]);
        assert_eq!(sink.broadcasts(), vec![BrokerEvent::ChatEnded]);
    }

    #[test]
    fn clear_empties_the_log() {
        let sink = RecordingSink::new();
        sink.broadcast(&BrokerEvent::ChatEnded);

        sink.clear();

        assert!(sink.is_empty());
    }
}
