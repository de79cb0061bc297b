//! Registry of live WebSocket connections.
//!
//! Maps each [`ConnectionId`] to the sender half of that connection's
//! outbound queue. A writer task per connection drains the queue into the
//! socket, so pushing here never waits on the network.
//!
//! ```text
//! SessionBroker ──deliver──▶ ConnectionRegistry
//!                             ├── conn-a ─▶ mpsc ─▶ writer ─▶ socket
//!                             ├── conn-b ─▶ mpsc ─▶ writer ─▶ socket
//!                             └── conn-c ─▶ mpsc ─▶ writer ─▶ socket
//! ```

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use tokio::sync::mpsc;

use crate::domain::broker::BrokerEvent;
use crate::domain::foundation::ConnectionId;
use crate::ports::EventSink;

use super::messages::ServerMessage;

/// Sender half of a connection's outbound queue.
pub type ConnectionSender = mpsc::UnboundedSender<ServerMessage>;

/// Tracks live connections and delivers messages to them.
///
/// # Thread Safety
///
/// Uses `RwLock` since deliveries (reads) vastly outnumber connects and
/// disconnects (writes).
#[derive(Debug, Default)]
pub struct ConnectionRegistry {
    connections: RwLock<HashMap<ConnectionId, ConnectionSender>>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a live connection.
    pub fn register(&self, id: ConnectionId, sender: ConnectionSender) {
        let mut connections = self
            .connections
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        connections.insert(id, sender);

        tracing::debug!(
            connection_id = %id,
            total_connections = connections.len(),
            "Connection registered"
        );
    }

    /// Remove a connection. Returns `true` if it was registered.
    pub fn unregister(&self, id: &ConnectionId) -> bool {
        let mut connections = self
            .connections
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        let removed = connections.remove(id).is_some();

        tracing::debug!(
            connection_id = %id,
            remaining_connections = connections.len(),
            "Connection unregistered"
        );
        removed
    }

    pub fn is_live(&self, id: &ConnectionId) -> bool {
        self.read().contains_key(id)
    }

    pub fn connection_count(&self) -> usize {
        self.read().len()
    }

    /// Queue `message` for one connection. Unknown or closed connections are
    /// skipped.
    pub fn send_message(&self, id: ConnectionId, message: ServerMessage) {
        match self.read().get(&id) {
            Some(sender) => {
                if sender.send(message).is_err() {
                    tracing::debug!(connection_id = %id, "Outbound queue closed, message dropped");
                }
            }
            None => {
                tracing::debug!(connection_id = %id, "No live connection for message");
            }
        }
    }

    /// Queue `message` for every live connection.
    pub fn broadcast_message(&self, message: ServerMessage) {
        for sender in self.read().values() {
            // Ignore send errors (the connection is already closing)
            let _ = sender.send(message.clone());
        }
    }

    fn read(
        &self,
    ) -> std::sync::RwLockReadGuard<'_, HashMap<ConnectionId, ConnectionSender>> {
        self.connections.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl EventSink for ConnectionRegistry {
    fn send_to(&self, target: ConnectionId, event: &BrokerEvent) {
        self.send_message(target, ServerMessage::from(event));
    }

    fn broadcast(&self, event: &BrokerEvent) {
        self.broadcast_message(ServerMessage::from(event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::AgentStatus;

    #[test]
    fn register_and_unregister_track_liveness() {
        let registry = ConnectionRegistry::new();
        let id = ConnectionId::new();
        let (tx, _rx) = mpsc::unbounded_channel();

        registry.register(id, tx);
        assert!(registry.is_live(&id));
        assert_eq!(registry.connection_count(), 1);

        assert!(registry.unregister(&id));
        assert!(!registry.is_live(&id));
        assert!(!registry.unregister(&id));
    }

    #[tokio::test]
    async fn send_to_reaches_only_the_target() {
        let registry = ConnectionRegistry::new();
        let a = ConnectionId::new();
        let b = ConnectionId::new();
        let (tx_a, mut rx_a) = mpsc::unbounded_channel();
        let (tx_b, mut rx_b) = mpsc::unbounded_channel();
        registry.register(a, tx_a);
        registry.register(b, tx_b);

        registry.send_to(a, &BrokerEvent::ChatEnded);

        assert_eq!(rx_a.recv().await, Some(ServerMessage::ChatEnded));
        assert!(rx_b.try_recv().is_err());
    }

    #[tokio::test]
    async fn broadcast_reaches_every_connection() {
        let registry = ConnectionRegistry::new();
        let agent = ConnectionId::new();
        let mut receivers = Vec::new();
        for _ in 0..3 {
            let (tx, rx) = mpsc::unbounded_channel();
            registry.register(ConnectionId::new(), tx);
            receivers.push(rx);
        }

        registry.broadcast(&BrokerEvent::AgentStatus {
            agent_id: agent,
            status: AgentStatus::Offline,
        });

        for rx in receivers.iter_mut() {
            let msg = rx.recv().await.unwrap();
            assert!(matches!(msg, ServerMessage::AgentStatus(ref s) if s.agent_id == agent));
        }
    }

    #[test]
    fn send_to_unknown_or_closed_connection_is_noop() {
        let registry = ConnectionRegistry::new();
        let id = ConnectionId::new();
        let (tx, rx) = mpsc::unbounded_channel();
        registry.register(id, tx);
        drop(rx);

        registry.send_to(id, &BrokerEvent::ChatEnded);
        registry.send_to(ConnectionId::new(), &BrokerEvent::ChatEnded);
    }
}
