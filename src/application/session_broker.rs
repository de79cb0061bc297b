//! SessionBroker - Serializes inbound events over the shared broker state.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::domain::broker::{BrokerSnapshot, BrokerState, Emission, MatchPolicy};
use crate::domain::foundation::ConnectionId;
use crate::ports::EventSink;

/// Entry point for the four broker events.
///
/// Every handler runs as one critical section: the state is read, changed,
/// and the resulting emissions handed to the sink before the lock is
/// released. Instances are independent; nothing is process-global.
pub struct SessionBroker {
    state: Mutex<BrokerState>,
    sink: Arc<dyn EventSink>,
}

impl SessionBroker {
    pub fn new(policy: MatchPolicy, sink: Arc<dyn EventSink>) -> Self {
        Self {
            state: Mutex::new(BrokerState::new(policy)),
            sink,
        }
    }

    /// Create as an Arc (for sharing across connection tasks).
    pub fn new_shared(policy: MatchPolicy, sink: Arc<dyn EventSink>) -> Arc<Self> {
        Arc::new(Self::new(policy, sink))
    }

    pub fn register_agent(&self, id: ConnectionId) {
        self.apply(|state| state.register_agent(id));
    }

    pub fn request_live_chat(&self, id: ConnectionId) {
        self.apply(|state| state.request_live_chat(id));
    }

    pub fn send_message(&self, id: ConnectionId, message: String) {
        self.apply(|state| state.send_message(id, message));
    }

    /// Releases everything `id` held. Safe to call for ids the broker has
    /// never seen.
    pub fn disconnect(&self, id: ConnectionId) {
        self.apply(|state| state.disconnect(id));
    }

    pub fn partner_of(&self, id: &ConnectionId) -> Option<ConnectionId> {
        self.lock().pairings().partner_of(id)
    }

    pub fn is_agent(&self, id: &ConnectionId) -> bool {
        self.lock().agents().contains(id)
    }

    pub fn snapshot(&self) -> BrokerSnapshot {
        self.lock().snapshot()
    }

    pub fn policy(&self) -> MatchPolicy {
        self.lock().policy()
    }

    fn apply<F>(&self, handler: F)
    where
        F: FnOnce(&mut BrokerState) -> Vec<Emission>,
    {
        let mut state = self.lock();
        let emissions = handler(&mut state);
        for emission in &emissions {
            tracing::trace!(
                event = emission.event.name(),
                target = ?emission.target,
                "Delivering broker event"
            );
            self.sink.deliver(emission);
        }
    }

    // A handler that panicked mid-way must not stop later disconnects from
    // cleaning up, so a poisoned lock is taken over rather than propagated.
    fn lock(&self) -> MutexGuard<'_, BrokerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
