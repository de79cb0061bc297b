//! EventSink port - Interface for delivering broker emissions.
//!
//! The broker decides *what* to emit and to whom; the sink knows how to reach
//! live connections. Delivery is fire-and-forget: no acknowledgement, no
//! retry, and a missing recipient is silently skipped.

use crate::domain::broker::{BrokerEvent, Emission, Target};
use crate::domain::foundation::ConnectionId;

/// Port for delivering outbound broker events.
///
/// Implementations must not block: the broker calls them while holding its
/// state lock.
pub trait EventSink: Send + Sync {
    /// Deliver `event` to a single connection.
    fn send_to(&self, target: ConnectionId, event: &BrokerEvent);

    /// Deliver `event` to every live connection.
    fn broadcast(&self, event: &BrokerEvent);

    /// Route an emission to `send_to` or `broadcast` by its target.
    fn deliver(&self, emission: &Emission) {
        match emission.target {
            Target::Connection(id) => self.send_to(id, &emission.event),
            Target::All => self.broadcast(&emission.event),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingSink {
        direct: Mutex<Vec<ConnectionId>>,
        broadcasts: Mutex<usize>,
    }

    impl EventSink for CountingSink {
        fn send_to(&self, target: ConnectionId, _event: &BrokerEvent) {
            self.direct.lock().unwrap().push(target);
        }

        fn broadcast(&self, _event: &BrokerEvent) {
            *self.broadcasts.lock().unwrap() += 1;
        }
    }

    // Compile-time check that trait is object-safe
    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn EventSink) {}

    #[test]
    fn deliver_dispatches_on_target() {
        let sink = CountingSink::default();
        let id = ConnectionId::new();

        sink.deliver(&Emission::to(id, BrokerEvent::ChatEnded));
        sink.deliver(&Emission::broadcast(BrokerEvent::NoAgentsAvailable));

        assert_eq!(*sink.direct.lock().unwrap(), vec![id]);
        assert_eq!(*sink.broadcasts.lock().unwrap(), 1);
    }
}
