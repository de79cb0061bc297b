//! WebSocket upgrade handler for live chat connections.
//!
//! Handles the HTTP → WebSocket upgrade and manages the connection lifecycle:
//! 1. Assign a connection id and queue the `connected` greeting
//! 2. Register the connection's outbound queue
//! 3. Forward queued messages to the socket from a writer task
//! 4. Decode inbound frames and dispatch them to the broker
//! 5. Unregister and run broker disconnect cleanup, however the task ends

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures::{stream::SplitSink, SinkExt, StreamExt};
use tokio::sync::mpsc;

use crate::application::SessionBroker;
use crate::domain::foundation::ConnectionId;

use super::{
    messages::{ClientMessage, ServerMessage},
    registry::{ConnectionRegistry, ConnectionSender},
};

/// State required for WebSocket handling.
#[derive(Clone)]
pub struct WebSocketState {
    /// Broker receiving the connection's events.
    pub broker: Arc<SessionBroker>,
    /// Live connections, also the broker's event sink.
    pub registry: Arc<ConnectionRegistry>,
}

impl WebSocketState {
    pub fn new(broker: Arc<SessionBroker>, registry: Arc<ConnectionRegistry>) -> Self {
        Self { broker, registry }
    }
}

/// Handle WebSocket upgrade requests.
///
/// Route: `GET /ws`
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<WebSocketState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Runs broker cleanup for a connection when dropped.
///
/// Owned by the connection task, so cleanup happens on a clean close, a
/// socket error, a panic, or the task being dropped at shutdown.
struct ConnectionGuard {
    id: ConnectionId,
    state: WebSocketState,
}

impl Drop for ConnectionGuard {
    fn drop(&mut self) {
        self.state.registry.unregister(&self.id);
        self.state.broker.disconnect(self.id);
        tracing::info!(connection_id = %self.id, "Connection closed");
    }
}

/// Handle an established WebSocket connection until either side goes away.
async fn handle_socket(socket: WebSocket, state: WebSocketState) {
    let (sender, mut receiver) = socket.split();
    let connection_id = ConnectionId::new();
    let (tx, rx) = mpsc::unbounded_channel::<ServerMessage>();

    // Queued before registering so the greeting precedes any broadcast.
    let _ = tx.send(ServerMessage::connected(connection_id));
    state.registry.register(connection_id, tx.clone());
    let _guard = ConnectionGuard {
        id: connection_id,
        state: state.clone(),
    };

    tracing::info!(connection_id = %connection_id, "Connection established");

    let mut send_task = tokio::spawn(writer_task(sender, rx, connection_id));

    let recv_loop = async {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Text(text)) => match ClientMessage::decode(&text) {
                    Ok(message) => dispatch(&state.broker, &tx, connection_id, message),
                    Err(e) => {
                        tracing::debug!(
                            connection_id = %connection_id,
                            error = %e,
                            "Ignoring undecodable frame"
                        );
                    }
                },
                Ok(Message::Binary(_)) => {
                    tracing::warn!(
                        connection_id = %connection_id,
                        "Received unsupported binary message"
                    );
                }
                Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                    // WebSocket protocol ping/pong - handled automatically by axum
                }
                Ok(Message::Close(frame)) => {
                    tracing::debug!(
                        connection_id = %connection_id,
                        reason = ?frame,
                        "Client sent close frame"
                    );
                    break;
                }
                Err(e) => {
                    tracing::debug!(
                        connection_id = %connection_id,
                        error = %e,
                        "Receive error"
                    );
                    break;
                }
            }
        }
    };

    tokio::select! {
        _ = &mut send_task => {}
        _ = recv_loop => {}
    }
    send_task.abort();
}

/// Route a decoded client message to the broker.
fn dispatch(
    broker: &SessionBroker,
    tx: &ConnectionSender,
    connection_id: ConnectionId,
    message: ClientMessage,
) {
    tracing::trace!(connection_id = %connection_id, event = message.name(), "Inbound event");

    match message {
        ClientMessage::RegisterAgent => broker.register_agent(connection_id),
        ClientMessage::RequestLiveChat => broker.request_live_chat(connection_id),
        ClientMessage::SendMessage { message } => broker.send_message(connection_id, message),
        ClientMessage::Ping => {
            let _ = tx.send(ServerMessage::pong());
        }
    }
}

/// Writer task: drains the outbound queue into the WebSocket sink.
async fn writer_task(
    mut sender: SplitSink<WebSocket, Message>,
    mut rx: mpsc::UnboundedReceiver<ServerMessage>,
    connection_id: ConnectionId,
) {
    while let Some(message) = rx.recv().await {
        let json = match message.to_json() {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(
                    connection_id = %connection_id,
                    error = %e,
                    "Failed to serialize outbound message"
                );
                continue;
            }
        };

        if let Err(e) = sender.send(Message::Text(json)).await {
            tracing::debug!(
                connection_id = %connection_id,
                "Send error, closing connection: {}",
                e
            );
            break;
        }
    }
}

/// Create axum router for the WebSocket endpoint.
pub fn websocket_router() -> axum::Router<WebSocketState> {
    use axum::routing::get;

    axum::Router::new().route("/ws", get(ws_handler))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::RecordingSink;
    use crate::domain::broker::{BrokerEvent, MatchPolicy};

    fn state() -> WebSocketState {
        let registry = Arc::new(ConnectionRegistry::new());
        let broker = SessionBroker::new_shared(MatchPolicy::Shared, registry.clone());
        WebSocketState::new(broker, registry)
    }

    #[test]
    fn guard_drop_unregisters_and_cleans_broker() {
        let state = state();
        let agent = ConnectionId::new();
        let (tx, _rx) = mpsc::unbounded_channel();
        state.registry.register(agent, tx);
        state.broker.register_agent(agent);

        drop(ConnectionGuard {
            id: agent,
            state: state.clone(),
        });

        assert!(!state.registry.is_live(&agent));
        assert!(!state.broker.is_agent(&agent));
    }

    #[test]
    fn dispatch_routes_to_broker() {
        let sink = Arc::new(RecordingSink::new());
        let broker = SessionBroker::new(MatchPolicy::Shared, sink.clone());
        let (tx, _rx) = mpsc::unbounded_channel();
        let user = ConnectionId::new();

        dispatch(&broker, &tx, user, ClientMessage::RequestLiveChat);

        assert_eq!(sink.sent_to(&user), vec![BrokerEvent::NoAgentsAvailable]);
    }

    #[tokio::test]
    async fn dispatch_answers_ping_on_own_queue() {
        let sink = Arc::new(RecordingSink::new());
        let broker = SessionBroker::new(MatchPolicy::Shared, sink.clone());
        let (tx, mut rx) = mpsc::unbounded_channel();

        dispatch(&broker, &tx, ConnectionId::new(), ClientMessage::Ping);

        assert!(matches!(rx.recv().await, Some(ServerMessage::Pong(_))));
        assert!(sink.is_empty());
    }

    #[test]
    fn websocket_router_creates_route() {
        let _router: axum::Router = websocket_router().with_state(state());
    }
}
