//! WebSocket message types for the live chat protocol.
//!
//! Every frame is a JSON text frame of the form
//! `{"event": "<name>", "data": {...}}`, with `data` omitted when an event
//! carries no payload.
//!
//! - Server → Client: connection greeting, agent status, match notices,
//!   relayed messages, chat end, pong
//! - Client → Server: register agent, request chat, send message, ping

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::domain::broker::BrokerEvent;
use crate::domain::foundation::{AgentStatus, ConnectionId};

// ============================================
// Server → Client Messages
// ============================================

/// All message types that can be sent from server to client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerMessage {
    /// Sent once, right after the connection is registered.
    Connected(ConnectedMessage),

    /// An agent came online or went offline.
    AgentStatus(AgentStatusMessage),

    /// Sent to the agent picked for a chat.
    NewLiveChat(NewLiveChatMessage),

    /// Sent to the user whose chat request was matched.
    LiveChatConnected(LiveChatConnectedMessage),

    /// No agent could take the chat request.
    NoAgentsAvailable,

    /// Chat text from the partner.
    ReceiveMessage(ReceiveMessageData),

    /// The partner disconnected.
    ChatEnded,

    /// Heartbeat response.
    Pong(PongMessage),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectedMessage {
    pub connection_id: ConnectionId,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentStatusMessage {
    pub agent_id: ConnectionId,
    pub status: AgentStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLiveChatMessage {
    pub user_id: ConnectionId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveChatConnectedMessage {
    pub agent_id: ConnectionId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceiveMessageData {
    pub from: ConnectionId,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PongMessage {
    pub timestamp: String,
}

impl ServerMessage {
    pub fn connected(connection_id: ConnectionId) -> Self {
        ServerMessage::Connected(ConnectedMessage {
            connection_id,
            timestamp: now_rfc3339(),
        })
    }

    pub fn pong() -> Self {
        ServerMessage::Pong(PongMessage {
            timestamp: now_rfc3339(),
        })
    }

    /// Serialize to the JSON text sent over the socket.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl From<&BrokerEvent> for ServerMessage {
    fn from(event: &BrokerEvent) -> Self {
        match event {
            BrokerEvent::AgentStatus { agent_id, status } => {
                ServerMessage::AgentStatus(AgentStatusMessage {
                    agent_id: *agent_id,
                    status: *status,
                })
            }
            BrokerEvent::NewLiveChat { user_id } => {
                ServerMessage::NewLiveChat(NewLiveChatMessage { user_id: *user_id })
            }
            BrokerEvent::LiveChatConnected { agent_id } => {
                ServerMessage::LiveChatConnected(LiveChatConnectedMessage {
                    agent_id: *agent_id,
                })
            }
            BrokerEvent::NoAgentsAvailable => ServerMessage::NoAgentsAvailable,
            BrokerEvent::ReceiveMessage { from, message } => {
                ServerMessage::ReceiveMessage(ReceiveMessageData {
                    from: *from,
                    message: message.clone(),
                })
            }
            BrokerEvent::ChatEnded => ServerMessage::ChatEnded,
        }
    }
}

fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

// ============================================
// Client → Server Messages
// ============================================

/// All message types that can be received from client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientMessage {
    RegisterAgent,
    RequestLiveChat,
    /// `message` is empty when the payload lacks a string `message` field.
    SendMessage { message: String },
    Ping,
}

/// Errors decoding an inbound frame. Logged and otherwise ignored.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Malformed frame: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Unknown event '{0}'")]
    UnknownEvent(String),
}

#[derive(Debug, Deserialize)]
struct InboundFrame {
    event: String,
    #[serde(default)]
    data: Value,
}

impl ClientMessage {
    /// Decode a JSON text frame.
    ///
    /// Only the envelope must be well-formed; payload fields that are
    /// missing or of the wrong type fall back to defaults.
    pub fn decode(text: &str) -> Result<Self, ProtocolError> {
        let frame: InboundFrame = serde_json::from_str(text)?;

        match frame.event.as_str() {
            "register_agent" => Ok(ClientMessage::RegisterAgent),
            "request_live_chat" => Ok(ClientMessage::RequestLiveChat),
            "send_message" => Ok(ClientMessage::SendMessage {
                message: frame
                    .data
                    .get("message")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            }),
            "ping" => Ok(ClientMessage::Ping),
            _ => Err(ProtocolError::UnknownEvent(frame.event)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ClientMessage::RegisterAgent => "register_agent",
            ClientMessage::RequestLiveChat => "request_live_chat",
            ClientMessage::SendMessage { .. } => "send_message",
            ClientMessage::Ping => "ping",
        }
    }
}
