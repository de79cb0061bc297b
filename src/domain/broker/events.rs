//! Outbound events produced by the broker and where they go.

use crate::domain::foundation::{AgentStatus, ConnectionId};

/// An event the broker wants delivered to one or more connections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrokerEvent {
    /// An agent came online or went offline.
    AgentStatus {
        agent_id: ConnectionId,
        status: AgentStatus,
    },
    /// Sent to an agent that has just been matched with a user.
    NewLiveChat { user_id: ConnectionId },
    /// Sent to a user that has just been matched with an agent.
    LiveChatConnected { agent_id: ConnectionId },
    /// Sent to a user whose chat request found no agent.
    NoAgentsAvailable,
    /// A chat message relayed from the sender's partner.
    ReceiveMessage { from: ConnectionId, message: String },
    /// The other side of the chat went away.
    ChatEnded,
}

impl BrokerEvent {
    /// Wire name of the event.
    pub fn name(&self) -> &'static str {
        match self {
            BrokerEvent::AgentStatus { .. } => "agent_status",
            BrokerEvent::NewLiveChat { .. } => "new_live_chat",
            BrokerEvent::LiveChatConnected { .. } => "live_chat_connected",
            BrokerEvent::NoAgentsAvailable => "no_agents_available",
            BrokerEvent::ReceiveMessage { .. } => "receive_message",
            BrokerEvent::ChatEnded => "chat_ended",
        }
    }
}

/// Recipient of an emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// A single connection.
    Connection(ConnectionId),
    /// Every live connection.
    All,
}

/// A broker event paired with its recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Emission {
    pub target: Target,
    pub event: BrokerEvent,
}

impl Emission {
    pub fn to(id: ConnectionId, event: BrokerEvent) -> Self {
        Self {
            target: Target::Connection(id),
            event,
        }
    }

    pub fn broadcast(event: BrokerEvent) -> Self {
        Self {
            target: Target::All,
            event,
        }
    }
}
