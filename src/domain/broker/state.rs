//! The broker's state machine over the agent pool and pairing table.
//!
//! Each handler mutates the stores and returns the emissions the transport
//! must deliver. Nothing here is fallible: empty states are ordinary outcomes
//! and show up as emissions (or the absence of one).

use crate::domain::foundation::{AgentStatus, ConnectionId};

use super::agent_pool::AgentPool;
use super::events::{BrokerEvent, Emission};
use super::pairing_table::PairingTable;
use super::policy::MatchPolicy;

/// Point-in-time counts for monitoring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrokerSnapshot {
    pub agents_online: usize,
    pub active_pairings: usize,
}

/// Agent pool and pairing table, owned together so every handler sees and
/// changes both in one step.
#[derive(Debug, Default)]
pub struct BrokerState {
    agents: AgentPool,
    pairings: PairingTable,
    policy: MatchPolicy,
}

impl BrokerState {
    pub fn new(policy: MatchPolicy) -> Self {
        Self {
            agents: AgentPool::new(),
            pairings: PairingTable::new(),
            policy,
        }
    }

    pub fn policy(&self) -> MatchPolicy {
        self.policy
    }

    pub fn agents(&self) -> &AgentPool {
        &self.agents
    }

    pub fn pairings(&self) -> &PairingTable {
        &self.pairings
    }

    pub fn snapshot(&self) -> BrokerSnapshot {
        BrokerSnapshot {
            agents_online: self.agents.len(),
            active_pairings: self.pairings.pair_count(),
        }
    }

    /// Marks `id` as an available agent and announces it to everyone.
    pub fn register_agent(&mut self, id: ConnectionId) -> Vec<Emission> {
        if !self.agents.mark_online(id) {
            tracing::debug!(agent_id = %id, "Agent re-registered");
        }
        tracing::info!(agent_id = %id, "Agent is now online");

        vec![Emission::broadcast(BrokerEvent::AgentStatus {
            agent_id: id,
            status: AgentStatus::Online,
        })]
    }

    /// Matches `id` with an agent, or tells it none is available.
    pub fn request_live_chat(&mut self, id: ConnectionId) -> Vec<Emission> {
        let mut emissions = Vec::new();

        if self.policy == MatchPolicy::Exclusive {
            if let Some(previous) = self.pairings.unpair(&id) {
                tracing::info!(
                    user_id = %id,
                    partner_id = %previous,
                    "Ending current chat before new request"
                );
                emissions.push(Emission::to(previous, BrokerEvent::ChatEnded));
            }
        }

        let Some(agent_id) = self.pick_agent(&id) else {
            tracing::info!(user_id = %id, "Chat requested but no agents available");
            emissions.push(Emission::to(id, BrokerEvent::NoAgentsAvailable));
            return emissions;
        };

        let displaced = self.pairings.pair(id, agent_id);
        for stale in displaced {
            tracing::warn!(
                connection_id = %stale,
                agent_id = %agent_id,
                user_id = %id,
                "Pairing overwritten; earlier partner left with a one-sided pairing"
            );
        }
        tracing::info!(user_id = %id, agent_id = %agent_id, "User connected with agent");

        emissions.push(Emission::to(agent_id, BrokerEvent::NewLiveChat { user_id: id }));
        emissions.push(Emission::to(id, BrokerEvent::LiveChatConnected { agent_id }));
        emissions
    }

    /// Relays `message` from `id` to its partner. Dropped when unpaired.
    pub fn send_message(&mut self, id: ConnectionId, message: String) -> Vec<Emission> {
        let Some(receiver) = self.pairings.partner_of(&id) else {
            tracing::warn!(connection_id = %id, "No recipient found for message");
            return Vec::new();
        };

        tracing::info!(
            connection_id = %id,
            partner_id = %receiver,
            len = message.len(),
            "Message relayed"
        );
        vec![Emission::to(
            receiver,
            BrokerEvent::ReceiveMessage { from: id, message },
        )]
    }

    /// Removes every trace of `id`, notifying whoever needs to know.
    pub fn disconnect(&mut self, id: ConnectionId) -> Vec<Emission> {
        let mut emissions = Vec::new();

        if self.agents.mark_offline(&id) {
            tracing::info!(agent_id = %id, "Agent went offline");
            emissions.push(Emission::broadcast(BrokerEvent::AgentStatus {
                agent_id: id,
                status: AgentStatus::Offline,
            }));
        }

        if let Some(partner) = self.pairings.unpair(&id) {
            tracing::info!(connection_id = %id, partner_id = %partner, "Chat ended");
            emissions.push(Emission::to(partner, BrokerEvent::ChatEnded));
        }

        emissions
    }

    fn pick_agent(&self, requester: &ConnectionId) -> Option<ConnectionId> {
        match self.policy {
            MatchPolicy::Shared => self.agents.pick_any(),
            MatchPolicy::Exclusive => self
                .agents
                .pick_any_where(|agent| agent != requester && !self.pairings.is_paired(agent)),
        }
    }
}
