//! Set of connections registered as agents.

use std::collections::HashSet;

use crate::domain::foundation::ConnectionId;

/// Connections currently online as agents.
///
/// An id stays here from registration until its connection disconnects.
/// Selection makes no fairness promise: any present member is a valid pick.
#[derive(Debug, Default, Clone)]
pub struct AgentPool {
    agents: HashSet<ConnectionId>,
}

impl AgentPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `id` as an online agent.
    ///
    /// Returns `true` if the id was not already present.
    pub fn mark_online(&mut self, id: ConnectionId) -> bool {
        self.agents.insert(id)
    }

    /// Removes `id` from the pool. Returns `true` if it was present.
    pub fn mark_offline(&mut self, id: &ConnectionId) -> bool {
        self.agents.remove(id)
    }

    /// Any member of the pool, or `None` when empty.
    pub fn pick_any(&self) -> Option<ConnectionId> {
        self.agents.iter().next().copied()
    }

    /// Any member satisfying `eligible`, or `None`.
    pub fn pick_any_where<F>(&self, mut eligible: F) -> Option<ConnectionId>
    where
        F: FnMut(&ConnectionId) -> bool,
    {
        self.agents.iter().find(|id| eligible(id)).copied()
    }

    pub fn contains(&self, id: &ConnectionId) -> bool {
        self.agents.contains(id)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mark_online_is_idempotent() {
        let mut pool = AgentPool::new();
        let id = ConnectionId::new();

        assert!(pool.mark_online(id));
        assert!(!pool.mark_online(id));
        assert_eq!(pool.len(), 1);
        assert!(pool.contains(&id));
    }

    #[test]
    fn mark_offline_removes_member() {
        let mut pool = AgentPool::new();
        let id = ConnectionId::new();
        pool.mark_online(id);

        assert!(pool.mark_offline(&id));
        assert!(!pool.contains(&id));
        assert!(pool.is_empty());
    }

    #[test]
    fn mark_offline_unknown_id_is_noop() {
        let mut pool = AgentPool::new();
        pool.mark_online(ConnectionId::new());

        assert!(!pool.mark_offline(&ConnectionId::new()));
        assert_eq!(pool.len(), 1);
    }

    #[test]
    fn pick_any_on_empty_pool_returns_none() {
        assert!(AgentPool::new().pick_any().is_none());
    }

    #[test]
    fn pick_any_returns_a_present_member() {
        let mut pool = AgentPool::new();
        let a = ConnectionId::new();
        let b = ConnectionId::new();
        pool.mark_online(a);
        pool.mark_online(b);

        let picked = pool.pick_any().unwrap();
        assert!(picked == a || picked == b);
    }

    #[test]
    fn pick_any_where_honours_predicate() {
        let mut pool = AgentPool::new();
        let busy = ConnectionId::new();
        let free = ConnectionId::new();
        pool.mark_online(busy);
        pool.mark_online(free);

        assert_eq!(pool.pick_any_where(|id| *id != busy), Some(free));
        assert_eq!(pool.pick_any_where(|_| false), None);
    }
}
