//! Symmetric "current chat partner" mapping.

use std::collections::HashMap;

use crate::domain::foundation::ConnectionId;

/// Maps each paired connection to its current partner.
///
/// Pairs are written and removed two entries at a time. `pair` overwrites
/// whatever either side pointed at before and does not repair the far end of
/// the pairing it replaced; those dangling ids are reported back to the caller.
#[derive(Debug, Default, Clone)]
pub struct PairingTable {
    partners: HashMap<ConnectionId, ConnectionId>,
}

impl PairingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `a` and `b` as each other's partner.
    ///
    /// Returns the previous partners of `a` and `b` (other than `a` and `b`
    /// themselves) whose own entry still points at `a` or `b`.
    pub fn pair(&mut self, a: ConnectionId, b: ConnectionId) -> Vec<ConnectionId> {
        let mut displaced = Vec::new();
        for (id, previous) in [(a, self.partners.get(&a)), (b, self.partners.get(&b))] {
            if let Some(previous) = previous.copied() {
                if previous != a && previous != b && self.partners.get(&previous) == Some(&id) {
                    displaced.push(previous);
                }
            }
        }

        self.partners.insert(a, b);
        self.partners.insert(b, a);
        displaced
    }

    pub fn partner_of(&self, id: &ConnectionId) -> Option<ConnectionId> {
        self.partners.get(id).copied()
    }

    pub fn is_paired(&self, id: &ConnectionId) -> bool {
        self.partners.contains_key(id)
    }

    /// Removes the pairing rooted at `id` and returns the partner, if any.
    ///
    /// Both `id`'s entry and the partner's entry are removed.
    pub fn unpair(&mut self, id: &ConnectionId) -> Option<ConnectionId> {
        let partner = self.partners.remove(id)?;
        self.partners.remove(&partner);
        Some(partner)
    }

    /// Number of connections holding a partner entry.
    pub fn len(&self) -> usize {
        self.partners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.partners.is_empty()
    }

    /// Number of mutually-pointing pairs. A self-pairing counts as one.
    pub fn pair_count(&self) -> usize {
        self.partners
            .iter()
            .filter(|(id, partner)| id <= partner && self.partners.get(partner) == Some(id))
            .count()
    }

    /// True when every entry's partner points back at it.
    pub fn is_symmetric(&self) -> bool {
        self.partners
            .iter()
            .all(|(id, partner)| self.partners.get(partner) == Some(id))
    }
}
