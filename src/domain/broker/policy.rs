//! Agent selection policy for incoming chat requests.

use serde::Deserialize;
use std::fmt;

/// How the broker chooses an agent for a chat request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    /// Any online agent may be matched, even one already chatting or the
    /// requester itself. A second match overwrites the agent's pairing and
    /// leaves the earlier user pointing at an agent that no longer points back.
    #[default]
    Shared,
    /// Only agents with no current partner (and other than the requester)
    /// are matched. A requester already in a chat has that chat ended first.
    Exclusive,
}

impl fmt::Display for MatchPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchPolicy::Shared => "shared",
            MatchPolicy::Exclusive => "exclusive",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_shared() {
        assert_eq!(MatchPolicy::default(), MatchPolicy::Shared);
    }

    #[test]
    fn deserializes_lowercase_names() {
        let policy: MatchPolicy = serde_json::from_str(r#""exclusive""#).unwrap();
        assert_eq!(policy, MatchPolicy::Exclusive);
        assert!(serde_json::from_str::<MatchPolicy>(r#""round_robin""#).is_err());
    }
}
