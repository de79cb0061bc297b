//! AgentStatus enum announced to every connection when an agent comes or goes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Availability of an agent as broadcast in `agent_status` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentStatus {
    Online,
    Offline,
}

impl AgentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentStatus::Online => "online",
            AgentStatus::Offline => "offline",
        }
    }
}

impl fmt::Display for AgentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&AgentStatus::Online).unwrap(), r#""online""#);
        assert_eq!(serde_json::to_string(&AgentStatus::Offline).unwrap(), r#""offline""#);
    }

    #[test]
    fn display_matches_wire_value() {
        assert_eq!(AgentStatus::Offline.to_string(), "offline");
    }
}
