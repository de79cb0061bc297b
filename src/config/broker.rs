//! Broker configuration

use serde::Deserialize;

use crate::domain::broker::MatchPolicy;

/// Session broker configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BrokerConfig {
    /// How agents are picked for chat requests (`shared` or `exclusive`)
    #[serde(default)]
    pub match_policy: MatchPolicy,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_broker_config_defaults() {
        assert_eq!(BrokerConfig::default().match_policy, MatchPolicy::Shared);
    }
}
