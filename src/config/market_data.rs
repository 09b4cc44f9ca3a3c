use super::traits::{invalid, ConfigSection};
use crate::error::ConfluenceError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Yahoo,
    Synthetic,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketDataConfig {
    pub provider: ProviderKind,
    pub base_url: String,
    /// Upper bound for a single fetch, so one slow timeframe cannot stall a cycle.
    pub timeout_ms: u64,
    pub user_agent: String,
    pub synthetic_seed: Option<u64>,
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Yahoo,
            base_url: "https://query1.finance.yahoo.com".to_string(),
            timeout_ms: 10_000,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) confluence/0.1".to_string(),
            synthetic_seed: None,
        }
    }
}

impl MarketDataConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl ConfigSection for MarketDataConfig {
    fn section_name() -> &'static str {
        "market_data"
    }

    fn validate(&self) -> Result<(), ConfluenceError> {
        if self.timeout_ms == 0 {
            return Err(invalid(Self::section_name(), "Timeout must be positive"));
        }
        if self.provider == ProviderKind::Yahoo && self.base_url.trim().is_empty() {
            return Err(invalid(Self::section_name(), "Base URL must not be empty"));
        }
        Ok(())
    }
}
