use super::traits::{invalid, ConfigSection};
use crate::data::MarketCatalog;
use crate::error::ConfluenceError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub refresh_interval_secs: u64,
    pub default_market: String,
    pub window_title: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            refresh_interval_secs: 60,
            default_market: "NAS100".to_string(),
            window_title: "Confluence Summary".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}

impl ConfigSection for DashboardConfig {
    fn section_name() -> &'static str {
        "dashboard"
    }

    fn validate(&self) -> Result<(), ConfluenceError> {
        if self.refresh_interval_secs == 0 {
            return Err(invalid(
                Self::section_name(),
                "Refresh interval must be at least 1 second",
            ));
        }
        if MarketCatalog::standard().resolve(&self.default_market).is_err() {
            return Err(invalid(
                Self::section_name(),
                format!("Default market '{}' is not in the catalog", self.default_market),
            ));
        }
        Ok(())
    }
}
