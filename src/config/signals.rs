use super::traits::{invalid, ConfigSection};
use crate::data::connectors::period_days;
use crate::error::ConfluenceError;
use crate::types::{TimeframeLabel, TimeframeSpec};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalConfig {
    pub ema_span: usize,
    pub timeframes: Vec<TimeframeSpec>,
    pub bias_period: String,
    pub bias_interval: String,
    /// Scores strictly below this, with a directional bias, are high-probability setups.
    pub high_probability_below: f64,
    /// Scores strictly below this are weak setups; anything else is a wait.
    pub weak_setup_below: f64,
}

impl Default for SignalConfig {
    fn default() -> Self {
        Self {
            ema_span: 50,
            timeframes: TimeframeSpec::default_set(),
            bias_period: "10d".to_string(),
            bias_interval: "1d".to_string(),
            high_probability_below: 3.0,
            weak_setup_below: 5.0,
        }
    }
}

impl ConfigSection for SignalConfig {
    fn section_name() -> &'static str {
        "signals"
    }

    fn validate(&self) -> Result<(), ConfluenceError> {
        if self.ema_span == 0 {
            return Err(invalid(Self::section_name(), "EMA span must be at least 1"));
        }
        let thresholds = [self.high_probability_below, self.weak_setup_below];
        if thresholds.iter().any(|t| !t.is_finite() || *t <= 0.0) {
            return Err(invalid(
                Self::section_name(),
                "Score thresholds must be positive finite numbers",
            ));
        }
        if self.high_probability_below > self.weak_setup_below {
            return Err(invalid(
                Self::section_name(),
                "High-probability threshold must not exceed the weak-setup threshold",
            ));
        }

        let periods = self
            .timeframes
            .iter()
            .map(|tf| tf.period.as_str())
            .chain(std::iter::once(self.bias_period.as_str()));
        for period in periods {
            if period_days(period).is_none() {
                return Err(invalid(
                    Self::section_name(),
                    format!("Lookback period '{}' is not a valid day count", period),
                ));
            }
        }

        let mut seen = HashSet::new();
        for tf in &self.timeframes {
            if !seen.insert(tf.label) {
                return Err(invalid(
                    Self::section_name(),
                    format!("Timeframe {} is configured twice", tf.label),
                ));
            }
        }
        if let Some(missing) = TimeframeLabel::all().into_iter().find(|l| !seen.contains(l)) {
            return Err(invalid(
                Self::section_name(),
                format!("Timeframe {} is missing", missing),
            ));
        }
        Ok(())
    }
}
