use crate::config::SignalConfig;
use crate::types::{round_to, EmaDeviation, MarketBias, TradeSuggestion};
use serde::{Deserialize, Serialize};

/// Per-timeframe deviations feeding the score.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TimeframeDeviations {
    pub weekly: EmaDeviation,
    pub daily: EmaDeviation,
    pub four_hour: EmaDeviation,
    /// 2H, 1H, 30M, 15M
    pub intraday: [EmaDeviation; 4],
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Confluence {
    pub intraday_average: Option<f64>,
    pub score: Option<f64>,
    pub suggestion: TradeSuggestion,
}

pub struct ConfluenceAggregator {
    high_probability_below: f64,
    weak_setup_below: f64,
}

impl Default for ConfluenceAggregator {
    fn default() -> Self {
        Self::new(3.0, 5.0)
    }
}

impl ConfluenceAggregator {
    pub fn new(high_probability_below: f64, weak_setup_below: f64) -> Self {
        Self {
            high_probability_below,
            weak_setup_below,
        }
    }

    pub fn from_config(config: &SignalConfig) -> Self {
        Self::new(config.high_probability_below, config.weak_setup_below)
    }

    /// Mean of the present values, 2 decimals.
    pub fn intraday_average(values: &[EmaDeviation]) -> Option<f64> {
        mean(values.iter().flatten().copied()).map(|avg| round_to(avg, 2))
    }

    /// Mean absolute deviation of the present components, 1 decimal.
    pub fn score(components: &[EmaDeviation]) -> Option<f64> {
        mean(components.iter().flatten().map(|v| v.abs())).map(|avg| round_to(avg, 1))
    }

    /// Directional checks run before the generic weak-setup bucket; all bounds are strict.
    pub fn suggest(&self, score: Option<f64>, bias: MarketBias) -> TradeSuggestion {
        let Some(score) = score else {
            return TradeSuggestion::Unknown;
        };
        if bias == MarketBias::Unknown {
            return TradeSuggestion::Unknown;
        }

        if score < self.high_probability_below && bias == MarketBias::Bullish {
            TradeSuggestion::HighProbBuy
        } else if score < self.high_probability_below && bias == MarketBias::Bearish {
            TradeSuggestion::HighProbSell
        } else if score < self.weak_setup_below {
            TradeSuggestion::WeakSetup
        } else {
            TradeSuggestion::Wait
        }
    }

    pub fn aggregate(&self, deviations: &TimeframeDeviations, bias: MarketBias) -> Confluence {
        let intraday_average = Self::intraday_average(&deviations.intraday);
        let score = Self::score(&[
            deviations.weekly,
            deviations.daily,
            deviations.four_hour,
            intraday_average,
        ]);

        Confluence {
            intraday_average,
            score,
            suggestion: self.suggest(score, bias),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    (count > 0).then(|| sum / count as f64)
}
