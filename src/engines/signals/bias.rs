use crate::types::{MarketBias, PriceSeries};
use serde::{Deserialize, Serialize};

/// Previous-day reference levels and today's close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BiasLevels {
    pub prev_high: f64,
    pub prev_low: f64,
    pub current_close: f64,
}

pub struct BiasClassifier;

impl BiasClassifier {
    /// PDH/PDL from the second-to-last bar, close from the last. Needs two bars.
    pub fn levels(daily: &PriceSeries) -> Option<BiasLevels> {
        let previous = daily.previous()?;
        let current = daily.last()?;
        Some(BiasLevels {
            prev_high: previous.high,
            prev_low: previous.low,
            current_close: current.close,
        })
    }

    /// A close exactly on PDH or PDL is still inside the range.
    pub fn classify_levels(levels: &BiasLevels) -> MarketBias {
        if levels.current_close > levels.prev_high {
            MarketBias::Bullish
        } else if levels.current_close < levels.prev_low {
            MarketBias::Bearish
        } else {
            MarketBias::Ranging
        }
    }

    pub fn classify(daily: &PriceSeries) -> MarketBias {
        Self::levels(daily)
            .map(|levels| Self::classify_levels(&levels))
            .unwrap_or(MarketBias::Unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Bar;
    use chrono::{Duration, TimeZone, Utc};

    /// (high, low, close) per day
    fn daily(rows: &[(f64, f64, f64)]) -> PriceSeries {
        let start = Utc.with_ymd_and_hms(2024, 2, 5, 0, 0, 0).unwrap();
        PriceSeries::new(
            rows.iter()
                .enumerate()
                .map(|(i, &(h, l, c))| Bar::new(start + Duration::days(i as i64), c, h, l, c))
                .collect(),
        )
    }

    #[test]
    fn test_breakout_above_previous_high() {
        let series = daily(&[(105.0, 95.0, 100.0), (112.0, 108.0, 112.0)]);
        let levels = BiasClassifier::levels(&series).unwrap();
        assert_eq!(levels.prev_high, 105.0);
        assert_eq!(levels.prev_low, 95.0);
        assert_eq!(levels.current_close, 112.0);
        assert_eq!(BiasClassifier::classify(&series), MarketBias::Bullish);
    }

    #[test]
    fn test_breakdown_below_previous_low() {
        let series = daily(&[(105.0, 95.0, 100.0), (96.0, 90.0, 94.99)]);
        assert_eq!(BiasClassifier::classify(&series), MarketBias::Bearish);
    }

    #[test]
    fn test_close_on_the_levels_is_ranging() {
        let on_high = daily(&[(105.0, 95.0, 100.0), (106.0, 101.0, 105.0)]);
        assert_eq!(BiasClassifier::classify(&on_high), MarketBias::Ranging);

        let on_low = daily(&[(105.0, 95.0, 100.0), (99.0, 94.0, 95.0)]);
        assert_eq!(BiasClassifier::classify(&on_low), MarketBias::Ranging);
    }

    #[test]
    fn test_uses_last_two_bars_only() {
        let series = daily(&[
            (200.0, 10.0, 150.0),
            (105.0, 95.0, 100.0),
            (103.0, 97.0, 101.0),
        ]);
        // yesterday is the middle bar
        assert_eq!(BiasClassifier::classify(&series), MarketBias::Ranging);
    }

    #[test]
    fn test_short_series_is_unknown() {
        assert_eq!(BiasClassifier::classify(&PriceSeries::empty()), MarketBias::Unknown);
        let one = daily(&[(105.0, 95.0, 100.0)]);
        assert_eq!(BiasClassifier::classify(&one), MarketBias::Unknown);
    }
}
