use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signed percentage distance of the latest close from its EMA.
/// `None` when the timeframe produced no usable value.
pub type EmaDeviation = Option<f64>;

/// A single OHLC bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    pub fn new(timestamp: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.open.is_finite() && self.high.is_finite() && self.low.is_finite() && self.close.is_finite()
    }
}

/// Time-ordered bars for one (symbol, period, interval) request.
/// An empty series stands for "no data".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    pub fn new(bars: Vec<Bar>) -> Self {
        Self { bars }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn into_bars(self) -> Vec<Bar> {
        self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// The bar before the last one (yesterday, on a daily series).
    pub fn previous(&self) -> Option<&Bar> {
        self.bars.len().checked_sub(2).and_then(|i| self.bars.get(i))
    }
}

/// Fixed timeframe labels shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeframeLabel {
    Weekly,
    Daily,
    #[serde(rename = "4H")]
    FourHour,
    #[serde(rename = "2H")]
    TwoHour,
    #[serde(rename = "1H")]
    OneHour,
    #[serde(rename = "30M")]
    ThirtyMinute,
    #[serde(rename = "15M")]
    FifteenMinute,
}

impl TimeframeLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weekly => "Weekly",
            Self::Daily => "Daily",
            Self::FourHour => "4H",
            Self::TwoHour => "2H",
            Self::OneHour => "1H",
            Self::ThirtyMinute => "30M",
            Self::FifteenMinute => "15M",
        }
    }

    pub fn all() -> Vec<Self> {
        vec![
            Self::Weekly,
            Self::Daily,
            Self::FourHour,
            Self::TwoHour,
            Self::OneHour,
            Self::ThirtyMinute,
            Self::FifteenMinute,
        ]
    }

    /// The four lower timeframes that are averaged into one intraday figure.
    pub fn intraday() -> [Self; 4] {
        [
            Self::TwoHour,
            Self::OneHour,
            Self::ThirtyMinute,
            Self::FifteenMinute,
        ]
    }

    /// Provider interval token used when no override is configured.
    pub fn default_interval(&self) -> &'static str {
        match self {
            Self::Weekly => "1wk",
            Self::Daily => "1d",
            Self::FourHour => "4h",
            Self::TwoHour => "2h",
            Self::OneHour => "1h",
            Self::ThirtyMinute => "30m",
            Self::FifteenMinute => "15m",
        }
    }
}

impl fmt::Display for TimeframeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One configured timeframe: label plus the provider request parameters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeframeSpec {
    pub label: TimeframeLabel,
    pub interval: String,
    pub period: String,
}

impl TimeframeSpec {
    pub fn new(label: TimeframeLabel, interval: &str, period: &str) -> Self {
        Self {
            label,
            interval: interval.to_string(),
            period: period.to_string(),
        }
    }

    pub fn default_set() -> Vec<Self> {
        TimeframeLabel::all()
            .into_iter()
            .map(|label| Self::new(label, label.default_interval(), "60d"))
            .collect()
    }
}

/// Previous-day breakout state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketBias {
    Bullish,
    Bearish,
    Ranging,
    Unknown,
}

impl fmt::Display for MarketBias {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Bullish => "Bullish",
            Self::Bearish => "Bearish",
            Self::Ranging => "Ranging",
            Self::Unknown => "N/A",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeSuggestion {
    HighProbBuy,
    HighProbSell,
    WeakSetup,
    Wait,
    Unknown,
}

impl fmt::Display for TradeSuggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::HighProbBuy => "High-prob Buy",
            Self::HighProbSell => "High-prob Sell",
            Self::WeakSetup => "Weak Setup",
            Self::Wait => "Wait",
            Self::Unknown => "N/A",
        };
        f.write_str(text)
    }
}

/// Trading session bucket derived from the local hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Session {
    Asia,
    London,
    #[serde(rename = "NY")]
    NewYork,
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Asia => "Asia",
            Self::London => "London",
            Self::NewYork => "NY",
        };
        f.write_str(text)
    }
}

/// Round to `decimals` places, ties to even.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bar(day: u32, close: f64) -> Bar {
        let ts = Utc.with_ymd_and_hms(2024, 3, day, 0, 0, 0).unwrap();
        Bar::new(ts, close, close, close, close)
    }

    #[test]
    fn test_previous_needs_two_bars() {
        assert!(PriceSeries::empty().previous().is_none());
        assert!(PriceSeries::new(vec![bar(1, 1.0)]).previous().is_none());

        let series = PriceSeries::new(vec![bar(1, 1.0), bar(2, 2.0), bar(3, 3.0)]);
        assert_eq!(series.previous().map(|b| b.close), Some(2.0));
        assert_eq!(series.last().map(|b| b.close), Some(3.0));
    }

    #[test]
    fn test_default_timeframes_cover_all_labels() {
        let specs = TimeframeSpec::default_set();
        assert_eq!(specs.len(), 7);
        assert!(specs.iter().all(|s| s.period == "60d"));
        assert_eq!(specs[2].interval, "4h");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(0.833333, 2), 0.83);
        assert_eq!(round_to(1.4075, 1), 1.4);
        assert_eq!(round_to(-2.345678, 2), -2.35);
        assert_eq!(round_to(0.25, 1), 0.2);
        assert_eq!(round_to(0.75, 1), 0.8);
        assert_eq!(round_to(-2.5, 0), -2.0);
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(TradeSuggestion::HighProbBuy.to_string(), "High-prob Buy");
        assert_eq!(TradeSuggestion::Unknown.to_string(), "N/A");
        assert_eq!(MarketBias::Unknown.to_string(), "N/A");
        assert_eq!(Session::NewYork.to_string(), "NY");
    }
}
