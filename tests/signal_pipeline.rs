use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use confluence::config::SignalConfig;
use confluence::data::{DataSource, SyntheticSource};
use confluence::engines::pipeline::AbsentReason;
use confluence::engines::SnapshotEngine;
use confluence::error::{ConfluenceError, Result};
use confluence::types::{
    Bar, MarketBias, PriceSeries, Session, TimeframeLabel, TimeframeSpec, TradeSuggestion,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Serves canned series keyed by (period, interval) and records every request.
#[derive(Default)]
struct FixtureSource {
    series: HashMap<(String, String), PriceSeries>,
    failing: HashSet<String>,
    calls: Mutex<Vec<(String, String, String)>>,
}

impl FixtureSource {
    fn with(mut self, period: &str, interval: &str, series: PriceSeries) -> Self {
        self.series.insert((period.to_string(), interval.to_string()), series);
        self
    }

    fn failing_on(mut self, interval: &str) -> Self {
        self.failing.insert(interval.to_string());
        self
    }

    fn requested_intervals(&self) -> Vec<String> {
        self.calls.lock().unwrap().iter().map(|c| c.2.clone()).collect()
    }
}

impl DataSource for FixtureSource {
    fn name(&self) -> &'static str {
        "Fixture"
    }

    fn fetch(&self, symbol: &str, period: &str, interval: &str) -> Result<PriceSeries> {
        self.calls
            .lock()
            .unwrap()
            .push((symbol.to_string(), period.to_string(), interval.to_string()));
        if self.failing.contains(interval) {
            return Err(ConfluenceError::DataSource("connection reset".to_string()));
        }
        Ok(self
            .series
            .get(&(period.to_string(), interval.to_string()))
            .cloned()
            .unwrap_or_default())
    }
}

fn day(i: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap() + Duration::days(i)
}

fn closes(values: &[f64]) -> PriceSeries {
    PriceSeries::new(
        values
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::new(day(i as i64), c, c, c, c))
            .collect(),
    )
}

/// Two closes whose span-3 EMA deviation comes out at `pct`.
/// With alpha = 0.5 the deviation is (b - a) / (a + b) * 100.
fn series_with_deviation(pct: f64) -> PriceSeries {
    let a = 100.0;
    let b = a * (100.0 + pct) / (100.0 - pct);
    closes(&[a, b])
}

fn daily_breakout() -> PriceSeries {
    PriceSeries::new(vec![
        Bar::new(day(0), 98.0, 105.0, 95.0, 100.0),
        Bar::new(day(1), 101.0, 112.0, 108.0, 112.0),
    ])
}

fn noon(hour: u32) -> DateTime<Local> {
    Local.with_ymd_and_hms(2024, 7, 1, hour, 0, 0).unwrap()
}

fn signals_with_span(span: usize) -> SignalConfig {
    SignalConfig {
        ema_span: span,
        ..Default::default()
    }
}

#[test]
fn test_worked_example_is_high_probability_buy() {
    let mut signals = signals_with_span(3);
    signals.timeframes = vec![
        TimeframeSpec::new(TimeframeLabel::Weekly, "1wk", "60d"),
        TimeframeSpec::new(TimeframeLabel::Daily, "1d", "60d"),
        TimeframeSpec::new(TimeframeLabel::FourHour, "4h", "60d"),
        TimeframeSpec::new(TimeframeLabel::TwoHour, "90m", "60d"),
        TimeframeSpec::new(TimeframeLabel::OneHour, "1h", "60d"),
        TimeframeSpec::new(TimeframeLabel::ThirtyMinute, "30m", "60d"),
        TimeframeSpec::new(TimeframeLabel::FifteenMinute, "15m", "60d"),
    ];

    let source = FixtureSource::default()
        .with("60d", "1wk", series_with_deviation(2.1))
        .with("60d", "1d", series_with_deviation(1.8))
        .with("60d", "4h", series_with_deviation(0.9))
        .with("60d", "90m", series_with_deviation(1.2))
        .with("60d", "1h", series_with_deviation(0.8))
        .with("60d", "15m", series_with_deviation(0.5))
        .with("10d", "1d", daily_breakout());

    let engine = SnapshotEngine::new(Arc::new(source), signals);
    let snapshot = engine.compute_snapshot("NAS100", noon(12)).unwrap();

    assert_eq!(snapshot.market.source_symbol, "^IXIC");
    assert_eq!(snapshot.weekly_deviation, Some(2.1));
    assert_eq!(snapshot.daily_deviation, Some(1.8));
    assert_eq!(snapshot.four_hour_deviation, Some(0.9));
    assert_eq!(snapshot.intraday_average, Some(0.83));
    assert_eq!(snapshot.market_bias, MarketBias::Bullish);
    assert_eq!(snapshot.confluence_score, Some(1.4));
    assert_eq!(snapshot.trade_suggestion, TradeSuggestion::HighProbBuy);
    assert_eq!(snapshot.session, Session::London);

    let thirty = snapshot.reading(TimeframeLabel::ThirtyMinute).unwrap();
    assert_eq!(thirty.deviation, None);
    assert_eq!(thirty.absent_reason, Some(AbsentReason::NoData));

    let levels = snapshot.bias_levels.unwrap();
    assert_eq!((levels.prev_high, levels.prev_low, levels.current_close), (105.0, 95.0, 112.0));
}

#[test]
fn test_unsupported_interval_is_never_requested() {
    let source = Arc::new(FixtureSource::default());
    let engine = SnapshotEngine::new(source.clone(), SignalConfig::default());

    let snapshot = engine.compute_snapshot("GOLD", noon(3)).unwrap();

    let two_hour = snapshot.reading(TimeframeLabel::TwoHour).unwrap();
    assert_eq!(two_hour.absent_reason, Some(AbsentReason::UnsupportedInterval));

    let requested = source.requested_intervals();
    assert!(!requested.iter().any(|i| i == "2h"));
    // six timeframes plus the bias series
    assert_eq!(requested.len(), 7);
    assert_eq!(snapshot.session, Session::Asia);
}

#[test]
fn test_provider_failure_only_blanks_that_timeframe() {
    let source = FixtureSource::default()
        .failing_on("1wk")
        .with("60d", "1d", series_with_deviation(-6.0))
        .with("10d", "1d", daily_breakout());
    let engine = SnapshotEngine::new(Arc::new(source), signals_with_span(3));

    let snapshot = engine.compute_snapshot("BTCUSD", noon(20)).unwrap();

    assert_eq!(snapshot.weekly_deviation, None);
    assert!(matches!(
        snapshot.reading(TimeframeLabel::Weekly).unwrap().absent_reason,
        Some(AbsentReason::ProviderError(_))
    ));
    assert_eq!(snapshot.daily_deviation, Some(-6.0));
    assert_eq!(snapshot.confluence_score, Some(6.0));
    assert_eq!(snapshot.trade_suggestion, TradeSuggestion::Wait);
    assert_eq!(snapshot.session, Session::NewYork);
}

#[test]
fn test_bias_fetch_failure_leaves_bias_unknown() {
    let source = FixtureSource::default()
        .with("60d", "1wk", series_with_deviation(1.0))
        .failing_on("1d");
    let engine = SnapshotEngine::new(Arc::new(source), signals_with_span(3));

    let snapshot = engine.compute_snapshot("US30", noon(9)).unwrap();

    assert_eq!(snapshot.market_bias, MarketBias::Unknown);
    assert_eq!(snapshot.bias_levels, None);
    assert_eq!(snapshot.confluence_score, Some(1.0));
    assert_eq!(snapshot.trade_suggestion, TradeSuggestion::Unknown);
}

#[test]
fn test_no_data_anywhere_degrades_to_unknown() {
    let engine = SnapshotEngine::new(Arc::new(FixtureSource::default()), SignalConfig::default());

    let snapshot = engine.compute_snapshot("EURUSD", noon(15)).unwrap();

    assert!(snapshot.timeframes.iter().all(|r| r.deviation.is_none()));
    assert_eq!(snapshot.intraday_average, None);
    assert_eq!(snapshot.confluence_score, None);
    assert_eq!(snapshot.market_bias, MarketBias::Unknown);
    assert_eq!(snapshot.trade_suggestion, TradeSuggestion::Unknown);
    assert_eq!(snapshot.session, Session::London);
    assert_eq!(snapshot.timestamp, noon(15));
}

#[test]
fn test_unknown_market_is_fatal_and_fetches_nothing() {
    let source = Arc::new(FixtureSource::default());
    let engine = SnapshotEngine::new(source.clone(), SignalConfig::default());

    match engine.compute_snapshot("DOGE", noon(12)) {
        Err(ConfluenceError::UnknownMarket(name)) => assert_eq!(name, "DOGE"),
        other => panic!("expected UnknownMarket, got {:?}", other.map(|s| s.market)),
    }
    assert!(source.requested_intervals().is_empty());
}

#[test]
fn test_readings_keep_configured_order() {
    let engine = SnapshotEngine::new(Arc::new(FixtureSource::default()), SignalConfig::default());
    let snapshot = engine.compute_snapshot("SPX500", noon(12)).unwrap();

    let labels: Vec<_> = snapshot.timeframes.iter().map(|r| r.label).collect();
    assert_eq!(labels, TimeframeLabel::all());
}

#[test]
fn test_snapshot_serializes_flat_fields() {
    let source = FixtureSource::default().with("10d", "1d", daily_breakout());
    let engine = SnapshotEngine::new(Arc::new(source), SignalConfig::default());
    let snapshot = engine.compute_snapshot("GBPUSD", noon(12)).unwrap();

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["market_bias"], "Bullish");
    assert_eq!(json["trade_suggestion"], "Unknown");
    assert_eq!(json["session"], "London");
    assert!(json["confluence_score"].is_null());
    assert_eq!(json["timeframes"][2]["label"], "4H");
}

#[test]
fn test_synthetic_source_end_to_end() {
    let anchor = Utc::now() - Duration::hours(1);
    let source = SyntheticSource::new(11).anchored_at(anchor);
    let engine = SnapshotEngine::new(Arc::new(source), SignalConfig::default());

    let snapshot = engine.compute_snapshot("GOLD", Local::now()).unwrap();

    for reading in &snapshot.timeframes {
        if reading.label == TimeframeLabel::TwoHour {
            assert_eq!(reading.deviation, None);
        } else {
            assert!(reading.deviation.is_some(), "{} missing", reading.label);
        }
    }
    assert_ne!(snapshot.market_bias, MarketBias::Unknown);
    assert!(snapshot.confluence_score.is_some());
    assert_ne!(snapshot.trade_suggestion, TradeSuggestion::Unknown);
}
