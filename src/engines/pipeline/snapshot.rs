use crate::config::SignalConfig;
use crate::data::{BarInterval, DataSource, Market, MarketCatalog};
use crate::engines::signals::{
    BiasClassifier, BiasLevels, ConfluenceAggregator, EmaDeviationCalculator, SessionResolver,
    TimeframeDeviations,
};
use crate::error::{ConfluenceError, Result};
use crate::types::{
    EmaDeviation, MarketBias, PriceSeries, Session, TimeframeLabel, TimeframeSpec, TradeSuggestion,
};
use chrono::{DateTime, Local};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

/// Why a timeframe has no deviation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbsentReason {
    NoData,
    UnsupportedInterval,
    ProviderError(String),
    DivisionUndefined,
    Computation(String),
}

impl std::fmt::Display for AbsentReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoData => f.write_str("no data"),
            Self::UnsupportedInterval => f.write_str("unsupported interval"),
            Self::ProviderError(msg) => write!(f, "provider error: {}", msg),
            Self::DivisionUndefined => f.write_str("EMA is zero"),
            Self::Computation(msg) => write!(f, "computation failed: {}", msg),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeframeReading {
    pub label: TimeframeLabel,
    pub interval: String,
    pub period: String,
    pub bars: usize,
    pub deviation: EmaDeviation,
    pub absent_reason: Option<AbsentReason>,
}

impl TimeframeReading {
    fn absent(spec: &TimeframeSpec, bars: usize, reason: AbsentReason) -> Self {
        Self {
            label: spec.label,
            interval: spec.interval.clone(),
            period: spec.period.clone(),
            bars,
            deviation: None,
            absent_reason: Some(reason),
        }
    }
}

/// Everything the dashboard shows for one refresh cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub market: Market,
    pub ema_span: usize,
    pub timeframes: Vec<TimeframeReading>,
    pub weekly_deviation: EmaDeviation,
    pub daily_deviation: EmaDeviation,
    pub four_hour_deviation: EmaDeviation,
    pub intraday_average: Option<f64>,
    pub market_bias: MarketBias,
    pub bias_levels: Option<BiasLevels>,
    pub confluence_score: Option<f64>,
    pub trade_suggestion: TradeSuggestion,
    pub session: Session,
    pub timestamp: DateTime<Local>,
}

impl Snapshot {
    pub fn reading(&self, label: TimeframeLabel) -> Option<&TimeframeReading> {
        self.timeframes.iter().find(|r| r.label == label)
    }

    pub fn summary_line(&self) -> String {
        format!(
            "{} {} | W {} D {} 4H {} Intraday {} | bias {} | score {} | {} | {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S"),
            self.market.display_name,
            format_signed_pct(self.weekly_deviation),
            format_signed_pct(self.daily_deviation),
            format_signed_pct(self.four_hour_deviation),
            format_signed_pct(self.intraday_average),
            self.market_bias,
            format_score(self.confluence_score),
            self.trade_suggestion,
            self.session,
        )
    }
}

/// `+1.25%`, `-0.4%`, `+2.0%` or `N/A`.
pub fn format_signed_pct(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{:+.1}%", v),
        Some(v) => format!("{:+}%", v),
        None => "N/A".to_string(),
    }
}

/// `1.4 %`, `1.0 %` or `N/A %`.
pub fn format_score(value: Option<f64>) -> String {
    match value {
        Some(v) if v.fract() == 0.0 => format!("{:.1} %", v),
        Some(v) => format!("{} %", v),
        None => "N/A %".to_string(),
    }
}

/// Runs the fetch, deviation, bias and confluence steps for one market.
pub struct SnapshotEngine {
    source: Arc<dyn DataSource>,
    catalog: MarketCatalog,
    signals: SignalConfig,
    calculator: EmaDeviationCalculator,
    aggregator: ConfluenceAggregator,
}

impl SnapshotEngine {
    pub fn new(source: Arc<dyn DataSource>, signals: SignalConfig) -> Self {
        Self {
            source,
            catalog: MarketCatalog::standard(),
            calculator: EmaDeviationCalculator::new(signals.ema_span),
            aggregator: ConfluenceAggregator::from_config(&signals),
            signals,
        }
    }

    pub fn catalog(&self) -> &MarketCatalog {
        &self.catalog
    }

    pub fn source_name(&self) -> &'static str {
        self.source.name()
    }

    /// Only an unknown market is fatal; every data problem becomes an absent field.
    pub fn compute_snapshot(&self, market_name: &str, now: DateTime<Local>) -> Result<Snapshot> {
        let market = self.catalog.resolve(market_name)?.clone();
        let started = Instant::now();
        let symbol = market.source_symbol.as_str();

        let (timeframes, daily) = rayon::join(
            || {
                self.signals
                    .timeframes
                    .par_iter()
                    .map(|spec| self.read_timeframe(symbol, spec))
                    .collect::<Vec<_>>()
            },
            || self.fetch_bias_series(symbol),
        );

        let deviation_of = |label: TimeframeLabel| {
            timeframes
                .iter()
                .find(|r| r.label == label)
                .and_then(|r| r.deviation)
        };
        let [two_hour, one_hour, thirty_minute, fifteen_minute] = TimeframeLabel::intraday();
        let deviations = TimeframeDeviations {
            weekly: deviation_of(TimeframeLabel::Weekly),
            daily: deviation_of(TimeframeLabel::Daily),
            four_hour: deviation_of(TimeframeLabel::FourHour),
            intraday: [
                deviation_of(two_hour),
                deviation_of(one_hour),
                deviation_of(thirty_minute),
                deviation_of(fifteen_minute),
            ],
        };

        let bias_levels = BiasClassifier::levels(&daily);
        let market_bias = BiasClassifier::classify(&daily);
        let confluence = self.aggregator.aggregate(&deviations, market_bias);

        let snapshot = Snapshot {
            market,
            ema_span: self.calculator.span(),
            timeframes,
            weekly_deviation: deviations.weekly,
            daily_deviation: deviations.daily,
            four_hour_deviation: deviations.four_hour,
            intraday_average: confluence.intraday_average,
            market_bias,
            bias_levels,
            confluence_score: confluence.score,
            trade_suggestion: confluence.suggestion,
            session: SessionResolver::at(&now),
            timestamp: now,
        };

        log::info!(
            "{}: score {} -> {} (bias {}) in {:?}",
            snapshot.market.display_name,
            format_score(snapshot.confluence_score),
            snapshot.trade_suggestion,
            snapshot.market_bias,
            started.elapsed()
        );
        Ok(snapshot)
    }

    fn read_timeframe(&self, symbol: &str, spec: &TimeframeSpec) -> TimeframeReading {
        if !BarInterval::is_supported(&spec.interval) {
            log::debug!("{}: interval '{}' not supported, skipping", spec.label, spec.interval);
            return TimeframeReading::absent(spec, 0, AbsentReason::UnsupportedInterval);
        }

        let series = match self.source.fetch(symbol, &spec.period, &spec.interval) {
            Ok(series) => series,
            Err(e) => {
                log::warn!("{} {}: {}", symbol, spec.label, e);
                return TimeframeReading::absent(spec, 0, AbsentReason::ProviderError(e.to_string()));
            }
        };

        let bars = series.len();
        match self.calculator.try_compute(&series) {
            Ok(reading) => TimeframeReading {
                label: spec.label,
                interval: spec.interval.clone(),
                period: spec.period.clone(),
                bars,
                deviation: Some(reading.deviation_pct),
                absent_reason: None,
            },
            Err(ConfluenceError::NoData) => {
                log::debug!("{} {}: no data", symbol, spec.label);
                TimeframeReading::absent(spec, bars, AbsentReason::NoData)
            }
            Err(ConfluenceError::DivisionUndefined) => {
                TimeframeReading::absent(spec, bars, AbsentReason::DivisionUndefined)
            }
            Err(e) => {
                log::warn!("{} {}: {}", symbol, spec.label, e);
                TimeframeReading::absent(spec, bars, AbsentReason::Computation(e.to_string()))
            }
        }
    }

    fn fetch_bias_series(&self, symbol: &str) -> PriceSeries {
        if !BarInterval::is_supported(&self.signals.bias_interval) {
            log::debug!("Bias interval '{}' not supported", self.signals.bias_interval);
            return PriceSeries::empty();
        }
        self.source
            .fetch_or_empty(symbol, &self.signals.bias_period, &self.signals.bias_interval)
    }
}
