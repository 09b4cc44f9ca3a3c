//! Offline random-walk bars for demos and runs without network access.

use super::source::DataSource;
use super::types::{period_days, BarInterval};
use crate::error::{ConfluenceError, Result};
use crate::types::{Bar, PriceSeries};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const MAX_BARS: i64 = 500;
const DAILY_VOLATILITY: f64 = 0.02;

// 64-bit FNV-1a; stream seeds must not change between toolchains.
const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

fn fnv_mix(hash: u64, bytes: &[u8]) -> u64 {
    bytes
        .iter()
        .fold(hash, |h, &b| (h ^ u64::from(b)).wrapping_mul(FNV_PRIME))
}

pub struct SyntheticSource {
    seed: u64,
    anchor: Option<DateTime<Utc>>,
}

impl SyntheticSource {
    pub fn new(seed: u64) -> Self {
        Self { seed, anchor: None }
    }

    /// Pin the last bar to `anchor` instead of the wall clock.
    pub fn anchored_at(mut self, anchor: DateTime<Utc>) -> Self {
        self.anchor = Some(anchor);
        self
    }

    fn stream_seed(&self, symbol: &str, interval: &str) -> u64 {
        let hash = fnv_mix(FNV_OFFSET, &self.seed.to_le_bytes());
        let hash = fnv_mix(hash, symbol.as_bytes());
        // separator so ("AB", "C") and ("A", "BC") differ
        let hash = fnv_mix(hash, &[0xff]);
        fnv_mix(hash, interval.as_bytes())
    }

    fn start_price(symbol: &str) -> f64 {
        50.0 + (fnv_mix(FNV_OFFSET, symbol.as_bytes()) % 5_000) as f64
    }
}

impl DataSource for SyntheticSource {
    fn name(&self) -> &'static str {
        "Synthetic"
    }

    fn fetch(&self, symbol: &str, period: &str, interval: &str) -> Result<PriceSeries> {
        let Some(minutes) = BarInterval::minutes(interval) else {
            return Ok(PriceSeries::empty());
        };
        let days = period_days(period)
            .ok_or_else(|| ConfluenceError::DataSource(format!("Unrecognised period '{}'", period)))?;

        let count = (days.saturating_mul(1_440) / minutes).clamp(1, MAX_BARS);
        let volatility = DAILY_VOLATILITY * (minutes as f64 / 1_440.0).sqrt();
        let end = self.anchor.unwrap_or_else(Utc::now);
        let mut rng = StdRng::seed_from_u64(self.stream_seed(symbol, interval));

        let mut prev_close = Self::start_price(symbol);
        let bars = (0..count)
            .map(|i| {
                let timestamp = end - Duration::minutes(minutes * (count - 1 - i));
                let open = prev_close;
                let close = open * (1.0 + rng.gen_range(-volatility..volatility));
                let high = open.max(close) * (1.0 + rng.gen_range(0.0..volatility / 2.0));
                let low = open.min(close) * (1.0 - rng.gen_range(0.0..volatility / 2.0));
                prev_close = close;
                Bar::new(timestamp, open, high, low, close)
            })
            .collect();

        Ok(PriceSeries::new(bars))
    }
}
