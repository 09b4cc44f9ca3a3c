use crate::types::{Bar, PriceSeries};
use chrono::{DateTime, Utc};

pub struct DataValidator;

impl DataValidator {
    /// Bring a provider series in line with the `PriceSeries` invariants:
    /// finite prices only, nothing after `now`, strictly increasing timestamps.
    /// For repeated timestamps the later row wins (providers resend the live bar).
    pub fn sanitize(series: PriceSeries, now: DateTime<Utc>) -> PriceSeries {
        let original_len = series.len();

        let mut bars: Vec<Bar> = series
            .into_bars()
            .into_iter()
            .filter(|bar| bar.is_finite() && bar.timestamp <= now)
            .collect();

        bars.sort_by_key(|bar| bar.timestamp);

        let mut deduped: Vec<Bar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match deduped.last_mut() {
                Some(last) if last.timestamp == bar.timestamp => *last = bar,
                _ => deduped.push(bar),
            }
        }

        let dropped = original_len - deduped.len();
        if dropped > 0 {
            log::debug!("Dropped {} of {} bars during validation", dropped, original_len);
        }

        PriceSeries::new(deduped)
    }
}
