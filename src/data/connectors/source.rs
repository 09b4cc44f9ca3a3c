use crate::error::Result;
use crate::types::PriceSeries;

/// Anything that can hand back OHLC bars for a symbol.
///
/// `fetch` returns `Ok` with an empty series when the provider simply has
/// nothing for the request, and `Err` when the request itself failed.
pub trait DataSource: Send + Sync {
    fn name(&self) -> &'static str;

    fn fetch(&self, symbol: &str, period: &str, interval: &str) -> Result<PriceSeries>;

    /// Collapse every failure into "no data".
    fn fetch_or_empty(&self, symbol: &str, period: &str, interval: &str) -> PriceSeries {
        match self.fetch(symbol, period, interval) {
            Ok(series) => series,
            Err(e) => {
                log::warn!(
                    "{}: fetch {} {} {} failed: {}",
                    self.name(),
                    symbol,
                    period,
                    interval,
                    e
                );
                PriceSeries::empty()
            }
        }
    }
}
