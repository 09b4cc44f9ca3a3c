pub mod catalog;
pub mod connectors;

use crate::config::{MarketDataConfig, ProviderKind};
use crate::error::Result;
use std::sync::Arc;

pub use catalog::{Market, MarketCatalog};
pub use connectors::{BarInterval, DataSource, DataValidator, SyntheticSource, YahooChartSource};

/// Build the data source selected in the config.
pub fn build_source(config: &MarketDataConfig) -> Result<Arc<dyn DataSource>> {
    let source: Arc<dyn DataSource> = match config.provider {
        ProviderKind::Yahoo => Arc::new(YahooChartSource::new(config)?),
        ProviderKind::Synthetic => Arc::new(SyntheticSource::new(config.synthetic_seed.unwrap_or(42))),
    };
    log::info!("Using {} market data", source.name());
    Ok(source)
}
