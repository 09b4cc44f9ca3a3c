use crate::error::{ConfluenceError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Market {
    pub display_name: String,
    pub source_symbol: String,
}

/// Display name to provider symbol.
const STANDARD_MARKETS: [(&str, &str); 7] = [
    ("NAS100", "^IXIC"),
    ("US30", "^DJI"),
    ("SPX500", "^GSPC"),
    ("GOLD", "GC=F"),
    ("BTCUSD", "BTC-USD"),
    ("EURUSD", "EURUSD=X"),
    ("GBPUSD", "GBPUSD=X"),
];

/// Fixed set of selectable markets, in display order.
#[derive(Debug, Clone)]
pub struct MarketCatalog {
    markets: Vec<Market>,
}

impl MarketCatalog {
    pub fn standard() -> Self {
        let markets = STANDARD_MARKETS
            .iter()
            .map(|(name, symbol)| Market {
                display_name: name.to_string(),
                source_symbol: symbol.to_string(),
            })
            .collect();
        Self { markets }
    }

    pub fn markets(&self) -> &[Market] {
        &self.markets
    }

    pub fn names(&self) -> Vec<&str> {
        self.markets.iter().map(|m| m.display_name.as_str()).collect()
    }

    pub fn resolve(&self, display_name: &str) -> Result<&Market> {
        self.markets
            .iter()
            .find(|m| m.display_name == display_name)
            .ok_or_else(|| ConfluenceError::UnknownMarket(display_name.to_string()))
    }
}

impl Default for MarketCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_resolve_known_markets() {
        let catalog = MarketCatalog::standard();
        assert_eq!(catalog.resolve("GOLD").unwrap().source_symbol, "GC=F");
        assert_eq!(catalog.resolve("NAS100").unwrap().source_symbol, "^IXIC");
    }

    #[test]
    fn test_unknown_market_fails() {
        let catalog = MarketCatalog::standard();
        match catalog.resolve("nas100") {
            Err(ConfluenceError::UnknownMarket(name)) => assert_eq!(name, "nas100"),
            other => panic!("expected UnknownMarket, got {:?}", other),
        }
    }

    #[test]
    fn test_catalog_has_seven_unique_names() {
        let catalog = MarketCatalog::standard();
        let names: HashSet<_> = catalog.names().into_iter().collect();
        assert_eq!(names.len(), 7);
        assert_eq!(catalog.markets().len(), 7);
    }
}
