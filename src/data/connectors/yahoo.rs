//! Yahoo Finance chart API client.

use super::{source::DataSource, validator::DataValidator};
use crate::config::MarketDataConfig;
use crate::error::{ConfluenceError, Result};
use crate::types::{Bar, PriceSeries};
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use serde::Deserialize;

/// Chart error code Yahoo uses for symbols or ranges with nothing to return.
const NOT_FOUND: &str = "Not Found";

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    timestamp: Option<Vec<i64>>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    open: Option<Vec<Option<f64>>>,
    high: Option<Vec<Option<f64>>>,
    low: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
}

/// Decode a `/v8/finance/chart` body. Rows with any missing price are skipped.
pub fn parse_chart_response(body: &str) -> Result<PriceSeries> {
    let envelope: ChartEnvelope = serde_json::from_str(body)?;

    if let Some(error) = envelope.chart.error {
        if error.code == NOT_FOUND {
            return Ok(PriceSeries::empty());
        }
        return Err(ConfluenceError::DataSource(format!(
            "{}: {}",
            error.code,
            error.description.unwrap_or_default()
        )));
    }

    let Some(result) = envelope.chart.result.and_then(|r| r.into_iter().next()) else {
        return Ok(PriceSeries::empty());
    };
    let timestamps = result.timestamp.unwrap_or_default();
    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();
    let (open, high, low, close) = (
        quote.open.unwrap_or_default(),
        quote.high.unwrap_or_default(),
        quote.low.unwrap_or_default(),
        quote.close.unwrap_or_default(),
    );

    let bars = timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, &ts)| {
            let timestamp = DateTime::<Utc>::from_timestamp(ts, 0)?;
            Some(Bar::new(
                timestamp,
                (*open.get(i)?)?,
                (*high.get(i)?)?,
                (*low.get(i)?)?,
                (*close.get(i)?)?,
            ))
        })
        .collect();

    Ok(PriceSeries::new(bars))
}

pub struct YahooChartSource {
    client: Client,
    base_url: String,
}

impl YahooChartSource {
    pub fn new(config: &MarketDataConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }
}

impl DataSource for YahooChartSource {
    fn name(&self) -> &'static str {
        "Yahoo Finance"
    }

    fn fetch(&self, symbol: &str, period: &str, interval: &str) -> Result<PriceSeries> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, symbol);

        let response = self
            .client
            .get(&url)
            .query(&[("range", period), ("interval", interval)])
            .send()?;
        let status = response.status();
        let body = response.text()?;

        match parse_chart_response(&body) {
            Ok(series) => Ok(DataValidator::sanitize(series, Utc::now())),
            Err(e) if !status.is_success() => Err(ConfluenceError::DataSource(format!(
                "HTTP {} for {}: {}",
                status, symbol, e
            ))),
            Err(e) => Err(e),
        }
    }
}
