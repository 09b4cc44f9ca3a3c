use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfluenceError {
    #[error("Unknown market: {0}")]
    UnknownMarket(String),

    #[error("No data returned for the requested series")]
    NoData,

    #[error("Unsupported bar interval: {0}")]
    UnsupportedInterval(String),

    #[error("Deviation undefined: EMA is zero")]
    DivisionUndefined,

    #[error("Data source error: {0}")]
    DataSource(String),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Config source error: {0}")]
    ConfigSource(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, ConfluenceError>;
