use anyhow::Result;
use polars::prelude::*;

/// Base trait for all indicators
pub trait Indicator: Send + Sync {
    /// Display name
    fn ui_name(&self) -> &'static str;

    /// Short alias used in labels and logs
    fn alias(&self) -> &'static str;

    /// Bars needed before the output is meaningful
    fn warmup(&self) -> usize;
}

/// Indicators expressed as Polars expressions
pub trait VectorizedIndicator: Indicator {
    /// Calculate over entire series using Polars expressions
    fn calculate_vectorized(&self, args: &[IndicatorArg]) -> Result<Expr>;
}

/// Flexible argument for indicator calls
#[derive(Debug, Clone)]
pub enum IndicatorArg {
    Series(Expr),   // Polars expression
    Scalar(f64),    // Period, threshold, etc.
}
