use crate::functions::traits::{Indicator, IndicatorArg, VectorizedIndicator};
use anyhow::{bail, Result};
use polars::lazy::dsl;

// --- EMA ---
pub struct EMA {
    pub period: usize,
}

impl EMA {
    pub fn new(period: usize) -> Self {
        Self { period }
    }

    /// Smoothing factor for a span-parameterised EMA.
    pub fn alpha(&self) -> f64 {
        2.0 / (self.period as f64 + 1.0)
    }
}

impl Indicator for EMA {
    fn alias(&self) -> &'static str {
        "EMA"
    }

    fn ui_name(&self) -> &'static str {
        "Exponential Moving Average"
    }

    fn warmup(&self) -> usize {
        self.period
    }
}

impl VectorizedIndicator for EMA {
    /// Recursive EMA seeded at the first value (`adjust = false`).
    /// Emits a value from the first bar on; short series are not nulled out.
    fn calculate_vectorized(&self, args: &[IndicatorArg]) -> Result<dsl::Expr> {
        if self.period == 0 {
            bail!("EMA: span must be at least 1");
        }
        let series = match args.first() {
            Some(IndicatorArg::Series(expr)) => expr.clone(),
            _ => bail!("EMA: first arg must be series"),
        };

        use polars::prelude::EWMOptions;
        let options = EWMOptions {
            alpha: self.alpha(),
            adjust: false,
            min_periods: 1,
            ..Default::default()
        };

        Ok(series.ewm_mean(options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::df;
    use polars::prelude::*;

    fn run(ema: &EMA, closes: &[f64]) -> Vec<Option<f64>> {
        let df = df! { "close" => closes }.unwrap();
        let expr = ema
            .calculate_vectorized(&[IndicatorArg::Series(dsl::col("close"))])
            .unwrap();
        let out = df.lazy().select([expr.alias("ema")]).collect().unwrap();
        out.column("ema").unwrap().f64().unwrap().into_iter().collect()
    }

    #[test]
    fn test_ema_seeds_at_first_close() {
        let values = run(&EMA::new(3), &[10.0, 20.0, 30.0]);
        // alpha = 0.5: 10, 15, 22.5
        assert_eq!(values, vec![Some(10.0), Some(15.0), Some(22.5)]);
    }

    #[test]
    fn test_span_one_tracks_price() {
        let values = run(&EMA::new(1), &[4.0, 9.0, 2.0]);
        assert_eq!(values, vec![Some(4.0), Some(9.0), Some(2.0)]);
    }

    #[test]
    fn test_zero_span_is_rejected() {
        let result = EMA::new(0).calculate_vectorized(&[IndicatorArg::Series(dsl::col("close"))]);
        assert!(result.is_err());
    }

    #[test]
    fn test_scalar_arg_is_rejected() {
        let result = EMA::new(5).calculate_vectorized(&[IndicatorArg::Scalar(5.0)]);
        assert!(result.is_err());
    }
}
