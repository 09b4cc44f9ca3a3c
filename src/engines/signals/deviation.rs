use crate::error::{ConfluenceError, Result};
use crate::functions::indicators::EMA;
use crate::functions::traits::{Indicator, IndicatorArg, VectorizedIndicator};
use crate::types::{round_to, EmaDeviation, PriceSeries};
use polars::df;
use polars::prelude::*;

/// Latest EMA value and how far the last close sits from it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmaReading {
    pub ema: f64,
    pub last_close: f64,
    /// Percent, rounded to 2 decimals. Positive above the EMA.
    pub deviation_pct: f64,
}

pub struct EmaDeviationCalculator {
    ema: EMA,
}

impl Default for EmaDeviationCalculator {
    fn default() -> Self {
        Self::new(50)
    }
}

impl EmaDeviationCalculator {
    pub fn new(span: usize) -> Self {
        Self { ema: EMA::new(span) }
    }

    pub fn span(&self) -> usize {
        self.ema.period
    }

    /// Fails with `NoData` on an empty series and `DivisionUndefined` when the EMA is zero.
    pub fn try_compute(&self, series: &PriceSeries) -> Result<EmaReading> {
        let closes = series.closes();
        let Some(&last_close) = closes.last() else {
            return Err(ConfluenceError::NoData);
        };
        if closes.len() < self.ema.warmup() {
            log::debug!(
                "{}({}) over only {} bars",
                self.ema.alias(),
                self.span(),
                closes.len()
            );
        }

        let expr = self
            .ema
            .calculate_vectorized(&[IndicatorArg::Series(col("close"))])
            .map_err(|e| ConfluenceError::Computation(e.to_string()))?;

        let frame = df! { "close" => closes }?
            .lazy()
            .select([expr.alias("ema")])
            .collect()?;
        let ema_values = frame.column("ema")?.f64()?;
        let ema = ema_values
            .get(ema_values.len() - 1)
            .ok_or_else(|| ConfluenceError::Computation("EMA produced no value".to_string()))?;

        if ema == 0.0 {
            return Err(ConfluenceError::DivisionUndefined);
        }

        let deviation_pct = round_to((last_close - ema) / ema * 100.0, 2);
        Ok(EmaReading {
            ema,
            last_close,
            deviation_pct,
        })
    }

    /// Deviation or absent; never fails.
    pub fn compute_deviation(&self, series: &PriceSeries) -> EmaDeviation {
        self.try_compute(series).ok().map(|r| r.deviation_pct)
    }
}
