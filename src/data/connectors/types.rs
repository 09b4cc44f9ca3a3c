/// Interval tokens the pipeline is willing to request from a provider.
pub const SUPPORTED_INTERVALS: [&str; 14] = [
    "1m", "2m", "5m", "15m", "30m", "60m", "90m", "1h", "4h", "1d", "5d", "1wk", "1mo", "3mo",
];

pub struct BarInterval;

impl BarInterval {
    pub fn is_supported(token: &str) -> bool {
        SUPPORTED_INTERVALS.contains(&token)
    }

    /// Approximate bar width in minutes, used to size generated series.
    pub fn minutes(token: &str) -> Option<i64> {
        let minutes = match token {
            "1m" => 1,
            "2m" => 2,
            "5m" => 5,
            "15m" => 15,
            "30m" => 30,
            "60m" | "1h" => 60,
            "90m" => 90,
            "4h" => 240,
            "1d" => 1_440,
            "5d" => 7_200,
            "1wk" => 10_080,
            "1mo" => 43_200,
            "3mo" => 129_600,
            _ => return None,
        };
        Some(minutes)
    }
}

/// Parse a lookback period such as `60d`, `2wk`, `6mo` or `1y` into days.
/// `None` for unknown units and for counts that overflow.
pub fn period_days(period: &str) -> Option<i64> {
    let split = period.find(|c: char| !c.is_ascii_digit())?;
    let (count, unit) = period.split_at(split);
    let count: i64 = count.parse().ok()?;
    let days_per_unit = match unit {
        "d" => 1,
        "wk" => 7,
        "mo" => 30,
        "y" => 365,
        _ => return None,
    };
    count.checked_mul(days_per_unit)
}
