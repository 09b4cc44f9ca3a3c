mod source;
mod synthetic;
mod types;
mod validator;
mod yahoo;

pub use source::DataSource;
pub use synthetic::SyntheticSource;
pub use types::{period_days, BarInterval, SUPPORTED_INTERVALS};
pub use validator::DataValidator;
pub use yahoo::{parse_chart_response, YahooChartSource};
