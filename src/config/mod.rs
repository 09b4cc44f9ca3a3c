pub mod traits;
pub mod dashboard;
pub mod market_data;
pub mod signals;
pub mod manager;

pub use manager::{AppConfig, ConfigManager, DEFAULT_CONFIG_FILE};
pub use dashboard::DashboardConfig;
pub use market_data::{MarketDataConfig, ProviderKind};
pub use signals::SignalConfig;
pub use traits::ConfigSection;
