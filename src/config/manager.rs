use super::{
    dashboard::DashboardConfig, market_data::MarketDataConfig, signals::SignalConfig,
    traits::ConfigSection,
};
use crate::error::ConfluenceError;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, RwLock};

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "confluence.toml";

/// Prefix for environment overrides, e.g. `CONFLUENCE__SIGNALS__EMA_SPAN=21`.
pub const ENV_PREFIX: &str = "CONFLUENCE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub dashboard: DashboardConfig,
    pub market_data: MarketDataConfig,
    pub signals: SignalConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfluenceError> {
        self.dashboard.validate()?;
        self.market_data.validate()?;
        self.signals.validate()?;
        Ok(())
    }
}

pub struct ConfigManager {
    config: Arc<RwLock<AppConfig>>,
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigManager {
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(AppConfig::default())),
        }
    }

    /// Layer an optional TOML file and `CONFLUENCE__*` environment variables
    /// over the defaults. An explicit `path` must exist; the default file may not.
    pub fn load_layered(&self, path: Option<&Path>) -> Result<(), ConfluenceError> {
        let file = match path {
            Some(path) => File::from(path).format(FileFormat::Toml).required(true),
            None => File::new(DEFAULT_CONFIG_FILE, FileFormat::Toml).required(false),
        };

        let config: AppConfig = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        self.replace(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfluenceError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfluenceError::Configuration(format!("Failed to read config: {}", e)))?;

        let config: AppConfig = toml::from_str(&contents)
            .map_err(|e| ConfluenceError::Configuration(format!("Failed to parse config: {}", e)))?;

        self.replace(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfluenceError> {
        let config = self.get();
        let toml_str = toml::to_string_pretty(&config)
            .map_err(|e| ConfluenceError::Configuration(format!("Failed to serialize: {}", e)))?;

        std::fs::write(path, toml_str)
            .map_err(|e| ConfluenceError::Configuration(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn get(&self) -> AppConfig {
        self.config
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub fn update<F>(&self, f: F) -> Result<(), ConfluenceError>
    where
        F: FnOnce(&mut AppConfig),
    {
        let mut candidate = self.get();
        f(&mut candidate);
        self.replace(candidate)
    }

    fn replace(&self, config: AppConfig) -> Result<(), ConfluenceError> {
        config.validate()?;
        *self
            .config
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = config;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProviderKind;

    fn example_file() -> std::path::PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("confluence.example.toml")
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("confluence-{}-{}.toml", name, std::process::id()))
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = temp_path("partial");
        std::fs::write(
            &path,
            "[dashboard]\nrefresh_interval_secs = 30\n\n[market_data]\nprovider = \"synthetic\"\n",
        )
        .unwrap();

        let manager = ConfigManager::new();
        manager.load_layered(Some(&path)).unwrap();
        let config = manager.get();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.dashboard.refresh_interval_secs, 30);
        assert_eq!(config.dashboard.default_market, "NAS100");
        assert_eq!(config.market_data.provider, ProviderKind::Synthetic);
        assert_eq!(config.signals.ema_span, 50);
        assert_eq!(config.signals.timeframes.len(), 7);
    }

    #[test]
    fn test_explicit_missing_file_is_an_error() {
        let manager = ConfigManager::new();
        let result = manager.load_layered(Some(Path::new("/definitely/not/here.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let path = temp_path("saved");
        let manager = ConfigManager::new();
        manager
            .update(|c| {
                c.signals.ema_span = 21;
                c.dashboard.default_market = "GOLD".to_string();
            })
            .unwrap();
        manager.save_to_file(&path).unwrap();

        let reloaded = ConfigManager::new();
        reloaded.load_from_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(reloaded.get().signals.ema_span, 21);
        assert_eq!(reloaded.get().dashboard.default_market, "GOLD");
    }

    #[test]
    fn test_environment_overrides_defaults() {
        // keys no other test asserts on, since the environment is process-wide
        std::env::set_var("CONFLUENCE__MARKET_DATA__TIMEOUT_MS", "2500");
        std::env::set_var("CONFLUENCE__SIGNALS__BIAS_PERIOD", "5d");

        let manager = ConfigManager::new();
        let result = manager.load_layered(Some(&example_file()));
        std::env::remove_var("CONFLUENCE__MARKET_DATA__TIMEOUT_MS");
        std::env::remove_var("CONFLUENCE__SIGNALS__BIAS_PERIOD");
        result.unwrap();

        let config = manager.get();
        assert_eq!(config.market_data.timeout_ms, 2500);
        assert_eq!(config.signals.bias_period, "5d");
        assert_eq!(config.signals.ema_span, 50);
    }

    #[test]
    fn test_example_file_loads() {
        let manager = ConfigManager::new();
        manager.load_layered(Some(&example_file())).unwrap();
        let config = manager.get();

        assert_eq!(config.market_data.provider, ProviderKind::Yahoo);
        assert_eq!(config.dashboard.default_market, "NAS100");
        assert_eq!(config.signals.ema_span, 50);
        assert_eq!(config.signals.timeframes, crate::types::TimeframeSpec::default_set());
    }

    #[test]
    fn test_invalid_update_is_rejected_and_not_applied() {
        let manager = ConfigManager::new();
        let result = manager.update(|c| c.dashboard.default_market = "DOGE".to_string());
        assert!(result.is_err());
        assert_eq!(manager.get().dashboard.default_market, "NAS100");
    }
}
