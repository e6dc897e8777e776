use crate::config::AppConfig;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Json, Serialized, Toml},
    Figment,
};
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config/Config.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads configuration by merging defaults, TOML, environment variables, and JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or the
    /// resulting analysis thresholds are invalid.
    pub fn load() -> Result<AppConfig> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Loads configuration with a specific TOML file as the base layer.
    ///
    /// A missing file is not an error; defaults apply.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or the
    /// resulting analysis thresholds are invalid.
    pub fn load_from(path: impl AsRef<Path>) -> Result<AppConfig> {
        let config: AppConfig = Self::figment(path.as_ref()).extract()?;
        config.analysis.validate()?;
        tracing::debug!(path = %path.as_ref().display(), "configuration loaded");
        Ok(config)
    }

    /// Loads configuration with a profile overlay (`Config.{profile}.toml`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration files cannot be parsed or the
    /// resulting analysis thresholds are invalid.
    pub fn load_with_profile(profile: &str) -> Result<AppConfig> {
        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(DEFAULT_CONFIG_PATH))
            .merge(Toml::file(format!("config/Config.{profile}.toml")))
            .merge(Env::prefixed("PULSE_").split("__"))
            .join(Json::file("config/Config.json"))
            .extract()?;
        config.analysis.validate()?;
        Ok(config)
    }

    fn figment(path: &Path) -> Figment {
        Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("PULSE_").split("__"))
            .join(Json::file("config/Config.json"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_apply_without_files() {
        Jail::expect_with(|_jail| {
            let config = ConfigLoader::load().expect("defaults should load");
            assert_eq!(config, AppConfig::default());
            Ok(())
        });
    }

    #[test]
    fn toml_overrides_defaults() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/Config.toml",
                r#"
                [analysis]
                funding_rate_threshold = 0.02

                [watch]
                symbols = ["BTC/USDT"]
                "#,
            )?;

            let config = ConfigLoader::load().expect("config should load");
            assert!((config.analysis.funding_rate_threshold - 0.02).abs() < f64::EPSILON);
            assert!((config.analysis.volume_spike_threshold - 0.30).abs() < f64::EPSILON);
            assert_eq!(config.watch.symbols, vec!["BTC/USDT".to_string()]);
            Ok(())
        });
    }

    #[test]
    fn env_overrides_toml() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/Config.toml",
                "[watch]\nrefresh_interval_secs = 30\n",
            )?;
            jail.set_env("PULSE_WATCH__REFRESH_INTERVAL_SECS", "5");

            let config = ConfigLoader::load().expect("config should load");
            assert_eq!(config.watch.refresh_interval_secs, 5);
            Ok(())
        });
    }

    #[test]
    fn profile_overlays_base_file() {
        Jail::expect_with(|jail| {
            jail.create_dir("config")?;
            jail.create_file(
                "config/Config.toml",
                "[collector]\ntimeframe = \"1h\"\ncandle_limit = 200\n",
            )?;
            jail.create_file("config/Config.scalp.toml", "[collector]\ntimeframe = \"15m\"\n")?;

            let config = ConfigLoader::load_with_profile("scalp").expect("profile should load");
            assert_eq!(config.collector.timeframe, "15m");
            assert_eq!(config.collector.candle_limit, 200);
            Ok(())
        });
    }

    #[test]
    fn invalid_thresholds_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("custom.toml", "[analysis]\nfunding_rate_threshold = -1.0\n")?;

            assert!(ConfigLoader::load_from("custom.toml").is_err());
            Ok(())
        });
    }
}
