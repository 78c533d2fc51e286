use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub defaults: DefaultsConfig,
    pub logging: LoggingConfig,
}

/// Seed values for freshly created snapshots.
#[derive(Clone, Debug)]
pub struct DefaultsConfig {
    pub shop_location: String,
    pub shipment_type: String,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

impl LogFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Pretty => "pretty",
            Self::Json => "json",
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub shop_location: Option<String>,
    pub shipment_type: Option<String>,
    pub log_level: Option<String>,
    pub log_format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            defaults: DefaultsConfig {
                shop_location: "Shop".to_string(),
                shipment_type: "LTL".to_string(),
            },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    defaults: Option<DefaultsPatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct DefaultsPatch {
    shop_location: Option<String>,
    shipment_type: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("rigquote.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(defaults) = patch.defaults {
            if let Some(shop_location) = defaults.shop_location {
                self.defaults.shop_location = shop_location;
            }
            if let Some(shipment_type) = defaults.shipment_type {
                self.defaults.shipment_type = shipment_type;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("RIGQUOTE_SHOP_LOCATION") {
            self.defaults.shop_location = value;
        }
        if let Some(value) = read_env("RIGQUOTE_SHIPMENT_TYPE") {
            self.defaults.shipment_type = value;
        }

        let log_level =
            read_env("RIGQUOTE_LOGGING_LEVEL").or_else(|| read_env("RIGQUOTE_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("RIGQUOTE_LOGGING_FORMAT").or_else(|| read_env("RIGQUOTE_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(shop_location) = overrides.shop_location {
            self.defaults.shop_location = shop_location;
        }
        if let Some(shipment_type) = overrides.shipment_type {
            self.defaults.shipment_type = shipment_type;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(log_format) = overrides.log_format {
            self.logging.format = log_format;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.defaults.shop_location.trim().is_empty() {
            return Err(ConfigError::Validation(
                "defaults.shop_location must not be empty".to_string(),
            ));
        }

        let shipment = self.defaults.shipment_type.trim();
        if shipment != "LTL" && shipment != "FTL" {
            return Err(ConfigError::Validation(format!(
                "unsupported defaults.shipment_type `{shipment}` (expected LTL|FTL)"
            )));
        }

        let level = self.logging.level.trim().to_ascii_lowercase();
        if !matches!(level.as_str(), "trace" | "debug" | "info" | "warn" | "error") {
            return Err(ConfigError::Validation(format!(
                "unsupported logging.level `{}` (expected trace|debug|info|warn|error)",
                self.logging.level
            )));
        }

        Ok(())
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("rigquote.toml"), PathBuf::from("config/rigquote.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    toml::from_str::<ConfigPatch>(&raw)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().map(|value| value.trim().to_string()).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::sync::{Mutex, OnceLock};

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    fn with_env(vars: &[(&str, &str)], test_fn: impl FnOnce()) {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        let _guard = ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .expect("env mutex should not be poisoned");

        let keys = [
            "RIGQUOTE_SHOP_LOCATION",
            "RIGQUOTE_SHIPMENT_TYPE",
            "RIGQUOTE_LOGGING_LEVEL",
            "RIGQUOTE_LOGGING_FORMAT",
            "RIGQUOTE_LOG_LEVEL",
            "RIGQUOTE_LOG_FORMAT",
        ];

        let previous_values: Vec<(&str, Option<String>)> =
            keys.iter().map(|key| (*key, env::var(key).ok())).collect();

        for key in &keys {
            env::remove_var(key);
        }
        for (key, value) in vars {
            env::set_var(key, value);
        }

        test_fn();

        for (key, value) in previous_values {
            if let Some(value) = value {
                env::set_var(key, value);
            } else {
                env::remove_var(key);
            }
        }
    }

    #[test]
    fn defaults_match_the_form_seed_values() {
        with_env(&[], || {
            let config = AppConfig::load(LoadOptions::default()).expect("load");
            assert_eq!(config.defaults.shop_location, "Shop");
            assert_eq!(config.defaults.shipment_type, "LTL");
            assert_eq!(config.logging.format, LogFormat::Compact);
        });
    }

    #[test]
    fn env_overrides_take_precedence_over_defaults() {
        with_env(
            &[
                ("RIGQUOTE_SHOP_LOCATION", "Hillsboro yard"),
                ("RIGQUOTE_SHIPMENT_TYPE", "FTL"),
                ("RIGQUOTE_LOG_FORMAT", "json"),
            ],
            || {
                let config = AppConfig::load(LoadOptions::default()).expect("load");
                assert_eq!(config.defaults.shop_location, "Hillsboro yard");
                assert_eq!(config.defaults.shipment_type, "FTL");
                assert_eq!(config.logging.format, LogFormat::Json);
            },
        );
    }

    #[test]
    fn programmatic_overrides_win_over_env() {
        with_env(&[("RIGQUOTE_SHOP_LOCATION", "Hillsboro yard")], || {
            let config = AppConfig::load(LoadOptions {
                overrides: ConfigOverrides {
                    shop_location: Some("Mukilteo yard".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .expect("load");

            assert_eq!(config.defaults.shop_location, "Mukilteo yard");
        });
    }

    #[test]
    fn file_patch_applies_before_env() {
        with_env(&[], || {
            let dir = tempfile::tempdir().expect("tempdir");
            let path = dir.path().join("rigquote.toml");
            std::fs::write(
                &path,
                "[defaults]\nshipment_type = \"FTL\"\n\n[logging]\nlevel = \"debug\"\nformat = \"pretty\"\n",
            )
            .expect("write config");

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                ..LoadOptions::default()
            })
            .expect("load");

            assert_eq!(config.defaults.shipment_type, "FTL");
            assert_eq!(config.logging.level, "debug");
            assert_eq!(config.logging.format, LogFormat::Pretty);
        });
    }

    #[test]
    fn missing_required_file_is_an_error() {
        with_env(&[], || {
            let result = AppConfig::load(LoadOptions {
                config_path: Some("does-not-exist.toml".into()),
                require_file: true,
                ..LoadOptions::default()
            });
            assert!(matches!(result, Err(ConfigError::MissingConfigFile(_))));
        });
    }

    #[test]
    fn rejects_unknown_shipment_type_and_log_values() {
        with_env(&[("RIGQUOTE_SHIPMENT_TYPE", "parcel")], || {
            let error = AppConfig::load(LoadOptions::default()).expect_err("invalid shipment");
            assert!(error.to_string().contains("shipment_type"));
        });

        with_env(&[("RIGQUOTE_LOG_FORMAT", "yaml")], || {
            let error = AppConfig::load(LoadOptions::default()).expect_err("invalid format");
            assert!(error.to_string().contains("log format"));
        });

        with_env(&[("RIGQUOTE_LOG_LEVEL", "verbose")], || {
            let error = AppConfig::load(LoadOptions::default()).expect_err("invalid level");
            assert!(error.to_string().contains("logging.level"));
        });
    }
}
