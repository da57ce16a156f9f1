//! TOML-based configuration for sextant.
//!
//! Supports a config file (sextant.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [logging]
//! level = "debug"
//!
//! [fingerprints]
//! store_path = "${HOME}/.sextant/fingerprints.db"
//!
//! [classifier]
//! category_cardinality_threshold = 30
//! percent_valid_threshold = 0.95
//! no_preview_display_length = 50
//!
//! [metadata]
//! include_sensitive_fields = false
//! virtual_table_schema = "Everything else"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub fingerprints: FingerprintSettings,
    pub classifier: ClassifierSettings,
    pub metadata: MetadataSettings,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` overrides it.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Fingerprint store configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FingerprintSettings {
    /// Path to the SQLite store (supports ${ENV_VAR} expansion).
    /// Defaults to `~/.sextant/fingerprints.db`.
    pub store_path: Option<String>,
}

impl FingerprintSettings {
    /// Get the store path with environment variables expanded.
    pub fn resolved_store_path(&self) -> Result<Option<PathBuf>, SettingsError> {
        self.store_path
            .as_deref()
            .map(|p| expand_env_vars(p).map(PathBuf::from))
            .transpose()
    }
}

/// Thresholds used when classifying newly synced fields.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ClassifierSettings {
    /// Fields with fewer distinct values than this become categories.
    pub category_cardinality_threshold: u64,

    /// Share of values (0.0 to 1.0) that must look like URLs / emails / JSON.
    pub percent_valid_threshold: f64,

    /// Text fields with a longer average length are hidden from previews.
    pub no_preview_display_length: f64,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            category_cardinality_threshold: 30,
            percent_valid_threshold: 0.95,
            no_preview_display_length: 50.0,
        }
    }
}

/// Metadata endpoint defaults.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MetadataSettings {
    /// Default for the "include sensitive fields" request flag.
    pub include_sensitive_fields: bool,

    /// Schema reported for virtual tables whose card has no collection.
    pub virtual_table_schema: String,
}

impl Default for MetadataSettings {
    fn default() -> Self {
        Self {
            include_sensitive_fields: false,
            virtual_table_schema: "Everything else".to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let settings: Settings = toml::from_str(&content)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `SEXTANT_CONFIG`
    /// 2. `./sextant.toml`
    /// 3. `~/.config/sextant/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("SEXTANT_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("sextant.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("sextant").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Reject values outside their meaningful range.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let threshold = self.classifier.percent_valid_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(SettingsError::InvalidConfig(format!(
                "classifier.percent_valid_threshold must be between 0 and 1, got {}",
                threshold
            )));
        }
        if self.metadata.virtual_table_schema.is_empty() {
            return Err(SettingsError::InvalidConfig(
                "metadata.virtual_table_schema must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let mut var_name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_alphanumeric() || ch == '_' {
                    var_name.push(ch);
                    chars.next();
                } else {
                    break;
                }
            }
            if var_name.is_empty() {
                // Just a lone $, keep it
                result.push('$');
                continue;
            }
        }

        let value =
            env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name.clone()))?;
        result.push_str(&value);
    }

    Ok(result)
}
