//! Configuration module for sextant.
//!
//! Handles the config file, environment variable expansion and defaults.

mod settings;

pub use settings::{
    expand_env_vars, ClassifierSettings, FingerprintSettings, LoggingSettings, MetadataSettings,
    Settings, SettingsError,
};
