//! # Tentvakt Configuration System
//!
//! Hierarchical configuration for the Tentvakt proctoring monitor.
//!
//! ## Features
//! - **Unified Configuration**: Single source of truth across all components
//! - **Validation**: Runtime validation of thresholds and catalog entries
//! - **Environment Awareness**: Per‑environment override files plus
//!   `TENTVAKT_*` environment variables

#![warn(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod catalog;
mod engine;
mod error;
mod session;
mod validation;

pub use catalog::CatalogConfig;
pub use catalog::DevtoolsConfig;
pub use engine::EngineConfig;
pub use error::ConfigError;
pub use session::SessionConfig;

/// Top‑level configuration container for all Tentvakt components.
#[derive(Debug, Serialize, Deserialize, Validate, Default, Clone)]
pub struct TentvaktConfig {
    /// Session parameters (lockout threshold, retention, time limit).
    #[validate(nested)]
    pub session: SessionConfig,

    /// Signal catalog parameters (severity profile, blocked shortcuts,
    /// devtools heuristic).
    #[validate(nested)]
    pub catalog: CatalogConfig,

    /// Runtime parameters (notification queue sizing).
    #[validate(nested)]
    pub engine: EngineConfig,
}

impl TentvaktConfig {
    /// Load configuration from default files and environment.
    ///
    /// Hierarchy:
    /// 1. Default values
    /// 2. `config/tentvakt.yaml` — base settings; defaults are used if missing.
    /// 3. `config/<environment>.yaml` — environment‑specific overrides.
    /// 4. `TENTVAKT_*` environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(TentvaktConfig::default()));

        if Path::new("config/tentvakt.yaml").exists() {
            figment = figment.merge(Yaml::file("config/tentvakt.yaml"));
        }

        let env = std::env::var("TENTVAKT_ENV").unwrap_or_else(|_| "production".into());
        let env_file = format!("config/{}.yaml", env);
        if Path::new(&env_file).exists() {
            figment = figment.merge(Yaml::file(env_file));
        }

        figment
            .merge(Env::prefixed("TENTVAKT_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific path, with environment overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        Figment::from(Serialized::defaults(TentvaktConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed("TENTVAKT_").split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_config_validation() {
        let config = TentvaktConfig::default();
        config.validate().expect("Default config should validate");
    }

    #[test]
    fn environment_override() {
        std::env::set_var("TENTVAKT_SESSION__LOCKOUT_THRESHOLD", "8");
        let config = TentvaktConfig::load().unwrap();
        assert_eq!(config.session.lockout_threshold, 8);
        std::env::remove_var("TENTVAKT_SESSION__LOCKOUT_THRESHOLD");
    }

    #[test]
    fn missing_file_is_reported() {
        let err = TentvaktConfig::load_from_path("config/no-such-file.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }
}
