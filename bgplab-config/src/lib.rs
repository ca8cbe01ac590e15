//! # bgplab-config
//!
//! Hierarchical configuration for the bgplab simulation controller.
//!
//! Load order (later layers override earlier ones):
//! 1. Built-in defaults
//! 2. `config/bgplab.yaml`
//! 3. `config/<BGPLAB_ENV>.yaml`
//! 4. `BGPLAB_*` environment variables (`__` separates nesting)

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Yaml},
    Figment,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

mod error;

pub use error::ConfigError;

const ENV_PREFIX: &str = "BGPLAB_";
const BASE_FILE: &str = "config/bgplab.yaml";

/// Top-level configuration container.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, Default)]
pub struct BgplabConfig {
    /// Remote simulation service endpoint and timeout.
    #[validate(nested)]
    pub service: ServiceConfig,

    /// Visual playback timings for the animation sequencer.
    #[validate(nested)]
    pub animation: AnimationConfig,

    /// Output log sizing.
    #[validate(nested)]
    pub log: LogConfig,
}

impl BgplabConfig {
    /// Load configuration from default files and environment.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(BgplabConfig::default()));

        if Path::new(BASE_FILE).exists() {
            figment = figment.merge(Yaml::file(BASE_FILE));
        }

        if let Ok(env) = std::env::var("BGPLAB_ENV") {
            let env_file = format!("config/{env}.yaml");
            if Path::new(&env_file).exists() {
                figment = figment.merge(Yaml::file(env_file));
            }
        }

        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }

    /// Load configuration from a specific path, still honoring
    /// environment overrides.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(PathBuf::from(path)));
        }

        Figment::from(Serialized::defaults(BgplabConfig::default()))
            .merge(Yaml::file(path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(ConfigError::from)
            .and_then(|config: Self| {
                config.validate()?;
                Ok(config)
            })
    }
}

/// Remote service connection parameters.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ServiceConfig {
    /// Base URL of the simulation service.
    #[validate(url)]
    pub base_url: String,

    /// Per-request timeout in milliseconds. Expiry is reported to the
    /// operator the same way as a transport failure.
    #[validate(range(min = 1))]
    pub timeout_ms: u64,
}

impl ServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Packet-flow playback timings. ConnectionEstablished highlights are
/// immediate and carry no timing of their own.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct AnimationConfig {
    /// Delay before a created packet artifact starts moving.
    pub start_delay_ms: u64,

    /// Transit time from source anchor to destination anchor.
    #[validate(range(min = 1))]
    pub transit_ms: u64,
}

impl AnimationConfig {
    pub fn start_delay(&self) -> Duration {
        Duration::from_millis(self.start_delay_ms)
    }

    pub fn transit(&self) -> Duration {
        Duration::from_millis(self.transit_ms)
    }
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            start_delay_ms: 100,
            transit_ms: 1500,
        }
    }
}

/// Output log sizing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LogConfig {
    /// Maximum retained entries; the oldest entry is evicted first.
    #[validate(range(min = 1))]
    pub capacity: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self { capacity: 50 }
    }
}
