//! Configuration for the folio portfolio.
//!
//! Settings live in `config.toml` under the platform config directory
//! (for example `~/.config/folio/config.toml` on Linux). A missing file
//! means defaults; a malformed one is an error.

mod error;

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use folio_core::{ColorTheme, ZoneSet};
use folio_snippets::{EffectSettings, default_bank};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

pub use error::ConfigError;

/// Name of the configuration file.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Largest accepted grid jitter, in viewport percent.
const MAX_CELL_JITTER: f32 = 100.0;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub effects: EffectsConfig,
    pub contact: ContactConfig,
    pub ui: UiConfig,
}

/// `[effects]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectsConfig {
    /// Master switch for the snippet background.
    pub enabled: bool,
    /// Treat the user as preferring reduced motion.
    pub reduced_motion: bool,
    /// Replacement for the built-in snippet content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_bank: Option<Vec<String>>,
    #[serde(flatten)]
    pub tuning: EffectSettings,
    pub zones: ZoneSet,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            reduced_motion: false,
            content_bank: None,
            tuning: EffectSettings::default(),
            zones: ZoneSet::default(),
        }
    }
}

impl EffectsConfig {
    /// The configured content bank, or the built-in one.
    pub fn bank(&self) -> Vec<String> {
        self.content_bank.clone().unwrap_or_else(default_bank)
    }
}

/// How contact submissions leave the machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// POST to a contact relay endpoint.
    #[default]
    Endpoint,
    /// Send directly through the Resend email API.
    Resend,
}

/// `[contact]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub transport: TransportKind,
    /// Relay URL for the endpoint transport.
    pub endpoint: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// Inbox that receives messages (resend transport).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_email: Option<String>,
    /// Sender address (resend transport).
    pub from_email: String,
    /// Environment variable holding the Resend API key.
    pub api_key_env: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            transport: TransportKind::Endpoint,
            endpoint: "http://localhost:5000/api/contact".to_string(),
            timeout_secs: 10,
            to_email: None,
            from_email: "Portfolio <onboarding@resend.dev>".to_string(),
            api_key_env: "RESEND_API_KEY".to_string(),
        }
    }
}

/// `[ui]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    pub theme: ColorTheme,
    /// Capture the mouse for scrolling and the pointer highlight.
    pub mouse: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: ColorTheme::default(),
            mouse: true,
        }
    }
}

impl Config {
    /// Default location of the configuration file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "folio").map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Load from `path`, falling back to defaults when the file is absent.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config = Self::from_toml(&text).map_err(|e| e.at(path))?;
        info!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Render as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Write to `path`, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, self.to_toml()?).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reject settings the effect cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let t = &self.effects.tuning;
        let ranges = [
            ("effects.spawn_interval_ms", t.spawn_interval_ms),
            ("effects.initial_delay_ms", t.initial_delay_ms),
            ("effects.lifetime_ms", t.lifetime_ms),
        ];
        for (field, range) in ranges {
            if range.min() > range.max() {
                return Err(ConfigError::invalid(field, "minimum exceeds maximum"));
            }
        }
        if t.tick_ms == 0 {
            return Err(ConfigError::invalid("effects.tick_ms", "must be positive"));
        }
        if t.reclaim_ms == 0 {
            return Err(ConfigError::invalid("effects.reclaim_ms", "must be positive"));
        }
        if t.type_speed_ms == 0 {
            return Err(ConfigError::invalid("effects.type_speed_ms", "must be positive"));
        }
        if t.grid_wide == 0 || t.grid_compact == 0 {
            return Err(ConfigError::invalid("effects.grid_*", "must be positive"));
        }
        let non_negative = |v: f32| v.is_finite() && v >= 0.0;
        if !non_negative(t.min_distance) {
            return Err(ConfigError::invalid(
                "effects.min_distance",
                "must be finite and non-negative",
            ));
        }
        if !non_negative(t.cell_jitter) || t.cell_jitter > MAX_CELL_JITTER {
            return Err(ConfigError::invalid(
                "effects.cell_jitter",
                "must be between 0 and 100",
            ));
        }
        let zones = &self.effects.zones;
        if zones.compact.iter().chain(&zones.wide).any(|z| !z.is_well_formed()) {
            return Err(ConfigError::invalid("effects.zones", "x1/y1 must not exceed x2/y2"));
        }
        if self.contact.timeout_secs == 0 {
            return Err(ConfigError::invalid("contact.timeout_secs", "must be positive"));
        }
        Ok(())
    }
}
