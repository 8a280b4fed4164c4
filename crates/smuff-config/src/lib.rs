//! Shared configuration for the SMuFF panel tools.
//!
//! TOML file at the platform config dir, layered under `SMUFF_*`
//! environment variables, and translation to `smuff_core::PanelConfig`.
//! The CLI adds flag-aware overrides on top.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use smuff_core::{AddressTokens, PanelConfig, Unit, config as core_config};

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Host plugin identifier whose messages the panel accepts.
    #[serde(default = "default_plugin_id")]
    pub plugin_id: String,

    /// Per-unit command address tokens.
    #[serde(default)]
    pub addresses: Addresses,

    /// Global output defaults.
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub log: LogSettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            plugin_id: default_plugin_id(),
            addresses: Addresses::default(),
            defaults: Defaults::default(),
            log: LogSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Addresses {
    #[serde(default = "default_unit_a")]
    pub unit_a: String,

    #[serde(default = "default_unit_b")]
    pub unit_b: String,
}

impl Default for Addresses {
    fn default() -> Self {
        Self {
            unit_a: default_unit_a(),
            unit_b: default_unit_b(),
        }
    }
}

impl Addresses {
    pub fn get(&self, unit: Unit) -> &str {
        match unit {
            Unit::A => &self.unit_a,
            Unit::B => &self.unit_b,
        }
    }

    pub fn set(&mut self, unit: Unit, token: impl Into<String>) {
        match unit {
            Unit::A => self.unit_a = token.into(),
            Unit::B => self.unit_b = token.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct LogSettings {
    /// Emit logs as JSON lines instead of the human formatter.
    #[serde(default)]
    pub json: bool,
}

fn default_plugin_id() -> String {
    core_config::DEFAULT_PLUGIN_ID.into()
}
fn default_unit_a() -> String {
    core_config::DEFAULT_ADDRESS_A.into()
}
fn default_unit_b() -> String {
    core_config::DEFAULT_ADDRESS_B.into()
}
fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

impl Config {
    /// Validate and translate into the core's runtime configuration.
    pub fn to_panel_config(&self) -> Result<PanelConfig, ConfigError> {
        if self.plugin_id.trim().is_empty() {
            return Err(ConfigError::Validation {
                field: "plugin_id".into(),
                reason: "must not be empty".into(),
            });
        }

        let addresses = AddressTokens::new(&self.addresses.unit_a, &self.addresses.unit_b)
            .map_err(|e| ConfigError::Validation {
                field: "addresses".into(),
                reason: e.to_string(),
            })?;

        Ok(PanelConfig {
            plugin_id: self.plugin_id.clone(),
            addresses,
        })
    }

    /// The file form of this config, as written by [`save_config_to`].
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "smuff", "smuff").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("smuff");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from an explicit file path, still honouring `SMUFF_*` overrides.
///
/// A missing file is not an error; defaults fill in.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let config: Config = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("SMUFF_").split("__"))
        .extract()?;
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write it to `path`, creating parent dirs.
pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, cfg.to_toml_string()?)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("absent.toml")).unwrap();

        assert_eq!(cfg.addresses.unit_a, "@SMuFF");
        assert_eq!(cfg.addresses.unit_b, "@SMuFF2");
        assert_eq!(cfg.plugin_id, "SMuFF");
        assert_eq!(cfg.defaults.output, "table");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[addresses]\nunit_b = \"@RIGHT\"\n").unwrap();

        let cfg = load_config_from(&path).unwrap();
        assert_eq!(cfg.addresses.unit_a, "@SMuFF");
        assert_eq!(cfg.addresses.unit_b, "@RIGHT");
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        cfg.addresses.set(Unit::A, "@LEFT");
        cfg.log.json = true;
        save_config_to(&cfg, &path).unwrap();

        assert_eq!(load_config_from(&path).unwrap(), cfg);
    }

    #[test]
    fn toml_form_escapes_quotes() {
        let cfg = Config {
            plugin_id: r#"SMuFF "left""#.into(),
            ..Config::default()
        };

        let text = cfg.to_toml_string().unwrap();
        assert_eq!(toml::from_str::<Config>(&text).unwrap(), cfg);
    }

    #[test]
    fn panel_config_rejects_duplicate_tokens() {
        let mut cfg = Config::default();
        cfg.addresses.set(Unit::B, "@SMuFF");

        let err = cfg.to_panel_config().unwrap_err();
        assert!(matches!(err, ConfigError::Validation { ref field, .. } if field == "addresses"));
    }

    #[test]
    fn panel_config_carries_tokens() {
        let panel = Config::default().to_panel_config().unwrap();
        assert_eq!(panel.addresses.get(Unit::B), "@SMuFF2");
        assert_eq!(panel.plugin_id, "SMuFF");
    }
}
