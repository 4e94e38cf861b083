//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate only ever sees the per-run
//! `SplatConfig` built from it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables (`SPLAT_MANIFEST__PRECEDENCE=destination`, ...)
//! 3. Config file (`--config FILE`, else the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::PathBuf;

use anyhow::Context as _;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use splat_core::{
    application::{DEFAULT_MANIFEST_NAME, DEFAULT_TEMPLATE},
    domain::MergePrecedence,
};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Template catalog settings.
    pub templates: TemplateConfig,
    /// Dependency manifest settings.
    pub manifest: ManifestConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    /// Templates root; the platform data dir when unset.
    pub root: Option<PathBuf>,
    /// Template used when `--from` is not given.
    pub default: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestConfig {
    pub file_name: String,
    pub precedence: MergePrecedence,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            templates: TemplateConfig {
                root: None,
                default: DEFAULT_TEMPLATE.into(),
            },
            manifest: ManifestConfig {
                file_name: DEFAULT_MANIFEST_NAME.into(),
                precedence: MergePrecedence::default(),
            },
            output: OutputConfig { no_color: false },
        }
    }
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then `SPLAT_*`
    /// environment variables.
    ///
    /// `config_file` is the path the user passed via `--config`; that file
    /// must exist. Without it the default location is read if present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let defaults = Self::default();
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };

        let settings = Config::builder()
            .set_default("templates.default", defaults.templates.default)?
            .set_default("manifest.file_name", defaults.manifest.file_name)?
            .set_default(
                "manifest.precedence",
                defaults.manifest.precedence.to_string(),
            )?
            .set_default("output.no_color", defaults.output.no_color)?
            .add_source(File::from(path.as_path()).required(required))
            .add_source(
                Environment::with_prefix("SPLAT")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.splat.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "splat", "splat")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".splat.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_template_is_default() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.templates.default, "default");
        assert_eq!(cfg.manifest.file_name, "package.json");
    }

    #[test]
    fn default_no_color_is_false() {
        assert!(!AppConfig::default().output.no_color);
    }

    #[test]
    fn explicit_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("splat.toml");
        std::fs::write(
            &path,
            "[templates]\ndefault = \"react\"\nroot = \"/opt/templates\"\n\n[manifest]\nprecedence = \"destination\"\n",
        )
        .unwrap();

        let cfg = AppConfig::load(Some(&path)).unwrap();
        assert_eq!(cfg.templates.default, "react");
        assert_eq!(cfg.templates.root, Some(PathBuf::from("/opt/templates")));
        assert_eq!(cfg.manifest.precedence, MergePrecedence::Destination);
        assert_eq!(cfg.manifest.file_name, "package.json");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.toml");
        assert!(AppConfig::load(Some(&path)).is_err());
    }

    #[test]
    fn defaults_round_trip_through_toml() {
        let text = toml::to_string_pretty(&AppConfig::default()).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, AppConfig::default());
    }

    #[test]
    fn config_path_is_not_empty() {
        let p = AppConfig::config_path();
        assert!(!p.as_os_str().is_empty());
    }
}
