//! Configuration management for `assetwatch.toml`.
//!
//! The config file is optional. Without it every value takes its default,
//! which reproduces the fixed layout: scan `assets/`, write `Assets.mjs`,
//! serve `.` on port 8000.
//!
//! # Sections
//!
//! | Section    | Purpose                                       |
//! |------------|-----------------------------------------------|
//! | `[assets]` | Asset root and manifest path                  |
//! | `[serve]`  | Development server (interface, port, root)    |
//! | `[watch]`  | Asset watcher (enable, debounce window)       |
//!
//! Precedence: defaults < config file < command-line flags.

mod error;
pub mod section;

pub use error::ConfigError;
pub use section::{AssetsConfig, ServeConfig, WatchConfig};

use crate::{
    cli::{Cli, ServeArgs},
    log,
};
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing assetwatch.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path of the loaded config file, if one existed (internal use only)
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Asset root and manifest location
    #[serde(default)]
    pub assets: AssetsConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Asset watcher settings
    #[serde(default)]
    pub watch: WatchConfig,
}

impl AppConfig {
    /// Load configuration: defaults, then the config file if present, then
    /// command-line overrides. Validates the result.
    pub fn load(cli: &Cli) -> Result<Self> {
        crate::logger::set_verbose(cli.verbose);

        let mut config = if cli.config.is_file() {
            let mut config = Self::from_path(&cli.config)?;
            config.config_path = Some(cli.config.clone());
            config
        } else {
            crate::debug!("config"; "{} not found, using defaults", cli.config.display());
            Self::default()
        };

        config.apply_cli(cli);
        config.validate()?;

        if let Some(path) = &config.config_path {
            crate::debug!("config"; "loaded {}", path.display());
        }
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        log!("warning"; "unknown fields in {} (ignored):", path.display());
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Apply command-line overrides.
    fn apply_cli(&mut self, cli: &Cli) {
        Self::update_option(&mut self.assets.root, cli.root.as_ref());
        Self::update_option(&mut self.assets.manifest, cli.manifest.as_ref());

        if let Some(args) = cli.serve_args() {
            self.apply_serve_args(&args);
        }
    }

    /// Apply serve-specific options.
    fn apply_serve_args(&mut self, args: &ServeArgs) {
        Self::update_option(&mut self.serve.interface, args.interface.as_ref());
        Self::update_option(&mut self.serve.port, args.port.as_ref());
        Self::update_option(&mut self.serve.root, args.serve_root.as_ref());
        Self::update_option(&mut self.watch.enable, args.watch.as_ref());
        Self::update_option(&mut self.watch.debounce_ms, args.debounce.as_ref());
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the merged configuration.
    ///
    /// A missing asset root is not a config error: it surfaces as a fatal
    /// error from the first manifest generation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assets.root.as_os_str().is_empty() {
            return Err(ConfigError::Validation("`assets.root` must not be empty".into()));
        }

        if self.assets.manifest.file_name().is_none() {
            return Err(ConfigError::Validation(format!(
                "`assets.manifest` must name a file, got `{}`",
                self.assets.manifest.display()
            )));
        }

        if self.assets.manifest_inside_root() {
            return Err(ConfigError::Validation(format!(
                "manifest `{}` is inside the watched asset root `{}`",
                self.assets.manifest.display(),
                self.assets.root.display()
            )));
        }

        Ok(())
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> AppConfig {
    let (parsed, ignored) = AppConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn parse_cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("assetwatch").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_match_fixed_layout() {
        let config = AppConfig::default();
        assert_eq!(config.assets.root, PathBuf::from("assets"));
        assert_eq!(config.assets.manifest, PathBuf::from("Assets.mjs"));
        assert_eq!(config.serve.port, 8000);
        assert!(config.watch.enable);
        assert_eq!(config.watch.debounce_ms, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_fields_collected() {
        let (config, ignored) =
            AppConfig::parse_with_ignored("[serve]\nport = 9000\nhttps = true\n[extra]\nx = 1")
                .unwrap();

        assert_eq!(config.serve.port, 9000);
        assert!(ignored.contains(&"serve.https".to_string()));
        assert!(ignored.contains(&"extra".to_string()));
    }

    #[test]
    fn test_invalid_value_is_toml_error() {
        let result = AppConfig::parse_with_ignored("[serve]\nport = \"eighty\"");
        assert!(matches!(result, Err(ConfigError::Toml(_))));
    }

    #[test]
    fn test_load_without_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("assetwatch.toml");
        let cli = parse_cli(&["-C", missing.to_str().unwrap()]);

        let config = AppConfig::load(&cli).unwrap();
        assert!(config.config_path.is_none());
        assert_eq!(config.serve.port, 8000);
    }

    #[test]
    fn test_load_file_then_cli_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("assetwatch.toml");
        fs::write(
            &path,
            "[assets]\nroot = \"media\"\n[serve]\nport = 9000\n[watch]\ndebounce_ms = 20",
        )
        .unwrap();

        let cli = parse_cli(&["-C", path.to_str().unwrap(), "serve", "--port", "9100"]);
        let config = AppConfig::load(&cli).unwrap();

        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
        assert_eq!(config.assets.root, PathBuf::from("media"));
        assert_eq!(config.serve.port, 9100);
        assert_eq!(config.watch.debounce_ms, 20);
    }

    #[test]
    fn test_generate_ignores_serve_section_overrides() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("none.toml");
        let cli = parse_cli(&["-C", missing.to_str().unwrap(), "generate", "-r", "sprites"]);

        let config = AppConfig::load(&cli).unwrap();
        assert_eq!(config.assets.root, PathBuf::from("sprites"));
        assert_eq!(config.serve.port, 8000);
    }

    #[test]
    fn test_validate_rejects_manifest_in_root() {
        let config = test_parse_config("[assets]\nroot = \"assets\"\nmanifest = \"assets/Assets.mjs\"");
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_validate_rejects_empty_root() {
        let config = test_parse_config("[assets]\nroot = \"\"");
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }
}
