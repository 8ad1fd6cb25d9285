//! User configuration file handling
//!
//! Manages settings from ~/.config/outlinefix/settings.json and merges them
//! with command line flags into the effective run [`Settings`].

use crate::core::cli::CliArgs;
use crate::data::metrics::FontMetrics;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Codepoint of the scratch glyph each icon is imported into ('{')
pub const DEFAULT_GLYPH_CODEPOINT: u32 = 123;
/// Maximum distance a simplified outline may drift from the original
pub const DEFAULT_SIMPLIFY_TOLERANCE: f64 = crate::geometry::simplify::DEFAULT_TOLERANCE;

/// User configuration from ~/.config/outlinefix/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ConfigFile {
    pub units_per_em: Option<f64>,
    pub ascender: Option<f64>,
    pub descender: Option<f64>,
    pub glyph_codepoint: Option<u32>,
    pub simplify_tolerance: Option<f64>,
    pub sort_files: Option<bool>,
    pub outline_strokes: Option<bool>,
    pub log_to_file: Option<bool>,
}

impl ConfigFile {
    /// Get the path to the outlinefix config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("outlinefix")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Get the path to the logs directory
    pub fn logs_dir() -> PathBuf {
        Self::config_dir().join("logs")
    }

    /// Load settings from `explicit` when given, else from the user config file
    ///
    /// A missing user config file is `Ok(None)`; an explicit path must exist.
    /// Unreadable or malformed files are errors, and the caller decides
    /// whether that is fatal.
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Option<Self>> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let path = Self::config_path();
                if !path.exists() {
                    return Ok(None);
                }
                path
            }
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(Some(config))
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Settings file holding every built-in default explicitly
    pub fn with_defaults() -> Self {
        let metrics = FontMetrics::default();
        Self {
            units_per_em: Some(metrics.units_per_em),
            ascender: Some(metrics.ascender),
            descender: Some(metrics.descender),
            glyph_codepoint: Some(DEFAULT_GLYPH_CODEPOINT),
            simplify_tolerance: Some(DEFAULT_SIMPLIFY_TOLERANCE),
            sort_files: Some(false),
            outline_strokes: Some(true),
            log_to_file: Some(false),
        }
    }

    /// Initialize the user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/outlinefix directory with a logs/ subdirectory
    /// 2. A settings.json file with default values, unless one exists
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        let config_dir = Self::config_dir();
        fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = Self::logs_dir();
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let settings_path = Self::config_path();
        if !settings_path.exists() {
            Self::with_defaults().save()?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        Ok(())
    }
}

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub metrics: FontMetrics,
    pub glyph_codepoint: char,
    pub simplify_tolerance: f64,
    pub sort_files: bool,
    pub outline_strokes: bool,
    pub log_to_file: bool,
    pub keep_going: bool,
    pub dry_run: bool,
}

impl Settings {
    /// Merge CLI arguments over the config file over built-in defaults
    ///
    /// Boolean CLI flags can only move a behavior away from its default;
    /// leaving a flag off defers to the config file.
    pub fn resolve(cli: &CliArgs, config: Option<ConfigFile>) -> Self {
        let config = config.unwrap_or_default();
        let defaults = FontMetrics::default();

        let metrics = FontMetrics {
            units_per_em: config
                .units_per_em
                .filter(|upm| *upm > 0.0)
                .unwrap_or(defaults.units_per_em),
            ascender: config.ascender.unwrap_or(defaults.ascender),
            descender: config.descender.unwrap_or(defaults.descender),
        };

        let glyph_codepoint = config
            .glyph_codepoint
            .and_then(|cp| {
                let ch = char::from_u32(cp);
                if ch.is_none() {
                    warn!("Ignoring invalid glyph_codepoint {cp:#x}");
                }
                ch
            })
            .or_else(|| char::from_u32(DEFAULT_GLYPH_CODEPOINT))
            .unwrap_or('{');

        let simplify_tolerance = config
            .simplify_tolerance
            .filter(|tol| *tol > 0.0)
            .unwrap_or(DEFAULT_SIMPLIFY_TOLERANCE);

        Self {
            metrics,
            glyph_codepoint,
            simplify_tolerance,
            sort_files: cli.sort || config.sort_files.unwrap_or(false),
            outline_strokes: !cli.no_outline_strokes && config.outline_strokes.unwrap_or(true),
            log_to_file: cli.log_file || config.log_to_file.unwrap_or(false),
            keep_going: cli.keep_going,
            dry_run: cli.dry_run,
        }
    }
}
