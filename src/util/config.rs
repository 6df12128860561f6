//! Configuration file support for jarwright.
//!
//! jarwright reads two configuration file locations:
//! - Global: `~/.jarwright/config.toml` - User-wide defaults
//! - Project: `.jarwright/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Baseline `-target` release handed to javac when nothing else is configured.
pub const DEFAULT_TARGET_RELEASE: u32 = 11;

/// jarwright configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Compile settings
    pub compile: CompileConfig,
}

/// Compile-related configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileConfig {
    /// Path to javac (e.g., /usr/lib/jvm/java-21/bin/javac)
    pub javac: Option<PathBuf>,

    /// Baseline target release (defaults to 11)
    pub target: Option<u32>,

    /// Extra options appended after the target flag
    #[serde(default)]
    pub options: Vec<String>,

    /// Classpath string used instead of the CLASSPATH environment variable
    pub classpath: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing or broken.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.compile.javac.is_some() {
            self.compile.javac = other.compile.javac;
        }
        if other.compile.target.is_some() {
            self.compile.target = other.compile.target;
        }
        if !other.compile.options.is_empty() {
            self.compile.options = other.compile.options;
        }
        if other.compile.classpath.is_some() {
            self.compile.classpath = other.compile.classpath;
        }
    }

    /// Baseline target release, falling back to [`DEFAULT_TARGET_RELEASE`].
    pub fn target_release(&self) -> u32 {
        self.compile.target.unwrap_or(DEFAULT_TARGET_RELEASE)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.jarwright/config.toml)
/// 2. Global config (~/.jarwright/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global_path) = global_path {
        if global_path.exists() {
            config.merge(Config::load_or_default(global_path));
        }
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global jarwright config directory (~/.jarwright).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".jarwright"))
}

/// Get the global config path (~/.jarwright/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.jarwright/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".jarwright").join("config.toml")
}

/// Load the configuration that applies to the given project directory.
pub fn load_config_for(project_root: &Path) -> Config {
    let global = global_config_path();
    load_config(global.as_deref(), &project_config_path(project_root))
}
