//! Configuration loaded from `.lingo.toml`.
//!
//! ```toml
//! locale = "fr"              # preferred language
//! locales_dir = "locales"    # load *.json from disk instead of the bundled set
//! detect = true              # auto-detect from LINGO_LOCALE / LC_ALL / LANG
//!
//! [server]
//! addr = "127.0.0.1:8080"
//! static_dir = "ui/dist/i18n-element/browser"
//! ```
//!
//! Relative paths are resolved against the directory holding the file.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{I18nError, I18nResult};

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = ".lingo.toml";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LingoConfig {
    /// Preferred language, applied with the same rules as an explicit request.
    pub locale: Option<String>,

    /// Directory of `*.json` message files.
    pub locales_dir: Option<PathBuf>,

    /// Whether to auto-detect the language from the environment.
    pub detect: bool,

    pub server: ServerConfig,
}

impl Default for LingoConfig {
    fn default() -> Self {
        Self {
            locale: None,
            locales_dir: None,
            detect: true,
            server: ServerConfig::default(),
        }
    }
}

/// Demo server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub addr: String,
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8080".to_string(),
            static_dir: PathBuf::from("ui/dist/i18n-element/browser"),
        }
    }
}

impl LingoConfig {
    /// Parse a configuration document. `origin` names it in errors.
    pub fn from_toml_str(content: &str, origin: &str) -> I18nResult<Self> {
        toml::from_str(content).map_err(|e| I18nError::Config {
            path: origin.to_string(),
            message: e.to_string(),
        })
    }

    /// Read and parse `path`, resolving relative paths against its directory.
    pub fn load(path: &Path) -> I18nResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| I18nError::Config {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let mut config = Self::from_toml_str(&content, &path.display().to_string())?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Load `dir/.lingo.toml` if present, otherwise return defaults.
    pub fn discover(dir: &Path) -> I18nResult<Self> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.is_file() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }

    fn resolve_paths(&mut self, base: &Path) {
        if let Some(dir) = &self.locales_dir {
            if dir.is_relative() {
                self.locales_dir = Some(base.join(dir));
            }
        }
        if self.server.static_dir.is_relative() {
            self.server.static_dir = base.join(&self.server.static_dir);
        }
    }
}
