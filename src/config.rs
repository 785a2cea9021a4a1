//! Configuration module for the source inspector.
//!
//! This module provides a layered configuration system that supports:
//! - Default values
//! - TOML configuration file (`.inspector/settings.toml`)
//! - Environment variable overrides
//!
//! # Environment Variables
//!
//! Environment variables must be prefixed with `INSPECTOR_` and use double
//! underscores to separate nested levels:
//! - `INSPECTOR_PARSER__MAX_FILE_SIZE=1048576` sets `parser.max_file_size`
//! - `INSPECTOR_PARSER__TRACE_EVENTS=true` sets `parser.trace_events`
//! - `INSPECTOR_LOGGING__DEFAULT=debug` sets `logging.default`

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const CONFIG_DIR: &str = ".inspector";
const CONFIG_FILE: &str = "settings.toml";
const ENV_PREFIX: &str = "INSPECTOR_";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Settings {
    /// Version of the configuration schema
    #[serde(default = "default_version")]
    pub version: u32,

    /// Project root that source paths are made relative to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workspace_root: Option<PathBuf>,

    #[serde(default)]
    pub parser: ParserConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ParserConfig {
    /// Leading directories dropped when deriving module paths
    #[serde(default = "default_source_roots")]
    pub source_roots: Vec<String>,

    /// File extensions (without dot) picked up when walking directories
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Files larger than this many bytes are refused. 0 disables the check.
    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    /// Forward parser events to tracing
    #[serde(default)]
    pub trace_events: bool,

    /// Number of worker threads for multi-file loads
    #[serde(default = "default_parallel_threads")]
    pub parallel_threads: usize,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Default level: error, warn, info, debug, trace
    #[serde(default = "default_log_level")]
    pub default: String,

    /// Per-module overrides, e.g. `parser = "debug"`
    #[serde(default)]
    pub modules: HashMap<String, String>,
}

// Default value functions
fn default_version() -> u32 {
    1
}
fn default_source_roots() -> Vec<String> {
    vec!["src".to_string()]
}
fn default_extensions() -> Vec<String> {
    vec!["java".to_string()]
}
fn default_max_file_size() -> u64 {
    4 * 1024 * 1024
}
fn default_parallel_threads() -> usize {
    num_cpus::get()
}
fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            version: default_version(),
            workspace_root: None,
            parser: ParserConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            source_roots: default_source_roots(),
            extensions: default_extensions(),
            max_file_size: default_max_file_size(),
            trace_events: false,
            parallel_threads: default_parallel_threads(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            default: default_log_level(),
            modules: HashMap::new(),
        }
    }
}

impl ParserConfig {
    /// Whether a file of `size` bytes is within the configured cap.
    pub fn accepts_size(&self, size: u64) -> bool {
        self.max_file_size == 0 || size <= self.max_file_size
    }

    /// Whether `path` carries one of the configured extensions.
    pub fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|wanted| wanted == ext))
    }
}

impl Settings {
    /// Load configuration from all sources
    pub fn load() -> Result<Self, Box<figment::Error>> {
        let config_path = Self::find_workspace_config()
            .unwrap_or_else(|| PathBuf::from(CONFIG_DIR).join(CONFIG_FILE));

        Self::figment(&config_path)
            .extract()
            .map_err(Box::new)
            .map(|mut settings: Settings| {
                if settings.workspace_root.is_none() {
                    settings.workspace_root = Self::workspace_root();
                }
                settings
            })
    }

    /// Load configuration from a specific file, still honoring the environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, Box<figment::Error>> {
        Self::figment(path.as_ref()).extract().map_err(Box::new)
    }

    fn figment(config_path: &Path) -> Figment {
        Figment::new()
            .merge(Serialized::defaults(Settings::default()))
            .merge(Toml::file(config_path))
            // Double underscore separates nesting levels; single underscores
            // stay inside field names.
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .map(|key| key.as_str().to_lowercase().replace("__", ".").into()),
            )
    }

    /// Find `.inspector/settings.toml` in the current directory or an ancestor
    fn find_workspace_config() -> Option<PathBuf> {
        Self::workspace_root().map(|root| root.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Directory holding `.inspector`, searching upwards from the current directory
    pub fn workspace_root() -> Option<PathBuf> {
        let current = std::env::current_dir().ok()?;
        current
            .ancestors()
            .find(|ancestor| ancestor.join(CONFIG_DIR).is_dir())
            .map(Path::to_path_buf)
    }

    /// Root used to relativize source paths: configured, detected, or the
    /// current directory.
    pub fn effective_root(&self) -> PathBuf {
        self.workspace_root
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Save current configuration to file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Box<dyn std::error::Error>> {
        let parent = path.as_ref().parent().ok_or("Invalid path")?;
        std::fs::create_dir_all(parent)?;

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)?;

        Ok(())
    }

    /// Create a default settings file under `.inspector/` in the current directory
    pub fn init_config_file(force: bool) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let config_path = PathBuf::from(CONFIG_DIR).join(CONFIG_FILE);

        if !force && config_path.exists() {
            return Err("Configuration file already exists. Use --force to overwrite".into());
        }

        let mut settings = Settings::default();
        if let Ok(current_dir) = std::env::current_dir() {
            settings.workspace_root = Some(current_dir);
        }

        settings.save(&config_path)?;
        Ok(config_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.version, 1);
        assert_eq!(settings.parser.source_roots, vec!["src"]);
        assert_eq!(settings.parser.extensions, vec!["java"]);
        assert_eq!(settings.parser.max_file_size, 4 * 1024 * 1024);
        assert!(settings.parser.parallel_threads > 0);
        assert!(!settings.parser.trace_events);
        assert_eq!(settings.logging.default, "warn");
    }

    #[test]
    fn test_load_from_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("settings.toml");

        let toml_content = r#"
version = 2

[parser]
source_roots = ["src/main/java"]
max_file_size = 1024
trace_events = true

[logging]
default = "info"

[logging.modules]
parser = "trace"
"#;

        fs::write(&config_path, toml_content).unwrap();

        let settings = Settings::load_from(&config_path).unwrap();
        assert_eq!(settings.version, 2);
        assert_eq!(settings.parser.source_roots, vec!["src/main/java"]);
        assert_eq!(settings.parser.max_file_size, 1024);
        assert!(settings.parser.trace_events);
        // Unspecified values keep their defaults
        assert_eq!(settings.parser.extensions, vec!["java"]);
        assert_eq!(settings.logging.default, "info");
        assert_eq!(settings.logging.modules["parser"], "trace");
    }

    #[test]
    fn test_save_settings() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join(".inspector").join("settings.toml");

        let mut settings = Settings::default();
        settings.parser.parallel_threads = 2;
        settings.parser.extensions = vec!["java".into(), "jav".into()];

        settings.save(&config_path).unwrap();

        let loaded = Settings::load_from(&config_path).unwrap();
        assert_eq!(loaded.parser.parallel_threads, 2);
        assert_eq!(loaded.parser.extensions, vec!["java", "jav"]);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = Settings::load_from(temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(settings.parser.source_roots, vec!["src"]);
    }

    #[test]
    fn test_size_and_extension_filters() {
        let mut config = ParserConfig::default();
        config.max_file_size = 10;
        assert!(config.accepts_size(10));
        assert!(!config.accepts_size(11));
        config.max_file_size = 0;
        assert!(config.accepts_size(u64::MAX));

        assert!(config.accepts_extension(Path::new("src/A.java")));
        assert!(!config.accepts_extension(Path::new("src/A.kt")));
        assert!(!config.accepts_extension(Path::new("Makefile")));
    }
}
