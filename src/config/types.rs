// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub files: FilesConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "common".to_string()
}

impl LoggingConfig {
    pub fn is_debug(&self) -> bool {
        self.level.eq_ignore_ascii_case("debug") || self.level.eq_ignore_ascii_case("trace")
    }
}

/// Locations of the files the handlers serve
#[derive(Debug, Deserialize, Clone)]
pub struct FilesConfig {
    /// Prefix joined with the raw request path for `/static/...`
    pub static_root: String,
    /// Prefix joined with the raw request path for browser assets
    pub browser_root: String,
    /// File served in place of `/`
    pub browser_index: String,
    /// The single file behind `/cors`
    pub cors_file: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            static_root: ".".to_string(),
            browser_root: "./browser".to_string(),
            browser_index: "index.html".to_string(),
            cors_file: "./static/banksy.jpg".to_string(),
        }
    }
}
