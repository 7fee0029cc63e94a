// Configuration module entry point
// Loads the layered configuration and holds the per-process state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::{build_proxy_client, AppState, ProxyClient};
pub use types::{Config, FilesConfig, LoggingConfig, ServerConfig};

/// Default config file, looked up without extension
pub const DEFAULT_CONFIG_PATH: &str = "config";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Missing file is fine: defaults and environment still apply
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        let settings = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", i64::from(defaults.server.port))?
            .set_default("logging.level", defaults.logging.level)?
            .set_default("logging.access_log", defaults.logging.access_log)?
            .set_default("logging.access_log_format", defaults.logging.access_log_format)?
            .set_default("files.static_root", defaults.files.static_root)?
            .set_default("files.browser_root", defaults.files.browser_root)?
            .set_default("files.browser_index", defaults.files.browser_index)?
            .set_default("files.cors_file", defaults.files.cors_file)?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix("TESTSRV")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

/// Same values as the built-in defaults of `load_from`
impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8000,
                workers: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: true,
                access_log_format: "common".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
            files: FilesConfig::default(),
        }
    }
}
