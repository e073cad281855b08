// Configuration types module
// Defines all configuration-related data structures

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub routes: RoutesConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
}

/// Listener and document root configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory every resolved path is appended to
    pub root: PathBuf,
    pub workers: Option<usize>,
}

/// Path rewrite rules
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct RoutesConfig {
    /// Document served for `/`
    pub index_document: String,
    /// Prefix prepended to dist assets
    pub dist_prefix: String,
    /// Exact request paths that live under `dist_prefix`
    pub dist_assets: Vec<String>,
    /// Refuse pathnames whose `..` segments climb above the root
    pub confine_to_root: bool,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            index_document: "/index.html".to_string(),
            dist_prefix: "/dist".to_string(),
            dist_assets: vec!["/appWASM.wasm".to_string()],
            confine_to_root: true,
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    /// Write every resolved pathname before it is read
    pub log_resolved_paths: bool,
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
    "combined".to_string()
}

/// Performance configuration
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive: bool,
    /// Per-connection timeout in seconds, 0 disables it
    pub connection_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP response configuration
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct HttpConfig {
    /// Add a Content-Type header derived from the file extension
    pub send_content_type: bool,
    /// Value of the Server header, omitted when unset
    #[serde(default)]
    pub server_name: Option<String>,
}
