// Configuration module entry point
// Loads layered configuration and holds the shared runtime state

mod state;
mod types;

use ::config::ConfigError;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

// Re-export public types
pub use state::AppState;
pub use types::{Config, HttpConfig, LoggingConfig, PerformanceConfig, RoutesConfig, ServerConfig};

/// Default listening port
pub const DEFAULT_PORT: u16 = 1337;

const DEFAULT_HOST: &str = "0.0.0.0";
const ENV_PREFIX: &str = "DEVSERVER";

impl Config {
    /// Load configuration from specified file path (without extension)
    ///
    /// Sources, lowest priority first: built-in defaults, the config file
    /// (optional), then `DEVSERVER_*` environment variables using `__` as
    /// the section separator, e.g. `DEVSERVER_SERVER__PORT=8080`.
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|e| ConfigError::Foreign(Box::new(e)))?;
        let routes = RoutesConfig::default();

        let settings = ::config::Config::builder()
            .set_default("server.host", DEFAULT_HOST)?
            .set_default("server.port", i64::from(DEFAULT_PORT))?
            .set_default("server.root", cwd.to_string_lossy().into_owned())?
            .set_default("routes.index_document", routes.index_document)?
            .set_default("routes.dist_prefix", routes.dist_prefix)?
            .set_default("routes.dist_assets", routes.dist_assets)?
            .set_default("routes.confine_to_root", routes.confine_to_root)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", false)?
            .set_default("logging.log_resolved_paths", true)?
            .set_default("performance.keep_alive", true)?
            .set_default("performance.connection_timeout", 0)?
            .set_default("http.send_content_type", false)?
            .add_source(::config::File::with_name(config_path).required(false))
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let cfg: Self = settings.try_deserialize()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Default configuration serving `root`
    pub fn for_root(root: impl Into<PathBuf>) -> Self {
        Self {
            server: ServerConfig {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
                root: root.into(),
                workers: None,
            },
            routes: RoutesConfig::default(),
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
                log_resolved_paths: true,
                access_log_format: "combined".to_string(),
                access_log_file: None,
                error_log_file: None,
            },
            performance: PerformanceConfig {
                keep_alive: true,
                connection_timeout: 0,
                max_connections: None,
            },
            http: HttpConfig::default(),
        }
    }

    /// Check values the deserializer cannot
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.server.root.is_dir() {
            return Err(ConfigError::Message(format!(
                "server.root '{}' is not a directory",
                self.server.root.display()
            )));
        }

        check_absolute_path("routes.index_document", &self.routes.index_document)?;
        check_absolute_path("routes.dist_prefix", &self.routes.dist_prefix)?;
        for asset in &self.routes.dist_assets {
            check_absolute_path("routes.dist_assets", asset)?;
        }

        crate::logger::Level::parse(&self.logging.level).ok_or_else(|| {
            ConfigError::Message(format!("unknown logging.level '{}'", self.logging.level))
        })?;

        Ok(())
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }

    /// Effective configuration rendered as TOML, for startup diagnostics
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn root(&self) -> &Path {
        &self.server.root
    }
}

fn check_absolute_path(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with('/') {
        Ok(())
    } else {
        Err(ConfigError::Message(format!(
            "{key} must start with '/', got '{value}'"
        )))
    }
}
