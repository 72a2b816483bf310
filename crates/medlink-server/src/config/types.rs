//! Server configuration types.

use medlink_common_log::{LogFormat, LogLevel};
use serde::{Deserialize, Serialize};
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

/// Path prefix of the internal (health) routes.
pub const INTERNAL_PREFIX: &str = "/internal";

/// Main server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server binding configuration.
    pub server: ServerBindConfig,
    /// Session token configuration.
    pub auth: AuthConfig,
    /// Route access policy.
    pub access: AccessConfig,
    /// API mount configuration.
    #[serde(default)]
    pub api: ApiConfig,
    /// Document store configuration.
    #[serde(default)]
    pub store: StoreConfig,
    /// Page serving configuration.
    #[serde(default)]
    pub pages: PagesConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ServerConfig {
    /// Socket address the server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.server.socket_addr()
    }
}

/// Server binding configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerBindConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to bind to.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request timeout.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_request_timeout() -> u64 {
    30
}

impl ServerBindConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Session token configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Shared secret used to verify session tokens.
    pub token_secret: String,
    /// Name of the session cookie.
    #[serde(default = "default_session_cookie")]
    pub session_cookie: String,
    /// Clock skew tolerated when checking `exp`.
    #[serde(default = "default_leeway")]
    pub leeway_secs: u64,
}

fn default_session_cookie() -> String {
    "__session".to_string()
}

fn default_leeway() -> u64 {
    60
}

/// Route access policy, loaded once and read-only for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessConfig {
    /// Paths starting with any of these prefixes require a session.
    pub protected_path_prefixes: Vec<String>,
    /// Paths that must not be visited with a session (exact match).
    pub auth_only_paths: Vec<String>,
    /// Where unauthenticated visitors of protected paths are sent.
    #[serde(default = "default_sign_in_path")]
    pub sign_in_path: String,
    /// Where authenticated visitors of auth-only paths are sent.
    #[serde(default = "default_landing_path")]
    pub default_landing_path: String,
    /// Apply the ownership check to document reads as well as writes.
    #[serde(default)]
    pub require_ownership_on_read: bool,
}

fn default_sign_in_path() -> String {
    "/signin".to_string()
}

fn default_landing_path() -> String {
    "/dashboard".to_string()
}

impl Default for AccessConfig {
    fn default() -> Self {
        Self {
            protected_path_prefixes: [
                "/dashboard",
                "/donor",
                "/ngo",
                "/admin",
                "/profile",
                "/medications",
                "/requests",
                "/tracking",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            auth_only_paths: vec!["/signin".to_string(), "/register".to_string()],
            sign_in_path: default_sign_in_path(),
            default_landing_path: default_landing_path(),
            require_ownership_on_read: false,
        }
    }
}

/// API mount configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Prefix every API route is nested under.
    #[serde(default = "default_api_prefix")]
    pub prefix: String,
}

fn default_api_prefix() -> String {
    "/api".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            prefix: default_api_prefix(),
        }
    }
}

/// Document store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StoreConfig {
    /// JSON file preloaded into the in-memory store at startup.
    pub seed_path: Option<PathBuf>,
}

/// Page serving configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PagesConfig {
    /// Directory of pre-rendered pages served behind the session gate.
    pub static_dir: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level.
    #[serde(default)]
    pub level: LogLevel,
    /// Log format (pretty, compact or json).
    #[serde(default)]
    pub format: LogFormat,
}
