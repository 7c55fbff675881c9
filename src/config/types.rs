// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub performance: PerformanceConfig,
    pub http: HttpConfig,
    pub assets: AssetsConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
    pub access_log: bool,
    pub show_headers: bool,
    /// Access log format (combined, common, or json)
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
#[derive(Debug, Deserialize, Clone)]
pub struct PerformanceConfig {
    pub keep_alive_timeout: u64,
    pub read_timeout: u64,
    pub write_timeout: u64,
    pub max_connections: Option<u64>,
}

/// HTTP configuration
#[derive(Debug, Deserialize, Clone)]
pub struct HttpConfig {
    pub server_name: String,
    pub enable_cors: bool,
    pub max_body_size: u64,
}

/// Static asset configuration
///
/// `root` points at the prebuilt SPA bundle. `fallback` is the document
/// served for any path that does not name a file under `root`, which is
/// what lets the client-side router own unknown paths. `hello_image` is
/// the fixed PNG returned by `GET /api/hello-image`, resolved relative
/// to the working directory alongside the config file.
#[derive(Debug, Deserialize, Clone)]
pub struct AssetsConfig {
    pub root: String,
    #[serde(default = "default_fallback")]
    pub fallback: String,
    #[serde(default = "default_hello_image")]
    pub hello_image: String,
}

#[allow(clippy::missing_const_for_fn)]
fn default_fallback() -> String {
    "index.html".to_string()
}

#[allow(clippy::missing_const_for_fn)]
fn default_hello_image() -> String {
    "hello_world.png".to_string()
}
