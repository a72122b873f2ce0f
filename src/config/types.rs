use serde::Deserialize;

/// Main configuration structure for mailharvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pool: PoolConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Worker pool configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PoolConfig {
    /// Number of URL tasks allowed to run concurrently
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

/// Outbound HTTP configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpConfig {
    /// Identification sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,

    /// Per-request timeout in seconds (page and PDF fetches alike)
    #[serde(rename = "request-timeout-secs", default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Connection establishment timeout in seconds
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Directory artifact files are written to
    #[serde(default = "default_output_directory")]
    pub directory: String,
}

/// HTTP surface configuration (used by `--serve`)
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the server listens on
    #[serde(rename = "bind-address", default = "default_bind_address")]
    pub bind_address: String,
}

fn default_capacity() -> usize {
    10
}

fn default_user_agent() -> String {
    format!("mailharvest/{}", env!("CARGO_PKG_VERSION"))
}

fn default_request_timeout() -> u64 {
    10
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_output_directory() -> String {
    "./extracted_emails".to_string()
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: default_output_directory(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
        }
    }
}
