//! Mailharvest: a PDF email harvesting service
//!
//! This crate crawls a set of seed web pages, follows the PDF links found on
//! them, extracts email addresses from the PDF text, deduplicates the results
//! per job, and streams progress events back to whoever submitted the job.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod server;

use thiserror::Error;

/// Main error type for mailharvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP status {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("PDF parse error for {url}: {message}")]
    PdfParse { url: String, message: String },

    #[error("Artifact not found: {name}")]
    ArtifactNotFound { name: String },

    #[error("Job worker failed: {0}")]
    JobFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result type alias for mailharvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{
    JobHandle, JobResult, Orchestrator, PageScanOutcome, ProgressEvent, WorkerPool,
};
pub use extract::find_emails;
