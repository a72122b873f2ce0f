//! Crawl pipeline: scanning, per-URL tasks, and job orchestration
//!
//! This module contains the core pipeline logic, including:
//! - HTTP fetching with shared client configuration
//! - PDF link scanning of seed pages
//! - Per-URL task processing with progress reporting
//! - Bounded-concurrency job orchestration

mod events;
mod fetcher;
mod orchestrator;
mod pool;
mod scanner;
mod task;

pub use events::{progress_channel, PageScanOutcome, ProgressEvent, ProgressSender};
pub use fetcher::{build_http_client, fetch_bytes, fetch_page};
pub use orchestrator::{CancelToken, Job, JobHandle, JobResult, Orchestrator};
pub use pool::WorkerPool;
pub use scanner::{extract_pdf_links, scan_page};
pub use task::process_url;
