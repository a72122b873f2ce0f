//! Per-job progress events
//!
//! The orchestrator and URL tasks report milestones through a typed event
//! stream scoped to one job handle. Delivery is fire-and-forget and
//! in-memory only: a consumer that stops listening never blocks or aborts
//! the job that is producing events.

use serde::Serialize;
use tokio::sync::mpsc;

/// Outcome of scanning one seed page for PDF links
///
/// "No PDFs found" and "the page fetch failed" both contribute an empty set
/// to the job, but they are distinct facts and are reported as such.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PageScanOutcome {
    /// The page was fetched and parsed; `count` PDF links were found
    PdfsFound { count: usize },

    /// The page could not be fetched or parsed
    FetchFailed { reason: String },
}

/// A progress milestone within one job
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProgressEvent {
    /// A URL task has started processing a seed URL
    UrlStarted { url: String },

    /// The seed page has been scanned for PDF links
    PageScanned { url: String, outcome: PageScanOutcome },

    /// One linked PDF has been fetched and matched
    PdfProcessed {
        url: String,
        pdf_url: String,
        email_count: usize,
    },

    /// All tasks finished; carries the full deduplicated result
    Completed {
        emails: Vec<String>,
        count: usize,
        artifact: String,
    },

    /// Final wall-clock diagnostic, emitted after completion
    Finished { elapsed_ms: u64 },
}

impl ProgressEvent {
    /// Renders the event as a human-readable status line
    pub fn describe(&self) -> String {
        match self {
            ProgressEvent::UrlStarted { url } => format!("Processing URL: {}", url),
            ProgressEvent::PageScanned { url, outcome } => match outcome {
                PageScanOutcome::PdfsFound { count: 0 } => format!("No PDFs found at {}", url),
                PageScanOutcome::PdfsFound { count } => {
                    format!("Found {} PDFs in {}", count, url)
                }
                PageScanOutcome::FetchFailed { reason } => {
                    format!("Failed to scan {}: {}", url, reason)
                }
            },
            ProgressEvent::PdfProcessed {
                pdf_url,
                email_count,
                ..
            } => format!("Extracted {} emails from {}", email_count, pdf_url),
            ProgressEvent::Completed { count, artifact, .. } => {
                format!("Extraction complete: {} emails, artifact {}", count, artifact)
            }
            ProgressEvent::Finished { elapsed_ms } => format!(
                "Extraction completed in {:.2} seconds.",
                *elapsed_ms as f64 / 1000.0
            ),
        }
    }
}

/// Sending half of a job's progress stream
///
/// Cheap to clone; one clone goes to each URL task. Sends never fail from
/// the producer's point of view: if the receiver is gone the event is
/// dropped silently and the job keeps running.
#[derive(Debug, Clone)]
pub struct ProgressSender {
    tx: mpsc::UnboundedSender<ProgressEvent>,
}

impl ProgressSender {
    /// Emits an event, ignoring a disconnected receiver
    pub fn send(&self, event: ProgressEvent) {
        let _ = self.tx.send(event);
    }
}

/// Creates a progress stream for one job
pub fn progress_channel() -> (ProgressSender, mpsc::UnboundedReceiver<ProgressEvent>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (ProgressSender { tx }, rx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_no_pdfs() {
        let event = ProgressEvent::PageScanned {
            url: "https://example.org".to_string(),
            outcome: PageScanOutcome::PdfsFound { count: 0 },
        };
        assert_eq!(event.describe(), "No PDFs found at https://example.org");
    }

    #[test]
    fn test_describe_pdfs_found() {
        let event = ProgressEvent::PageScanned {
            url: "https://example.org".to_string(),
            outcome: PageScanOutcome::PdfsFound { count: 3 },
        };
        assert_eq!(event.describe(), "Found 3 PDFs in https://example.org");
    }

    #[test]
    fn test_describe_elapsed_seconds() {
        let event = ProgressEvent::Finished { elapsed_ms: 2340 };
        assert_eq!(event.describe(), "Extraction completed in 2.34 seconds.");
    }

    #[test]
    fn test_send_after_receiver_dropped_is_silent() {
        let (tx, rx) = progress_channel();
        drop(rx);
        // Must not panic or error
        tx.send(ProgressEvent::UrlStarted {
            url: "https://example.org".to_string(),
        });
    }

    #[tokio::test]
    async fn test_events_arrive_in_send_order() {
        let (tx, mut rx) = progress_channel();
        tx.send(ProgressEvent::UrlStarted {
            url: "a".to_string(),
        });
        tx.send(ProgressEvent::Finished { elapsed_ms: 1 });
        drop(tx);

        let first = rx.recv().await.expect("first event");
        assert!(matches!(first, ProgressEvent::UrlStarted { .. }));
        let second = rx.recv().await.expect("second event");
        assert!(matches!(second, ProgressEvent::Finished { .. }));
        assert!(rx.recv().await.is_none());
    }
}
