//! URL task: one seed URL end-to-end
//!
//! Scans the seed page for PDF links, then extracts emails from each PDF
//! sequentially, emitting a progress event at each milestone. A task always
//! returns a (possibly empty) set to the orchestrator, never an error: every
//! sub-step failure degrades locally with a diagnostic.

use crate::crawler::scanner::scan_page;
use crate::crawler::{CancelToken, PageScanOutcome, ProgressEvent, ProgressSender};
use crate::extract::extract_emails;
use reqwest::Client;
use std::collections::HashSet;

/// Processes one seed URL and returns the emails harvested from its PDFs
///
/// Progress events within one task are strictly ordered: the page-scan
/// report always precedes any per-PDF report. The cancel token is checked
/// before each PDF fetch; a cancelled task returns what it has so far.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The seed URL to process
/// * `progress` - The job's progress stream
/// * `cancel` - The job's cancellation signal
pub async fn process_url(
    client: &Client,
    url: &str,
    progress: &ProgressSender,
    cancel: &CancelToken,
) -> HashSet<String> {
    progress.send(ProgressEvent::UrlStarted {
        url: url.to_string(),
    });

    let pdf_links = match scan_page(client, url).await {
        Ok(links) => {
            progress.send(ProgressEvent::PageScanned {
                url: url.to_string(),
                outcome: PageScanOutcome::PdfsFound { count: links.len() },
            });
            links
        }
        Err(e) => {
            tracing::warn!("Error extracting PDF links from {}: {}", url, e);
            progress.send(ProgressEvent::PageScanned {
                url: url.to_string(),
                outcome: PageScanOutcome::FetchFailed {
                    reason: e.to_string(),
                },
            });
            Vec::new()
        }
    };

    let mut emails = HashSet::new();
    for pdf_url in pdf_links {
        if cancel.is_cancelled() {
            tracing::debug!("Job cancelled, stopping task for {}", url);
            break;
        }

        let found = extract_emails(client, &pdf_url).await;
        progress.send(ProgressEvent::PdfProcessed {
            url: url.to_string(),
            pdf_url,
            email_count: found.len(),
        });
        emails.extend(found);
    }

    emails
}
