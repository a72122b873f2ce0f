//! PDF text extraction
//!
//! Fetches a PDF resource over HTTP, parses it page by page with lopdf, and
//! runs the email matcher over each page's extractable text. All failure
//! modes (network, HTTP status, malformed PDF) degrade to an empty result at
//! the public boundary: one bad PDF must never abort the rest of a job.

use crate::crawler::fetch_bytes;
use crate::extract::find_emails;
use crate::HarvestError;
use lopdf::Document;
use reqwest::Client;
use std::collections::HashSet;

/// Fetches a PDF and extracts the set of email addresses found in its text
///
/// The fetch uses the shared client's request timeout. On any failure the
/// result is an empty set and a diagnostic is logged; errors are not
/// propagated to the caller.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `pdf_url` - Absolute URL of the PDF resource
///
/// # Returns
///
/// The deduplicated set of addresses found across all pages
pub async fn extract_emails(client: &Client, pdf_url: &str) -> HashSet<String> {
    match fetch_and_extract(client, pdf_url).await {
        Ok(emails) => emails,
        Err(e) => {
            tracing::warn!("Error processing PDF {}: {}", pdf_url, e);
            HashSet::new()
        }
    }
}

/// Fallible inner path for [`extract_emails`]
async fn fetch_and_extract(client: &Client, pdf_url: &str) -> Result<HashSet<String>, HarvestError> {
    let bytes = fetch_bytes(client, pdf_url).await?;
    emails_from_pdf_bytes(&bytes).map_err(|e| HarvestError::PdfParse {
        url: pdf_url.to_string(),
        message: e.to_string(),
    })
}

/// Extracts email addresses from in-memory PDF bytes, page by page
///
/// Pages whose text cannot be extracted contribute nothing; only a document
/// that fails to parse at all is an error.
pub fn emails_from_pdf_bytes(bytes: &[u8]) -> Result<HashSet<String>, lopdf::Error> {
    let document = Document::load_mem(bytes)?;

    let mut emails = HashSet::new();
    for page_number in document.get_pages().keys() {
        match document.extract_text(&[*page_number]) {
            Ok(text) => emails.extend(find_emails(&text)),
            Err(e) => {
                tracing::debug!("No extractable text on page {}: {}", page_number, e);
            }
        }
    }

    Ok(emails)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Builds a one-page PDF whose text stream contains the given line
    fn pdf_with_text(line: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });

        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 24.into()]),
                Operation::new("Td", vec![50.into(), 700.into()]),
                Operation::new("Tj", vec![Object::string_literal(line)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().expect("content stream encodes"),
        ));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("document serializes");
        bytes
    }

    #[test]
    fn test_extracts_addresses_from_page_text() {
        let bytes = pdf_with_text("contact alice@example.com or bob@example.org");
        let emails = emails_from_pdf_bytes(&bytes).expect("valid PDF parses");

        assert_eq!(emails.len(), 2);
        assert!(emails.contains("alice@example.com"));
        assert!(emails.contains("bob@example.org"));
    }

    #[test]
    fn test_duplicates_collapse_within_document() {
        let bytes = pdf_with_text("alice@example.com alice@example.com");
        let emails = emails_from_pdf_bytes(&bytes).expect("valid PDF parses");

        assert_eq!(emails.len(), 1);
    }

    #[test]
    fn test_page_without_addresses_yields_empty_set() {
        let bytes = pdf_with_text("no addresses on this page");
        let emails = emails_from_pdf_bytes(&bytes).expect("valid PDF parses");

        assert!(emails.is_empty());
    }

    #[test]
    fn test_malformed_document_is_an_error() {
        assert!(emails_from_pdf_bytes(b"this is not a PDF").is_err());
    }
}
