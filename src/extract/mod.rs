//! Email extraction from text and PDF documents
//!
//! This module contains the two extraction layers:
//! - Pattern matching of email addresses in arbitrary text
//! - Fetching a PDF over HTTP and matching each page's extractable text

mod email;
mod pdf;

pub use email::find_emails;
pub use pdf::{emails_from_pdf_bytes, extract_emails};
