//! Output module for persisting and serving job results
//!
//! This module handles:
//! - Deterministic artifact naming from the result count
//! - Writing the one-email-per-line artifact file
//! - Reading artifact bytes back for download

mod artifact;

pub use artifact::{artifact_name, open_artifact, write_artifact};
