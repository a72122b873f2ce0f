//! Result artifact persistence
//!
//! Writes a job's deduplicated email set to a durable text file, one address
//! per line, and serves artifact bytes back for download. The file name is
//! derived from the result count alone, so two jobs with equal counts write
//! to the same path; that collision is the documented naming contract.

use crate::HarvestError;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Computes the artifact name for a result of the given cardinality
pub fn artifact_name(count: usize) -> String {
    format!("{}-extracted_emails.txt", count)
}

/// Writes the email list to `dir/name`, creating the directory if needed
///
/// Each entry is followed by a newline; iteration order is whatever the
/// caller's set yielded. Directory creation is idempotent.
///
/// # Arguments
///
/// * `dir` - The output directory
/// * `name` - The artifact file name
/// * `emails` - The addresses to write
///
/// # Returns
///
/// * `Ok(PathBuf)` - The path the artifact was written to
/// * `Err(io::Error)` - Directory creation or write failed
pub fn write_artifact(dir: &Path, name: &str, emails: &[String]) -> std::io::Result<PathBuf> {
    fs::create_dir_all(dir)?;

    let path = dir.join(name);
    let mut file = fs::File::create(&path)?;
    for email in emails {
        writeln!(file, "{}", email)?;
    }

    Ok(path)
}

/// Reads a named artifact's bytes for download
///
/// Names containing path separators or parent references are treated as not
/// found rather than resolved outside the output directory.
///
/// # Arguments
///
/// * `dir` - The output directory
/// * `name` - The artifact file name, as reported in a job result
///
/// # Returns
///
/// * `Ok(Vec<u8>)` - The artifact's contents
/// * `Err(HarvestError::ArtifactNotFound)` - No such artifact
pub fn open_artifact(dir: &Path, name: &str) -> Result<Vec<u8>, HarvestError> {
    if name.contains('/') || name.contains('\\') || name.contains("..") {
        return Err(HarvestError::ArtifactNotFound {
            name: name.to_string(),
        });
    }

    match fs::read(dir.join(name)) {
        Ok(bytes) => Ok(bytes),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(HarvestError::ArtifactNotFound {
                name: name.to_string(),
            })
        }
        Err(e) => Err(e.into()),
    }
}
