//! Reading YAML/JSON input documents and writing the generated reference.
//!
//! Input documents (host snapshots, documentation config) are parsed as JSON
//! when the file extension is `.json` and as YAML otherwise.

use anyhow::{Context, Result};
use log::debug;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Input document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|s| s.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// Parses a document from a string in the given format.
pub fn parse_document<T: DeserializeOwned>(content: &str, format: DocumentFormat) -> Result<T> {
    match format {
        DocumentFormat::Json => {
            serde_json::from_str(content).context("Failed to parse JSON document")
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_str(content).context("Failed to parse YAML document")
        }
    }
}

/// Reads and parses a YAML or JSON document from a file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or does not match `T`.
pub fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    debug!("Reading document: {}", path.display());
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {}", path.display()))?;
    parse_document(&content, DocumentFormat::from_path(path))
        .with_context(|| format!("Invalid document: {}", path.display()))
}

/// Writes string content to a file.
///
/// Creates the file if it doesn't exist, or overwrites it if it does.
/// Missing parent directories are created.
pub fn write_to_file(content: &str, path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    fs::write(path, content)
        .with_context(|| format!("Failed to write to file: {}", path.display()))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
