//! Serialization module for turning document trees into YAML or JSON bytes.
//!
//! This module provides the serializer collaborator of the emission driver and the buffered
//! file writer that stores the result.

use crate::error::{Error, Result};
use crate::node::Node;
use clap::ValueEnum;
use log::debug;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// YAML format
    #[default]
    Yaml,
    /// JSON format
    Json,
}

impl OutputFormat {
    /// Guesses the format from a file extension: `.json` is JSON, `.yaml`/`.yml` are YAML.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(OutputFormat::Json),
            "yaml" | "yml" => Some(OutputFormat::Yaml),
            _ => None,
        }
    }

    /// Serializes a document tree in this format.
    pub fn serialize(self, doc: &Node) -> Result<Vec<u8>> {
        let text = match self {
            OutputFormat::Yaml => serialize_yaml(doc)?,
            OutputFormat::Json => serialize_json(doc)?,
        };
        Ok(text.into_bytes())
    }
}

/// Serializes a document tree to YAML.
///
/// Response status codes stay integer keys in the output.
///
/// # Errors
///
/// Returns [`Error::Serialization`] if the tree cannot be represented as YAML.
pub fn serialize_yaml(doc: &Node) -> Result<String> {
    debug!("Serializing document to YAML");
    Ok(serde_yaml::to_string(doc)?)
}

/// Serializes a document tree to JSON with pretty printing.
///
/// JSON object keys must be strings, so integer keys (status codes) are written as strings.
///
/// # Errors
///
/// Returns [`Error::Serialization`] if the tree cannot be represented as JSON.
pub fn serialize_json(doc: &Node) -> Result<String> {
    debug!("Serializing document to JSON");
    Ok(serde_json::to_string_pretty(doc)?)
}

/// Writes bytes to a file through a buffered writer.
///
/// Creates the file if it doesn't exist, or truncates it if it does. Parent directories are
/// not created: a missing directory is reported as an [`Error::Output`]. The file handle is
/// closed on every return path; a failure halfway through may leave a partial file behind.
pub fn write_to_file(content: &[u8], path: &Path) -> Result<()> {
    debug!("Writing content to file: {}", path.display());

    let output_error = |action: &'static str| {
        move |source: std::io::Error| Error::Output {
            action,
            path: path.to_path_buf(),
            source,
        }
    };

    let file = File::create(path).map_err(output_error("creating"))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(content).map_err(output_error("writing"))?;
    writer.flush().map_err(output_error("flushing"))?;

    debug!("Successfully wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
