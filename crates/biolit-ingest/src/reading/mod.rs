//! Batch reading of local documents
//!
//! A [`Reader`] turns a list of document paths into [`ReadingResult`]s. The
//! [`read_files`] driver runs each configured reader over the same file list
//! and concatenates what they produce, reader by reader.
//!
//! ```text
//! file list ─┬─> reader A ─┐
//!            └─> reader B ─┴─> Vec<ReadingResult> ─> file_reading_outputs.jsonl
//! ```

pub mod command;
pub mod input;

pub use command::CommandReader;
pub use input::{
    apply_range, load_file_list, log_file_types, parse_range, sample_files, select_files,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// File name the batch driver writes its outputs to
pub const READING_OUTPUTS_FILE: &str = "file_reading_outputs.jsonl";

/// Result type for reading operations
pub type Result<T> = std::result::Result<T, ReadingError>;

#[derive(Debug, thiserror::Error)]
pub enum ReadingError {
    #[error("Reader '{reader}' could not start '{program}': {source}")]
    Spawn {
        reader: String,
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unknown reader: {0}")]
    UnknownReader(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Output of one reader for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingResult {
    /// Identifies the input, the document path for file readers
    pub content_id: String,
    pub reader: String,
    pub reader_version: Option<String>,
    /// Format of `content`, e.g. "json" or "xml"
    pub format: String,
    pub content: String,
    pub read_at: DateTime<Utc>,
}

/// Options passed through to every reader
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOptions {
    /// Maximum number of documents a reader may process at once
    pub n_proc: usize,
    pub verbose: bool,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            n_proc: 1,
            verbose: false,
        }
    }
}

/// A reading back-end
#[async_trait]
pub trait Reader: Send + Sync {
    fn name(&self) -> &str;

    /// Read `files`. `Ok(None)` means the reader produced nothing at all.
    async fn read(&self, files: &[PathBuf], options: &ReadOptions)
        -> Result<Option<Vec<ReadingResult>>>;
}

/// Read `files` with every reader in `readers`, in order.
///
/// Results keep reader order and, within a reader, the reader's own order.
/// A reader error aborts the whole run.
pub async fn read_files(
    files: &[PathBuf],
    readers: &[Box<dyn Reader>],
    options: &ReadOptions,
) -> Result<Vec<ReadingResult>> {
    let mut outputs = Vec::new();

    for reader in readers {
        match reader.read(files, options).await? {
            None => info!("Nothing read by {}.", reader.name()),
            Some(results) => {
                info!(
                    "Successfully read {} content entries with {}.",
                    results.len(),
                    reader.name()
                );
                outputs.extend(results);
            },
        }
    }

    info!("Read {} text content entries in all.", outputs.len());
    Ok(outputs)
}

/// Write results as JSON Lines
pub fn write_outputs(path: impl AsRef<Path>, outputs: &[ReadingResult]) -> Result<()> {
    serde_jsonlines::write_json_lines(path.as_ref(), outputs)?;
    info!(path = %path.as_ref().display(), count = outputs.len(), "Reading outputs stored");
    Ok(())
}

/// Read back a file written by [`write_outputs`]
pub fn load_outputs(path: impl AsRef<Path>) -> Result<Vec<ReadingResult>> {
    let outputs = serde_jsonlines::json_lines(path)?.collect::<std::io::Result<Vec<_>>>()?;
    Ok(outputs)
}
