// ACSN (Atlas of Cancer Signalling Network) Ingestion Module
//
// ACSN publishes two files per release:
// - binary relations between proteins, with supporting PMIDs (tab separated)
// - a HUGO correspondence file in GMT format mapping ACSN entity names to
//   HGNC gene symbols
//
// Fetching the files is left to the caller; this module reads local copies,
// joins them, and produces normalized relations.

pub mod gmt;
pub mod models;
pub mod processor;

pub use gmt::{load_correspondence, transform_gmt, Correspondence};
pub use models::{AcsnEntity, AcsnRelation, InteractionType, RelationRow, StatementKind};
pub use processor::{load_relations, AcsnProcessor, ProcessingStats};

use std::path::Path;

/// Default column delimiter of the relations export
pub const DEFAULT_RELATIONS_DELIMITER: u8 = b'\t';

/// Result type for ACSN operations
pub type Result<T> = std::result::Result<T, AcsnError>;

/// Error types for ACSN ingestion
#[derive(Debug, thiserror::Error)]
pub enum AcsnError {
    #[error("Cannot read {path}: {source}")]
    File {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed relations table: {0}")]
    Csv(#[from] csv::Error),
}

/// Read both files and extract relations
pub fn process_files(
    relations_path: impl AsRef<Path>,
    correspondence_path: impl AsRef<Path>,
    delimiter: u8,
) -> Result<AcsnProcessor> {
    let rows = load_relations(relations_path, delimiter)?;
    let correspondence = load_correspondence(correspondence_path)?;
    Ok(process_rows(rows, correspondence))
}

/// Extract relations from already loaded inputs
pub fn process_rows(rows: Vec<RelationRow>, correspondence: Correspondence) -> AcsnProcessor {
    let mut processor = AcsnProcessor::new(rows, correspondence);
    processor.extract_relations();
    processor
}
