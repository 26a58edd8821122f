//! Biolit Ingest Library
//!
//! Tools for turning biomedical literature and curated pathway resources into
//! structured, grounded records.
//!
//! # Modules
//!
//! - **text_refs**: publication identifiers (PMID, PMCID, DOI) from article URLs
//! - **annotations**: statement, grounding and context lines of curator annotations
//! - **acsn**: relations from the Atlas of Cancer Signalling Network
//! - **reading**: batch reading of local documents with external readers
//!
//! # Example
//!
//! ```
//! use biolit_ingest::annotations::{parse_grounding_entry, NoGrounding, parse_context_entry};
//! use biolit_ingest::text_refs::extract_text_refs;
//!
//! let refs = extract_text_refs("https://www.ncbi.nlm.nih.gov/pubmed/32196410");
//! assert_eq!(refs.pmid(), Some("32196410"));
//!
//! let entry = parse_grounding_entry("[ERK] -> FPLX:ERK").unwrap();
//! assert_eq!(entry.text, "ERK");
//!
//! let context = parse_context_entry("Cell type: fibroblast", &NoGrounding, None).unwrap();
//! assert_eq!(context.key, "cell_type");
//! ```

pub mod acsn;
pub mod annotations;
pub mod config;
pub mod reading;
pub mod text_refs;

pub use config::{IngestConfig, ReaderConfig};
