//! Curation annotation parsing
//!
//! Annotations are short free-text bodies attached to a paper URL. The first
//! line states a mechanism; following lines use two small mini-languages:
//!
//! ```text
//! [a and b] -> CHEBI:CHEBI:1234|PUBCHEM:5678     grounding entry
//! Cell type: antigen presenting cells            context entry
//! ```
//!
//! Both parsers are all-or-nothing per line and signal a malformed line with
//! `None`.

pub mod annotation;
pub mod context;
pub mod grounder;
pub mod grounding;

pub use annotation::{load_annotations, Annotation, AnnotationParser, ParsedAnnotation};
pub use context::{
    category_key, parse_context_entry, ContextCategories, ContextEntry, ContextParser,
    DEFAULT_CONTEXT_CATEGORY,
};
pub use grounder::{Grounder, GroundingMatch, LexiconGrounder, NoGrounding};
pub use grounding::{parse_grounding_entry, GroundingEntry};
