// Grounding entries: "[<text>] -> <NS>:<ID>|<NS>:<ID>..."

use biolit_common::DbRefs;
use serde::{Deserialize, Serialize};

/// A text span grounded to one or more database identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingEntry {
    /// The bracketed text span
    pub text: String,

    /// Never empty
    pub db_refs: DbRefs,
}

/// Parse a single grounding line.
///
/// Returns `None` for anything that does not have the full shape; a line is
/// either parsed completely or rejected.
///
/// # Examples
///
/// ```rust
/// use biolit_ingest::annotations::parse_grounding_entry;
///
/// let entry = parse_grounding_entry("[a and b] -> CHEBI:CHEBI:1234|PUBCHEM:5678").unwrap();
/// assert_eq!(entry.text, "a and b");
/// assert_eq!(entry.db_refs["CHEBI"], "CHEBI:1234");
/// assert_eq!(entry.db_refs["PUBCHEM"], "5678");
///
/// assert!(parse_grounding_entry("[xxx]->a").is_none());
/// ```
pub fn parse_grounding_entry(line: &str) -> Option<GroundingEntry> {
    let (left, right) = line.rsplit_once("->")?;

    let text = left.trim().strip_prefix('[')?.strip_suffix(']')?;
    let db_refs = parse_db_refs(right.trim())?;

    Some(GroundingEntry {
        text: text.to_string(),
        db_refs,
    })
}

/// Parse `NS:ID|NS:ID...` into a namespace map.
///
/// Each pair is split on its first colon only, so identifiers may contain
/// colons themselves. Any malformed pair rejects the whole list.
pub(crate) fn parse_db_refs(refs: &str) -> Option<DbRefs> {
    if refs.is_empty() || refs.contains(char::is_whitespace) {
        return None;
    }

    let mut db_refs = DbRefs::new();
    for pair in refs.split('|') {
        let (namespace, identifier) = pair.split_once(':')?;
        if namespace.is_empty() || identifier.is_empty() {
            return None;
        }
        db_refs.insert(namespace.to_string(), identifier.to_string());
    }

    if db_refs.is_empty() {
        None
    } else {
        Some(db_refs)
    }
}
