//! Common types used across biolit

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Namespace used for the raw text an entity was grounded from
pub const TEXT_NAMESPACE: &str = "TEXT";

/// Database namespace -> identifier mapping (e.g. `CHEBI` -> `CHEBI:1234`).
///
/// Ordered so that serialized output is stable across runs.
pub type DbRefs = BTreeMap<String, String>;

/// A canonical reference to a contextual entity (cell type, organ, ...).
///
/// # Examples
///
/// ```rust
/// use biolit_common::types::RefContext;
///
/// let ctx = RefContext::ungrounded("CD4+ T-cells");
/// assert_eq!(ctx.name, "CD4+ T-cells");
/// assert_eq!(ctx.text(), Some("CD4+ T-cells"));
/// assert_eq!(ctx.db_refs.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefContext {
    /// Display name, the grounded canonical name when available
    pub name: String,

    /// Namespace -> identifier mapping, always including `TEXT`
    pub db_refs: DbRefs,
}

impl RefContext {
    /// Build a reference and record `text` under the `TEXT` namespace.
    pub fn new(name: impl Into<String>, mut db_refs: DbRefs, text: impl Into<String>) -> Self {
        db_refs.insert(TEXT_NAMESPACE.to_string(), text.into());
        Self {
            name: name.into(),
            db_refs,
        }
    }

    /// Reference for text that could not be grounded to any namespace
    pub fn ungrounded(text: &str) -> Self {
        Self::new(text, DbRefs::new(), text)
    }

    /// The raw text this reference was built from
    pub fn text(&self) -> Option<&str> {
        self.db_refs.get(TEXT_NAMESPACE).map(String::as_str)
    }

    /// Whether any namespace other than `TEXT` is present
    pub fn is_grounded(&self) -> bool {
        self.db_refs.keys().any(|ns| ns != TEXT_NAMESPACE)
    }
}

impl std::fmt::Display for RefContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.name)?;
        for (i, (ns, id)) in self.db_refs.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}:{}", ns, id)?;
        }
        write!(f, ")")
    }
}
