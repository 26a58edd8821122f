// Context entries: "<Category>: <raw text>"

use super::grounder::Grounder;
use biolit_common::{DbRefs, RefContext};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::debug;

/// Category label recognized when no other set is configured
pub const DEFAULT_CONTEXT_CATEGORY: &str = "Cell type";

/// The set of category labels a context entry may use.
///
/// Labels match exactly as written in annotations (`"Cell type"`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextCategories(BTreeSet<String>);

impl ContextCategories {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(labels.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    pub fn insert(&mut self, label: impl Into<String>) -> bool {
        self.0.insert(label.into())
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Default for ContextCategories {
    fn default() -> Self {
        Self::new([DEFAULT_CONTEXT_CATEGORY])
    }
}

/// A parsed context entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextEntry {
    /// Normalized category, e.g. `cell_type`
    pub key: String,
    pub context: RefContext,
}

/// Normalize a category label into a result key
pub fn category_key(label: &str) -> String {
    label.to_lowercase().replace(' ', "_")
}

/// Parses context entries against a fixed set of categories
#[derive(Debug, Clone, Default)]
pub struct ContextParser {
    categories: ContextCategories,
}

impl ContextParser {
    pub fn new(categories: ContextCategories) -> Self {
        Self { categories }
    }

    pub fn categories(&self) -> &ContextCategories {
        &self.categories
    }

    /// Parse `line`, grounding `text` if given, otherwise the raw text.
    ///
    /// Lines without a colon, with nothing after it, or with an unknown
    /// category yield `None`. Grounding failure is not a parse failure: the
    /// reference then only carries `TEXT`.
    pub fn parse<G>(&self, line: &str, grounder: &G, text: Option<&str>) -> Option<ContextEntry>
    where
        G: Grounder + ?Sized,
    {
        let (category, raw_text) = line.split_once(':')?;
        let category = category.trim();
        let raw_text = raw_text.trim();

        if raw_text.is_empty() || !self.categories.contains(category) {
            return None;
        }

        let text = text.unwrap_or(raw_text);
        let context = match grounder.ground(text).into_iter().next() {
            Some(top) => RefContext::new(top.name, top.db_refs, text),
            None => {
                debug!(text, category, "No grounding for context text");
                RefContext::new(text, DbRefs::new(), text)
            },
        };

        Some(ContextEntry {
            key: category_key(category),
            context,
        })
    }
}

/// Parse a context entry using the default categories.
///
/// # Examples
///
/// ```rust
/// use biolit_ingest::annotations::{parse_context_entry, NoGrounding};
///
/// let entry = parse_context_entry("Cell type: CD4+ T-cells", &NoGrounding, None).unwrap();
/// assert_eq!(entry.key, "cell_type");
/// assert_eq!(entry.context.db_refs.len(), 1);
/// assert_eq!(entry.context.db_refs["TEXT"], "CD4+ T-cells");
/// ```
pub fn parse_context_entry<G>(line: &str, grounder: &G, text: Option<&str>) -> Option<ContextEntry>
where
    G: Grounder + ?Sized,
{
    ContextParser::default().parse(line, grounder, text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::grounder::{GroundingMatch, NoGrounding};

    fn mesh_grounder(text: &str) -> Vec<GroundingMatch> {
        if text == "antigen presenting cells" {
            let mut refs = DbRefs::new();
            refs.insert("MESH".to_string(), "D000938".to_string());
            vec![GroundingMatch::new("Antigen-Presenting Cells", refs)]
        } else {
            Vec::new()
        }
    }

    #[test]
    fn test_parse_context_entry() {
        let entry = parse_context_entry(
            "Cell type: antigen presenting cells",
            &mesh_grounder,
            Some("antigen presenting cells"),
        )
        .unwrap();

        assert_eq!(entry.key, "cell_type");
        assert_eq!(entry.context.name, "Antigen-Presenting Cells");
        assert_eq!(entry.context.db_refs["MESH"], "D000938");
        assert_eq!(entry.context.db_refs["TEXT"], "antigen presenting cells");
    }

    #[test]
    fn test_parse_invalid_context_entries() {
        for line in ["xxx: yyy", "Disease:something", "xxx", "Cell type:", "Cell type:   "] {
            assert!(parse_context_entry(line, &mesh_grounder, None).is_none(), "{}", line);
        }
    }

    #[test]
    fn test_ungrounded_context_entry() {
        let entry = parse_context_entry("Cell type: CD4+ T-cells", &mesh_grounder, None).unwrap();
        assert_eq!(entry.context.name, "CD4+ T-cells");
        assert_eq!(entry.context.db_refs.len(), 1);
        assert_eq!(entry.context.db_refs["TEXT"], "CD4+ T-cells");
    }

    #[test]
    fn test_override_text_is_what_gets_grounded() {
        let entry = parse_context_entry(
            "Cell type: APCs",
            &mesh_grounder,
            Some("antigen presenting cells"),
        )
        .unwrap();
        assert_eq!(entry.context.db_refs["MESH"], "D000938");
        assert_eq!(entry.context.db_refs["TEXT"], "antigen presenting cells");
    }

    #[test]
    fn test_only_first_colon_splits() {
        let entry = parse_context_entry("Cell type: T cells: activated", &NoGrounding, None).unwrap();
        assert_eq!(entry.context.db_refs["TEXT"], "T cells: activated");
    }

    #[test]
    fn test_configured_categories() {
        let parser = ContextParser::new(ContextCategories::new(["Cell type", "Cell line", "Organ"]));

        let entry = parser.parse("Cell line: HeLa", &NoGrounding, None).unwrap();
        assert_eq!(entry.key, "cell_line");

        let entry = parser.parse("Organ: liver", &NoGrounding, None).unwrap();
        assert_eq!(entry.key, "organ");

        assert!(parser.parse("Disease: asthma", &NoGrounding, None).is_none());
    }

    #[test]
    fn test_category_key() {
        assert_eq!(category_key("Cell type"), "cell_type");
        assert_eq!(category_key("Organ"), "organ");
    }
}
