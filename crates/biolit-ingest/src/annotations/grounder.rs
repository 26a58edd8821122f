//! Grounding interface and a lexicon-backed implementation
//!
//! A grounder maps free text to ranked candidate entities. The context entry
//! parser only ever looks at the top candidate.

use super::grounding::parse_db_refs;
use biolit_common::{BiolitError, DbRefs, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use tracing::{debug, info};

/// One candidate returned by a grounder
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingMatch {
    /// Canonical display name
    pub name: String,
    pub db_refs: DbRefs,
}

impl GroundingMatch {
    pub fn new(name: impl Into<String>, db_refs: DbRefs) -> Self {
        Self {
            name: name.into(),
            db_refs,
        }
    }
}

/// Resolves free text to ranked candidates, best first.
///
/// An empty vector means no grounding was found.
pub trait Grounder {
    fn ground(&self, text: &str) -> Vec<GroundingMatch>;
}

impl<F> Grounder for F
where
    F: Fn(&str) -> Vec<GroundingMatch>,
{
    fn ground(&self, text: &str) -> Vec<GroundingMatch> {
        self(text)
    }
}

/// Grounder that never finds anything
#[derive(Debug, Clone, Copy, Default)]
pub struct NoGrounding;

impl Grounder for NoGrounding {
    fn ground(&self, _text: &str) -> Vec<GroundingMatch> {
        Vec::new()
    }
}

/// Exact-match grounder over a synonym lexicon.
///
/// Lexicon files are tab separated, one synonym per line:
///
/// ```text
/// antigen presenting cells<TAB>Antigen-Presenting Cells<TAB>MESH:D000938
/// ```
///
/// Lookups ignore case and collapse runs of whitespace. Several lines may
/// share a synonym; candidates keep file order.
#[derive(Debug, Default)]
pub struct LexiconGrounder {
    entries: HashMap<String, Vec<GroundingMatch>>,
}

impl LexiconGrounder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a lexicon from disk
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(BiolitError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)?;
        let lexicon = Self::parse(&content)?;
        info!(
            path = %path.display(),
            synonyms = lexicon.len(),
            "Loaded grounding lexicon"
        );
        Ok(lexicon)
    }

    /// Parse lexicon content. Blank lines and `#` comments are ignored.
    pub fn parse(content: &str) -> Result<Self> {
        let mut lexicon = Self::new();

        for (idx, line) in content.lines().enumerate() {
            let line_number = idx + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
            let [synonym, name, refs] = fields.as_slice() else {
                return Err(BiolitError::parse(
                    line_number,
                    format!("expected 3 tab-separated columns, found {}", fields.len()),
                ));
            };

            if synonym.is_empty() || name.is_empty() {
                return Err(BiolitError::parse(line_number, "empty synonym or name"));
            }

            let db_refs = parse_db_refs(refs).ok_or_else(|| {
                BiolitError::parse(line_number, format!("malformed identifiers '{}'", refs))
            })?;

            lexicon.insert(synonym, GroundingMatch::new(*name, db_refs));
        }

        Ok(lexicon)
    }

    pub fn insert(&mut self, synonym: &str, grounding: GroundingMatch) {
        self.entries
            .entry(normalize(synonym))
            .or_default()
            .push(grounding);
    }

    /// Number of distinct synonyms
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Grounder for LexiconGrounder {
    fn ground(&self, text: &str) -> Vec<GroundingMatch> {
        let matches = self.entries.get(&normalize(text)).cloned().unwrap_or_default();
        debug!(text, candidates = matches.len(), "Grounded text");
        matches
    }
}

fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LEXICON: &str = "# synonym\tname\trefs\n\
antigen presenting cells\tAntigen-Presenting Cells\tMESH:D000938\n\
\n\
APC\tAntigen-Presenting Cells\tMESH:D000938\n\
APC\tAPC regulator of WNT signaling pathway\tHGNC:583\n";

    #[test]
    fn test_parse_and_ground() {
        let lexicon = LexiconGrounder::parse(LEXICON).unwrap();
        assert_eq!(lexicon.len(), 2);

        let matches = lexicon.ground("Antigen  Presenting cells");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].name, "Antigen-Presenting Cells");
        assert_eq!(matches[0].db_refs["MESH"], "D000938");
    }

    #[test]
    fn test_candidates_keep_file_order() {
        let lexicon = LexiconGrounder::parse(LEXICON).unwrap();
        let matches = lexicon.ground("apc");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].db_refs["MESH"], "D000938");
        assert_eq!(matches[1].db_refs["HGNC"], "583");
    }

    #[test]
    fn test_unknown_text_has_no_candidates() {
        let lexicon = LexiconGrounder::parse(LEXICON).unwrap();
        assert!(lexicon.ground("CD4+ T-cells").is_empty());
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let err = LexiconGrounder::parse("a\tA\tMESH:1\nb\tB\n").unwrap_err();
        assert!(matches!(err, BiolitError::Parse { line: 2, .. }), "{:?}", err);

        let err = LexiconGrounder::parse("a\tA\tMESH\n").unwrap_err();
        assert!(matches!(err, BiolitError::Parse { line: 1, .. }), "{:?}", err);
    }

    #[test]
    fn test_missing_file() {
        let err = LexiconGrounder::from_file("/nonexistent/lexicon.tsv").unwrap_err();
        assert!(matches!(err, BiolitError::FileNotFound(_)));
    }

    #[test]
    fn test_closure_grounder() {
        let grounder = |text: &str| {
            if text == "liver" {
                let mut refs = DbRefs::new();
                refs.insert("UBERON".to_string(), "UBERON:0002107".to_string());
                vec![GroundingMatch::new("liver", refs)]
            } else {
                Vec::new()
            }
        };
        assert_eq!(grounder.ground("liver").len(), 1);
        assert!(grounder.ground("kidney").is_empty());
        assert!(NoGrounding.ground("liver").is_empty());
    }
}
