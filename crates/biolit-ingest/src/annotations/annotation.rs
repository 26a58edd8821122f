// Annotation bodies: a statement sentence followed by grounding and context lines

use super::context::{ContextEntry, ContextParser};
use super::grounder::Grounder;
use super::grounding::{parse_grounding_entry, GroundingEntry};
use crate::text_refs::{extract_text_refs, TextRefs};
use biolit_common::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

/// A raw annotation as exported by the annotation service.
///
/// Only `uri` and `text` are used; other exported fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    pub uri: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedAnnotation {
    pub text_refs: TextRefs,
    /// First non-empty line of the body
    pub statement: String,
    pub groundings: Vec<GroundingEntry>,
    pub contexts: Vec<ContextEntry>,
    /// Body lines that were neither groundings nor contexts
    pub skipped_lines: usize,
}

/// Load an exported annotation list (a JSON array)
pub fn load_annotations(path: impl AsRef<Path>) -> Result<Vec<Annotation>> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let annotations: Vec<Annotation> = serde_json::from_str(&content)?;
    info!(
        path = %path.as_ref().display(),
        count = annotations.len(),
        "Loaded annotations"
    );
    Ok(annotations)
}

#[derive(Debug, Clone, Default)]
pub struct AnnotationParser {
    contexts: ContextParser,
}

impl AnnotationParser {
    pub fn new(contexts: ContextParser) -> Self {
        Self { contexts }
    }

    /// Parse one annotation body. Empty bodies yield `None`.
    pub fn parse<G>(&self, annotation: &Annotation, grounder: &G) -> Option<ParsedAnnotation>
    where
        G: Grounder + ?Sized,
    {
        let mut lines = annotation
            .text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty());

        let statement = lines.next()?.to_string();
        let mut groundings = Vec::new();
        let mut contexts = Vec::new();
        let mut skipped_lines = 0;

        for line in lines {
            if let Some(grounding) = parse_grounding_entry(line) {
                groundings.push(grounding);
            } else if let Some(context) = self.contexts.parse(line, grounder, None) {
                contexts.push(context);
            } else {
                debug!(uri = %annotation.uri, line, "Skipping unparseable annotation line");
                skipped_lines += 1;
            }
        }

        Some(ParsedAnnotation {
            text_refs: extract_text_refs(&annotation.uri),
            statement,
            groundings,
            contexts,
            skipped_lines,
        })
    }

    /// Parse a batch, dropping empty annotations
    pub fn parse_all<G>(&self, annotations: &[Annotation], grounder: &G) -> Vec<ParsedAnnotation>
    where
        G: Grounder + ?Sized,
    {
        let parsed: Vec<ParsedAnnotation> = annotations
            .iter()
            .filter_map(|annotation| self.parse(annotation, grounder))
            .collect();

        info!(
            total = annotations.len(),
            parsed = parsed.len(),
            "Parsed annotations"
        );
        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::grounder::NoGrounding;

    fn annotation(text: &str) -> Annotation {
        Annotation {
            uri: "https://www.ncbi.nlm.nih.gov/pmc/articles/PMC7071777/".to_string(),
            text: text.to_string(),
            tags: vec!["indra".to_string()],
        }
    }

    #[test]
    fn test_parse_full_annotation() {
        let body = "MEK phosphorylates ERK.\n\
                    [MEK] -> FPLX:MEK\n\
                    [ERK] -> FPLX:ERK|HGNC:6871\n\
                    Cell type: HeLa cells\n\
                    this line means nothing\n";

        let parsed = AnnotationParser::default()
            .parse(&annotation(body), &NoGrounding)
            .unwrap();

        assert_eq!(parsed.statement, "MEK phosphorylates ERK.");
        assert_eq!(parsed.text_refs.pmcid(), Some("PMC7071777"));
        assert_eq!(parsed.groundings.len(), 2);
        assert_eq!(parsed.groundings[1].db_refs["HGNC"], "6871");
        assert_eq!(parsed.contexts.len(), 1);
        assert_eq!(parsed.contexts[0].key, "cell_type");
        assert_eq!(parsed.skipped_lines, 1);
    }

    #[test]
    fn test_empty_body_is_none() {
        let parser = AnnotationParser::default();
        assert!(parser.parse(&annotation(""), &NoGrounding).is_none());
        assert!(parser.parse(&annotation("  \n\n"), &NoGrounding).is_none());
    }

    #[test]
    fn test_statement_line_is_never_parsed_as_entry() {
        let parsed = AnnotationParser::default()
            .parse(&annotation("[MEK] -> FPLX:MEK"), &NoGrounding)
            .unwrap();
        assert_eq!(parsed.statement, "[MEK] -> FPLX:MEK");
        assert!(parsed.groundings.is_empty());
    }

    #[test]
    fn test_parse_all_drops_empty() {
        let annotations = vec![annotation("A binds B."), annotation("")];
        let parsed = AnnotationParser::default().parse_all(&annotations, &NoGrounding);
        assert_eq!(parsed.len(), 1);
    }

    #[test]
    fn test_deserialize_export_ignores_extra_fields() {
        let json = r#"[{"id": "abc", "uri": "https://www.ncbi.nlm.nih.gov/pubmed/1", "text": "x", "user": "acct:someone"}]"#;
        let annotations: Vec<Annotation> = serde_json::from_str(json).unwrap();
        assert_eq!(annotations.len(), 1);
        assert!(annotations[0].tags.is_empty());
    }
}
