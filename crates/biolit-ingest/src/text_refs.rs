//! Reference identifiers extracted from bibliographic URLs

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

static PMID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:/pubmed/|pubmed\.ncbi\.nlm\.nih\.gov/)(\d+)").unwrap()
});

static PMCID_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"/articles/(PMC\d+)").unwrap()
});

// bioRxiv/medRxiv content URLs end in the DOI followed by a version suffix
static PREPRINT_DOI_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:bio|med)rxiv\.org/content/(10\.\d{4,}/[^\s/?#]+?)v\d+").unwrap()
});

/// Kind of reference identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TextRefType {
    Pmid,
    Pmcid,
    Doi,
    Url,
}

impl TextRefType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pmid => "PMID",
            Self::Pmcid => "PMCID",
            Self::Doi => "DOI",
            Self::Url => "URL",
        }
    }
}

impl std::fmt::Display for TextRefType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Reference type -> identifier mapping for one URL.
///
/// `URL` is always present and holds the input verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextRefs(BTreeMap<TextRefType, String>);

impl TextRefs {
    pub fn get(&self, ref_type: TextRefType) -> Option<&str> {
        self.0.get(&ref_type).map(String::as_str)
    }

    pub fn url(&self) -> &str {
        self.get(TextRefType::Url).unwrap_or_default()
    }

    pub fn pmid(&self) -> Option<&str> {
        self.get(TextRefType::Pmid)
    }

    pub fn pmcid(&self) -> Option<&str> {
        self.get(TextRefType::Pmcid)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (TextRefType, &str)> {
        self.0.iter().map(|(k, v)| (*k, v.as_str()))
    }
}

/// Extract reference identifiers from a bibliographic URL.
///
/// A PubMed article URL yields `PMID`; otherwise a PubMed Central article
/// URL yields `PMCID`. Preprint content URLs additionally yield `DOI`.
/// Unrecognized URLs are not an error, the result then only holds `URL`.
///
/// # Examples
///
/// ```rust
/// use biolit_ingest::text_refs::extract_text_refs;
///
/// let refs = extract_text_refs("https://www.ncbi.nlm.nih.gov/pubmed/32196952");
/// assert_eq!(refs.pmid(), Some("32196952"));
/// assert_eq!(refs.url(), "https://www.ncbi.nlm.nih.gov/pubmed/32196952");
/// ```
pub fn extract_text_refs(url: &str) -> TextRefs {
    let mut refs = BTreeMap::new();

    if let Some(caps) = PMID_PATTERN.captures(url) {
        refs.insert(TextRefType::Pmid, caps[1].to_string());
    } else if let Some(caps) = PMCID_PATTERN.captures(url) {
        refs.insert(TextRefType::Pmcid, caps[1].to_string());
    }

    if let Some(caps) = PREPRINT_DOI_PATTERN.captures(url) {
        refs.insert(TextRefType::Doi, caps[1].to_string());
    }

    refs.insert(TextRefType::Url, url.to_string());
    TextRefs(refs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pmid_url() {
        let url = "https://www.ncbi.nlm.nih.gov/pubmed/32196952";
        let refs = extract_text_refs(url);
        assert_eq!(refs.pmid(), Some("32196952"));
        assert_eq!(refs.url(), url);
        assert_eq!(refs.pmcid(), None);
        assert_eq!(refs.len(), 2);
    }

    #[test]
    fn test_new_pubmed_host() {
        let refs = extract_text_refs("https://pubmed.ncbi.nlm.nih.gov/32196952/");
        assert_eq!(refs.pmid(), Some("32196952"));
    }

    #[test]
    fn test_pmcid_url() {
        let url = "https://www.ncbi.nlm.nih.gov/pmc/articles/PMC7071777/";
        let refs = extract_text_refs(url);
        assert_eq!(refs.pmcid(), Some("PMC7071777"));
        assert_eq!(refs.url(), url);
        assert_eq!(refs.pmid(), None);
    }

    #[test]
    fn test_biorxiv_doi() {
        let url = "https://www.biorxiv.org/content/10.1101/2020.04.16.045708v1.full";
        let refs = extract_text_refs(url);
        assert_eq!(refs.get(TextRefType::Doi), Some("10.1101/2020.04.16.045708"));
        assert_eq!(refs.pmid(), None);
    }

    #[test]
    fn test_unknown_url_only_has_url() {
        let refs = extract_text_refs("not a url at all");
        assert_eq!(refs.len(), 1);
        assert_eq!(refs.url(), "not a url at all");
    }

    #[test]
    fn test_serializes_with_upper_case_keys() {
        let refs = extract_text_refs("https://www.ncbi.nlm.nih.gov/pubmed/1");
        let json = serde_json::to_value(&refs).unwrap();
        assert_eq!(json["PMID"], "1");
        assert_eq!(json["URL"], "https://www.ncbi.nlm.nih.gov/pubmed/1");
    }
}
