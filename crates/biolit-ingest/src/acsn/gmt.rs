// GMT correspondence files: id<TAB>description<TAB>member1<TAB>member2...

use super::{AcsnError, Result};
use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info};

/// ACSN entity name -> HGNC gene symbols
pub type Correspondence = HashMap<String, Vec<String>>;

/// Convert GMT lines into an id -> members mapping.
///
/// The description column is dropped. Blank lines are ignored; a repeated
/// id keeps the last line's members.
pub fn transform_gmt<I, S>(lines: I) -> Correspondence
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut correspondence = Correspondence::new();

    for line in lines {
        let line = line.as_ref().trim();
        if line.is_empty() {
            continue;
        }

        let mut parts = line.split('\t');
        let id = parts.next().unwrap_or_default();
        let members: Vec<String> = parts
            .skip(1)
            .map(str::trim)
            .filter(|member| !member.is_empty())
            .map(str::to_string)
            .collect();

        if correspondence.insert(id.to_string(), members).is_some() {
            debug!(id, "Duplicate GMT id, keeping last");
        }
    }

    correspondence
}

/// Read a GMT correspondence file from disk
pub fn load_correspondence(path: impl AsRef<Path>) -> Result<Correspondence> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| AcsnError::File {
        path: path.display().to_string(),
        source,
    })?;

    let lines = std::io::BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<String>>>()?;
    let correspondence = transform_gmt(lines);

    info!(
        path = %path.display(),
        entities = correspondence.len(),
        "Loaded GMT correspondence"
    );
    Ok(correspondence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_transform_gmt_drops_description() {
        let lines = [
            "ERK*\tna\tMAPK1\tMAPK3",
            "",
            "MEK1\tdual specificity kinase\tMAP2K1",
            "ORPHAN\tna",
        ];
        let correspondence = transform_gmt(lines);

        assert_eq!(correspondence.len(), 3);
        assert_eq!(correspondence["ERK*"], vec!["MAPK1", "MAPK3"]);
        assert_eq!(correspondence["MEK1"], vec!["MAP2K1"]);
        assert!(correspondence["ORPHAN"].is_empty());
    }

    #[test]
    fn test_transform_gmt_handles_crlf_and_trailing_tabs() {
        let correspondence = transform_gmt(["TP53\tna\tTP53\t\r"]);
        assert_eq!(correspondence["TP53"], vec!["TP53"]);
    }

    #[test]
    fn test_id_without_columns_has_no_members() {
        let correspondence = transform_gmt(["LONE_ID", "  ", "PAIR\tna\tGENE1"]);
        assert_eq!(correspondence.len(), 2);
        assert!(correspondence["LONE_ID"].is_empty());
        assert_eq!(correspondence["PAIR"], vec!["GENE1"]);
    }

    #[test]
    fn test_load_correspondence() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "AKT*\tna\tAKT1\tAKT2\tAKT3").unwrap();
        writeln!(file, "PTEN\tna\tPTEN").unwrap();

        let correspondence = load_correspondence(file.path()).unwrap();
        assert_eq!(correspondence["AKT*"].len(), 3);
        assert_eq!(correspondence["PTEN"], vec!["PTEN"]);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = load_correspondence("/nonexistent/ACSN2_HUGO_Correspondence.gmt").unwrap_err();
        assert!(matches!(err, AcsnError::File { .. }));
    }
}
