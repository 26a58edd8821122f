//! Turns raw ACSN relation rows into normalized relations

use super::gmt::Correspondence;
use super::models::{AcsnEntity, AcsnRelation, InteractionType, RelationRow};
use super::{AcsnError, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{debug, info};

/// Counters for one extraction pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProcessingStats {
    pub rows: usize,
    pub relations: usize,
    pub unknown_interaction: usize,
    pub unmapped_entity: usize,
}

/// Read the relations table.
///
/// The table must have `ENTITY1`, `INTERACTION_TYPE` and `ENTITY2` headers;
/// `PMIDS` is optional. Any malformed row aborts the load.
pub fn load_relations(path: impl AsRef<Path>, delimiter: u8) -> Result<Vec<RelationRow>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(AcsnError::File {
            path: path.display().to_string(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "relations file not found"),
        });
    }

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let rows = reader
        .deserialize::<RelationRow>()
        .collect::<std::result::Result<Vec<_>, csv::Error>>()?;

    info!(path = %path.display(), rows = rows.len(), "Loaded ACSN relations");
    Ok(rows)
}

#[derive(Debug)]
pub struct AcsnProcessor {
    rows: Vec<RelationRow>,
    correspondence: Correspondence,
    relations: Vec<AcsnRelation>,
    stats: ProcessingStats,
}

impl AcsnProcessor {
    pub fn new(rows: Vec<RelationRow>, correspondence: Correspondence) -> Self {
        Self {
            rows,
            correspondence,
            relations: Vec::new(),
            stats: ProcessingStats::default(),
        }
    }

    /// Build relations from every row, replacing any previous result.
    ///
    /// Rows with an unknown interaction type, or whose entities are missing
    /// from the correspondence file, are skipped.
    pub fn extract_relations(&mut self) -> &[AcsnRelation] {
        let mut relations = Vec::with_capacity(self.rows.len());
        let mut stats = ProcessingStats {
            rows: self.rows.len(),
            ..Default::default()
        };

        for row in &self.rows {
            let interaction: InteractionType = match row.interaction_type.parse() {
                Ok(interaction) => interaction,
                Err(e) => {
                    debug!(
                        subject = %row.entity1,
                        object = %row.entity2,
                        "Skipping row: {}", e
                    );
                    stats.unknown_interaction += 1;
                    continue;
                },
            };

            let (Some(subject), Some(object)) =
                (self.entity(&row.entity1), self.entity(&row.entity2))
            else {
                debug!(
                    subject = %row.entity1,
                    object = %row.entity2,
                    "Skipping row with entity missing from correspondence"
                );
                stats.unmapped_entity += 1;
                continue;
            };

            relations.push(AcsnRelation {
                subject,
                object,
                interaction,
                kind: interaction.statement_kind(),
                pmids: row.pmid_list(),
            });
        }

        stats.relations = relations.len();
        info!(
            rows = stats.rows,
            relations = stats.relations,
            unknown_interaction = stats.unknown_interaction,
            unmapped_entity = stats.unmapped_entity,
            "Extracted ACSN relations"
        );

        self.relations = relations;
        self.stats = stats;
        &self.relations
    }

    fn entity(&self, acsn_name: &str) -> Option<AcsnEntity> {
        let members = self.correspondence.get(acsn_name)?;
        if members.is_empty() {
            return None;
        }
        Some(AcsnEntity {
            acsn_name: acsn_name.to_string(),
            members: members.clone(),
        })
    }

    pub fn relations(&self) -> &[AcsnRelation] {
        &self.relations
    }

    pub fn into_relations(self) -> Vec<AcsnRelation> {
        self.relations
    }

    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }
}
