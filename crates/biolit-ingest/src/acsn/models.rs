//! ACSN relation records

use serde::{Deserialize, Serialize};

/// Interaction types used in the ACSN binary relations export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InteractionType {
    Catalysis,
    UnknownCatalysis,
    PhysicalStimulation,
    Trigger,
    Inhibition,
    UnknownInhibition,
    HeterodimerAssociation,
    TranscriptionalActivation,
    TranscriptionalInhibition,
}

impl InteractionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Catalysis => "CATALYSIS",
            Self::UnknownCatalysis => "UNKNOWN_CATALYSIS",
            Self::PhysicalStimulation => "PHYSICAL_STIMULATION",
            Self::Trigger => "TRIGGER",
            Self::Inhibition => "INHIBITION",
            Self::UnknownInhibition => "UNKNOWN_INHIBITION",
            Self::HeterodimerAssociation => "HETERODIMER_ASSOCIATION",
            Self::TranscriptionalActivation => "TRANSCRIPTIONAL_ACTIVATION",
            Self::TranscriptionalInhibition => "TRANSCRIPTIONAL_INHIBITION",
        }
    }

    /// The kind of statement this interaction asserts
    pub fn statement_kind(&self) -> StatementKind {
        match self {
            Self::Catalysis | Self::UnknownCatalysis | Self::PhysicalStimulation | Self::Trigger => {
                StatementKind::Activation
            },
            Self::Inhibition | Self::UnknownInhibition => StatementKind::Inhibition,
            Self::HeterodimerAssociation => StatementKind::Complex,
            Self::TranscriptionalActivation => StatementKind::IncreaseAmount,
            Self::TranscriptionalInhibition => StatementKind::DecreaseAmount,
        }
    }
}

impl std::str::FromStr for InteractionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "CATALYSIS" => Ok(Self::Catalysis),
            "UNKNOWN_CATALYSIS" => Ok(Self::UnknownCatalysis),
            "PHYSICAL_STIMULATION" => Ok(Self::PhysicalStimulation),
            "TRIGGER" => Ok(Self::Trigger),
            "INHIBITION" => Ok(Self::Inhibition),
            "UNKNOWN_INHIBITION" => Ok(Self::UnknownInhibition),
            "HETERODIMER_ASSOCIATION" => Ok(Self::HeterodimerAssociation),
            "TRANSCRIPTIONAL_ACTIVATION" => Ok(Self::TranscriptionalActivation),
            "TRANSCRIPTIONAL_INHIBITION" => Ok(Self::TranscriptionalInhibition),
            other => Err(format!("Unknown interaction type: {}", other)),
        }
    }
}

impl std::fmt::Display for InteractionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatementKind {
    Activation,
    Inhibition,
    Complex,
    IncreaseAmount,
    DecreaseAmount,
}

/// An ACSN entity resolved through the HUGO correspondence file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcsnEntity {
    /// Name as used in the ACSN maps
    pub acsn_name: String,

    /// HGNC gene symbols the entity corresponds to
    pub members: Vec<String>,
}

impl AcsnEntity {
    /// An entity standing for more than one gene
    pub fn is_family(&self) -> bool {
        self.members.len() > 1
    }

    /// The gene symbol when the entity maps to exactly one gene
    pub fn gene_symbol(&self) -> Option<&str> {
        match self.members.as_slice() {
            [symbol] => Some(symbol.as_str()),
            _ => None,
        }
    }
}

/// A normalized binary relation between two ACSN entities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcsnRelation {
    pub subject: AcsnEntity,
    pub object: AcsnEntity,
    pub interaction: InteractionType,
    pub kind: StatementKind,
    /// Supporting PubMed IDs, possibly empty
    pub pmids: Vec<String>,
}

/// A raw row of the relations table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationRow {
    #[serde(rename = "ENTITY1")]
    pub entity1: String,

    #[serde(rename = "INTERACTION_TYPE")]
    pub interaction_type: String,

    #[serde(rename = "ENTITY2")]
    pub entity2: String,

    #[serde(rename = "PMIDS", default)]
    pub pmids: Option<String>,
}

impl RelationRow {
    /// PMIDs are `;`-separated and may be blank
    pub fn pmid_list(&self) -> Vec<String> {
        self.pmids
            .as_deref()
            .unwrap_or_default()
            .split(';')
            .map(str::trim)
            .filter(|pmid| !pmid.is_empty())
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interaction_type_from_str() {
        assert_eq!("CATALYSIS".parse::<InteractionType>().unwrap(), InteractionType::Catalysis);
        assert_eq!(
            " HETERODIMER_ASSOCIATION ".parse::<InteractionType>().unwrap(),
            InteractionType::HeterodimerAssociation
        );
        assert!("MODULATION".parse::<InteractionType>().is_err());
    }

    #[test]
    fn test_statement_kind_mapping() {
        assert_eq!(InteractionType::Trigger.statement_kind(), StatementKind::Activation);
        assert_eq!(InteractionType::UnknownInhibition.statement_kind(), StatementKind::Inhibition);
        assert_eq!(
            InteractionType::HeterodimerAssociation.statement_kind(),
            StatementKind::Complex
        );
    }

    #[test]
    fn test_pmid_list() {
        let row = RelationRow {
            entity1: "A".to_string(),
            interaction_type: "CATALYSIS".to_string(),
            entity2: "B".to_string(),
            pmids: Some("123; 456;;".to_string()),
        };
        assert_eq!(row.pmid_list(), vec!["123", "456"]);

        let row = RelationRow { pmids: None, ..row };
        assert!(row.pmid_list().is_empty());
    }

    #[test]
    fn test_entity_family() {
        let single = AcsnEntity {
            acsn_name: "MAPK1".to_string(),
            members: vec!["MAPK1".to_string()],
        };
        assert_eq!(single.gene_symbol(), Some("MAPK1"));
        assert!(!single.is_family());

        let family = AcsnEntity {
            acsn_name: "ERK*".to_string(),
            members: vec!["MAPK1".to_string(), "MAPK3".to_string()],
        };
        assert!(family.is_family());
        assert_eq!(family.gene_symbol(), None);
    }
}
