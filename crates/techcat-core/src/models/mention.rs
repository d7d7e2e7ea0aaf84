use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Kind of source document a mention was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocType {
    Patent,
    Paper,
    Report,
    News,
    #[serde(other)]
    Other,
}

/// Per-document metadata. Each field only applies to some document types;
/// the rest stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// Any document type.
    #[serde(default)]
    pub publication_year: Option<i32>,
    /// Patents.
    #[serde(default)]
    pub assignee: Option<String>,
    /// Patents.
    #[serde(default)]
    pub jurisdiction: Option<String>,
    /// Papers.
    #[serde(default)]
    pub venue: Option<String>,
    /// Reports and news.
    #[serde(default)]
    pub publisher: Option<String>,
}

/// One raw technology mention as emitted by upstream extraction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMention {
    #[serde(default, alias = "technology_name", alias = "technology")]
    pub name: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Strength of the mention in its document, in [0, 1].
    #[serde(default)]
    pub strength: Option<f64>,
    /// Extraction confidence, in [0, 1].
    #[serde(default, alias = "confidence")]
    pub evidence_confidence: Option<f64>,
    #[serde(default)]
    pub doc_id: Option<String>,
    #[serde(default)]
    pub doc_type: Option<DocType>,
    #[serde(flatten)]
    pub metadata: SourceMetadata,
}

impl RawMention {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }
}

/// A unique normalized mention with aggregated statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mention {
    /// Normalized name; the grouping key.
    pub name: String,
    /// Most frequent literal form (ties broken alphabetically).
    pub original_name: String,
    pub occurrence_count: u64,
    pub roles: BTreeSet<String>,
    pub avg_strength: f64,
    pub avg_confidence: f64,
    pub source_doc_ids: BTreeSet<String>,
    pub doc_types: BTreeSet<DocType>,
    #[serde(default)]
    pub first_year: Option<i32>,
    #[serde(default)]
    pub last_year: Option<i32>,
    #[serde(default)]
    pub assignees: BTreeSet<String>,
}

impl Mention {
    /// A mention with no metadata beyond its name and count.
    pub fn bare(name: impl Into<String>, occurrence_count: u64) -> Self {
        let name = name.into();
        Self {
            original_name: name.clone(),
            name,
            occurrence_count,
            roles: BTreeSet::new(),
            avg_strength: 0.0,
            avg_confidence: 0.0,
            source_doc_ids: BTreeSet::new(),
            doc_types: BTreeSet::new(),
            first_year: None,
            last_year: None,
            assignees: BTreeSet::new(),
        }
    }
}
