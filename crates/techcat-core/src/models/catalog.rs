use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::merge::MergeStage;
use super::mention::Mention;
use crate::constants::UNKNOWN_DOMAIN;

/// One entry of an existing canonical catalog file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "variants")]
    pub aliases: Vec<String>,
}

/// Where a canonical technology's identity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Present in the starting catalog.
    Existing,
    /// Minted during this run.
    Minted,
}

/// How a variant was attached to its technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariantMethod {
    Exact,
    Fused,
    Cluster,
    Duplicate,
}

/// A mention-derived surface name of a canonical technology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    /// Representative literal form.
    pub name: String,
    /// Normalized form; unique across the whole catalog once resolution completes.
    pub normalized: String,
    pub score: f64,
    pub method: VariantMethod,
    pub occurrence_count: u64,
}

impl Variant {
    pub fn from_mention(mention: &Mention, score: f64, method: VariantMethod) -> Self {
        Self {
            name: mention.original_name.clone(),
            normalized: mention.name.clone(),
            score,
            method,
            occurrence_count: mention.occurrence_count,
        }
    }
}

/// An identity folded into a surviving technology.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetiredIdentity {
    /// `None` when a cluster proposal was folded before it was ever minted.
    pub id: Option<String>,
    pub name: String,
    pub similarity: f64,
    pub stage: MergeStage,
}

/// The persisted unit of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CanonicalTechnology {
    pub id: String,
    pub canonical_name: String,
    pub domain: String,
    pub description: String,
    /// Names supplied by the starting catalog.
    #[serde(default)]
    pub aliases: Vec<String>,
    pub variants: Vec<Variant>,
    /// Sum of the occurrence counts of every mention folded into this technology.
    pub occurrence_count: u64,
    pub source_doc_ids: BTreeSet<String>,
    pub provenance: Provenance,
    #[serde(default)]
    pub merged_from: Vec<RetiredIdentity>,
}

impl CanonicalTechnology {
    pub fn from_entry(entry: &CatalogEntry) -> Self {
        Self {
            id: entry.id.clone(),
            canonical_name: entry.name.clone(),
            domain: entry
                .domain
                .clone()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| UNKNOWN_DOMAIN.to_string()),
            description: entry.description.clone().unwrap_or_default(),
            aliases: entry.aliases.clone(),
            variants: Vec::new(),
            occurrence_count: 0,
            source_doc_ids: BTreeSet::new(),
            provenance: Provenance::Existing,
            merged_from: Vec::new(),
        }
    }

    /// Case-insensitive variant lookup by normalized or literal name.
    pub fn has_variant(&self, name: &str) -> bool {
        let needle = name.to_lowercase();
        self.variants
            .iter()
            .any(|v| v.normalized.to_lowercase() == needle || v.name.to_lowercase() == needle)
    }

    /// Attach a mention as a variant. Returns `false` (and changes nothing)
    /// if the variant is already present.
    pub fn add_mention(&mut self, mention: &Mention, score: f64, method: VariantMethod) -> bool {
        if self.has_variant(&mention.name) || self.has_variant(&mention.original_name) {
            return false;
        }
        self.variants.push(Variant::from_mention(mention, score, method));
        self.occurrence_count += mention.occurrence_count;
        self.source_doc_ids
            .extend(mention.source_doc_ids.iter().cloned());
        true
    }

    /// Fold `other` into `self`. Occurrence counts always sum; variants and
    /// aliases union case-insensitively; `other`'s identity is retired.
    pub fn absorb(&mut self, other: CanonicalTechnology, similarity: f64, stage: MergeStage) {
        for variant in other.variants {
            let lower = variant.normalized.to_lowercase();
            match self
                .variants
                .iter_mut()
                .find(|v| v.normalized.to_lowercase() == lower || v.name.to_lowercase() == variant.name.to_lowercase())
            {
                Some(existing) => existing.occurrence_count += variant.occurrence_count,
                None => self.variants.push(variant),
            }
        }
        for alias in other.aliases {
            if !self
                .aliases
                .iter()
                .any(|a| a.to_lowercase() == alias.to_lowercase())
            {
                self.aliases.push(alias);
            }
        }
        self.occurrence_count += other.occurrence_count;
        self.source_doc_ids.extend(other.source_doc_ids);
        if self.domain == UNKNOWN_DOMAIN && other.domain != UNKNOWN_DOMAIN {
            self.domain = other.domain;
        }
        if self.description.is_empty() {
            self.description = other.description;
        }
        self.merged_from.extend(other.merged_from);
        self.merged_from.push(RetiredIdentity {
            id: Some(other.id),
            name: other.canonical_name,
            similarity,
            stage,
        });
    }

    /// Every name this technology answers to: canonical name, aliases, variants.
    pub fn match_names(&self) -> Vec<&str> {
        let mut names = Vec::with_capacity(1 + self.aliases.len() + self.variants.len());
        names.push(self.canonical_name.as_str());
        names.extend(self.aliases.iter().map(String::as_str));
        names.extend(self.variants.iter().map(|v| v.name.as_str()));
        names
    }
}

/// A catalog value threaded between stages. Each stage returns a new one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    pub technologies: Vec<CanonicalTechnology>,
}

impl Catalog {
    pub fn from_entries(entries: &[CatalogEntry]) -> Self {
        let mut catalog = Self::default();
        for entry in entries {
            if catalog.contains_id(&entry.id) {
                continue;
            }
            catalog
                .technologies
                .push(CanonicalTechnology::from_entry(entry));
        }
        catalog
    }

    pub fn len(&self) -> usize {
        self.technologies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.technologies.is_empty()
    }

    pub fn contains_id(&self, id: &str) -> bool {
        self.technologies.iter().any(|t| t.id == id)
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.technologies.iter().position(|t| t.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&CanonicalTechnology> {
        self.technologies.iter().find(|t| t.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut CanonicalTechnology> {
        self.technologies.iter_mut().find(|t| t.id == id)
    }

    /// `base`, or `base_2`, `base_3`, ... whichever is not taken yet.
    pub fn unique_id(&self, base: &str) -> String {
        if !self.contains_id(base) {
            return base.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{base}_{n}");
            if !self.contains_id(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }

    pub fn total_variants(&self) -> usize {
        self.technologies.iter().map(|t| t.variants.len()).sum()
    }

    pub fn total_occurrences(&self) -> u64 {
        self.technologies.iter().map(|t| t.occurrence_count).sum()
    }
}
