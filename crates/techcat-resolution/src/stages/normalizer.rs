//! MentionNormalizer — groups raw mentions by normalized name.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use techcat_core::models::{DocType, Mention, RawMention};
use techcat_core::text::normalize_name;
use tracing::{debug, info};

/// Normalized mentions plus the count of records skipped for lacking a name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizationOutcome {
    pub mentions: Vec<Mention>,
    pub processed: usize,
    pub skipped_missing_name: usize,
}

#[derive(Default)]
struct Accumulator {
    count: u64,
    literal_forms: BTreeMap<String, u64>,
    roles: BTreeSet<String>,
    strength_sum: f64,
    strength_n: u64,
    confidence_sum: f64,
    confidence_n: u64,
    doc_ids: BTreeSet<String>,
    doc_types: BTreeSet<DocType>,
    first_year: Option<i32>,
    last_year: Option<i32>,
    assignees: BTreeSet<String>,
}

impl Accumulator {
    fn add(&mut self, literal: &str, raw: &RawMention) {
        self.count += 1;
        *self.literal_forms.entry(literal.to_string()).or_insert(0) += 1;
        if let Some(role) = raw.role.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
            self.roles.insert(role.to_lowercase());
        }
        if let Some(s) = raw.strength.filter(|s| s.is_finite()) {
            self.strength_sum += s.clamp(0.0, 1.0);
            self.strength_n += 1;
        }
        if let Some(c) = raw.evidence_confidence.filter(|c| c.is_finite()) {
            self.confidence_sum += c.clamp(0.0, 1.0);
            self.confidence_n += 1;
        }
        if let Some(id) = raw.doc_id.as_deref().filter(|d| !d.is_empty()) {
            self.doc_ids.insert(id.to_string());
        }
        if let Some(t) = raw.doc_type {
            self.doc_types.insert(t);
        }
        if let Some(year) = raw.metadata.publication_year {
            self.first_year = Some(self.first_year.map_or(year, |y| y.min(year)));
            self.last_year = Some(self.last_year.map_or(year, |y| y.max(year)));
        }
        if let Some(a) = raw.metadata.assignee.as_deref().map(str::trim).filter(|a| !a.is_empty()) {
            self.assignees.insert(a.to_string());
        }
    }

    fn finish(self, name: String) -> Mention {
        // Most frequent literal form; BTreeMap order makes the first maximum
        // the alphabetically smallest.
        let mut original_name = name.clone();
        let mut best = 0;
        for (form, n) in &self.literal_forms {
            if *n > best {
                best = *n;
                original_name = form.clone();
            }
        }
        let mean = |sum: f64, n: u64| if n == 0 { 0.0 } else { sum / n as f64 };
        Mention {
            name,
            original_name,
            occurrence_count: self.count,
            roles: self.roles,
            avg_strength: mean(self.strength_sum, self.strength_n),
            avg_confidence: mean(self.confidence_sum, self.confidence_n),
            source_doc_ids: self.doc_ids,
            doc_types: self.doc_types,
            first_year: self.first_year,
            last_year: self.last_year,
            assignees: self.assignees,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct MentionNormalizer;

impl MentionNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// One Mention per unique normalized name, sorted by occurrence count
    /// descending then name. Nameless records are skipped and counted.
    pub fn normalize(&self, raw: &[RawMention]) -> NormalizationOutcome {
        let mut groups: BTreeMap<String, Accumulator> = BTreeMap::new();
        let mut skipped = 0usize;

        for record in raw {
            let literal = record.name.as_deref().map(str::trim).unwrap_or_default();
            let key = normalize_name(literal);
            if key.is_empty() {
                skipped += 1;
                debug!(doc_id = ?record.doc_id, "skipping mention without a usable name");
                continue;
            }
            groups.entry(key).or_default().add(literal, record);
        }

        let mut mentions: Vec<Mention> = groups
            .into_iter()
            .map(|(name, acc)| acc.finish(name))
            .collect();
        mentions.sort_by(|a, b| {
            b.occurrence_count
                .cmp(&a.occurrence_count)
                .then_with(|| a.name.cmp(&b.name))
        });

        info!(
            processed = raw.len(),
            unique = mentions.len(),
            skipped_missing_name = skipped,
            "mention normalization complete"
        );
        NormalizationOutcome {
            mentions,
            processed: raw.len(),
            skipped_missing_name: skipped,
        }
    }
}
