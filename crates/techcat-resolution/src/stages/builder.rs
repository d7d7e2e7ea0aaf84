//! CatalogBuilder — validation and the final, sorted catalog.

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use techcat_core::config::OutputConfig;
use techcat_core::models::{Catalog, FinalCatalog, OrphanedVariant, ValidationReport};
use tracing::{info, warn};

use crate::algorithms::meets;

pub struct CatalogBuilder {
    config: OutputConfig,
    industry: String,
}

impl CatalogBuilder {
    pub fn new(config: OutputConfig, industry: impl Into<String>) -> Self {
        Self {
            config,
            industry: industry.into(),
        }
    }

    /// Validate `catalog` against the number of unique normalized input
    /// mentions. Warnings never block output; `passed` gates promotion.
    pub fn validate(&self, catalog: &Catalog, unique_input_mentions: usize) -> ValidationReport {
        let mut by_name: BTreeMap<String, usize> = BTreeMap::new();
        let mut by_variant: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for tech in &catalog.technologies {
            *by_name.entry(tech.canonical_name.to_lowercase()).or_default() += 1;
            for v in &tech.variants {
                by_variant
                    .entry(v.normalized.to_lowercase())
                    .or_default()
                    .insert(tech.id.clone());
            }
        }

        let duplicate_names: Vec<String> = by_name
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(name, _)| name)
            .collect();

        let orphaned_variants: Vec<OrphanedVariant> = by_variant
            .iter()
            .filter(|(_, ids)| ids.len() > 1)
            .map(|(name, ids)| OrphanedVariant {
                name: name.clone(),
                canonical_ids: ids.iter().cloned().collect(),
            })
            .collect();

        let distinct_variants = by_variant.len();
        let coverage_pct = if unique_input_mentions == 0 {
            100.0
        } else {
            (distinct_variants as f64 / unique_input_mentions as f64 * 100.0).min(100.0)
        };
        let min_pct = self.config.min_coverage * 100.0;

        let mut warnings = Vec::new();
        if !duplicate_names.is_empty() {
            warnings.push(format!("{} canonical names are shared by several technologies", duplicate_names.len()));
        }
        if !orphaned_variants.is_empty() {
            warnings.push(format!("{} variants map to more than one technology", orphaned_variants.len()));
        }
        if !meets(coverage_pct, min_pct) {
            warnings.push(format!("coverage {coverage_pct:.1}% is below {min_pct:.1}%"));
        }
        for w in &warnings {
            warn!(warning = %w, "catalog validation warning");
        }

        let report = ValidationReport {
            total_technologies: catalog.len(),
            total_variants: catalog.total_variants(),
            unique_input_mentions,
            coverage_pct,
            duplicate_names,
            orphaned_variants,
            passed: false,
            warnings,
            validated_at: Utc::now(),
        };
        let passed = report.orphaned_variants.is_empty() && meets(coverage_pct, min_pct);
        info!(
            technologies = report.total_technologies,
            variants = report.total_variants,
            coverage_pct = format!("{coverage_pct:.1}"),
            passed,
            "catalog validation complete"
        );
        ValidationReport { passed, ..report }
    }

    /// Sort by canonical name (case-insensitive, then id) and stamp totals.
    pub fn build(&self, catalog: &Catalog) -> FinalCatalog {
        let mut technologies = catalog.technologies.clone();
        technologies.sort_by(|a, b| {
            a.canonical_name
                .to_lowercase()
                .cmp(&b.canonical_name.to_lowercase())
                .then_with(|| a.id.cmp(&b.id))
        });
        FinalCatalog {
            version: self.config.catalog_version.clone(),
            generated_at: Utc::now(),
            industry: self.industry.clone(),
            total_technologies: technologies.len(),
            total_variants: catalog.total_variants(),
            total_occurrences: catalog.total_occurrences(),
            technologies,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::*;
    use techcat_core::models::{CanonicalTechnology, Mention, Provenance, VariantMethod};

    fn tech(id: &str, name: &str, variants: &[&str]) -> CanonicalTechnology {
        let mut t = CanonicalTechnology {
            id: id.to_string(),
            canonical_name: name.to_string(),
            domain: "Unknown".to_string(),
            description: String::new(),
            aliases: vec![],
            variants: vec![],
            occurrence_count: 0,
            source_doc_ids: BTreeSet::new(),
            provenance: Provenance::Minted,
            merged_from: vec![],
        };
        for v in variants {
            t.add_mention(&Mention::bare(*v, 1), 1.0, VariantMethod::Cluster);
        }
        t
    }

    fn builder() -> CatalogBuilder {
        CatalogBuilder::new(OutputConfig::default(), "eVTOL")
    }

    #[test]
    fn full_coverage_passes() {
        let catalog = Catalog {
            technologies: vec![tech("a", "Alpha", &["alpha", "alpha one"]), tech("b", "Beta", &["beta"])],
        };
        let report = builder().validate(&catalog, 3);
        assert_eq!(report.coverage_pct, 100.0);
        assert!(report.passed);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn duplicate_names_warn_without_failing() {
        let catalog = Catalog {
            technologies: vec![tech("a", "Rotor", &["rotor"]), tech("b", "rotor", &["rotors"])],
        };
        let report = builder().validate(&catalog, 2);
        assert_eq!(report.duplicate_names, vec!["rotor"]);
        assert!(report.passed);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn shared_variant_is_orphaned_and_fails() {
        let catalog = Catalog {
            technologies: vec![tech("a", "A", &["shared"]), tech("b", "B", &["shared"])],
        };
        let report = builder().validate(&catalog, 1);
        assert_eq!(report.orphaned_variants.len(), 1);
        assert_eq!(report.orphaned_variants[0].canonical_ids, vec!["a", "b"]);
        assert!(!report.passed);
        assert!(report.coverage_pct <= 100.0);
    }

    #[test]
    fn low_coverage_fails() {
        let catalog = Catalog {
            technologies: vec![tech("a", "A", &["a"])],
        };
        let report = builder().validate(&catalog, 4);
        assert_eq!(report.coverage_pct, 25.0);
        assert!(!report.passed);
    }

    #[test]
    fn final_catalog_is_sorted_and_stamped() {
        let catalog = Catalog {
            technologies: vec![tech("z", "zeta", &["z"]), tech("a", "Alpha", &["a", "aa"])],
        };
        let out = builder().build(&catalog);
        let names: Vec<&str> = out.technologies.iter().map(|t| t.canonical_name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "zeta"]);
        assert_eq!(out.total_variants, 3);
        assert_eq!(out.total_occurrences, 3);
        assert_eq!(out.version, "1.0.0");
        assert_eq!(out.industry, "eVTOL");
    }
}
