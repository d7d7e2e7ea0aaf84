//! Loading the mention and catalog input files.

use std::path::Path;

use techcat_core::errors::{ConfigError, TechcatResult};
use techcat_core::models::{Catalog, CatalogEntry, RawMention};
use tracing::info;

fn read_required(path: &Path) -> TechcatResult<String> {
    if !path.is_file() {
        return Err(ConfigError::MissingFile {
            path: path.display().to_string(),
        }
        .into());
    }
    Ok(std::fs::read_to_string(path)?)
}

/// A JSON array of raw mention records.
pub fn load_mentions(path: impl AsRef<Path>) -> TechcatResult<Vec<RawMention>> {
    let path = path.as_ref();
    let mentions: Vec<RawMention> = serde_json::from_str(&read_required(path)?)?;
    info!(path = %path.display(), records = mentions.len(), "mentions loaded");
    Ok(mentions)
}

/// A JSON list of catalog entries. `None` means an empty starting catalog;
/// a named file that does not exist is a configuration error.
pub fn load_catalog(path: Option<&Path>) -> TechcatResult<Vec<CatalogEntry>> {
    let Some(path) = path else {
        return Ok(Vec::new());
    };
    let entries: Vec<CatalogEntry> = serde_json::from_str(&read_required(path)?)?;
    info!(path = %path.display(), entries = entries.len(), "existing catalog loaded");
    Ok(entries)
}

/// A persisted catalog, either a final catalog document or a bare
/// stage catalog (`{"technologies": [...]}`).
pub fn load_resolved_catalog(path: impl AsRef<Path>) -> TechcatResult<Catalog> {
    let path = path.as_ref();
    let raw = read_required(path)?;
    Ok(serde_json::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use techcat_core::errors::TechcatError;

    #[test]
    fn missing_catalog_path_is_fatal() {
        let err = load_catalog(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, TechcatError::ConfigError(ConfigError::MissingFile { .. })));
    }

    #[test]
    fn no_catalog_path_is_empty() {
        assert!(load_catalog(None).unwrap().is_empty());
    }

    #[test]
    fn loads_mentions_with_field_aliases() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("m.json");
        std::fs::write(
            &path,
            r#"[{"technology_name": "LiDAR", "confidence": 0.7, "doc_type": "patent"}, {"role": "x"}]"#,
        )
        .unwrap();
        let mentions = load_mentions(&path).unwrap();
        assert_eq!(mentions.len(), 2);
        assert_eq!(mentions[0].name.as_deref(), Some("LiDAR"));
        assert_eq!(mentions[0].evidence_confidence, Some(0.7));
        assert!(mentions[1].name.is_none());
    }

    #[test]
    fn final_catalog_document_loads_as_catalog() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("final.json");
        std::fs::write(
            &path,
            r#"{"version": "1.0.0", "generated_at": "2026-01-01T00:00:00Z", "industry": "eVTOL",
                "total_technologies": 0, "total_variants": 0, "total_occurrences": 0, "technologies": []}"#,
        )
        .unwrap();
        assert!(load_resolved_catalog(&path).unwrap().is_empty());
    }
}
