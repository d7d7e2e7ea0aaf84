//! Fixture loader for the resolver's scenario datasets.
//!
//! Scenario files live under `scenarios/` next to this crate and are
//! shared by the integration tests of every crate in the workspace.

use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Root directory of the fixture files.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixture_path(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixture_path(relative_path).exists()
}

/// Absolute path to a fixture file, for tests that exercise file loading.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// List all JSON files in a fixture subdirectory, sorted by file name.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

#[cfg(test)]
mod tests {
    use super::*;
    use techcat_core::models::{CatalogEntry, RawMention};

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "scenarios directory not found");
    }

    #[test]
    fn all_scenario_files_exist() {
        let files = [
            "no_merges/mentions.json",
            "catalog_match/mentions.json",
            "catalog_match/catalog.json",
            "review_queue/catalog.json",
        ];
        for f in &files {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn mention_fixtures_parse_as_raw_mentions() {
        for dir in ["no_merges", "catalog_match"] {
            let mentions: Vec<RawMention> = load_fixture(&format!("{dir}/mentions.json"));
            assert!(!mentions.is_empty(), "{dir} has no mentions");
        }
    }

    #[test]
    fn catalog_fixture_parses_as_entries() {
        let entries: Vec<CatalogEntry> = load_fixture("catalog_match/catalog.json");
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| !e.id.is_empty()));
    }

    #[test]
    fn every_fixture_is_valid_json() {
        let mut total = 0;
        for dir in ["no_merges", "catalog_match", "review_queue"] {
            for file in list_fixtures(dir) {
                let content = std::fs::read_to_string(&file).unwrap();
                let _: serde_json::Value = serde_json::from_str(&content)
                    .unwrap_or_else(|e| panic!("Failed to parse {}: {}", file.display(), e));
                total += 1;
            }
        }
        assert_eq!(total, 4);
    }
}
