use serde::{Deserialize, Serialize};

use super::defaults;

/// Output and checkpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory for per-stage checkpoint artifacts and the final catalog.
    pub artifact_dir: String,
    pub catalog_version: String,
    /// Coverage below this fraction fails validation.
    pub min_coverage: f64,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            artifact_dir: defaults::DEFAULT_ARTIFACT_DIR.to_string(),
            catalog_version: defaults::DEFAULT_CATALOG_VERSION.to_string(),
            min_coverage: defaults::DEFAULT_MIN_COVERAGE,
        }
    }
}
