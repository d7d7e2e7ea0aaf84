//! Per-stage checkpoint files: pretty JSON under one directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use techcat_core::errors::{ArtifactError, TechcatResult};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    pub fn exists(&self, file: &str) -> bool {
        self.path(file).is_file()
    }

    pub fn write<T: Serialize>(&self, file: &str, value: &T) -> TechcatResult<PathBuf> {
        let path = self.path(file);
        let write_err = |reason: String| ArtifactError::WriteFailed {
            path: path.display().to_string(),
            reason,
        };
        fs::create_dir_all(&self.dir).map_err(|e| write_err(e.to_string()))?;
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json).map_err(|e| write_err(e.to_string()))?;
        debug!(path = %path.display(), "artifact written");
        Ok(path)
    }

    pub fn read<T: DeserializeOwned>(&self, file: &str) -> TechcatResult<T> {
        let path = self.path(file);
        if !path.is_file() {
            return Err(ArtifactError::NotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let raw = fs::read_to_string(&path).map_err(|e| ArtifactError::ReadFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            ArtifactError::ReadFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            }
            .into()
        })
    }
}
