//! Lake Configuration
//!
//! Where the local lake lives and how its metadata file is written. Read
//! from a JSON file or built in code.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LakeError, Result};
use crate::repository::{
    LocalDataRepository, LocalMetadataRepository, MetadataEncoding, LOCAL_METADATA_NAME,
};

/// Local lake settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LakeConfig {
    /// Directory holding content files and the metadata file.
    pub root: PathBuf,

    /// Metadata file name, relative to `root`.
    #[serde(default = "default_metadata_file")]
    pub metadata_file: String,

    #[serde(default)]
    pub metadata_encoding: MetadataEncoding,
}

fn default_metadata_file() -> String {
    LOCAL_METADATA_NAME.to_string()
}

impl LakeConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            metadata_file: default_metadata_file(),
            metadata_encoding: MetadataEncoding::default(),
        }
    }

    /// Load and validate a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| LakeError::FileReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: LakeConfig = serde_json::from_str(&content)?;
        config.validate()?;

        tracing::debug!(path = %path.display(), root = %config.root.display(), "Loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.root.as_os_str().is_empty() {
            return Err(LakeError::InvalidConfig {
                reason: "root must not be empty".to_string(),
            });
        }

        if self.metadata_file.is_empty() {
            return Err(LakeError::InvalidConfig {
                reason: "metadata_file must not be empty".to_string(),
            });
        }

        if self.metadata_file.contains(['/', '\\']) {
            return Err(LakeError::InvalidConfig {
                reason: format!(
                    "metadata_file '{}' must be a file name, not a path",
                    self.metadata_file
                ),
            });
        }

        Ok(())
    }

    pub fn data_repository(&self) -> LocalDataRepository {
        LocalDataRepository::new(&self.root)
    }

    pub fn metadata_repository(&self) -> LocalMetadataRepository {
        LocalMetadataRepository::with_file(&self.root, &self.metadata_file)
            .with_encoding(self.metadata_encoding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults_from_minimal_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lake.json");
        fs::write(&path, r#"{"root": "/data/lake"}"#).unwrap();

        let config = LakeConfig::from_file(&path).unwrap();
        assert_eq!(config, LakeConfig::new("/data/lake"));
        assert_eq!(config.metadata_file, "metadata.jsonl");
        assert_eq!(config.metadata_encoding, MetadataEncoding::Nested);
    }

    #[test]
    fn test_full_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("lake.json");
        fs::write(
            &path,
            r#"{"root": "lake", "metadata_file": "records.jsonl", "metadata_encoding": "flat"}"#,
        )
        .unwrap();

        let config = LakeConfig::from_file(&path).unwrap();
        let metadata_repo = config.metadata_repository();
        assert_eq!(metadata_repo.path(), Path::new("lake").join("records.jsonl"));
        assert_eq!(metadata_repo.encoding(), MetadataEncoding::Flat);
        assert_eq!(config.data_repository().root(), Path::new("lake"));
    }

    #[test]
    fn test_validate_rejects() {
        let empty_root = LakeConfig::new("");
        assert!(matches!(
            empty_root.validate(),
            Err(LakeError::InvalidConfig { .. })
        ));

        let mut nested_file = LakeConfig::new("lake");
        nested_file.metadata_file = "meta/records.jsonl".to_string();
        assert!(matches!(
            nested_file.validate(),
            Err(LakeError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempdir().unwrap();
        let err = LakeConfig::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, LakeError::FileReadError { .. }));
    }
}
