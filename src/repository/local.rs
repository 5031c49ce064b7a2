//! Local filesystem adapters
//!
//! Content lives at `{root}/{project}/{layer}/{id}.{format}`; metadata is an
//! append-only JSON-lines file (one record per line) under the same root.

use std::fs::{self, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{codec, DataRepository, MetadataRepository};
use crate::content::{Content, ContentType, Format};
use crate::error::{LakeError, Result};
use crate::metadata::{FlatMetadataRecord, Metadata};

/// Default metadata file name under the lake root.
pub const LOCAL_METADATA_NAME: &str = "metadata.jsonl";

/// How `extra_info` is written in each metadata line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MetadataEncoding {
    /// Nested JSON object.
    #[default]
    Nested,
    /// Embedded JSON string, for flat-schema consumers.
    Flat,
}

/// Just enough of a metadata line to match it by id.
#[derive(Deserialize)]
struct RecordId {
    id: String,
}

/// Content files on the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalDataRepository {
    root: PathBuf,
}

impl LocalDataRepository {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding an item.
    pub fn content_path(
        &self,
        project_name: &str,
        layer_name: &str,
        id: &str,
        format: Format,
    ) -> PathBuf {
        self.root
            .join(project_name)
            .join(layer_name)
            .join(format!("{}.{}", id, format))
    }
}

impl DataRepository for LocalDataRepository {
    fn load(
        &self,
        project_name: &str,
        layer_name: &str,
        id: &str,
        format: Format,
        content_type: ContentType,
    ) -> Result<Content> {
        codec::ensure_supported(content_type, format)?;

        let path = self.content_path(project_name, layer_name, id, format);
        let bytes = fs::read(&path).map_err(|e| LakeError::FileReadError {
            path: path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Read content file");
        codec::decode(&bytes, format, content_type)
    }

    fn save(
        &self,
        content: &Content,
        project_name: &str,
        layer_name: &str,
        id: &str,
        format: Format,
        content_type: ContentType,
    ) -> Result<()> {
        codec::ensure_supported(content_type, format)?;
        let bytes = codec::encode(content, format)?;

        let path = self.content_path(project_name, layer_name, id, format);
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| LakeError::DirectoryCreateError {
                path: dir.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(&path, &bytes).map_err(|e| LakeError::FileWriteError {
            path: path.clone(),
            source: e,
        })?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Wrote content file");
        Ok(())
    }
}

/// Metadata records in a local JSON-lines file.
#[derive(Debug, Clone)]
pub struct LocalMetadataRepository {
    path: PathBuf,
    encoding: MetadataEncoding,
}

impl LocalMetadataRepository {
    /// Use `{root}/metadata.jsonl` with nested encoding.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_file(root, LOCAL_METADATA_NAME)
    }

    /// Use `{root}/{file_name}` with nested encoding.
    pub fn with_file(root: impl AsRef<Path>, file_name: &str) -> Self {
        Self {
            path: root.as_ref().join(file_name),
            encoding: MetadataEncoding::default(),
        }
    }

    pub fn with_encoding(mut self, encoding: MetadataEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Path of the JSON-lines file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn encoding(&self) -> MetadataEncoding {
        self.encoding
    }

    fn encode_line(&self, metadata: &Metadata) -> Result<String> {
        match self.encoding {
            MetadataEncoding::Nested => Ok(serde_json::to_string(metadata)?),
            MetadataEncoding::Flat => Ok(serde_json::to_string(&metadata.to_flat()?)?),
        }
    }

    fn decode_line(&self, line: &str) -> Result<Metadata> {
        match self.encoding {
            MetadataEncoding::Nested => Ok(serde_json::from_str(line)?),
            MetadataEncoding::Flat => {
                serde_json::from_str::<FlatMetadataRecord>(line)?.into_metadata()
            }
        }
    }
}

impl MetadataRepository for LocalMetadataRepository {
    fn load(&self, id: &str) -> Result<Metadata> {
        if !self.path.exists() {
            return Err(LakeError::NoMetadataFound { id: id.to_string() });
        }

        let file = fs::File::open(&self.path).map_err(|e| LakeError::FileReadError {
            path: self.path.clone(),
            source: e,
        })?;

        for line in BufReader::new(file).lines() {
            let line = line.map_err(|e| LakeError::FileReadError {
                path: self.path.clone(),
                source: e,
            })?;
            if line.trim().is_empty() {
                continue;
            }

            // Only the matching line is decoded in full; others may use an
            // older or foreign schema.
            match serde_json::from_str::<RecordId>(&line) {
                Ok(record) if record.id == id => return self.decode_line(&line),
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        path = %self.path.display(),
                        error = %e,
                        "Skipping unreadable metadata line"
                    );
                }
            }
        }

        Err(LakeError::NoMetadataFound { id: id.to_string() })
    }

    fn save(&self, metadata: &Metadata) -> Result<()> {
        let line = self.encode_line(metadata)?;

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.exists() {
                fs::create_dir_all(dir).map_err(|e| LakeError::DirectoryCreateError {
                    path: dir.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| LakeError::FileWriteError {
                path: self.path.clone(),
                source: e,
            })?;

        writeln!(file, "{}", line).map_err(|e| LakeError::FileWriteError {
            path: self.path.clone(),
            source: e,
        })?;

        tracing::debug!(id = %metadata.id, path = %self.path.display(), "Appended metadata");
        Ok(())
    }
}
