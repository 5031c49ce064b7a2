//! In-memory adapters
//!
//! Keep content and metadata in process memory behind a mutex. The data
//! repository applies the same format check as the byte-oriented backends
//! and keys items by the shared path convention.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{compose_path, DataRepository, MetadataRepository};
use crate::content::{Content, ContentType, Format};
use crate::error::{LakeError, Result};
use crate::metadata::Metadata;

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Content held in memory, keyed by `{project}/{layer}/{id}.{format}`.
#[derive(Debug, Default)]
pub struct InMemoryDataRepository {
    items: Mutex<HashMap<String, Content>>,
}

impl InMemoryDataRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an item is stored under `path`.
    pub fn contains(&self, path: &str) -> bool {
        lock(&self.items).contains_key(path)
    }

    /// Stored paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = lock(&self.items).keys().cloned().collect();
        paths.sort();
        paths
    }

    pub fn len(&self) -> usize {
        lock(&self.items).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DataRepository for InMemoryDataRepository {
    fn load(
        &self,
        project_name: &str,
        layer_name: &str,
        id: &str,
        format: Format,
        content_type: ContentType,
    ) -> Result<Content> {
        ensure_compatible(content_type, format)?;

        let path = compose_path(project_name, layer_name, id, format);
        let item = lock(&self.items).get(&path).cloned();
        item.ok_or(LakeError::ContentNotFound { path })
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
        ensure_compatible(content_type, format)?;

        let path = compose_path(project_name, layer_name, id, format);
        lock(&self.items).insert(path, content.clone());
        Ok(())
    }
}

fn ensure_compatible(content_type: ContentType, format: Format) -> Result<()> {
    if format.supports(content_type) {
        Ok(())
    } else {
        Err(LakeError::ContentExtensionMismatch {
            content_type,
            format,
        })
    }
}

/// Metadata held in memory in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryMetadataRepository {
    records: Mutex<Vec<Metadata>>,
}

impl InMemoryMetadataRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all records.
    pub fn records(&self) -> Vec<Metadata> {
        lock(&self.records).clone()
    }

    pub fn len(&self) -> usize {
        lock(&self.records).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl MetadataRepository for InMemoryMetadataRepository {
    fn load(&self, id: &str) -> Result<Metadata> {
        lock(&self.records)
            .iter()
            .find(|metadata| metadata.id == id)
            .cloned()
            .ok_or_else(|| LakeError::NoMetadataFound { id: id.to_string() })
    }

    fn save(&self, metadata: &Metadata) -> Result<()> {
        lock(&self.records).push(metadata.clone());
        Ok(())
    }
}
