//! Repository Module
//!
//! Collaborator contracts used by the layer entities and the loader, plus the
//! bundled adapters:
//! - Local filesystem (content files + JSON-lines metadata)
//! - In-memory (for tests and embedding)

pub mod codec;
mod local;
mod memory;

use crate::content::{Content, ContentType, Format};
use crate::error::Result;
use crate::metadata::Metadata;

pub use local::{
    LocalDataRepository, LocalMetadataRepository, MetadataEncoding, LOCAL_METADATA_NAME,
};
pub use memory::{InMemoryDataRepository, InMemoryMetadataRepository};

/// Persists content.
///
/// Implementations fail with
/// [`LakeError::ContentExtensionMismatch`](crate::LakeError::ContentExtensionMismatch)
/// when they can't encode `format` for `content_type`.
pub trait DataRepository {
    fn load(
        &self,
        project_name: &str,
        layer_name: &str,
        id: &str,
        format: Format,
        content_type: ContentType,
    ) -> Result<Content>;

    fn save(
        &self,
        content: &Content,
        project_name: &str,
        layer_name: &str,
        id: &str,
        format: Format,
        content_type: ContentType,
    ) -> Result<()>;
}

/// Persists metadata and looks it up by id.
pub trait MetadataRepository {
    /// Fails with [`LakeError::NoMetadataFound`](crate::LakeError::NoMetadataFound)
    /// when no record exists.
    fn load(&self, id: &str) -> Result<Metadata>;

    fn save(&self, metadata: &Metadata) -> Result<()>;
}

/// Storage key for an item: `{project_name}/{layer_name}/{id}.{format}`.
pub fn compose_path(project_name: &str, layer_name: &str, id: &str, format: Format) -> String {
    format!("{}/{}/{}.{}", project_name, layer_name, id, format)
}
