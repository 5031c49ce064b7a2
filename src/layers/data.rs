//! Layer data entities and the save protocol.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::layer::Layer;
use crate::content::{validate_format, Content, ContentType, Format, Mapping};
use crate::error::Result;
use crate::metadata::Metadata;
use crate::repository::{DataRepository, MetadataRepository};

/// Per-layer part of a [`LayerData`].
#[derive(Debug, Clone, PartialEq)]
pub enum LayerVariant {
    Raw,
    Trusted { source_ids: Option<Vec<String>> },
    Refined { source_ids: Option<Vec<String>> },
}

impl LayerVariant {
    pub fn layer(&self) -> Layer {
        match self {
            LayerVariant::Raw => Layer::Raw,
            LayerVariant::Trusted { .. } => Layer::Trusted,
            LayerVariant::Refined { .. } => Layer::Refined,
        }
    }

    fn source_ids(&self) -> Option<&[String]> {
        match self {
            LayerVariant::Raw => None,
            LayerVariant::Trusted { source_ids } | LayerVariant::Refined { source_ids } => {
                source_ids.as_deref()
            }
        }
    }
}

/// Content plus descriptive fields, tagged with the layer it belongs to.
///
/// Created unsaved by the `create_*` factories (no id). Each call to
/// [`LayerData::save`] assigns a fresh id and writes content and metadata;
/// an entity read back through the loader carries its stored id.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerData {
    id: Option<String>,
    project_name: String,
    content: Content,
    author: Option<String>,
    created_at: DateTime<Utc>,
    description: Option<String>,
    extra_info: Option<Mapping>,
    variant: LayerVariant,
}

impl LayerData {
    pub(crate) fn unsaved(variant: LayerVariant, content: Content, project_name: String) -> Self {
        Self {
            id: None,
            project_name,
            content,
            author: None,
            created_at: Utc::now(),
            description: None,
            extra_info: None,
            variant,
        }
    }

    /// Rebuild a saved entity from its metadata and loaded content.
    pub(crate) fn restore(metadata: Metadata, content: Content, variant: LayerVariant) -> Self {
        Self {
            id: Some(metadata.id),
            project_name: metadata.project_name,
            content,
            author: metadata.author,
            created_at: metadata.created_at,
            description: metadata.description,
            extra_info: metadata.extra_info,
            variant,
        }
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Attach caller-defined key-value data.
    pub fn with_extra_info(mut self, extra_info: Mapping) -> Self {
        self.extra_info = Some(extra_info);
        self
    }

    /// Record upstream ids.
    ///
    /// Raw data has no provenance; the ids are dropped for it.
    pub fn with_source_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let ids: Vec<String> = ids.into_iter().map(Into::into).collect();
        match &mut self.variant {
            LayerVariant::Raw => {
                tracing::warn!(
                    count = ids.len(),
                    "Ignoring source ids on raw layer data"
                );
            }
            LayerVariant::Trusted { source_ids } | LayerVariant::Refined { source_ids } => {
                *source_ids = Some(ids);
            }
        }
        self
    }

    /// Id assigned by the last save, `None` before the first one.
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    /// Take the content out of the entity.
    pub fn into_content(self) -> Content {
        self.content
    }

    pub fn content_type(&self) -> ContentType {
        self.content.content_type()
    }

    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn extra_info(&self) -> Option<&Mapping> {
        self.extra_info.as_ref()
    }

    /// Upstream ids; always `None` for raw data.
    pub fn source_ids(&self) -> Option<&[String]> {
        self.variant.source_ids()
    }

    pub fn layer(&self) -> Layer {
        self.variant.layer()
    }

    pub fn variant(&self) -> &LayerVariant {
        &self.variant
    }

    pub fn is_saved(&self) -> bool {
        self.id.is_some()
    }

    /// Persist content and metadata.
    ///
    /// Validates the format against the content type first; a rejected
    /// format leaves the entity and both repositories untouched. Otherwise a
    /// new id is assigned, then content is written, then metadata. The two
    /// writes are not atomic: if the metadata write fails the content stays
    /// behind without a record pointing to it.
    ///
    /// Saving again mints another id and creates a new record.
    pub fn save<D, M>(
        &mut self,
        format: Format,
        data_repository: &D,
        metadata_repository: &M,
    ) -> Result<()>
    where
        D: DataRepository + ?Sized,
        M: MetadataRepository + ?Sized,
    {
        let content_type = self.content_type();
        validate_format(content_type, format)?;

        let layer = self.layer();
        let id = self.assign_id();

        tracing::debug!(
            id = %id,
            project = %self.project_name,
            layer = %layer,
            format = %format,
            "Writing content"
        );
        data_repository.save(
            &self.content,
            &self.project_name,
            layer.as_str(),
            &id,
            format,
            content_type,
        )?;

        let metadata = self.compose_metadata(id, format);
        metadata_repository.save(&metadata)?;

        tracing::info!(
            id = %metadata.id,
            project = %metadata.project_name,
            layer = %metadata.layer,
            "Saved layer data"
        );
        Ok(())
    }

    /// The single id transition: replace any previous id with a fresh UUIDv4.
    fn assign_id(&mut self) -> String {
        let id = Uuid::new_v4().to_string();
        self.id = Some(id.clone());
        id
    }

    fn compose_metadata(&self, id: String, format: Format) -> Metadata {
        Metadata {
            id,
            project_name: self.project_name.clone(),
            layer: self.layer().as_str().to_string(),
            content_type: self.content_type(),
            author: self.author.clone(),
            created_at: self.created_at,
            description: self.description.clone(),
            extra_info: self.extra_info.clone(),
            source_ids: self.source_ids().map(<[String]>::to_vec),
            format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::Table;
    use crate::error::LakeError;
    use crate::repository::{InMemoryDataRepository, InMemoryMetadataRepository};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn mapping() -> Content {
        Content::from_value(json!({"a": 1, "b": 2})).unwrap()
    }

    fn table() -> Content {
        Content::Table(Table::from_columns([("a", vec![json!(1)]), ("b", vec![json!(2)])]).unwrap())
    }

    #[test]
    fn test_unsaved_has_no_id() {
        let data = LayerData::unsaved(LayerVariant::Raw, mapping(), "proj".to_string());
        assert!(data.id().is_none());
        assert!(!data.is_saved());
        assert_eq!(data.layer(), Layer::Raw);
    }

    #[test]
    fn test_save_assigns_id_and_writes_both_records() {
        let data_repo = InMemoryDataRepository::new();
        let metadata_repo = InMemoryMetadataRepository::new();
        let mut data = LayerData::unsaved(LayerVariant::Raw, mapping(), "proj".to_string())
            .with_author("ana")
            .with_description("first drop");

        data.save(Format::Json, &data_repo, &metadata_repo).unwrap();

        let id = data.id().unwrap().to_string();
        assert!(Uuid::parse_str(&id).is_ok());
        assert!(data_repo.contains(&format!("proj/raw/{}.json", id)));

        let metadata = metadata_repo.load(&id).unwrap();
        assert_eq!(metadata.layer, "raw");
        assert_eq!(metadata.content_type, ContentType::Mapping);
        assert_eq!(metadata.format, Format::Json);
        assert_eq!(metadata.author.as_deref(), Some("ana"));
        assert_eq!(metadata.description.as_deref(), Some("first drop"));
        assert_eq!(metadata.created_at, data.created_at());
        assert!(metadata.source_ids.is_none());
    }

    #[test]
    fn test_rejected_format_has_no_side_effects() {
        let data_repo = InMemoryDataRepository::new();
        let metadata_repo = InMemoryMetadataRepository::new();
        let mut data = LayerData::unsaved(LayerVariant::Raw, table(), "proj".to_string());

        let err = data
            .save(Format::Json, &data_repo, &metadata_repo)
            .unwrap_err();

        assert!(matches!(err, LakeError::NotCoveredFormat { .. }));
        assert!(data.id().is_none());
        assert_eq!(data_repo.len(), 0);
        assert_eq!(metadata_repo.len(), 0);
    }

    #[test]
    fn test_resave_mints_new_id() {
        let data_repo = InMemoryDataRepository::new();
        let metadata_repo = InMemoryMetadataRepository::new();
        let mut data = LayerData::unsaved(
            LayerVariant::Trusted { source_ids: None },
            mapping(),
            "proj".to_string(),
        );

        data.save(Format::Json, &data_repo, &metadata_repo).unwrap();
        let first = data.id().unwrap().to_string();
        data.save(Format::Json, &data_repo, &metadata_repo).unwrap();
        let second = data.id().unwrap().to_string();

        assert_ne!(first, second);
        assert_eq!(metadata_repo.len(), 2);
        assert!(metadata_repo.load(&first).is_ok());
    }

    #[test]
    fn test_source_ids_flow_into_metadata() {
        let data_repo = InMemoryDataRepository::new();
        let metadata_repo = InMemoryMetadataRepository::new();
        let mut data = LayerData::unsaved(
            LayerVariant::Refined { source_ids: None },
            table(),
            "proj".to_string(),
        )
        .with_source_ids(["a", "b"]);

        data.save(Format::Csv, &data_repo, &metadata_repo).unwrap();

        let metadata = metadata_repo.load(data.id().unwrap()).unwrap();
        assert_eq!(metadata.layer, "refined");
        assert_eq!(
            metadata.source_ids,
            Some(vec!["a".to_string(), "b".to_string()])
        );
    }

    #[test]
    fn test_raw_drops_source_ids() {
        let data = LayerData::unsaved(LayerVariant::Raw, mapping(), "proj".to_string())
            .with_source_ids(["a"]);
        assert!(data.source_ids().is_none());
        assert_eq!(data.variant(), &LayerVariant::Raw);
    }

    #[test]
    fn test_failed_metadata_write_leaves_orphaned_content() {
        struct FailingMetadataRepository;

        impl MetadataRepository for FailingMetadataRepository {
            fn load(&self, id: &str) -> Result<Metadata> {
                Err(LakeError::NoMetadataFound { id: id.to_string() })
            }

            fn save(&self, _metadata: &Metadata) -> Result<()> {
                Err(LakeError::Io(std::io::Error::new(
                    std::io::ErrorKind::Other,
                    "metadata store unavailable",
                )))
            }
        }

        let data_repo = InMemoryDataRepository::new();
        let mut data = LayerData::unsaved(LayerVariant::Raw, mapping(), "proj".to_string());

        let err = data
            .save(Format::Json, &data_repo, &FailingMetadataRepository)
            .unwrap_err();

        assert!(matches!(err, LakeError::Io(_)));
        assert_eq!(data_repo.len(), 1);
        assert!(data.id().is_some());
    }
}
