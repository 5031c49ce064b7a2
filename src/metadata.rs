//! Metadata Records
//!
//! Descriptive record written next to every stored item. Two persisted
//! shapes exist: [`Metadata`] keeps `extra_info` as nested JSON, while
//! [`FlatMetadataRecord`] embeds it as a JSON string for flat-schema stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::{ContentType, Format, Mapping};
use crate::error::Result;

/// Record describing a stored item.
///
/// Built once by the save protocol and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Globally unique id assigned at save time.
    pub id: String,
    /// Logical namespace.
    pub project_name: String,
    /// Layer tag: "raw", "trusted" or "refined".
    pub layer: String,
    pub content_type: ContentType,
    #[serde(default)]
    pub author: Option<String>,
    /// Set when the entity was created, not when it was saved.
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
    /// Caller-defined key-value data.
    #[serde(default)]
    pub extra_info: Option<Mapping>,
    /// Upstream ids this item was derived from; always absent for raw.
    #[serde(default)]
    pub source_ids: Option<Vec<String>>,
    pub format: Format,
}

impl Metadata {
    /// Convert to the flat-schema shape.
    pub fn to_flat(&self) -> Result<FlatMetadataRecord> {
        let extra_info = self
            .extra_info
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        Ok(FlatMetadataRecord {
            id: self.id.clone(),
            project_name: self.project_name.clone(),
            layer: self.layer.clone(),
            content_type: self.content_type,
            author: self.author.clone(),
            created_at: self.created_at,
            description: self.description.clone(),
            extra_info,
            source_ids: self.source_ids.clone(),
            format: self.format,
        })
    }
}

/// Metadata with `extra_info` held as an embedded JSON string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlatMetadataRecord {
    pub id: String,
    pub project_name: String,
    pub layer: String,
    pub content_type: ContentType,
    #[serde(default)]
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub extra_info: Option<String>,
    #[serde(default)]
    pub source_ids: Option<Vec<String>>,
    pub format: Format,
}

impl FlatMetadataRecord {
    /// Decode the embedded `extra_info` and rebuild the metadata.
    pub fn into_metadata(self) -> Result<Metadata> {
        let extra_info = self
            .extra_info
            .as_deref()
            .map(serde_json::from_str::<Mapping>)
            .transpose()?;

        Ok(Metadata {
            id: self.id,
            project_name: self.project_name,
            layer: self.layer,
            content_type: self.content_type,
            author: self.author,
            created_at: self.created_at,
            description: self.description,
            extra_info,
            source_ids: self.source_ids,
            format: self.format,
        })
    }
}
