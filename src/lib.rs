//! Medallion - Layered Data Lake Core
//!
//! Stores arbitrary content (tables, mappings, lists of mappings) in three
//! quality layers, each save paired with a metadata record:
//! - Raw: data as ingested
//! - Trusted: cleaned data, with optional provenance ids
//! - Refined: business-ready data, with optional provenance ids
//!
//! # Architecture
//!
//! Layer entities never touch storage directly. They talk to two
//! collaborator contracts, [`DataRepository`] and [`MetadataRepository`], and
//! the loader rebuilds entities from what those return. Local filesystem and
//! in-memory adapters are bundled.
//!
//! ```
//! use medallion::{create_raw, read_layer_data, Format, InMemoryDataRepository,
//!     InMemoryMetadataRepository, Layer};
//! use serde_json::json;
//!
//! let data_repo = InMemoryDataRepository::new();
//! let metadata_repo = InMemoryMetadataRepository::new();
//!
//! let mut raw = create_raw(json!({"a": 1, "b": 2}), "proj")?;
//! raw.save(Format::Json, &data_repo, &metadata_repo)?;
//!
//! let id = raw.id().unwrap_or_default().to_string();
//! let loaded = read_layer_data(&id, &data_repo, &metadata_repo)?;
//! assert_eq!(loaded.layer(), Layer::Raw);
//! assert_eq!(loaded.content(), raw.content());
//! # Ok::<(), medallion::LakeError>(())
//! ```

pub mod cli;
pub mod config;
pub mod content;
pub mod error;
pub mod layers;
pub mod metadata;
pub mod repository;

pub use config::LakeConfig;
pub use content::{
    classify, validate_format, Content, ContentType, Format, IntoContent, Mapping, Table,
};
pub use error::{LakeError, Result};
pub use layers::{
    create_raw, create_refined, create_trusted, read_layer_data, read_metadata, Layer,
    LayerData, LayerVariant,
};
pub use metadata::{FlatMetadataRecord, Metadata};
pub use repository::{
    compose_path, DataRepository, InMemoryDataRepository, InMemoryMetadataRepository,
    LocalDataRepository, LocalMetadataRepository, MetadataEncoding, MetadataRepository,
};
