//! Loader
//!
//! Reads metadata first, then content, and rebuilds the layer variant named
//! by the stored layer tag.

use super::data::{LayerData, LayerVariant};
use super::layer::Layer;
use crate::error::Result;
use crate::metadata::Metadata;
use crate::repository::{DataRepository, MetadataRepository};

/// Load saved layer data by id.
///
/// # Errors
/// - [`LakeError::NoMetadataFound`](crate::LakeError::NoMetadataFound) if no record exists
/// - [`LakeError::UnknownLayer`](crate::LakeError::UnknownLayer) if the record's layer tag
///   is not raw, trusted or refined; content is not read in that case
/// - any error raised by the repositories, unchanged
pub fn read_layer_data<D, M>(
    id: &str,
    data_repository: &D,
    metadata_repository: &M,
) -> Result<LayerData>
where
    D: DataRepository + ?Sized,
    M: MetadataRepository + ?Sized,
{
    let metadata = metadata_repository.load(id)?;
    let layer: Layer = metadata.layer.parse()?;

    tracing::debug!(
        id = %id,
        project = %metadata.project_name,
        layer = %layer,
        format = %metadata.format,
        "Reading content"
    );
    let content = data_repository.load(
        &metadata.project_name,
        layer.as_str(),
        id,
        metadata.format,
        metadata.content_type,
    )?;

    let variant = match layer {
        Layer::Raw => LayerVariant::Raw,
        Layer::Trusted => LayerVariant::Trusted {
            source_ids: metadata.source_ids.clone(),
        },
        Layer::Refined => LayerVariant::Refined {
            source_ids: metadata.source_ids.clone(),
        },
    };

    tracing::info!(id = %id, layer = %layer, "Loaded layer data");
    Ok(LayerData::restore(metadata, content, variant))
}

/// Look up metadata by id without reading content.
pub fn read_metadata<M>(id: &str, metadata_repository: &M) -> Result<Metadata>
where
    M: MetadataRepository + ?Sized,
{
    metadata_repository.load(id)
}
