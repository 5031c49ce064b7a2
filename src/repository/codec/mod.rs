//! Byte codec for content
//!
//! Shared by byte-oriented backends. JSON carries mappings and mapping
//! lists, CSV carries tables, and Parquet carries tables when the `parquet`
//! feature is enabled.

mod csv_table;
#[cfg(feature = "parquet")]
mod parquet_table;

use crate::content::{Content, ContentType, Format};
use crate::error::{LakeError, Result};

/// Whether this build can encode `format` at all.
pub fn is_available(format: Format) -> bool {
    match format {
        Format::Parquet => cfg!(feature = "parquet"),
        Format::Csv | Format::Json => true,
    }
}

/// Fail with [`LakeError::ContentExtensionMismatch`] unless `content_type`
/// can be encoded as `format` by this build.
pub fn ensure_supported(content_type: ContentType, format: Format) -> Result<()> {
    if format.supports(content_type) && is_available(format) {
        Ok(())
    } else {
        Err(LakeError::ContentExtensionMismatch {
            content_type,
            format,
        })
    }
}

/// Encode content as `format`.
pub fn encode(content: &Content, format: Format) -> Result<Vec<u8>> {
    ensure_supported(content.content_type(), format)?;

    match (content, format) {
        (Content::Mapping(mapping), Format::Json) => Ok(serde_json::to_vec(mapping)?),
        (Content::MappingList(items), Format::Json) => Ok(serde_json::to_vec(items)?),
        (Content::Table(table), Format::Csv) => csv_table::encode(table),
        #[cfg(feature = "parquet")]
        (Content::Table(table), Format::Parquet) => parquet_table::encode(table),
        (content, format) => Err(LakeError::ContentExtensionMismatch {
            content_type: content.content_type(),
            format,
        }),
    }
}

/// Decode bytes written by [`encode`].
pub fn decode(bytes: &[u8], format: Format, content_type: ContentType) -> Result<Content> {
    ensure_supported(content_type, format)?;

    match (content_type, format) {
        (ContentType::Mapping, Format::Json) => Ok(Content::Mapping(serde_json::from_slice(bytes)?)),
        (ContentType::MappingList, Format::Json) => {
            Ok(Content::MappingList(serde_json::from_slice(bytes)?))
        }
        (ContentType::Table, Format::Csv) => csv_table::decode(bytes).map(Content::Table),
        #[cfg(feature = "parquet")]
        (ContentType::Table, Format::Parquet) => parquet_table::decode(bytes).map(Content::Table),
        (content_type, format) => Err(LakeError::ContentExtensionMismatch {
            content_type,
            format,
        }),
    }
}
