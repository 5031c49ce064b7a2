//! Serialization formats and the content-type compatibility table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::ContentType;
use crate::error::{LakeError, Result};

/// Serialization format chosen at save time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Untyped text. Cell types are inferred on read, so string cells such as
    /// `"007"`, `"true"` or `""` come back as a number, a boolean or null.
    Csv,
    Parquet,
    Json,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Csv, Format::Parquet, Format::Json];

    /// File extension, also the persisted name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Csv => "csv",
            Format::Parquet => "parquet",
            Format::Json => "json",
        }
    }

    /// Whether content of this type may be stored in this format.
    pub fn supports(&self, content_type: ContentType) -> bool {
        match content_type {
            ContentType::Table => matches!(self, Format::Csv | Format::Parquet),
            ContentType::Mapping | ContentType::MappingList => matches!(self, Format::Json),
        }
    }

    /// Formats allowed for a content type.
    pub fn allowed_for(content_type: ContentType) -> Vec<Format> {
        Self::ALL
            .into_iter()
            .filter(|format| format.supports(content_type))
            .collect()
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = LakeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Format::Csv),
            "parquet" => Ok(Format::Parquet),
            "json" => Ok(Format::Json),
            _ => Err(LakeError::NotCoveredFormat {
                content_type: None,
                format: s.to_string(),
            }),
        }
    }
}

/// Accept or reject a content-type and format combination.
///
/// Runs before any I/O; rejection has no side effects.
pub fn validate_format(content_type: ContentType, format: Format) -> Result<()> {
    if format.supports(content_type) {
        Ok(())
    } else {
        Err(LakeError::NotCoveredFormat {
            content_type: Some(content_type),
            format: format.to_string(),
        })
    }
}
