//! Error handling for Medallion
//!
//! A single taxonomy shared by the core and the bundled adapters. The core
//! never translates collaborator errors; they surface to the caller as-is.

use std::path::PathBuf;

use thiserror::Error;

use crate::content::{ContentType, Format};

/// Result type alias for Medallion operations
pub type Result<T> = std::result::Result<T, LakeError>;

/// Main error type for Medallion operations
#[derive(Error, Debug)]
pub enum LakeError {
    // Content Errors
    #[error("Content type not covered: {found}")]
    NotCoveredContentType { found: String },

    #[error("Format '{format}' is not covered{}", for_content(.content_type))]
    NotCoveredFormat {
        content_type: Option<ContentType>,
        format: String,
    },

    #[error("{content_type} content can't be stored with extension '{format}'")]
    ContentExtensionMismatch {
        content_type: ContentType,
        format: Format,
    },

    #[error("Invalid table: {reason}")]
    InvalidTable { reason: String },

    // Metadata Errors
    #[error("No metadata found for {id}")]
    NoMetadataFound { id: String },

    #[error("No content stored at {path}")]
    ContentNotFound { path: String },

    #[error("Unknown layer tag: {layer}")]
    UnknownLayer { layer: String },

    // File Errors
    #[error("Failed to read file: {path}: {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}: {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Directory creation failed: {path}: {source}")]
    DirectoryCreateError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Configuration Errors
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    // Codec Errors
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[cfg(feature = "parquet")]
    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[cfg(feature = "parquet")]
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow_schema::ArrowError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn for_content(content_type: &Option<ContentType>) -> String {
    content_type
        .map(|content_type| format!(" for {content_type} content"))
        .unwrap_or_default()
}

impl LakeError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            LakeError::NotCoveredContentType { .. } => "NOT_COVERED_CONTENT_TYPE",
            LakeError::NotCoveredFormat { .. } => "NOT_COVERED_FORMAT",
            LakeError::ContentExtensionMismatch { .. } => "CONTENT_EXTENSION_MISMATCH",
            LakeError::InvalidTable { .. } => "INVALID_TABLE",
            LakeError::NoMetadataFound { .. } => "NO_METADATA_FOUND",
            LakeError::ContentNotFound { .. } => "CONTENT_NOT_FOUND",
            LakeError::UnknownLayer { .. } => "UNKNOWN_LAYER",
            LakeError::FileReadError { .. } => "FILE_READ_ERROR",
            LakeError::FileWriteError { .. } => "FILE_WRITE_ERROR",
            LakeError::DirectoryCreateError { .. } => "DIRECTORY_CREATE_ERROR",
            LakeError::InvalidConfig { .. } => "INVALID_CONFIG",
            LakeError::Json(_) => "JSON_ERROR",
            LakeError::Csv(_) => "CSV_ERROR",
            #[cfg(feature = "parquet")]
            LakeError::Parquet(_) => "PARQUET_ERROR",
            #[cfg(feature = "parquet")]
            LakeError::Arrow(_) => "ARROW_ERROR",
            LakeError::Io(_) => "IO_ERROR",
        }
    }

    /// Returns true if the failed operation may succeed when retried unchanged.
    ///
    /// Validation failures never are; storage I/O might be.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            LakeError::FileReadError { .. }
                | LakeError::FileWriteError { .. }
                | LakeError::DirectoryCreateError { .. }
                | LakeError::Io(_)
        )
    }

    /// Returns a user-facing recovery suggestion.
    pub fn recovery_suggestion(&self) -> Option<&'static str> {
        match self {
            LakeError::NotCoveredContentType { .. } => {
                Some("Pass a table, a JSON object, or an array of JSON objects.")
            }
            LakeError::NotCoveredFormat { .. } => {
                Some("Tables support csv and parquet; mappings and mapping lists support json.")
            }
            LakeError::ContentExtensionMismatch { .. } => {
                Some("This backend can't encode that format; pick another format or backend.")
            }
            LakeError::NoMetadataFound { .. } => {
                Some("Check the id; content written without metadata is not discoverable.")
            }
            LakeError::ContentNotFound { .. } => {
                Some("The metadata points to content this backend does not hold.")
            }
            LakeError::InvalidConfig { .. } => Some("Fix the configuration file and try again."),
            _ => None,
        }
    }
}
