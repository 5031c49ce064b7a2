//! CLI Command Implementations
//!
//! Each command works against the collaborator contracts and writes its
//! result to the given output.

use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::content::{Content, ContentType, Format, Mapping};
use crate::error::{LakeError, Result};
use crate::layers::{
    create_raw, create_refined, create_trusted, read_layer_data, read_metadata, Layer,
};
use crate::repository::{codec, DataRepository, MetadataRepository};

/// Arguments of `put`.
#[derive(Debug, Clone, Default)]
pub struct PutArgs {
    pub layer: String,
    pub project: String,
    pub format: String,
    pub author: Option<String>,
    pub description: Option<String>,
    pub extra_info: Option<String>,
    pub source_ids: Vec<String>,
    pub file: PathBuf,
}

/// Store a file as layer data and print the assigned id.
pub fn put<D, M>(
    args: &PutArgs,
    data_repository: &D,
    metadata_repository: &M,
    out: &mut impl Write,
) -> Result<String>
where
    D: DataRepository + ?Sized,
    M: MetadataRepository + ?Sized,
{
    let layer: Layer = args.layer.parse()?;
    let format: Format = args.format.parse()?;
    let extra_info = args
        .extra_info
        .as_deref()
        .map(serde_json::from_str::<Mapping>)
        .transpose()?;

    info!(file = %args.file.display(), layer = %layer, "Storing file");
    let content = read_input(&args.file)?;

    let mut data = match layer {
        Layer::Raw => create_raw(content, args.project.as_str())?,
        Layer::Trusted => create_trusted(content, args.project.as_str())?,
        Layer::Refined => create_refined(content, args.project.as_str())?,
    };
    if let Some(author) = &args.author {
        data = data.with_author(author.as_str());
    }
    if let Some(description) = &args.description {
        data = data.with_description(description.as_str());
    }
    if let Some(extra_info) = extra_info {
        data = data.with_extra_info(extra_info);
    }
    if !args.source_ids.is_empty() {
        data = data.with_source_ids(args.source_ids.iter().cloned());
    }

    data.save(format, data_repository, metadata_repository)?;

    let id = data.id().unwrap_or_default().to_string();
    writeln!(out, "{}", id)?;
    Ok(id)
}

/// Print stored content: JSON for mappings, CSV for tables.
pub fn get<D, M>(
    id: &str,
    data_repository: &D,
    metadata_repository: &M,
    out: &mut impl Write,
) -> Result<()>
where
    D: DataRepository + ?Sized,
    M: MetadataRepository + ?Sized,
{
    let data = read_layer_data(id, data_repository, metadata_repository)?;

    match data.content() {
        Content::Table(_) => {
            out.write_all(&codec::encode(data.content(), Format::Csv)?)?;
        }
        Content::Mapping(mapping) => {
            writeln!(out, "{}", serde_json::to_string_pretty(mapping)?)?;
        }
        Content::MappingList(items) => {
            writeln!(out, "{}", serde_json::to_string_pretty(items)?)?;
        }
    }
    Ok(())
}

/// Print a metadata record as pretty JSON.
pub fn metadata<M>(id: &str, metadata_repository: &M, out: &mut impl Write) -> Result<()>
where
    M: MetadataRepository + ?Sized,
{
    let metadata = read_metadata(id, metadata_repository)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&metadata)?)?;
    Ok(())
}

/// Read an input file: CSV or Parquet by extension, JSON otherwise.
fn read_input(path: &Path) -> Result<Content> {
    let bytes = fs::read(path).map_err(|e| LakeError::FileReadError {
        path: path.to_path_buf(),
        source: e,
    })?;

    let table_format = path
        .extension()
        .and_then(OsStr::to_str)
        .and_then(|ext| ext.parse::<Format>().ok())
        .filter(|format| format.supports(ContentType::Table));

    match table_format {
        Some(format) => codec::decode(&bytes, format, ContentType::Table),
        None => Content::from_value(serde_json::from_slice(&bytes)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryDataRepository, InMemoryMetadataRepository};
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn put_args(file: PathBuf, layer: &str, format: &str) -> PutArgs {
        PutArgs {
            layer: layer.to_string(),
            project: "proj".to_string(),
            format: format.to_string(),
            file,
            ..PutArgs::default()
        }
    }

    #[test]
    fn test_put_then_get_json() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("input.json");
        fs::write(&file, r#"{"a": 1}"#).unwrap();

        let data_repo = InMemoryDataRepository::new();
        let metadata_repo = InMemoryMetadataRepository::new();

        let mut out = Vec::new();
        let mut args = put_args(file, "trusted", "json");
        args.extra_info = Some(r#"{"origin": "upload"}"#.to_string());
        args.source_ids = vec!["upstream".to_string()];
        let id = put(&args, &data_repo, &metadata_repo, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), format!("{}\n", id));
        assert!(data_repo.contains(&format!("proj/trusted/{}.json", id)));

        let mut out = Vec::new();
        get(&id, &data_repo, &metadata_repo, &mut out).unwrap();
        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed, serde_json::json!({"a": 1}));

        let mut out = Vec::new();
        metadata(&id, &metadata_repo, &mut out).unwrap();
        let printed: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(printed["layer"], "trusted");
        assert_eq!(printed["source_ids"], serde_json::json!(["upstream"]));
        assert_eq!(printed["extra_info"]["origin"], "upload");
    }

    #[test]
    fn test_put_csv_table() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("input.csv");
        fs::write(&file, "a,b\n1,x\n").unwrap();

        let data_repo = InMemoryDataRepository::new();
        let metadata_repo = InMemoryMetadataRepository::new();

        let id = put(
            &put_args(file, "refined", "csv"),
            &data_repo,
            &metadata_repo,
            &mut Vec::new(),
        )
        .unwrap();

        let mut out = Vec::new();
        get(&id, &data_repo, &metadata_repo, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a,b\n1,x\n");
    }

    #[test]
    fn test_put_rejects_bad_arguments() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("input.json");
        fs::write(&file, r#"{"a": 1}"#).unwrap();

        let data_repo = InMemoryDataRepository::new();
        let metadata_repo = InMemoryMetadataRepository::new();

        let err = put(
            &put_args(file.clone(), "gold", "json"),
            &data_repo,
            &metadata_repo,
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, LakeError::UnknownLayer { .. }));

        let err = put(
            &put_args(file.clone(), "raw", "xml"),
            &data_repo,
            &metadata_repo,
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, LakeError::NotCoveredFormat { .. }));

        let err = put(
            &put_args(file, "raw", "csv"),
            &data_repo,
            &metadata_repo,
            &mut Vec::new(),
        )
        .unwrap_err();
        assert!(matches!(err, LakeError::NotCoveredFormat { .. }));

        assert!(data_repo.is_empty());
        assert!(metadata_repo.is_empty());
    }

    #[test]
    fn test_get_unknown_id() {
        let data_repo = InMemoryDataRepository::new();
        let metadata_repo = InMemoryMetadataRepository::new();

        let err = get("missing", &data_repo, &metadata_repo, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, LakeError::NoMetadataFound { .. }));
    }
}
