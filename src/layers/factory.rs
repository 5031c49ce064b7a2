//! Creation factories
//!
//! Build unsaved layer data. Content is classified eagerly, so
//! unrepresentable content fails here rather than at save time. Format is not
//! known yet and is checked by [`LayerData::save`].

use super::data::{LayerData, LayerVariant};
use crate::content::IntoContent;
use crate::error::Result;

/// Create unsaved raw layer data.
///
/// # Example
/// ```
/// use medallion::create_raw;
/// use serde_json::json;
///
/// let raw = create_raw(json!({"a": 1, "b": 2}), "proj").unwrap();
/// assert!(raw.id().is_none());
/// ```
pub fn create_raw(content: impl IntoContent, project_name: impl Into<String>) -> Result<LayerData> {
    create(LayerVariant::Raw, content, project_name)
}

/// Create unsaved trusted layer data.
///
/// Attach provenance with [`LayerData::with_source_ids`].
pub fn create_trusted(
    content: impl IntoContent,
    project_name: impl Into<String>,
) -> Result<LayerData> {
    create(LayerVariant::Trusted { source_ids: None }, content, project_name)
}

/// Create unsaved refined layer data.
pub fn create_refined(
    content: impl IntoContent,
    project_name: impl Into<String>,
) -> Result<LayerData> {
    create(LayerVariant::Refined { source_ids: None }, content, project_name)
}

fn create(
    variant: LayerVariant,
    content: impl IntoContent,
    project_name: impl Into<String>,
) -> Result<LayerData> {
    let content = content.into_content()?;
    Ok(LayerData::unsaved(variant, content, project_name.into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ContentType, Table};
    use crate::error::LakeError;
    use crate::layers::Layer;
    use serde_json::json;

    #[test]
    fn test_create_raw() {
        let raw = create_raw(json!({"a": 1, "b": 2}), "test-project").unwrap();

        assert_eq!(raw.layer(), Layer::Raw);
        assert_eq!(raw.project_name(), "test-project");
        assert_eq!(raw.content_type(), ContentType::Mapping);
        assert!(raw.id().is_none());
        assert!(raw.author().is_none());
    }

    #[test]
    fn test_create_trusted_with_fields() {
        let trusted = create_trusted(json!([{"a": 1}]), "test-project")
            .unwrap()
            .with_author("ana")
            .with_source_ids(["a", "b"]);

        assert_eq!(trusted.layer(), Layer::Trusted);
        assert_eq!(trusted.author(), Some("ana"));
        assert_eq!(
            trusted.source_ids(),
            Some(&["a".to_string(), "b".to_string()][..])
        );
    }

    #[test]
    fn test_create_refined_table() {
        let table = Table::from_columns([("a", vec![json!(1)])]).unwrap();
        let refined = create_refined(table, "test-project").unwrap();

        assert_eq!(refined.layer(), Layer::Refined);
        assert_eq!(refined.content_type(), ContentType::Table);
        assert!(refined.source_ids().is_none());
    }

    #[test]
    fn test_scalar_content_rejected_for_every_layer() {
        let results = [
            create_raw("text", "p"),
            create_trusted("text", "p"),
            create_refined(json!("text"), "p"),
        ];

        for result in results {
            assert!(matches!(
                result,
                Err(LakeError::NotCoveredContentType { .. })
            ));
        }
    }

    #[test]
    fn test_created_at_is_set_at_creation() {
        let before = chrono::Utc::now();
        let raw = create_raw(json!({}), "p").unwrap();
        let after = chrono::Utc::now();

        assert!(raw.created_at() >= before && raw.created_at() <= after);
    }
}
