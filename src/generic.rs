use std::collections::BTreeMap;

use serde_json::Value;

use crate::columns::{ApiResource, CellMetadata, ColumnBinding, LinkContext, resource_link};
use crate::object::lookup_str;
use crate::registry::{AttributeMapping, AttributeValue, KindAdapter};
use crate::schema::{DataSchema, UiSchema};

// Fallback for kinds without a dedicated adapter: identity columns only,
// total over whatever shape the object has.
pub struct GenericAdapter;

const ATTRIBUTES: [&str; 4] = ["Name", "Namespace", "Creation Timestamp", "raw"];

impl KindAdapter for GenericAdapter {
    fn attributes(&self) -> &'static [&'static str] {
        &ATTRIBUTES
    }

    fn extract(&self, object: &Value) -> AttributeMapping {
        let mut row = AttributeMapping::default();
        row.insert(
            "Name",
            AttributeValue::text(lookup_str(object, &["metadata", "name"])),
        );
        row.insert(
            "Namespace",
            AttributeValue::text(lookup_str(object, &["metadata", "namespace"])),
        );
        row.insert(
            "Creation Timestamp",
            AttributeValue::text(lookup_str(object, &["metadata", "creationTimestamp"])),
        );
        row.retain_raw(object);
        row
    }

    fn data_schemas(&self) -> BTreeMap<&'static str, DataSchema> {
        BTreeMap::from([
            ("Name", DataSchema::Text),
            ("Namespace", DataSchema::Text),
            ("Creation Timestamp", DataSchema::Time),
            ("raw", DataSchema::Object),
        ])
    }

    fn ui_schemas(&self) -> BTreeMap<&'static str, UiSchema> {
        BTreeMap::from([
            ("Name", UiSchema::Link),
            ("Namespace", UiSchema::Text),
            ("Creation Timestamp", UiSchema::Time),
            ("raw", UiSchema::Object),
        ])
    }

    fn column_bindings(&self, resource: &ApiResource, link: &LinkContext) -> Vec<ColumnBinding> {
        let resource = resource.clone();
        let link = link.clone();
        vec![
            ColumnBinding::with_metadata("Name", DataSchema::Text, UiSchema::Link, move |row| {
                CellMetadata::Link {
                    hyperlink: resource_link(&link, &resource, row.text("Name").unwrap_or_default()),
                }
            }),
            ColumnBinding::plain("Namespace", DataSchema::Text, UiSchema::Text),
            ColumnBinding::plain("Creation Timestamp", DataSchema::Time, UiSchema::Time),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::GenericAdapter;
    use crate::registry::{AttributeValue, KindAdapter};
    use serde_json::json;

    #[test]
    fn tolerates_arbitrary_shapes() {
        for object in [
            json!({}),
            json!(null),
            json!([1, 2, 3]),
            json!({"metadata": "not-an-object"}),
            json!({"metadata": {"name": 42}}),
        ] {
            let row = GenericAdapter.extract(&object);
            assert!(row.get("Name").is_some());
            assert!(row.get("Namespace").is_some());
            assert!(row.get("Creation Timestamp").is_some());
        }
    }

    #[test]
    fn extracts_identity_fields() {
        let row = GenericAdapter.extract(&json!({
            "metadata": {
                "name": "thing",
                "namespace": "misc",
                "creationTimestamp": "2026-05-01T00:00:00Z"
            }
        }));
        assert_eq!(row.text("Name"), Some("thing"));
        assert_eq!(row.text("Namespace"), Some("misc"));
        assert_eq!(
            row.get("Creation Timestamp"),
            Some(&AttributeValue::Text("2026-05-01T00:00:00Z".to_string()))
        );
    }
}
