use std::collections::BTreeMap;

use serde_json::Value;

use crate::columns::{
    ApiResource, CellMetadata, ColumnBinding, LinkContext, namespace_link, resource_link,
};
use crate::object::{lookup_array, lookup_f64, lookup_str};
use crate::registry::{AttributeMapping, AttributeValue, KindAdapter};
use crate::schema::{DataSchema, UiSchema};

pub struct SimpleAppAdapter;

const ATTRIBUTES: [&str; 9] = [
    "Name",
    "Namespace",
    "Ready",
    "Image",
    "Replicas",
    "Storage",
    "Service Type",
    "Age",
    "raw",
];

// .status.conditions[?(@.type=="Ready")].status, mapped to a tri-state.
fn ready_condition(object: &Value) -> Option<bool> {
    let conditions = lookup_array(object, &["status", "conditions"])?;
    let ready = conditions
        .iter()
        .find(|condition| lookup_str(condition, &["type"]) == Some("Ready"))?;
    match lookup_str(ready, &["status"]) {
        Some("True") => Some(true),
        Some("False") => Some(false),
        _ => None,
    }
}

impl KindAdapter for SimpleAppAdapter {
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
        row.insert("Ready", AttributeValue::boolean(ready_condition(object)));
        row.insert(
            "Image",
            AttributeValue::text(lookup_str(object, &["spec", "deploymentSpec", "image"])),
        );
        row.insert(
            "Replicas",
            AttributeValue::number(lookup_f64(object, &["spec", "deploymentSpec", "replicas"])),
        );
        row.insert(
            "Storage",
            AttributeValue::text(lookup_str(
                object,
                &["spec", "pvcSpec", "resources", "requests", "storage"],
            )),
        );
        row.insert(
            "Service Type",
            AttributeValue::text(lookup_str(object, &["spec", "serviceSpec", "type"])),
        );
        row.insert(
            "Age",
            AttributeValue::text(lookup_str(object, &["metadata", "creationTimestamp"])),
        );
        row.retain_raw(object);
        row
    }

    fn data_schemas(&self) -> BTreeMap<&'static str, DataSchema> {
        BTreeMap::from([
            ("Name", DataSchema::Text),
            ("Namespace", DataSchema::Text),
            ("Ready", DataSchema::Boolean),
            ("Image", DataSchema::Text),
            ("Replicas", DataSchema::Number),
            ("Storage", DataSchema::Quantity),
            ("Service Type", DataSchema::Text),
            ("Age", DataSchema::Time),
            ("raw", DataSchema::Object),
        ])
    }

    fn ui_schemas(&self) -> BTreeMap<&'static str, UiSchema> {
        BTreeMap::from([
            ("Name", UiSchema::Link),
            ("Namespace", UiSchema::Link),
            ("Ready", UiSchema::Boolean),
            ("Image", UiSchema::Text),
            ("Replicas", UiSchema::Number),
            ("Storage", UiSchema::Text),
            ("Service Type", UiSchema::Text),
            ("Age", UiSchema::Time),
            ("raw", UiSchema::Object),
        ])
    }

    fn column_bindings(&self, resource: &ApiResource, link: &LinkContext) -> Vec<ColumnBinding> {
        let resource = resource.clone();
        let name_link = link.clone();
        let ns_link = link.clone();
        vec![
            ColumnBinding::with_metadata("Name", DataSchema::Text, UiSchema::Link, move |row| {
                CellMetadata::Link {
                    hyperlink: resource_link(
                        &name_link,
                        &resource,
                        row.text("Name").unwrap_or_default(),
                    ),
                }
            }),
            ColumnBinding::with_metadata(
                "Namespace",
                DataSchema::Text,
                UiSchema::Link,
                move |row| CellMetadata::Link {
                    hyperlink: namespace_link(&ns_link, row.text("Namespace").unwrap_or_default()),
                },
            ),
            ColumnBinding::plain("Ready", DataSchema::Boolean, UiSchema::Boolean),
            ColumnBinding::plain("Service Type", DataSchema::Text, UiSchema::Text),
            ColumnBinding::plain("Image", DataSchema::Text, UiSchema::Text),
            ColumnBinding::plain("Replicas", DataSchema::Number, UiSchema::Number),
            ColumnBinding::plain("Storage", DataSchema::Quantity, UiSchema::Text),
            ColumnBinding::plain("Age", DataSchema::Time, UiSchema::Time),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::SimpleAppAdapter;
    use crate::columns::{ApiResource, CellMetadata, LinkContext};
    use crate::registry::{AttributeValue, KindAdapter};
    use serde_json::json;

    fn sample(ready_status: &str) -> serde_json::Value {
        json!({
            "metadata": {
                "name": "blog",
                "namespace": "web",
                "creationTimestamp": "2026-03-01T12:00:00Z"
            },
            "spec": {
                "deploymentSpec": {"image": "ghost:5", "replicas": 2},
                "pvcSpec": {"resources": {"requests": {"storage": "10Gi"}}},
                "serviceSpec": {"type": "ClusterIP"}
            },
            "status": {
                "conditions": [
                    {"type": "Available", "status": "True"},
                    {"type": "Ready", "status": ready_status}
                ]
            }
        })
    }

    #[test]
    fn ready_is_tri_state() {
        let row = SimpleAppAdapter.extract(&sample("True"));
        assert_eq!(row.get("Ready"), Some(&AttributeValue::Bool(true)));

        let row = SimpleAppAdapter.extract(&sample("False"));
        assert_eq!(row.get("Ready"), Some(&AttributeValue::Bool(false)));

        let row = SimpleAppAdapter.extract(&sample("Unknown"));
        assert!(row.get("Ready").is_some_and(AttributeValue::is_null));

        let row = SimpleAppAdapter.extract(&json!({"status": {"conditions": []}}));
        assert!(row.get("Ready").is_some_and(AttributeValue::is_null));

        let row = SimpleAppAdapter.extract(&json!({}));
        assert!(row.get("Ready").is_some_and(AttributeValue::is_null));
    }

    #[test]
    fn extracts_deployment_and_storage_fields() {
        let row = SimpleAppAdapter.extract(&sample("True"));
        assert_eq!(row.text("Image"), Some("ghost:5"));
        assert_eq!(row.get("Replicas"), Some(&AttributeValue::Number(2.0)));
        assert_eq!(row.text("Storage"), Some("10Gi"));
        assert_eq!(row.text("Service Type"), Some("ClusterIP"));
        assert_eq!(row.text("Age"), Some("2026-03-01T12:00:00Z"));
    }

    #[test]
    fn namespace_column_links_to_the_namespace_view() {
        let bindings = SimpleAppAdapter.column_bindings(
            &ApiResource::new("SimpleApp", "simpleapps", "apps.example.io", "v1alpha1"),
            &LinkContext {
                cluster: "dev".to_string(),
                namespace: Some("web".to_string()),
            },
        );
        let row = SimpleAppAdapter.extract(&sample("True"));

        let namespace = bindings.iter().find(|b| b.attribute == "Namespace").unwrap();
        assert_eq!(
            namespace.materialize(&row),
            CellMetadata::Link {
                hyperlink: "/(auth)/dev/Namespace/namespaces?group=&version=v1&name=web".to_string(),
            }
        );
    }
}
