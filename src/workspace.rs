use std::collections::BTreeMap;

use serde_json::Value;

use crate::columns::{
    ApiResource, CellMetadata, ColumnBinding, LinkContext, ObjectItem, PrefixFamily,
    cluster_scoped_link, namespace_link,
};
use crate::object::{lookup_array, lookup_str};
use crate::quantity::scalar_at;
use crate::registry::{AttributeMapping, AttributeValue, KindAdapter};
use crate::schema::{DataSchema, UiSchema};

pub struct WorkspaceAdapter;

const ATTRIBUTES: [&str; 10] = [
    "Name",
    "Namespace",
    "Users",
    "CPU Limit",
    "CPU Requests",
    "Memory Limit",
    "Memory Requests",
    "GPU Requests",
    "Creation Timestamp",
    "raw",
];

const GPU_KEY: &str = "requests.nvidia.com/gpu";

fn user_items(row: &AttributeMapping) -> Vec<ObjectItem> {
    let Some(raw) = row.raw() else {
        return Vec::new();
    };
    lookup_array(raw, &["spec", "users"])
        .map(|users| {
            users
                .iter()
                .map(|user| ObjectItem {
                    title: lookup_str(user, &["name"]).map(str::to_string),
                    description: lookup_str(user, &["subject"]).map(str::to_string),
                    actions: lookup_str(user, &["role"]).map(str::to_string),
                    raw: None,
                })
                .collect()
        })
        .unwrap_or_default()
}

fn prefix_binding(attribute: &'static str) -> ColumnBinding {
    ColumnBinding::with_metadata(
        attribute,
        DataSchema::Number,
        UiSchema::NumberWithPrefix,
        |_| CellMetadata::NumberPrefix {
            family: PrefixFamily::Binary,
        },
    )
}

impl KindAdapter for WorkspaceAdapter {
    fn attributes(&self) -> &'static [&'static str] {
        &ATTRIBUTES
    }

    fn extract(&self, object: &Value) -> AttributeMapping {
        let hard = |key: &str| scalar_at(object, &["spec", "resourceQuota", "hard", key]);

        let mut row = AttributeMapping::default();
        row.insert(
            "Name",
            AttributeValue::text(lookup_str(object, &["metadata", "name"])),
        );
        row.insert(
            "Namespace",
            AttributeValue::text(lookup_str(object, &["spec", "namespace"])),
        );
        row.insert(
            "Users",
            AttributeValue::count(Some(
                lookup_array(object, &["spec", "users"]).map(Vec::len).unwrap_or(0),
            )),
        );
        row.insert("CPU Limit", AttributeValue::scalar(hard("limits.cpu")));
        row.insert("CPU Requests", AttributeValue::scalar(hard("requests.cpu")));
        row.insert("Memory Limit", AttributeValue::scalar(hard("limits.memory")));
        row.insert(
            "Memory Requests",
            AttributeValue::scalar(hard("requests.memory")),
        );
        row.insert("GPU Requests", AttributeValue::scalar(hard(GPU_KEY)));
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
            ("Users", DataSchema::Number),
            ("CPU Limit", DataSchema::Number),
            ("CPU Requests", DataSchema::Number),
            ("Memory Limit", DataSchema::Number),
            ("Memory Requests", DataSchema::Number),
            ("GPU Requests", DataSchema::Number),
            ("Creation Timestamp", DataSchema::Time),
            ("raw", DataSchema::Object),
        ])
    }

    fn ui_schemas(&self) -> BTreeMap<&'static str, UiSchema> {
        BTreeMap::from([
            ("Name", UiSchema::Link),
            ("Namespace", UiSchema::Link),
            ("Users", UiSchema::ArrayOfObject),
            ("CPU Limit", UiSchema::NumberWithPrefix),
            ("CPU Requests", UiSchema::NumberWithPrefix),
            ("Memory Limit", UiSchema::NumberWithPrefix),
            ("Memory Requests", UiSchema::NumberWithPrefix),
            ("GPU Requests", UiSchema::NumberWithPrefix),
            ("Creation Timestamp", UiSchema::Time),
            ("raw", UiSchema::Object),
        ])
    }

    fn column_bindings(&self, resource: &ApiResource, link: &LinkContext) -> Vec<ColumnBinding> {
        let resource = resource.clone();
        let name_link = link.clone();
        let ns_link = link.clone();
        vec![
            // Workspaces are cluster-scoped: the name link carries no
            // namespace parameter.
            ColumnBinding::with_metadata("Name", DataSchema::Text, UiSchema::Link, move |row| {
                CellMetadata::Link {
                    hyperlink: cluster_scoped_link(
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
            ColumnBinding::with_metadata(
                "Users",
                DataSchema::Number,
                UiSchema::ArrayOfObject,
                |row| CellMetadata::Items(user_items(row)),
            ),
            prefix_binding("CPU Limit"),
            prefix_binding("CPU Requests"),
            prefix_binding("Memory Limit"),
            prefix_binding("Memory Requests"),
            prefix_binding("GPU Requests"),
            ColumnBinding::plain("Creation Timestamp", DataSchema::Time, UiSchema::Time),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::WorkspaceAdapter;
    use crate::columns::{ApiResource, CellMetadata, LinkContext, PrefixFamily};
    use crate::quantity::Scalar;
    use crate::registry::{AttributeValue, KindAdapter};
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "metadata": {
                "name": "team-a",
                "creationTimestamp": "2025-11-20T08:30:00Z"
            },
            "spec": {
                "namespace": "team-a-ns",
                "users": [
                    {"name": "ada", "subject": "ada@example.io", "role": "admin"},
                    {"name": "lin", "subject": "lin@example.io", "role": "edit"}
                ],
                "resourceQuota": {
                    "hard": {
                        "limits.cpu": "16",
                        "requests.cpu": "8",
                        "limits.memory": "64Gi",
                        "requests.memory": "32Gi",
                        "requests.nvidia.com/gpu": "4"
                    }
                }
            }
        })
    }

    #[test]
    fn capacity_quantities_parse_to_scalars() {
        let row = WorkspaceAdapter.extract(&sample());
        assert_eq!(
            row.get("CPU Limit"),
            Some(&AttributeValue::Scalar(Scalar::Float(16.0)))
        );
        assert_eq!(
            row.get("Memory Limit"),
            Some(&AttributeValue::Scalar(Scalar::Int(64_i128 << 30)))
        );
        assert_eq!(
            row.get("GPU Requests"),
            Some(&AttributeValue::Scalar(Scalar::Float(4.0)))
        );
    }

    #[test]
    fn user_count_defaults_to_zero() {
        let row = WorkspaceAdapter.extract(&sample());
        assert_eq!(row.get("Users"), Some(&AttributeValue::Number(2.0)));

        let row = WorkspaceAdapter.extract(&json!({}));
        assert_eq!(row.get("Users"), Some(&AttributeValue::Number(0.0)));
    }

    #[test]
    fn namespace_reads_from_spec_not_metadata() {
        let row = WorkspaceAdapter.extract(&sample());
        assert_eq!(row.text("Namespace"), Some("team-a-ns"));
    }

    #[test]
    fn magnitude_columns_select_the_binary_family() {
        let bindings = WorkspaceAdapter.column_bindings(
            &ApiResource::new("Workspace", "workspaces", "tenant.example.io", "v1alpha1"),
            &LinkContext::default(),
        );
        let row = WorkspaceAdapter.extract(&sample());
        for attribute in [
            "CPU Limit",
            "CPU Requests",
            "Memory Limit",
            "Memory Requests",
            "GPU Requests",
        ] {
            let binding = bindings.iter().find(|b| b.attribute == attribute).unwrap();
            assert_eq!(
                binding.materialize(&row),
                CellMetadata::NumberPrefix {
                    family: PrefixFamily::Binary,
                }
            );
        }
    }

    #[test]
    fn user_column_materializes_drill_down_items() {
        let bindings = WorkspaceAdapter.column_bindings(
            &ApiResource::new("Workspace", "workspaces", "tenant.example.io", "v1alpha1"),
            &LinkContext::default(),
        );
        let row = WorkspaceAdapter.extract(&sample());

        let users = bindings.iter().find(|b| b.attribute == "Users").unwrap();
        let CellMetadata::Items(items) = users.materialize(&row) else {
            panic!("users column should carry items");
        };
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title.as_deref(), Some("ada"));
        assert_eq!(items[0].description.as_deref(), Some("ada@example.io"));
        assert_eq!(items[0].actions.as_deref(), Some("admin"));
    }

    #[test]
    fn name_link_is_cluster_scoped() {
        let bindings = WorkspaceAdapter.column_bindings(
            &ApiResource::new("Workspace", "workspaces", "tenant.example.io", "v1alpha1"),
            &LinkContext {
                cluster: "prod".to_string(),
                namespace: Some("ignored".to_string()),
            },
        );
        let row = WorkspaceAdapter.extract(&sample());

        let name = bindings.iter().find(|b| b.attribute == "Name").unwrap();
        assert_eq!(
            name.materialize(&row),
            CellMetadata::Link {
                hyperlink:
                    "/(auth)/prod/Workspace/workspaces?group=tenant.example.io&version=v1alpha1&name=team-a"
                        .to_string(),
            }
        );
    }
}
