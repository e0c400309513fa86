use std::collections::BTreeMap;

use serde_json::Value;

use crate::columns::{ApiResource, CellMetadata, ColumnBinding, LinkContext, resource_link};
use crate::object::lookup_str;
use crate::quantity::{ratio, scalar_at};
use crate::registry::{AttributeMapping, AttributeValue, KindAdapter};
use crate::schema::{DataSchema, UiSchema};

pub struct ResourceQuotaAdapter;

const ATTRIBUTES: [&str; 8] = [
    "Name",
    "Namespace",
    "CPU Limit",
    "Memory Limit",
    "CPU Request",
    "GPU Request",
    "Memory Request",
    "raw",
];

const GPU_KEY: &str = "requests.nvidia.com/gpu";

fn usage_ratio(object: &Value, key: &str) -> Option<f64> {
    ratio(
        scalar_at(object, &["status", "used", key]),
        scalar_at(object, &["status", "hard", key]),
    )
}

fn ratio_metadata(row: &AttributeMapping, key: &'static str) -> CellMetadata {
    let used = row
        .raw()
        .and_then(|raw| lookup_str(raw, &["status", "used", key]))
        .map(str::to_string);
    let hard = row
        .raw()
        .and_then(|raw| lookup_str(raw, &["status", "hard", key]))
        .map(str::to_string);
    CellMetadata::Ratio {
        numerator: used,
        denominator: hard,
    }
}

fn ratio_binding(attribute: &'static str, key: &'static str) -> ColumnBinding {
    ColumnBinding::with_metadata(attribute, DataSchema::Number, UiSchema::Ratio, move |row| {
        ratio_metadata(row, key)
    })
}

impl KindAdapter for ResourceQuotaAdapter {
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
            "CPU Limit",
            AttributeValue::number(usage_ratio(object, "limits.cpu")),
        );
        row.insert(
            "Memory Limit",
            AttributeValue::number(usage_ratio(object, "limits.memory")),
        );
        row.insert(
            "CPU Request",
            AttributeValue::number(usage_ratio(object, "requests.cpu")),
        );
        row.insert(
            "GPU Request",
            AttributeValue::number(usage_ratio(object, GPU_KEY)),
        );
        row.insert(
            "Memory Request",
            AttributeValue::number(usage_ratio(object, "requests.memory")),
        );
        row.retain_raw(object);
        row
    }

    fn data_schemas(&self) -> BTreeMap<&'static str, DataSchema> {
        BTreeMap::from([
            ("Name", DataSchema::Text),
            ("Namespace", DataSchema::Text),
            ("CPU Limit", DataSchema::Number),
            ("Memory Limit", DataSchema::Number),
            ("CPU Request", DataSchema::Number),
            ("GPU Request", DataSchema::Number),
            ("Memory Request", DataSchema::Number),
            ("raw", DataSchema::Object),
        ])
    }

    fn ui_schemas(&self) -> BTreeMap<&'static str, UiSchema> {
        BTreeMap::from([
            ("Name", UiSchema::Link),
            ("Namespace", UiSchema::Text),
            ("CPU Limit", UiSchema::Ratio),
            ("Memory Limit", UiSchema::Ratio),
            ("CPU Request", UiSchema::Ratio),
            ("GPU Request", UiSchema::Ratio),
            ("Memory Request", UiSchema::Ratio),
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
            ratio_binding("CPU Limit", "limits.cpu"),
            ratio_binding("CPU Request", "requests.cpu"),
            ratio_binding("Memory Limit", "limits.memory"),
            ratio_binding("Memory Request", "requests.memory"),
            ratio_binding("GPU Request", GPU_KEY),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::ResourceQuotaAdapter;
    use crate::columns::{ApiResource, CellMetadata, LinkContext};
    use crate::registry::{AttributeValue, KindAdapter};
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "metadata": {"name": "team-quota", "namespace": "ml"},
            "status": {
                "used": {
                    "limits.cpu": "2",
                    "limits.memory": "512Mi",
                    "requests.cpu": "1500m",
                    "requests.memory": "256Mi",
                    "requests.nvidia.com/gpu": "1"
                },
                "hard": {
                    "limits.cpu": "4",
                    "limits.memory": "1Gi",
                    "requests.cpu": "3",
                    "requests.memory": "1Gi",
                    "requests.nvidia.com/gpu": "2"
                }
            }
        })
    }

    #[test]
    fn computes_all_five_usage_ratios() {
        let row = ResourceQuotaAdapter.extract(&sample());
        assert_eq!(row.get("CPU Limit"), Some(&AttributeValue::Number(0.5)));
        assert_eq!(row.get("Memory Limit"), Some(&AttributeValue::Number(0.5)));
        assert_eq!(row.get("CPU Request"), Some(&AttributeValue::Number(0.5)));
        assert_eq!(row.get("Memory Request"), Some(&AttributeValue::Number(0.25)));
        assert_eq!(row.get("GPU Request"), Some(&AttributeValue::Number(0.5)));
    }

    #[test]
    fn missing_hard_limit_degrades_to_null() {
        let object = json!({
            "metadata": {"name": "partial"},
            "status": {"used": {"limits.cpu": "2"}}
        });
        let row = ResourceQuotaAdapter.extract(&object);
        assert!(row.get("CPU Limit").is_some_and(AttributeValue::is_null));
        assert!(row.get("GPU Request").is_some_and(AttributeValue::is_null));
    }

    #[test]
    fn malformed_quantity_degrades_one_cell() {
        let object = json!({
            "metadata": {"name": "broken"},
            "status": {
                "used": {"limits.cpu": "2Q", "limits.memory": "512Mi"},
                "hard": {"limits.cpu": "4", "limits.memory": "1Gi"}
            }
        });
        let row = ResourceQuotaAdapter.extract(&object);
        assert!(row.get("CPU Limit").is_some_and(AttributeValue::is_null));
        assert_eq!(row.get("Memory Limit"), Some(&AttributeValue::Number(0.5)));
    }

    #[test]
    fn ratio_columns_carry_the_original_quantity_strings() {
        let bindings = ResourceQuotaAdapter.column_bindings(
            &ApiResource::new("ResourceQuota", "resourcequotas", "", "v1"),
            &LinkContext::default(),
        );
        let row = ResourceQuotaAdapter.extract(&sample());

        let memory = bindings
            .iter()
            .find(|b| b.attribute == "Memory Limit")
            .unwrap();
        assert_eq!(
            memory.materialize(&row),
            CellMetadata::Ratio {
                numerator: Some("512Mi".to_string()),
                denominator: Some("1Gi".to_string()),
            }
        );
    }

    #[test]
    fn column_order_matches_the_view() {
        let bindings = ResourceQuotaAdapter.column_bindings(
            &ApiResource::new("ResourceQuota", "resourcequotas", "", "v1"),
            &LinkContext::default(),
        );
        let order: Vec<_> = bindings.iter().map(|b| b.attribute).collect();
        assert_eq!(
            order,
            [
                "Name",
                "Namespace",
                "CPU Limit",
                "CPU Request",
                "Memory Limit",
                "Memory Request",
                "GPU Request",
            ]
        );
    }
}
