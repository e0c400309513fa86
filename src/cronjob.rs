use std::collections::{BTreeMap, HashSet};

use serde_json::{Value, json};

use crate::columns::{
    ApiResource, CellMetadata, ColumnBinding, LinkContext, ObjectItem, resource_link,
};
use crate::object::{lookup_array, lookup_bool, lookup_str};
use crate::registry::{AttributeMapping, AttributeValue, KindAdapter};
use crate::schema::{DataSchema, UiSchema};

pub struct CronJobAdapter;

const ATTRIBUTES: [&str; 11] = [
    "Name",
    "Namespace",
    "Schedule",
    "Time Zone",
    "Suspend",
    "Active",
    "Last Schedule",
    "Creation Timestamp",
    "Containers",
    "Images",
    "raw",
];

const CONTAINERS_PATH: [&str; 6] = ["spec", "jobTemplate", "spec", "template", "spec", "containers"];

fn container_images(object: &Value) -> Option<usize> {
    let containers = lookup_array(object, &CONTAINERS_PATH);
    // An absent container list counts zero distinct images while the
    // Containers attribute stays null.
    let distinct = containers
        .map(|containers| {
            containers
                .iter()
                .map(|container| container.get("image").and_then(Value::as_str))
                .collect::<HashSet<_>>()
                .len()
        })
        .unwrap_or(0);
    Some(distinct)
}

fn active_job_items(row: &AttributeMapping) -> Vec<ObjectItem> {
    let Some(raw) = row.raw() else {
        return Vec::new();
    };
    lookup_array(raw, &["status", "active"])
        .map(|jobs| {
            jobs.iter()
                .map(|job| ObjectItem {
                    title: lookup_str(job, &["name"]).map(str::to_string),
                    description: lookup_str(job, &["uid"]).map(str::to_string),
                    actions: lookup_str(job, &["resourceVersion"]).map(str::to_string),
                    raw: None,
                })
                .collect()
        })
        .unwrap_or_default()
}

fn container_items(row: &AttributeMapping) -> Vec<ObjectItem> {
    let Some(raw) = row.raw() else {
        return Vec::new();
    };
    lookup_array(raw, &CONTAINERS_PATH)
        .map(|containers| {
            containers
                .iter()
                .map(|container| ObjectItem {
                    title: lookup_str(container, &["name"]).map(str::to_string),
                    description: lookup_array(container, &["command"]).map(|command| {
                        command
                            .iter()
                            .filter_map(Value::as_str)
                            .collect::<Vec<_>>()
                            .join(" ")
                    }),
                    actions: lookup_str(container, &["image"]).map(str::to_string),
                    raw: Some(container.clone()),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn image_items(row: &AttributeMapping) -> Vec<ObjectItem> {
    let Some(raw) = row.raw() else {
        return Vec::new();
    };
    lookup_array(raw, &CONTAINERS_PATH)
        .map(|containers| {
            containers
                .iter()
                .map(|container| {
                    let image = lookup_str(container, &["image"]);
                    let name = lookup_str(container, &["name"]);
                    ObjectItem {
                        title: image.map(str::to_string),
                        description: name.map(str::to_string),
                        actions: None,
                        raw: Some(json!({
                            "image": image,
                            "imagePullPolicy": lookup_str(container, &["imagePullPolicy"]),
                            "container": name,
                        })),
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

impl KindAdapter for CronJobAdapter {
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
            "Schedule",
            AttributeValue::text(lookup_str(object, &["spec", "schedule"])),
        );
        row.insert(
            "Time Zone",
            AttributeValue::text(lookup_str(object, &["spec", "timeZone"])),
        );
        row.insert(
            "Suspend",
            AttributeValue::boolean(lookup_bool(object, &["spec", "suspend"])),
        );
        row.insert(
            "Active",
            AttributeValue::count(lookup_array(object, &["status", "active"]).map(Vec::len)),
        );
        row.insert(
            "Last Schedule",
            AttributeValue::text(lookup_str(object, &["status", "lastScheduleTime"])),
        );
        row.insert(
            "Creation Timestamp",
            AttributeValue::text(lookup_str(object, &["metadata", "creationTimestamp"])),
        );
        row.insert(
            "Containers",
            AttributeValue::count(lookup_array(object, &CONTAINERS_PATH).map(Vec::len)),
        );
        row.insert("Images", AttributeValue::count(container_images(object)));
        row.retain_raw(object);
        row
    }

    fn data_schemas(&self) -> BTreeMap<&'static str, DataSchema> {
        BTreeMap::from([
            ("Name", DataSchema::Text),
            ("Namespace", DataSchema::Text),
            ("Schedule", DataSchema::Text),
            ("Time Zone", DataSchema::Text),
            ("Suspend", DataSchema::Boolean),
            ("Active", DataSchema::Number),
            ("Last Schedule", DataSchema::Time),
            ("Creation Timestamp", DataSchema::Time),
            ("Containers", DataSchema::Number),
            ("Images", DataSchema::Number),
            ("raw", DataSchema::Object),
        ])
    }

    fn ui_schemas(&self) -> BTreeMap<&'static str, UiSchema> {
        BTreeMap::from([
            ("Name", UiSchema::Link),
            ("Namespace", UiSchema::Text),
            ("Schedule", UiSchema::Text),
            ("Time Zone", UiSchema::Text),
            ("Suspend", UiSchema::Boolean),
            ("Active", UiSchema::ArrayOfObject),
            ("Last Schedule", UiSchema::Time),
            ("Creation Timestamp", UiSchema::Time),
            ("Containers", UiSchema::ArrayOfObject),
            ("Images", UiSchema::ArrayOfObject),
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
            ColumnBinding::plain("Schedule", DataSchema::Text, UiSchema::Text),
            ColumnBinding::plain("Time Zone", DataSchema::Text, UiSchema::Text),
            ColumnBinding::plain("Suspend", DataSchema::Boolean, UiSchema::Boolean),
            ColumnBinding::with_metadata(
                "Active",
                DataSchema::Number,
                UiSchema::ArrayOfObject,
                |row| CellMetadata::Items(active_job_items(row)),
            ),
            ColumnBinding::plain("Last Schedule", DataSchema::Time, UiSchema::Time),
            ColumnBinding::plain("Creation Timestamp", DataSchema::Time, UiSchema::Time),
            ColumnBinding::with_metadata(
                "Containers",
                DataSchema::Number,
                UiSchema::ArrayOfObject,
                |row| CellMetadata::Items(container_items(row)),
            ),
            ColumnBinding::with_metadata(
                "Images",
                DataSchema::Number,
                UiSchema::ArrayOfObject,
                |row| CellMetadata::Items(image_items(row)),
            ),
        ]
    }
}
