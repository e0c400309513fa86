use std::fmt::{Debug, Formatter};

use serde_json::Value;

use crate::registry::AttributeMapping;
use crate::schema::{DataSchema, UiSchema};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResource {
    pub kind: String,
    pub resource: String,
    pub group: String,
    pub version: String,
}

impl ApiResource {
    pub fn new(kind: &str, resource: &str, group: &str, version: &str) -> Self {
        Self {
            kind: kind.to_string(),
            resource: resource.to_string(),
            group: group.to_string(),
            version: version.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkContext {
    pub cluster: String,
    pub namespace: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefixFamily {
    Decimal,
    Binary,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ObjectItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub actions: Option<String>,
    pub raw: Option<Value>,
}

// The per-row payload handed to the rendering layer, discriminated by the
// column's presentation tag. Ratio columns carry the original quantity
// strings so the renderer can show them in their source units.
#[derive(Debug, Clone, PartialEq)]
pub enum CellMetadata {
    None,
    Link {
        hyperlink: String,
    },
    Items(Vec<ObjectItem>),
    Ratio {
        numerator: Option<String>,
        denominator: Option<String>,
    },
    NumberPrefix {
        family: PrefixFamily,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderBinding {
    pub title: &'static str,
    pub data_schema: DataSchema,
}

type MetadataBuilder = Box<dyn Fn(&AttributeMapping) -> CellMetadata + Send + Sync>;

pub struct ColumnBinding {
    pub attribute: &'static str,
    pub data_schema: DataSchema,
    pub ui_schema: UiSchema,
    metadata: MetadataBuilder,
}

impl ColumnBinding {
    pub fn plain(attribute: &'static str, data_schema: DataSchema, ui_schema: UiSchema) -> Self {
        Self {
            attribute,
            data_schema,
            ui_schema,
            metadata: Box::new(|_| CellMetadata::None),
        }
    }

    pub fn with_metadata(
        attribute: &'static str,
        data_schema: DataSchema,
        ui_schema: UiSchema,
        metadata: impl Fn(&AttributeMapping) -> CellMetadata + Send + Sync + 'static,
    ) -> Self {
        Self {
            attribute,
            data_schema,
            ui_schema,
            metadata: Box::new(metadata),
        }
    }

    pub fn header(&self) -> HeaderBinding {
        HeaderBinding {
            title: self.attribute,
            data_schema: self.data_schema,
        }
    }

    pub fn materialize(&self, row: &AttributeMapping) -> CellMetadata {
        (self.metadata)(row)
    }
}

impl Debug for ColumnBinding {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColumnBinding")
            .field("attribute", &self.attribute)
            .field("data_schema", &self.data_schema)
            .field("ui_schema", &self.ui_schema)
            .finish_non_exhaustive()
    }
}

// Link composition is shared with the rest of the system and must stay
// byte-for-byte stable.
pub fn resource_link(link: &LinkContext, resource: &ApiResource, name: &str) -> String {
    format!(
        "/(auth)/{}/{}/{}?group={}&version={}&name={}&namespace={}",
        link.cluster,
        resource.kind,
        resource.resource,
        resource.group,
        resource.version,
        name,
        link.namespace.as_deref().unwrap_or_default()
    )
}

pub fn cluster_scoped_link(link: &LinkContext, resource: &ApiResource, name: &str) -> String {
    format!(
        "/(auth)/{}/{}/{}?group={}&version={}&name={}",
        link.cluster, resource.kind, resource.resource, resource.group, resource.version, name
    )
}

pub fn namespace_link(link: &LinkContext, namespace: &str) -> String {
    format!(
        "/(auth)/{}/Namespace/namespaces?group=&version=v1&name={}",
        link.cluster, namespace
    )
}
