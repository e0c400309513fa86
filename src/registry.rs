use std::collections::BTreeMap;

use serde_json::Value;

use crate::columns::{ApiResource, ColumnBinding, LinkContext};
use crate::cronjob::CronJobAdapter;
use crate::generic::GenericAdapter;
use crate::quantity::Scalar;
use crate::resource_quota::ResourceQuotaAdapter;
use crate::schema::{DataSchema, UiSchema};
use crate::simple_app::SimpleAppAdapter;
use crate::workspace::WorkspaceAdapter;

pub const RAW_ATTRIBUTE: &str = "raw";

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Number(f64),
    Scalar(Scalar),
    Text(String),
    Raw(Value),
}

impl AttributeValue {
    pub fn text(value: Option<&str>) -> Self {
        match value {
            Some(value) => Self::Text(value.to_string()),
            None => Self::Null,
        }
    }

    pub fn boolean(value: Option<bool>) -> Self {
        match value {
            Some(value) => Self::Bool(value),
            None => Self::Null,
        }
    }

    pub fn count(value: Option<usize>) -> Self {
        match value {
            Some(value) => Self::Number(value as f64),
            None => Self::Null,
        }
    }

    pub fn number(value: Option<f64>) -> Self {
        match value {
            Some(value) => Self::Number(value),
            None => Self::Null,
        }
    }

    pub fn scalar(value: Option<Scalar>) -> Self {
        match value {
            Some(value) => Self::Scalar(value),
            None => Self::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<Scalar> {
        match self {
            Self::Scalar(value) => Some(*value),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AttributeMapping {
    entries: BTreeMap<&'static str, AttributeValue>,
}

impl AttributeMapping {
    pub fn insert(&mut self, attribute: &'static str, value: AttributeValue) {
        self.entries.insert(attribute, value);
    }

    pub fn retain_raw(&mut self, object: &Value) {
        self.entries
            .insert(RAW_ATTRIBUTE, AttributeValue::Raw(object.clone()));
    }

    pub fn get(&self, attribute: &str) -> Option<&AttributeValue> {
        self.entries.get(attribute)
    }

    pub fn contains(&self, attribute: &str) -> bool {
        self.entries.contains_key(attribute)
    }

    pub fn text(&self, attribute: &str) -> Option<&str> {
        self.entries.get(attribute).and_then(AttributeValue::as_text)
    }

    pub fn raw(&self) -> Option<&Value> {
        match self.entries.get(RAW_ATTRIBUTE) {
            Some(AttributeValue::Raw(value)) => Some(value),
            _ => None,
        }
    }
}

pub trait KindAdapter: Send + Sync {
    fn attributes(&self) -> &'static [&'static str];
    fn extract(&self, object: &Value) -> AttributeMapping;
    fn data_schemas(&self) -> BTreeMap<&'static str, DataSchema>;
    fn ui_schemas(&self) -> BTreeMap<&'static str, UiSchema>;
    fn column_bindings(&self, resource: &ApiResource, link: &LinkContext) -> Vec<ColumnBinding>;
}

pub struct Registry {
    adapters: BTreeMap<&'static str, Box<dyn KindAdapter>>,
    fallback: Box<dyn KindAdapter>,
}

impl Registry {
    pub fn new() -> Self {
        let mut adapters: BTreeMap<&'static str, Box<dyn KindAdapter>> = BTreeMap::new();
        adapters.insert("CronJob", Box::new(CronJobAdapter));
        adapters.insert("ResourceQuota", Box::new(ResourceQuotaAdapter));
        adapters.insert("SimpleApp", Box::new(SimpleAppAdapter));
        adapters.insert("Workspace", Box::new(WorkspaceAdapter));

        Self {
            adapters,
            fallback: Box::new(GenericAdapter),
        }
    }

    pub fn adapter_for(&self, kind: &str) -> &dyn KindAdapter {
        self.adapters
            .get(kind)
            .map(|adapter| adapter.as_ref())
            .unwrap_or(self.fallback.as_ref())
    }

    pub fn column_bindings_for(
        &self,
        kind: &str,
        resource: &ApiResource,
        link: &LinkContext,
    ) -> Vec<ColumnBinding> {
        self.adapter_for(kind).column_bindings(resource, link)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{AttributeValue, Registry};
    use crate::columns::{ApiResource, LinkContext};
    use serde_json::json;

    fn context() -> (ApiResource, LinkContext) {
        (
            ApiResource::new("Anything", "anythings", "example.io", "v1"),
            LinkContext {
                cluster: "test".to_string(),
                namespace: None,
            },
        )
    }

    #[test]
    fn known_kinds_resolve_to_their_own_adapter() {
        let registry = Registry::new();
        assert_eq!(registry.adapter_for("CronJob").attributes().len(), 11);
        assert_eq!(registry.adapter_for("ResourceQuota").attributes().len(), 8);
        assert_eq!(registry.adapter_for("SimpleApp").attributes().len(), 9);
        assert_eq!(registry.adapter_for("Workspace").attributes().len(), 10);
    }

    #[test]
    fn unknown_kind_falls_back_to_the_generic_adapter() {
        let registry = Registry::new();
        let (resource, link) = context();

        let bindings = registry.column_bindings_for("FluxCapacitor", &resource, &link);
        let generic = registry.adapter_for("no-such-kind");
        assert_eq!(bindings.len(), generic.attributes().len() - 1);
    }

    #[test]
    fn every_adapter_is_total_over_an_empty_object() {
        let registry = Registry::new();
        for kind in ["CronJob", "ResourceQuota", "SimpleApp", "Workspace", "Other"] {
            let adapter = registry.adapter_for(kind);
            let row = adapter.extract(&json!({}));
            for attribute in adapter.attributes() {
                assert!(row.contains(attribute), "{kind} missing {attribute}");
            }
        }
    }

    #[test]
    fn schema_maps_cover_every_attribute() {
        let registry = Registry::new();
        for kind in ["CronJob", "ResourceQuota", "SimpleApp", "Workspace", "Other"] {
            let adapter = registry.adapter_for(kind);
            let data = adapter.data_schemas();
            let ui = adapter.ui_schemas();
            for attribute in adapter.attributes() {
                assert!(data.contains_key(attribute), "{kind} data schema missing {attribute}");
                assert!(ui.contains_key(attribute), "{kind} ui schema missing {attribute}");
            }
        }
    }

    #[test]
    fn attribute_value_accessors() {
        assert!(AttributeValue::text(None).is_null());
        assert_eq!(
            AttributeValue::text(Some("api")).as_text(),
            Some("api")
        );
        assert_eq!(AttributeValue::count(Some(3)), AttributeValue::Number(3.0));
    }
}
