//! Camel catalog record types
//!
//! Every field is optional: the upstream feeds are loosely structured and a
//! missing field must never make a lookup fail. A field of the wrong type
//! reads as absent instead of rejecting the record. Unknown component fields
//! are kept in `extra` so a re-serialized cache file loses nothing.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;

/// Annotation key for the kamelet support level
pub const ANNOTATION_SUPPORT_LEVEL: &str = "camel.apache.org/kamelet.support.level";
/// Annotation key for the catalog version
pub const ANNOTATION_CATALOG_VERSION: &str = "camel.apache.org/catalog.version";
/// Annotation key for the kamelet icon
pub const ANNOTATION_ICON: &str = "camel.apache.org/kamelet.icon";
/// Annotation key for the provider
pub const ANNOTATION_PROVIDER: &str = "camel.apache.org/provider";
/// Annotation key for the kamelet group
pub const ANNOTATION_GROUP: &str = "camel.apache.org/kamelet.group";
/// Annotation key for the kamelet namespace
pub const ANNOTATION_NAMESPACE: &str = "camel.apache.org/kamelet.namespace";
/// Label key for the kamelet type (source, sink, action)
pub const LABEL_KAMELET_TYPE: &str = "camel.apache.org/kamelet.type";

/// Ordered property map, keyed by property name. Values are kept raw so a
/// malformed entry survives a cache round trip; read them through
/// [`Property::from_value`].
pub type PropertyMap = IndexMap<String, Value>;

/// One connector type from components.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Component {
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub first_version: Option<String>,

    /// Comma separated category labels
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub java_type: Option<String>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub support_level: Option<String>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<String>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// URI scheme (e.g. "kafka")
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub extends_scheme: Option<String>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub syntax: Option<String>,

    #[serde(rename = "async", default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub is_async: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub api: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub consumer_only: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub producer_only: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub lenient_properties: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub remote: Option<bool>,

    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "IndexMap::is_empty")]
    pub component_properties: PropertyMap,

    /// Endpoint properties
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "IndexMap::is_empty")]
    pub properties: PropertyMap,

    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "IndexMap::is_empty")]
    pub headers: PropertyMap,

    /// The wrapper entry's `properties`, renamed so they cannot collide with
    /// the endpoint `properties`
    #[serde(default, deserialize_with = "lenient::object", skip_serializing_if = "IndexMap::is_empty")]
    pub additional_properties: PropertyMap,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Component {
    /// Convenience constructor, mostly for tests
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn is_deprecated(&self) -> bool {
        self.deprecated.unwrap_or(false)
    }
}

/// One configurable option of a component, endpoint, header or SPI bean
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,

    #[serde(rename = "type", default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub java_type: Option<String>,

    #[serde(rename = "enum", default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub enum_values: Option<Vec<Value>>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub deprecated: Option<bool>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub secret: Option<bool>,

    /// Usually a string, but the catalog also carries booleans and numbers
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

impl Property {
    /// Typed view of a raw property map entry; non-object entries read as
    /// a property with every field absent
    pub fn from_value(value: &Value) -> Self {
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}

/// SPI bean properties share the component property shape
pub type SpiBeanProperty = Property;

/// Auxiliary extension-point metadata from spiBeans.json
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpiBean {
    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "type", default, deserialize_with = "lenient::option", skip_serializing_if = "Option::is_none")]
    pub type_name: Option<String>,

    #[serde(default, deserialize_with = "lenient::map", skip_serializing_if = "IndexMap::is_empty")]
    pub properties: IndexMap<String, SpiBeanProperty>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// One reusable route template from kamelets.yaml
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kamelet {
    #[serde(default, deserialize_with = "lenient::option")]
    pub api_version: Option<String>,

    #[serde(default, deserialize_with = "lenient::option")]
    pub kind: Option<String>,

    #[serde(default, deserialize_with = "lenient::option")]
    pub metadata: Option<KameletMetadata>,

    #[serde(default, deserialize_with = "lenient::option")]
    pub spec: Option<KameletSpec>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KameletMetadata {
    #[serde(default, deserialize_with = "lenient::option")]
    pub name: Option<String>,

    /// Free-form annotations; values are usually strings
    #[serde(default, deserialize_with = "lenient::object")]
    pub annotations: IndexMap<String, Value>,

    #[serde(default, deserialize_with = "lenient::object")]
    pub labels: IndexMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KameletSpec {
    #[serde(default, deserialize_with = "lenient::option")]
    pub definition: Option<KameletDefinition>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub dependencies: Vec<String>,

    /// Route template, carried but never interpreted
    #[serde(default)]
    pub template: Option<serde_yaml::Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KameletDefinition {
    #[serde(default, deserialize_with = "lenient::option")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient::option")]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "lenient::or_default")]
    pub required: Vec<String>,

    #[serde(default, deserialize_with = "lenient::map")]
    pub properties: IndexMap<String, KameletProperty>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KameletProperty {
    #[serde(default, deserialize_with = "lenient::option")]
    pub title: Option<String>,

    #[serde(default, deserialize_with = "lenient::option")]
    pub description: Option<String>,

    #[serde(rename = "type", default, deserialize_with = "lenient::option")]
    pub type_name: Option<String>,

    /// Explicit `null` is kept as `Some(Value::Null)`
    #[serde(default, deserialize_with = "lenient::present")]
    pub default: Option<Value>,

    #[serde(default, deserialize_with = "lenient::present")]
    pub example: Option<Value>,

    #[serde(default, deserialize_with = "lenient::option")]
    pub format: Option<String>,

    #[serde(rename = "enum", default, deserialize_with = "lenient::option")]
    pub enum_values: Option<Vec<Value>>,

    #[serde(rename = "x-descriptors", default, deserialize_with = "lenient::option")]
    pub x_descriptors: Option<Vec<String>>,
}

impl Kamelet {
    /// `metadata.name`, if present
    pub fn name(&self) -> Option<&str> {
        self.metadata.as_ref()?.name.as_deref()
    }

    /// `spec.definition`, if present
    pub fn definition(&self) -> Option<&KameletDefinition> {
        self.spec.as_ref()?.definition.as_ref()
    }

    /// Annotation value rendered as text
    pub fn annotation(&self, key: &str) -> Option<String> {
        self.metadata
            .as_ref()
            .and_then(|m| m.annotations.get(key))
            .and_then(value_text)
    }

    /// Label value rendered as text
    pub fn label(&self, key: &str) -> Option<String> {
        self.metadata
            .as_ref()
            .and_then(|m| m.labels.get(key))
            .and_then(value_text)
    }

    pub fn dependencies(&self) -> &[String] {
        self.spec
            .as_ref()
            .map(|s| s.dependencies.as_slice())
            .unwrap_or(&[])
    }
}

/// Render a scalar as plain text: strings unquoted, other scalars in their
/// JSON form. Null and the empty string count as absent.
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
