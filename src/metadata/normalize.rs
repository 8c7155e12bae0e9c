//! Component payload normalization
//!
//! The components feed has shipped in several shapes over time. Each shape
//! is a [`ComponentLayout`]; layouts are tried in [`ComponentLayout::ORDER`]
//! and the first whose predicate matches extracts the records.

use super::types::Component;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Known shapes of a components document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentLayout {
    /// `[{component: {...}, headers: {...}, properties: {...}}, ...]`
    WrappedEntries,
    /// `[{name: ...}, ...]`
    PlainList,
    /// `{components: [...]}`
    ComponentsField,
    /// `{componentScheme: [...]}`
    ComponentSchemeField,
    /// `{anything: {name: ...}, ...}`
    NamedValues,
}

impl ComponentLayout {
    /// Evaluation order; each layout is a fallback for the previous one
    pub const ORDER: [ComponentLayout; 5] = [
        ComponentLayout::WrappedEntries,
        ComponentLayout::PlainList,
        ComponentLayout::ComponentsField,
        ComponentLayout::ComponentSchemeField,
        ComponentLayout::NamedValues,
    ];

    /// First layout matching the document, if any
    pub fn detect(doc: &Value) -> Option<Self> {
        Self::ORDER.into_iter().find(|layout| layout.matches(doc))
    }

    /// Whether this layout recognizes the document
    pub fn matches(&self, doc: &Value) -> bool {
        match self {
            ComponentLayout::WrappedEntries => doc
                .as_array()
                .and_then(|items| items.first())
                .and_then(|first| first.get("component"))
                .is_some_and(is_present),
            ComponentLayout::PlainList => doc.is_array(),
            ComponentLayout::ComponentsField => {
                doc.get("components").is_some_and(Value::is_array)
            }
            ComponentLayout::ComponentSchemeField => {
                doc.get("componentScheme").is_some_and(Value::is_array)
            }
            ComponentLayout::NamedValues => doc
                .as_object()
                .is_some_and(|map| map.values().any(has_name)),
        }
    }

    /// Pull the raw component records out of a matching document
    pub fn extract(&self, doc: &Value) -> Vec<Value> {
        match self {
            ComponentLayout::WrappedEntries => doc
                .as_array()
                .map(|items| items.iter().filter_map(unwrap_entry).collect())
                .unwrap_or_default(),
            ComponentLayout::PlainList => doc.as_array().cloned().unwrap_or_default(),
            ComponentLayout::ComponentsField => array_field(doc, "components"),
            ComponentLayout::ComponentSchemeField => array_field(doc, "componentScheme"),
            ComponentLayout::NamedValues => doc
                .as_object()
                .map(|map| map.values().filter(|v| has_name(v)).cloned().collect())
                .unwrap_or_default(),
        }
    }
}

/// Normalize a parsed components document into component records.
///
/// An unrecognized document yields an empty list, never an error. Records
/// that are not mappings, or whose fields have the wrong types, are dropped.
pub fn normalize_components(doc: &Value) -> Vec<Component> {
    let Some(layout) = ComponentLayout::detect(doc) else {
        let keys: Vec<&str> = doc
            .as_object()
            .map(|m| m.keys().map(String::as_str).collect())
            .unwrap_or_default();
        warn!("Could not find components in document (keys: {:?})", keys);
        return Vec::new();
    };

    debug!("Components document matched layout {:?}", layout);

    layout
        .extract(doc)
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|raw| match serde_json::from_value::<Component>(raw) {
            Ok(component) => Some(component),
            Err(e) => {
                debug!("Dropping malformed component record: {}", e);
                None
            }
        })
        .collect()
}

/// Parse a components body, decoding a JSON-encoded string payload once
pub fn parse_components_document(text: &str) -> serde_json::Result<Value> {
    let doc: Value = serde_json::from_str(text)?;
    match doc {
        Value::String(inner) => serde_json::from_str(&inner),
        other => Ok(other),
    }
}

/// Lift `entry.component`, attaching `headers` and renaming the entry's
/// `properties` to `additionalProperties`
fn unwrap_entry(entry: &Value) -> Option<Value> {
    let mut component: Map<String, Value> = entry.get("component")?.as_object()?.clone();

    if let Some(headers) = entry.get("headers").filter(|v| is_present(v)) {
        component.insert("headers".to_string(), headers.clone());
    }

    if let Some(properties) = entry.get("properties").filter(|v| is_present(v)) {
        component.insert("additionalProperties".to_string(), properties.clone());
    }

    Some(Value::Object(component))
}

fn array_field(doc: &Value, field: &str) -> Vec<Value> {
    doc.get(field)
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

fn has_name(value: &Value) -> bool {
    value.as_object().is_some_and(|m| m.contains_key("name"))
}

fn is_present(value: &Value) -> bool {
    !value.is_null()
}
