//! Markdown rendering of components and kamelets
//!
//! Output is deterministic: sections and lines always appear in the same
//! order, and a line is left out when its backing field is absent.

use super::types::{
    value_text, Component, Kamelet, Property, PropertyMap, ANNOTATION_GROUP, ANNOTATION_PROVIDER,
    ANNOTATION_SUPPORT_LEVEL, LABEL_KAMELET_TYPE,
};
use serde_json::Value;

/// Render full component details
pub fn format_component_details(component: &Component) -> String {
    let heading = component
        .title
        .as_deref()
        .or(component.name.as_deref())
        .unwrap_or("Unnamed component");
    let mut out = format!("# {}\n\n", heading);

    if component.is_deprecated() {
        out.push_str("> **DEPRECATED**\n\n");
    }

    if let Some(description) = &component.description {
        out.push_str(&format!("{}\n\n", description));
    }

    if let Some(scheme) = &component.scheme {
        out.push_str(&format!("- **Scheme**: {}\n", scheme));
    }

    if let (Some(group), Some(artifact), Some(version)) = (
        &component.group_id,
        &component.artifact_id,
        &component.version,
    ) {
        out.push_str(&format!("- **Maven**: {}:{}:{}\n", group, artifact, version));
    }

    if let Some(level) = &component.support_level {
        out.push_str(&format!("- **Support Level**: {}\n", level));
    }

    if component.consumer_only.unwrap_or(false) {
        out.push_str("- **Consumer Only**: Yes\n");
    }

    if component.producer_only.unwrap_or(false) {
        out.push_str("- **Producer Only**: Yes\n");
    }

    let sections: [(&str, &PropertyMap); 4] = [
        ("Component Properties", &component.component_properties),
        ("Endpoint Properties", &component.properties),
        ("Headers", &component.headers),
        ("Additional Properties", &component.additional_properties),
    ];

    for (title, properties) in sections {
        if !properties.is_empty() {
            push_property_section(&mut out, title, properties);
        }
    }

    out
}

fn push_property_section(out: &mut String, title: &str, properties: &PropertyMap) {
    out.push_str(&format!("\n## {}\n\n", title));

    for (key, raw) in properties {
        let prop = Property::from_value(raw);
        let heading = prop
            .display_name
            .as_deref()
            .or(prop.name.as_deref())
            .unwrap_or(key);
        out.push_str(&format!("### {} ({})\n", heading, key));

        if let Some(description) = prop.description.as_deref().filter(|d| !d.is_empty()) {
            out.push_str(&format!("{}\n\n", description));
        }

        out.push_str(&format!("- **Name**: {}\n", key));
        out.push_str(&format!(
            "- **Type**: {}\n",
            prop.type_name.as_deref().unwrap_or("unknown")
        ));
        out.push_str(&format!(
            "- **Required**: {}\n",
            yes_no(prop.required.unwrap_or(false))
        ));

        if let Some(default) = prop.default_value.as_ref().and_then(value_text) {
            out.push_str(&format!("- **Default**: {}\n", default));
        }

        if let Some(values) = possible_values(prop.enum_values.as_deref()) {
            out.push_str(&format!("- **Possible Values**: {}\n", values));
        }

        out.push('\n');
    }
}

/// Render full kamelet details
pub fn format_kamelet_details(kamelet: &Kamelet) -> String {
    let definition = kamelet.definition();

    let heading = definition
        .and_then(|d| d.title.as_deref())
        .or(kamelet.name())
        .unwrap_or("Unnamed kamelet");
    let mut out = format!("# {}\n\n", heading);

    if let Some(description) = definition.and_then(|d| d.description.as_deref()) {
        out.push_str(&format!("{}\n\n", description));
    }

    let header_lines = [
        ("Type", kamelet.label(LABEL_KAMELET_TYPE)),
        ("Group", kamelet.annotation(ANNOTATION_GROUP)),
        ("Support Level", kamelet.annotation(ANNOTATION_SUPPORT_LEVEL)),
        ("Provider", kamelet.annotation(ANNOTATION_PROVIDER)),
    ];
    for (label, value) in header_lines {
        if let Some(value) = value {
            out.push_str(&format!("- **{}**: {}\n", label, value));
        }
    }

    if let Some(definition) = definition.filter(|d| !d.properties.is_empty()) {
        out.push_str("\n## Properties\n\n");

        for (key, prop) in &definition.properties {
            out.push_str(&format!(
                "### {} ({})\n",
                prop.title.as_deref().unwrap_or(key),
                key
            ));

            if let Some(description) = &prop.description {
                out.push_str(&format!("{}\n\n", description));
            }

            out.push_str(&format!("- **Name**: {}\n", key));
            out.push_str(&format!(
                "- **Type**: {}\n",
                prop.type_name.as_deref().unwrap_or("unknown")
            ));
            out.push_str(&format!(
                "- **Required**: {}\n",
                yes_no(definition.required.iter().any(|r| r == key))
            ));

            if let Some(default) = &prop.default {
                out.push_str(&format!("- **Default**: {}\n", json_literal(default)));
            }

            if let Some(example) = &prop.example {
                out.push_str(&format!("- **Example**: {}\n", json_literal(example)));
            }

            if let Some(values) = possible_values(prop.enum_values.as_deref()) {
                out.push_str(&format!("- **Possible Values**: {}\n", values));
            }

            out.push('\n');
        }
    }

    let dependencies = kamelet.dependencies();
    if !dependencies.is_empty() {
        out.push_str("\n## Dependencies\n\n");
        for dependency in dependencies {
            out.push_str(&format!("- {}\n", dependency));
        }
    }

    out
}

/// One-line search result entry for a component
pub fn component_summary(component: &Component) -> String {
    format!(
        "- **{}**: {}",
        component.name.as_deref().unwrap_or("unnamed"),
        component
            .description
            .as_deref()
            .map(first_sentence)
            .unwrap_or_else(|| "No description available.".to_string())
    )
}

/// One-line search result entry for a kamelet
pub fn kamelet_summary(kamelet: &Kamelet) -> String {
    let description = kamelet.definition().and_then(|d| d.description.as_deref());

    match (kamelet.name(), description) {
        (Some(name), Some(description)) if !name.is_empty() && !description.is_empty() => {
            format!("- **{}**: {}", name, first_sentence(description))
        }
        _ => "- **Unknown kamelet**: No description available.".to_string(),
    }
}

/// Text up to the first period, terminated with a period
fn first_sentence(text: &str) -> String {
    let head = text.split('.').next().unwrap_or_default();
    format!("{}.", head)
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

fn json_literal(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}

fn possible_values(values: Option<&[Value]>) -> Option<String> {
    let values = values.filter(|v| !v.is_empty())?;
    Some(
        values
            .iter()
            .map(|v| value_text(v).unwrap_or_default())
            .collect::<Vec<_>>()
            .join(", "),
    )
}
