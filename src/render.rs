use chrono::DateTime;
use serde_json::Value;

use crate::columns::{CellMetadata, PrefixFamily};
use crate::quantity::{Scalar, format_with_binary_prefix, format_with_decimal_prefix, relative_time};
use crate::registry::AttributeValue;
use crate::schema::UiSchema;

const PLACEHOLDER: &str = "-";
const CELL_WIDTH: usize = 48;

// The rendering collaborator. Dispatch is total over the presentation tags:
// adding a tag without handling it here is a compile error.
pub fn render_cell(
    ui_schema: UiSchema,
    value: Option<&AttributeValue>,
    metadata: &CellMetadata,
    now_ms: i64,
) -> String {
    let cell = match ui_schema {
        UiSchema::Boolean => match value {
            Some(AttributeValue::Bool(value)) => value.to_string(),
            _ => PLACEHOLDER.to_string(),
        },
        UiSchema::Number => match value {
            Some(AttributeValue::Number(value)) => format_number(*value),
            Some(AttributeValue::Scalar(scalar)) => format_number(scalar.as_f64()),
            _ => PLACEHOLDER.to_string(),
        },
        UiSchema::NumberWithPrefix => render_prefixed(value, metadata),
        UiSchema::Time => render_time(value, now_ms),
        UiSchema::Text => match value {
            Some(AttributeValue::Text(value)) => value.clone(),
            _ => PLACEHOLDER.to_string(),
        },
        UiSchema::Array | UiSchema::ArrayOfEnumeration => match value {
            Some(AttributeValue::Raw(value)) => compact(value),
            _ => PLACEHOLDER.to_string(),
        },
        UiSchema::ArrayOfObject => render_items(value, metadata),
        UiSchema::Object | UiSchema::ObjectOfKeyValue => match value {
            Some(AttributeValue::Raw(value)) => compact(value),
            _ => PLACEHOLDER.to_string(),
        },
        UiSchema::Link => render_link(value, metadata),
        UiSchema::Ratio => render_ratio(value, metadata),
        UiSchema::Undefined => match value {
            Some(AttributeValue::Text(value)) => value.clone(),
            Some(AttributeValue::Number(value)) => format_number(*value),
            Some(AttributeValue::Bool(value)) => value.to_string(),
            _ => PLACEHOLDER.to_string(),
        },
    };
    truncate(&cell, CELL_WIDTH)
}

fn render_prefixed(value: Option<&AttributeValue>, metadata: &CellMetadata) -> String {
    let Some(AttributeValue::Scalar(scalar)) = value else {
        return PLACEHOLDER.to_string();
    };
    let family = match metadata {
        CellMetadata::NumberPrefix { family } => *family,
        _ => PrefixFamily::Decimal,
    };
    match scalar {
        Scalar::Int(value) => {
            let scaled = match family {
                PrefixFamily::Decimal => format_with_decimal_prefix(*value),
                PrefixFamily::Binary => format_with_binary_prefix(*value),
            };
            format!("{}{}", format_number(scaled.value), scaled.unit)
        }
        // Sub-unit scalars carry no prefix.
        Scalar::Float(value) => format_number(*value),
    }
}

fn render_time(value: Option<&AttributeValue>, now_ms: i64) -> String {
    let Some(AttributeValue::Text(timestamp)) = value else {
        return PLACEHOLDER.to_string();
    };
    let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) else {
        return timestamp.clone();
    };
    let bucket = relative_time(now_ms, parsed.timestamp_millis());
    let plural = if bucket.value == 1 { "" } else { "s" };
    format!("{} {}{} ago", bucket.value, bucket.unit.label(), plural)
}

fn render_items(value: Option<&AttributeValue>, metadata: &CellMetadata) -> String {
    let count = match value {
        Some(AttributeValue::Number(value)) => format_number(*value),
        _ => PLACEHOLDER.to_string(),
    };
    let CellMetadata::Items(items) = metadata else {
        return count;
    };
    if items.is_empty() {
        return count;
    }
    let titles = items
        .iter()
        .filter_map(|item| item.title.as_deref())
        .collect::<Vec<_>>()
        .join(", ");
    format!("{count} [{titles}]")
}

fn render_link(value: Option<&AttributeValue>, metadata: &CellMetadata) -> String {
    let text = match value {
        Some(AttributeValue::Text(value)) => value.clone(),
        _ => PLACEHOLDER.to_string(),
    };
    match metadata {
        CellMetadata::Link { hyperlink } => format!("{text} ({hyperlink})"),
        _ => text,
    }
}

fn render_ratio(value: Option<&AttributeValue>, metadata: &CellMetadata) -> String {
    let Some(AttributeValue::Number(ratio)) = value else {
        return PLACEHOLDER.to_string();
    };
    let percent = format!("{:.0}%", ratio * 100.0);
    match metadata {
        CellMetadata::Ratio {
            numerator: Some(numerator),
            denominator: Some(denominator),
        } => format!("{numerator}/{denominator} ({percent})"),
        _ => percent,
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.2}")
    }
}

fn compact(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| PLACEHOLDER.to_string())
}

fn truncate(value: &str, max: usize) -> String {
    if value.chars().count() <= max {
        return value.to_string();
    }

    let mut out = value
        .chars()
        .take(max.saturating_sub(1))
        .collect::<String>();
    out.push('…');
    out
}
