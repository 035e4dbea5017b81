use serde_json::Value;

/// Decode a serialized list cell into its items.
///
/// Tries strict JSON first, then retries with single quotes swapped for
/// double quotes to cover Python-exported literals like `['flour', 'egg']`.
/// Returns `None` when the text is not list-shaped at all.
pub fn parse_list_literal(text: &str) -> Option<Vec<Value>> {
    let trimmed = text.trim();
    if !trimmed.starts_with('[') || !trimmed.ends_with(']') {
        return None;
    }
    if let Some(items) = parse_json_array(trimmed) {
        return Some(items);
    }
    parse_json_array(&trimmed.replace('\'', "\""))
}

fn parse_json_array(text: &str) -> Option<Vec<Value>> {
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Array(items)) => Some(items),
        _ => None,
    }
}

/// The string form of a list item: object `name` fields win, bare strings
/// pass through, anything else keeps its JSON rendering.
pub fn item_text(item: &Value) -> String {
    match item {
        Value::Object(map) => match map.get("name").and_then(Value::as_str) {
            Some(name) => name.to_string(),
            None => item.to_string(),
        },
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
