use serde_json::Value;

// One helper for every deep optional path the adapters walk: any missing or
// mismatched segment yields None, never a panic.
pub fn lookup<'a>(object: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = object;
    for segment in path {
        current = current.get(segment)?;
    }
    if current.is_null() { None } else { Some(current) }
}

pub fn lookup_str<'a>(object: &'a Value, path: &[&str]) -> Option<&'a str> {
    lookup(object, path).and_then(Value::as_str)
}

pub fn lookup_bool(object: &Value, path: &[&str]) -> Option<bool> {
    lookup(object, path).and_then(Value::as_bool)
}

pub fn lookup_f64(object: &Value, path: &[&str]) -> Option<f64> {
    lookup(object, path).and_then(Value::as_f64)
}

pub fn lookup_array<'a>(object: &'a Value, path: &[&str]) -> Option<&'a Vec<Value>> {
    lookup(object, path).and_then(Value::as_array)
}

pub fn pretty_json(raw: &str) -> String {
    match serde_json::from_str::<Value>(raw) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or_else(|_| raw.to_string()),
        Err(_) => raw.to_string(),
    }
}
