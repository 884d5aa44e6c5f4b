// src/utils.rs
use serde_json::Value;

/// Trimmed string form of a scalar value, `None` when missing or blank
pub fn sanitize_string(value: Option<&Value>) -> Option<String> {
    let text = match value? {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => other.to_string().trim().to_string(),
    };

    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Normalize a multi-select value into trimmed, non-empty strings.
///
/// Accepts a list of strings, a list of option objects (`value` then `label`)
/// or a comma separated string.
pub fn ensure_string_array(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.trim().to_string(),
                Value::Object(obj) => obj
                    .get("value")
                    .filter(|v| !v.is_null())
                    .or_else(|| obj.get("label").filter(|v| !v.is_null()))
                    .map(scalar_to_string)
                    .unwrap_or_default(),
                Value::Number(n) => n.to_string(),
                _ => String::new(),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn scalar_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.trim().to_string(),
        other => other.to_string().trim().to_string(),
    }
}

/// True for the values a form treats as "not filled in"
pub fn is_empty_value(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        _ => false,
    }
}

/// Text view of a scalar form value for pattern checks
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Last path segment of a URL, used as an attachment file name
pub fn file_name_from_url(url: &str) -> Option<String> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
}

/// `cv-<unix millis>`, the name given to attachments that arrive without one
pub fn fallback_cv_name() -> String {
    format!("cv-{}", chrono::Utc::now().timestamp_millis())
}

/// Trimmed role code, empty input yields `None`
pub fn normalize_role_code(code: Option<&str>) -> Option<String> {
    code.map(str::trim)
        .filter(|c| !c.is_empty())
        .map(|c| c.to_string())
}
