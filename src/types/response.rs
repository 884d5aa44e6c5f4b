// src/types/response.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::i18n::Lang;

/// Flat backend-key → value mapping posted to the postulation endpoint
pub type SubmissionPayload = serde_json::Map<String, Value>;

/// Uniform CV attachment descriptor sent under the `cv` key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub url: String,
    pub filename: String,
}

// ===== Backend Error Bodies =====

/// Message extracted from a non-success response body.
///
/// The backend answers with `{message, errors?}`, `{es, en}` or a bare string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackendMessage {
    pub message: Option<String>,
    pub details: Vec<String>,
}

impl BackendMessage {
    pub fn parse(body: &str, lang: Lang) -> Self {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Self::default();
        }

        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::Object(obj)) => {
                let message = obj
                    .get("message")
                    .and_then(Value::as_str)
                    .or_else(|| obj.get(lang.code()).and_then(Value::as_str))
                    .or_else(|| obj.get("es").and_then(Value::as_str))
                    .or_else(|| obj.get("en").and_then(Value::as_str))
                    .or_else(|| obj.get("error").and_then(Value::as_str))
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string);

                let details = obj
                    .get("errors")
                    .and_then(Value::as_array)
                    .map(|errors| {
                        errors
                            .iter()
                            .filter_map(|e| match e {
                                Value::String(s) => Some(s.clone()),
                                Value::Null => None,
                                other => Some(other.to_string()),
                            })
                            .collect()
                    })
                    .unwrap_or_default();

                Self { message, details }
            }
            Ok(Value::String(s)) => Self {
                message: Some(s).filter(|m| !m.trim().is_empty()),
                details: Vec::new(),
            },
            Ok(_) => Self::default(),
            Err(_) => Self {
                message: Some(trimmed.to_string()),
                details: Vec::new(),
            },
        }
    }

    /// Backend message (with joined details) or the given fallback
    pub fn render(&self, fallback: &str) -> String {
        let base = self.message.as_deref().unwrap_or(fallback);
        if self.details.is_empty() {
            base.to_string()
        } else {
            format!("{} ({})", base, self.details.join(" • "))
        }
    }
}
