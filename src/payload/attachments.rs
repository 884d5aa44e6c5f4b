// src/payload/attachments.rs
//! CV attachment normalization.
//!
//! Values reach the form as bare URLs, `{url, filename}` objects or raw upload
//! provider responses (`secure_url`, `original_filename`); they all leave as
//! uniform [`Attachment`]s.

use serde_json::Value;

use crate::form::FormValueMap;
use crate::types::{Attachment, FieldRole, FieldSchema, SubmissionPayload};
use crate::utils::{fallback_cv_name, file_name_from_url};

/// Field name the CV arrives under when the schema does not tag one
const CV_VALUE_KEY: &str = "cV";

/// File freshly uploaded through the upload widget
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub public_id: String,
    pub file_name: Option<String>,
}

impl UploadedFile {
    pub fn new(public_id: &str, file_name: Option<&str>) -> Self {
        Self {
            public_id: public_id.to_string(),
            file_name: file_name
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
        }
    }

    pub fn to_attachment(&self, upload_base_url: &str) -> Attachment {
        Attachment {
            url: format!(
                "{}/{}",
                upload_base_url.trim_end_matches('/'),
                self.public_id.trim_start_matches('/')
            ),
            filename: self.file_name.clone().unwrap_or_else(fallback_cv_name),
        }
    }
}

/// Normalize one stored value (single descriptor or list of them)
pub fn normalize_attachments(value: Option<&Value>) -> Vec<Attachment> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(normalize_one).collect(),
        Some(other) => normalize_one(other).into_iter().collect(),
        None => Vec::new(),
    }
}

fn normalize_one(item: &Value) -> Option<Attachment> {
    match item {
        Value::String(url) => {
            let url = url.trim();
            if url.is_empty() {
                return None;
            }
            Some(Attachment {
                url: url.to_string(),
                filename: file_name_from_url(url).unwrap_or_else(fallback_cv_name),
            })
        }
        Value::Object(obj) => {
            let text = |key: &str| {
                obj.get(key)
                    .and_then(Value::as_str)
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            };

            if let (Some(url), Some(filename)) = (text("url"), text("filename")) {
                return Some(Attachment { url, filename });
            }

            let url = text("secure_url")?;
            let filename = text("original_filename")
                .or_else(|| text("path"))
                .unwrap_or_else(fallback_cv_name);
            Some(Attachment { url, filename })
        }
        _ => None,
    }
}

/// All CV attachments in the form, with a fresh upload (if any) first
pub fn collect_cv_attachments(
    values: &FormValueMap,
    schema: &[FieldSchema],
    upload: Option<&UploadedFile>,
    upload_base_url: &str,
) -> Vec<Attachment> {
    let mut keys: Vec<&str> = schema
        .iter()
        .filter(|field| field.role() == FieldRole::Cv)
        .map(|field| field.field_name.as_str())
        .collect();
    if !keys.contains(&CV_VALUE_KEY) {
        keys.push(CV_VALUE_KEY);
    }

    let mut attachments: Vec<Attachment> = keys
        .into_iter()
        .flat_map(|key| normalize_attachments(values.get(key)))
        .collect();

    if let Some(upload) = upload {
        attachments.insert(0, upload.to_attachment(upload_base_url));
    }

    attachments
}

/// Add the `cv` key when there is at least one attachment
pub fn attach_cv(payload: &mut SubmissionPayload, attachments: &[Attachment]) {
    if attachments.is_empty() {
        return;
    }

    let list = attachments
        .iter()
        .map(|a| serde_json::json!({ "url": a.url, "filename": a.filename }))
        .collect();
    payload.insert("cv".to_string(), Value::Array(list));
}
