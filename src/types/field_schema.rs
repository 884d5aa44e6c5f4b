// src/types/field_schema.rs
//! Remote form schema: one entry per field, as served by the form-config resource

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ===== Field Schema =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldSchema {
    pub field_name: String,
    /// Column name in the external backend, falls back to `field_name` when blank
    #[serde(rename = "airtableField", alias = "backendField", default)]
    pub backend_field: String,
    #[serde(rename = "type", default)]
    pub field_type: FieldType,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(
        default,
        deserialize_with = "deserialize_options",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub options: Vec<SelectOption>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
    #[serde(default)]
    pub order: i64,
    /// Explicit semantic tag; when absent the role is inferred from the names
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<FieldRole>,
}

impl FieldSchema {
    pub fn new(field_name: &str, field_type: FieldType) -> Self {
        Self {
            field_name: field_name.to_string(),
            backend_field: field_name.to_string(),
            field_type,
            label: field_name.to_string(),
            placeholder: None,
            instructions: None,
            required: false,
            options: Vec::new(),
            validation: None,
            order: 0,
            role: None,
        }
    }

    pub fn with_backend_field(mut self, backend_field: &str) -> Self {
        self.backend_field = backend_field.to_string();
        self
    }

    pub fn with_label(mut self, label: &str) -> Self {
        self.label = label.to_string();
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = order;
        self
    }

    pub fn with_validation(mut self, validation: FieldValidation) -> Self {
        self.validation = Some(validation);
        self
    }

    pub fn with_options(mut self, options: Vec<SelectOption>) -> Self {
        self.options = options;
        self
    }

    /// Key the value is written under on submission
    pub fn backend_key(&self) -> &str {
        if self.backend_field.trim().is_empty() {
            &self.field_name
        } else {
            &self.backend_field
        }
    }

    /// Label used in messages, the field name stands in for a missing label
    pub fn display_label(&self) -> &str {
        if self.label.trim().is_empty() {
            &self.field_name
        } else {
            &self.label
        }
    }

    pub fn is_multi_select(&self) -> bool {
        self.field_type == FieldType::MultiSelect
    }
}

// ===== Field Type =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FieldType {
    #[default]
    Text,
    Email,
    Url,
    Select,
    MultiSelect,
    Textarea,
    Number,
    File,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Email => "email",
            Self::Url => "url",
            Self::Select => "select",
            Self::MultiSelect => "multi-select",
            Self::Textarea => "textarea",
            Self::Number => "number",
            Self::File => "file",
        }
    }
}

impl From<String> for FieldType {
    fn from(value: String) -> Self {
        match value.trim().to_lowercase().as_str() {
            "email" => Self::Email,
            "url" => Self::Url,
            "select" => Self::Select,
            "multi-select" | "multiselect" | "multi_select" => Self::MultiSelect,
            "textarea" => Self::Textarea,
            "number" => Self::Number,
            "file" => Self::File,
            // Unknown upstream types render and validate as plain text
            _ => Self::Text,
        }
    }
}

impl From<FieldType> for String {
    fn from(value: FieldType) -> Self {
        value.as_str().to_string()
    }
}

// ===== Validation Bounds =====

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

// ===== Options =====

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
}

impl SelectOption {
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }

    /// Lenient conversion: plain strings, numbers, or objects carrying
    /// `value`, `label` or `name`
    pub fn from_value(raw: &Value) -> Option<Self> {
        match raw {
            Value::Null => None,
            Value::String(s) => Some(Self::new(s, s)),
            Value::Object(obj) => {
                let text = |key: &str| obj.get(key).filter(|v| !v.is_null()).map(scalar_text);
                let value = text("value").or_else(|| text("label")).or_else(|| text("name"))?;
                if value.is_empty() {
                    return None;
                }
                let label = text("label")
                    .or_else(|| text("value"))
                    .unwrap_or_else(|| value.clone());
                Some(Self { value, label })
            }
            other => {
                let coerced = scalar_text(other);
                Some(Self::new(&coerced, &coerced))
            }
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn deserialize_options<'de, D>(deserializer: D) -> Result<Vec<SelectOption>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .iter()
        .filter_map(SelectOption::from_value)
        .collect())
}

// ===== Semantic Role =====

/// What a field means to the payload builder and validator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldRole {
    Cv,
    RecruiterSlug,
    Recruiter,
    RoleCode,
    Linkedin,
    Phone,
    Salary,
    Availability,
    Reason,
    PersonName,
    Country,
    Stack,
    TechStack,
    Generic,
}
