// src/form/state.rs
use serde_json::Value;
use std::collections::BTreeMap;

use super::validator::validate_field;
use crate::i18n::Lang;
use crate::types::FieldSchema;

/// Current value per field name
pub type FormValueMap = BTreeMap<String, Value>;
/// Current validation error per field name
pub type FormErrorMap = BTreeMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    values: FormValueMap,
    errors: FormErrorMap,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty string per scalar field, empty list per multi-select
    pub fn from_schema(schema: &[FieldSchema]) -> Self {
        let values = schema
            .iter()
            .map(|field| {
                let initial = if field.is_multi_select() {
                    Value::Array(Vec::new())
                } else {
                    Value::String(String::new())
                };
                (field.field_name.clone(), initial)
            })
            .collect();

        Self {
            values,
            errors: FormErrorMap::new(),
        }
    }

    /// Replace a value; any error recorded for the field is dropped
    pub fn set_value(&mut self, field_name: &str, value: Value) {
        self.values.insert(field_name.to_string(), value);
        self.errors.remove(field_name);
    }

    pub fn value(&self, field_name: &str) -> Option<&Value> {
        self.values.get(field_name)
    }

    pub fn values(&self) -> &FormValueMap {
        &self.values
    }

    pub fn error(&self, field_name: &str) -> Option<&str> {
        self.errors.get(field_name).map(String::as_str)
    }

    pub fn errors(&self) -> &FormErrorMap {
        &self.errors
    }

    /// Validate every field, replacing the error map. Returns true when clean.
    pub fn validate(&mut self, schema: &[FieldSchema], lang: Lang) -> bool {
        self.errors = schema
            .iter()
            .filter_map(|field| {
                validate_field(field, self.values.get(&field.field_name), lang)
                    .map(|err| (field.field_name.clone(), err))
            })
            .collect();

        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldType;
    use serde_json::json;

    fn schema() -> Vec<FieldSchema> {
        vec![
            FieldSchema::new("nombre", FieldType::Text).required(),
            FieldSchema::new("email", FieldType::Email).required(),
            FieldSchema::new("techStack", FieldType::MultiSelect),
        ]
    }

    #[test]
    fn test_defaults_from_schema() {
        let state = FormState::from_schema(&schema());
        assert_eq!(state.value("nombre"), Some(&json!("")));
        assert_eq!(state.value("techStack"), Some(&json!([])));
        assert!(state.errors().is_empty());
    }

    #[test]
    fn test_validate_and_clear_on_edit() {
        let schema = schema();
        let mut state = FormState::from_schema(&schema);

        assert!(!state.validate(&schema, Lang::En));
        assert_eq!(state.errors().len(), 2);
        assert_eq!(state.error("email"), Some("email is required"));

        state.set_value("email", json!("ana@x.com"));
        assert!(state.error("email").is_none());
        assert!(state.error("nombre").is_some());

        state.set_value("nombre", json!("Ana"));
        assert!(state.validate(&schema, Lang::En));
    }
}
