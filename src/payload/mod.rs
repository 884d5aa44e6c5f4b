// src/payload/mod.rs
//! Submission payload shaping: renames known fields to the backend vocabulary,
//! coerces types, and passes every other schema field through under its
//! backend key.

pub mod attachments;

use serde_json::{Number, Value};
use std::collections::BTreeSet;
use thiserror::Error;

use crate::form::FormValueMap;
use crate::i18n::{self, Lang};
use crate::types::{FieldRole, FieldSchema, SubmissionPayload};
use crate::utils::{ensure_string_array, sanitize_string};

pub use attachments::{attach_cv, collect_cv_attachments, normalize_attachments, UploadedFile};

pub const MIN_SALARY: f64 = 0.0;
pub const MAX_SALARY: f64 = 1_000_000.0;

const CODE_KEYS: &[&str] = &["rolAlQueAplica", "roleCode", "code"];
const STACK_KEYS: &[&str] = &["candidateStackPmTools", "stack"];
const TECH_STACK_KEYS: &[&str] = &["whatWouldBeYourAreaOfExpertise", "techStack"];
const SALARY_KEYS: &[&str] = &[
    "salaryExpectationusd",
    "salaryExpectationUsd",
    "salaryExpectationUSD",
    "salaryExpectationUsD",
    "salary",
];
const RECRUITER_SLUG_KEY: &str = "recruiterSlug";

/// Scalar renames: payload key and the form keys it may come from, in priority order
const SCALAR_RENAMES: &[(&str, &[&str])] = &[
    ("email", &["candidateEmail", "email"]),
    ("availability", &["whenToStartAvailability", "availability"]),
    ("reason", &["whyChange", "reason"]),
    ("english", &["englishLevel", "english"]),
    ("country", &["country"]),
    ("linkedin", &["linkedIn", "linkedin"]),
    ("firstName", &["nombre", "firstName"]),
    ("lastName", &["apellido", "lastName"]),
    ("recruiter", &["recruiter"]),
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PayloadError {
    #[error("salary expectation is not a valid number: {raw}")]
    InvalidSalary { raw: String },
    #[error("salary expectation {value} is outside 0..=1000000")]
    SalaryOutOfRange { value: f64 },
}

impl PayloadError {
    pub fn message(&self, lang: Lang) -> String {
        match self {
            Self::InvalidSalary { .. } => i18n::salary_not_numeric(lang),
            Self::SalaryOutOfRange { .. } => i18n::salary_out_of_range(lang),
        }
    }
}

/// Values that come from outside the form itself
#[derive(Debug, Clone, Copy, Default)]
pub struct PayloadContext<'a> {
    pub recruiter_slug: Option<&'a str>,
    /// Normalized role code from the URL query or the recruiter record
    pub role_code: Option<&'a str>,
}

/// Build the outbound payload. CV attachments are added separately by the caller.
pub fn build_submission_payload(
    values: &FormValueMap,
    schema: &[FieldSchema],
    context: &PayloadContext<'_>,
) -> Result<SubmissionPayload, PayloadError> {
    let mut consumed: BTreeSet<&str> = CODE_KEYS
        .iter()
        .chain(STACK_KEYS)
        .chain(TECH_STACK_KEYS)
        .chain(SALARY_KEYS)
        .chain(SCALAR_RENAMES.iter().flat_map(|(_, aliases)| aliases.iter()))
        .copied()
        .collect();
    consumed.insert(RECRUITER_SLUG_KEY);

    let mut payload = SubmissionPayload::new();

    // Role code: explicit form value, then the detected role-code field, then context
    let role_code_fields: Vec<&FieldSchema> = schema
        .iter()
        .filter(|field| field.role() == FieldRole::RoleCode)
        .collect();
    let code = sanitize_string(first_present(values, CODE_KEYS))
        .or_else(|| {
            role_code_fields
                .iter()
                .find_map(|field| sanitize_string(values.get(&field.field_name)))
        })
        .or_else(|| sanitize_string(context.role_code.map(Value::from).as_ref()));
    consumed.extend(role_code_fields.iter().map(|field| field.field_name.as_str()));
    insert_opt(&mut payload, "code", code.map(Value::String));

    insert_list(&mut payload, "stack", ensure_string_array(first_present(values, STACK_KEYS)));
    insert_list(
        &mut payload,
        "techStack",
        ensure_string_array(first_present(values, TECH_STACK_KEYS)),
    );

    // Salary: known casing variants, then any field detected as a salary field
    let salary_fields: Vec<&FieldSchema> = schema
        .iter()
        .filter(|field| field.role() == FieldRole::Salary)
        .collect();
    let salary_raw = first_present(values, SALARY_KEYS).or_else(|| {
        salary_fields
            .iter()
            .find_map(|field| values.get(&field.field_name).filter(|v| !is_blank(v)))
    });
    consumed.extend(salary_fields.iter().map(|field| field.field_name.as_str()));
    let salary = parse_salary(salary_raw)?;
    insert_opt(&mut payload, "salary", salary);

    for (target, aliases) in SCALAR_RENAMES {
        insert_opt(
            &mut payload,
            target,
            sanitize_string(first_present(values, aliases)).map(Value::String),
        );
    }

    let slug = sanitize_string(values.get(RECRUITER_SLUG_KEY))
        .or_else(|| sanitize_string(context.recruiter_slug.map(Value::from).as_ref()));
    insert_opt(&mut payload, RECRUITER_SLUG_KEY, slug.map(Value::String));

    // Phone numbers arrive already normalized to international format
    for field in schema.iter().filter(|f| f.role() == FieldRole::Phone) {
        consumed.insert(field.field_name.as_str());
        let Some(value) = values.get(&field.field_name).filter(|v| !is_blank(v)) else {
            continue;
        };
        payload.insert(field.field_name.clone(), value.clone());
        if field.backend_key() != field.field_name {
            payload.insert(field.backend_key().to_string(), value.clone());
        }
    }

    // Everything the renames above did not cover goes out under its backend key
    for field in schema {
        if consumed.contains(field.field_name.as_str()) || field.role() == FieldRole::Cv {
            continue;
        }

        let value = if field.is_multi_select() {
            let list = ensure_string_array(values.get(&field.field_name));
            if list.is_empty() {
                continue;
            }
            Value::from(list)
        } else {
            match sanitize_string(values.get(&field.field_name)) {
                Some(text) => Value::String(text),
                None => continue,
            }
        };

        payload
            .entry(field.backend_key().to_string())
            .or_insert(value);
    }

    payload.retain(|_, value| !value.is_null());
    Ok(payload)
}

/// First alias holding a non-null value
fn first_present<'v>(values: &'v FormValueMap, keys: &[&str]) -> Option<&'v Value> {
    keys.iter()
        .filter_map(|key| values.get(*key))
        .find(|value| !value.is_null())
}

fn parse_salary(raw: Option<&Value>) -> Result<Option<Value>, PayloadError> {
    let amount = match raw {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(other) => {
            let Some(text) = sanitize_string(Some(other)) else {
                return Ok(None);
            };
            text.parse::<f64>().ok()
        }
    };

    let amount = amount
        .filter(|n| n.is_finite())
        .ok_or_else(|| PayloadError::InvalidSalary {
            raw: raw.map(|v| v.to_string()).unwrap_or_default(),
        })?;

    if !(MIN_SALARY..=MAX_SALARY).contains(&amount) {
        return Err(PayloadError::SalaryOutOfRange { value: amount });
    }

    // Whole amounts go out as integers
    if amount.fract() == 0.0 {
        Ok(Some(Value::from(amount as u64)))
    } else {
        Ok(Number::from_f64(amount).map(Value::Number))
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        _ => false,
    }
}

fn insert_opt(payload: &mut SubmissionPayload, key: &str, value: Option<Value>) {
    if let Some(value) = value {
        payload.insert(key.to_string(), value);
    }
}

fn insert_list(payload: &mut SubmissionPayload, key: &str, list: Vec<String>) {
    if !list.is_empty() {
        payload.insert(key.to_string(), Value::from(list));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FieldType;
    use serde_json::json;

    fn values(pairs: Value) -> FormValueMap {
        pairs
            .as_object()
            .unwrap()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn context() -> PayloadContext<'static> {
        PayloadContext {
            recruiter_slug: Some("julieta"),
            role_code: None,
        }
    }

    #[test]
    fn test_minimal_form() {
        let schema = vec![
            FieldSchema::new("nombre", FieldType::Text).required(),
            FieldSchema::new("email", FieldType::Email).required(),
        ];
        let payload = build_submission_payload(
            &values(json!({"nombre": "Ana", "email": "ana@x.com"})),
            &schema,
            &context(),
        )
        .unwrap();

        assert_eq!(
            Value::Object(payload),
            json!({"firstName": "Ana", "email": "ana@x.com", "recruiterSlug": "julieta"})
        );
    }

    #[test]
    fn test_salary_parsing() {
        let schema = vec![FieldSchema::new("salaryExpectationUSD", FieldType::Number)];
        let build = |raw: Value| {
            build_submission_payload(
                &values(json!({ "salaryExpectationUSD": raw })),
                &schema,
                &context(),
            )
        };

        assert_eq!(build(json!("50000")).unwrap().get("salary"), Some(&json!(50000)));
        assert_eq!(build(json!(1500.5)).unwrap().get("salary"), Some(&json!(1500.5)));
        assert!(build(json!("")).unwrap().get("salary").is_none());
        assert!(matches!(build(json!("-5")), Err(PayloadError::SalaryOutOfRange { .. })));
        assert!(matches!(
            build(json!("2000000")),
            Err(PayloadError::SalaryOutOfRange { .. })
        ));
        assert!(matches!(build(json!("abc")), Err(PayloadError::InvalidSalary { .. })));
    }

    #[test]
    fn test_salary_casing_variants() {
        for key in SALARY_KEYS {
            let mut form = FormValueMap::new();
            form.insert(key.to_string(), json!("1200"));
            let payload = build_submission_payload(&form, &[], &context()).unwrap();
            assert_eq!(payload.get("salary"), Some(&json!(1200)), "key {}", key);
        }
    }

    #[test]
    fn test_detected_salary_field() {
        let schema = vec![FieldSchema::new("fld9", FieldType::Number)
            .with_backend_field("Expectativa salarial (USD)")];
        let payload = build_submission_payload(
            &values(json!({"fld9": "3500"})),
            &schema,
            &context(),
        )
        .unwrap();

        assert_eq!(payload.get("salary"), Some(&json!(3500)));
        assert!(payload.get("Expectativa salarial (USD)").is_none());
    }

    #[test]
    fn test_stack_normalization_and_empty_lists() {
        let schema = vec![
            FieldSchema::new("candidateStackPmTools", FieldType::MultiSelect),
            FieldSchema::new("whatWouldBeYourAreaOfExpertise", FieldType::MultiSelect),
        ];
        let payload = build_submission_payload(
            &values(json!({
                "candidateStackPmTools": [{"value": "a"}, {"label": "b"}],
                "whatWouldBeYourAreaOfExpertise": []
            })),
            &schema,
            &context(),
        )
        .unwrap();

        assert_eq!(payload.get("stack"), Some(&json!(["a", "b"])));
        assert!(payload.get("techStack").is_none());
        assert!(payload.get("whatWouldBeYourAreaOfExpertise").is_none());
    }

    #[test]
    fn test_role_code_sources() {
        let schema = vec![
            FieldSchema::new("fldRole", FieldType::Text).with_backend_field("Rol al que aplica")
        ];

        let from_field = build_submission_payload(
            &values(json!({"fldRole": " R-7 "})),
            &schema,
            &context(),
        )
        .unwrap();
        assert_eq!(from_field.get("code"), Some(&json!("R-7")));
        assert!(from_field.get("Rol al que aplica").is_none());

        let ctx = PayloadContext {
            recruiter_slug: Some("julieta"),
            role_code: Some("R-9"),
        };
        let from_context =
            build_submission_payload(&values(json!({"fldRole": ""})), &schema, &ctx).unwrap();
        assert_eq!(from_context.get("code"), Some(&json!("R-9")));
    }

    #[test]
    fn test_phone_under_both_keys() {
        let schema =
            vec![FieldSchema::new("phoneNumber", FieldType::Text).with_backend_field("Phone")];
        let payload = build_submission_payload(
            &values(json!({"phoneNumber": "+54 11 5555 5555"})),
            &schema,
            &context(),
        )
        .unwrap();

        assert_eq!(payload.get("phoneNumber"), Some(&json!("+54 11 5555 5555")));
        assert_eq!(payload.get("Phone"), Some(&json!("+54 11 5555 5555")));
    }

    #[test]
    fn test_catch_all_pass_through() {
        let schema = vec![
            FieldSchema::new("yearsOfExperience", FieldType::Number)
                .with_backend_field("Years of Experience"),
            FieldSchema::new("languages", FieldType::MultiSelect).with_backend_field("Languages"),
            FieldSchema::new("notes", FieldType::Textarea).with_backend_field("Notes"),
            FieldSchema::new("cV", FieldType::File),
            FieldSchema::new("recruiterSlug", FieldType::Text),
        ];
        let payload = build_submission_payload(
            &values(json!({
                "yearsOfExperience": " 5 ",
                "languages": "es, en",
                "notes": "   ",
                "cV": ["https://x/cv.pdf"],
                "recruiterSlug": "maria"
            })),
            &schema,
            &context(),
        )
        .unwrap();

        assert_eq!(payload.get("Years of Experience"), Some(&json!("5")));
        assert_eq!(payload.get("Languages"), Some(&json!(["es", "en"])));
        assert!(payload.get("Notes").is_none());
        assert!(payload.get("cV").is_none());
        assert_eq!(payload.get("recruiterSlug"), Some(&json!("maria")));
    }

    #[test]
    fn test_payload_error_messages() {
        let err = PayloadError::InvalidSalary {
            raw: "abc".to_string(),
        };
        assert_eq!(
            err.message(Lang::Es),
            "La expectativa salarial debe ser un número válido."
        );
    }
}
