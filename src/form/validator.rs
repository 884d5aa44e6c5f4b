// src/form/validator.rs
//! Per-field validation. Rules run in a fixed order and the first error wins.

use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::warn;

use crate::i18n::{self, Lang};
use crate::payload::{MAX_SALARY, MIN_SALARY};
use crate::types::{FieldRole, FieldSchema, FieldType};
use crate::utils::{is_empty_value, value_as_text};

static PERSON_NAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-zÀ-ÖØ-öø-ÿ\s'’\-]+$").unwrap());
static LINKEDIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(https?://)?(www\.)?linkedin\.com/in/[A-Za-z0-9_\-]+/?$").unwrap()
});
static FREE_TEXT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9À-ÖØ-öø-ÿ\s.,!?¡¿\-]+$").unwrap());
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static URL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://.+\..+$").unwrap());

pub const NAME_LENGTH: (usize, usize) = (2, 50);
pub const AVAILABILITY_LENGTH: (usize, usize) = (5, 200);
pub const REASON_LENGTH: (usize, usize) = (10, 500);

/// Validate one field value, returning the localized error message if any.
///
/// A required CV/file field is not checked here; the attachment requirement
/// is enforced when the application is submitted.
pub fn validate_field(field: &FieldSchema, value: Option<&Value>, lang: Lang) -> Option<String> {
    let label = field.display_label();
    let role = field.role();

    if is_empty_value(value) {
        if field.required && role != FieldRole::Cv {
            return Some(i18n::required(lang, label));
        }
        return None;
    }

    let text = match value.and_then(value_as_text) {
        Some(text) => text,
        // Lists and attachment descriptors only face the required check
        None if matches!(value, Some(Value::Array(_))) || role == FieldRole::Cv => return None,
        // Booleans and objects are not valid scalar input
        None => return Some(i18n::invalid_format(lang, label)),
    };

    if field.has_role(FieldRole::PersonName) {
        if let Some(err) = check_free_text(
            &text,
            NAME_LENGTH,
            &PERSON_NAME_RE,
            label,
            lang,
            i18n::name_characters,
        ) {
            return Some(err);
        }
    }

    if field.has_role(FieldRole::Linkedin) && !LINKEDIN_RE.is_match(text.trim()) {
        return Some(i18n::invalid_linkedin(lang));
    }

    if let Some(err) = check_bounds(field, &text, label, lang) {
        return Some(err);
    }

    if field.has_role(FieldRole::Availability) {
        if let Some(err) = check_free_text(
            &text,
            AVAILABILITY_LENGTH,
            &FREE_TEXT_RE,
            label,
            lang,
            i18n::free_text_characters,
        ) {
            return Some(err);
        }
    }

    if field.has_role(FieldRole::Reason) {
        if let Some(err) = check_free_text(
            &text,
            REASON_LENGTH,
            &FREE_TEXT_RE,
            label,
            lang,
            i18n::free_text_characters,
        ) {
            return Some(err);
        }
    }

    if field.has_role(FieldRole::Salary) {
        let amount = match text.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => n,
            _ => return Some(i18n::not_a_number(lang, label)),
        };
        if amount < MIN_SALARY {
            return Some(i18n::salary_negative(lang));
        }
        if amount > MAX_SALARY {
            return Some(i18n::salary_too_high(lang, MAX_SALARY));
        }
    }

    if field.field_type == FieldType::Email && !EMAIL_RE.is_match(&text) {
        return Some(i18n::invalid_email(lang));
    }

    if field.field_type == FieldType::Url
        && !field.has_role(FieldRole::Linkedin)
        && !URL_RE.is_match(&text)
    {
        return Some(i18n::invalid_url(lang));
    }

    check_pattern(field, &text, label, lang)
}

fn check_free_text(
    text: &str,
    (min, max): (usize, usize),
    allowed: &Regex,
    label: &str,
    lang: Lang,
    charset_message: fn(Lang, &str) -> String,
) -> Option<String> {
    let trimmed = text.trim();
    let len = trimmed.chars().count();
    if len < min || len > max {
        return Some(i18n::length_between(lang, label, min, max));
    }
    if !allowed.is_match(trimmed) {
        return Some(charset_message(lang, label));
    }
    None
}

/// `validation.min/max`: character count for text, numeric value for numbers
fn check_bounds(field: &FieldSchema, text: &str, label: &str, lang: Lang) -> Option<String> {
    match field.field_type {
        FieldType::Text | FieldType::Textarea => {
            let bounds = field.validation.as_ref()?;
            let len = text.chars().count() as f64;
            if let Some(min) = bounds.min.filter(|&min| len < min) {
                return Some(i18n::min_chars(lang, label, min));
            }
            if let Some(max) = bounds.max.filter(|&max| len > max) {
                return Some(i18n::max_chars(lang, label, max));
            }
            None
        }
        FieldType::Number => {
            let number = match text.trim().parse::<f64>() {
                Ok(n) if n.is_finite() => n,
                _ => return Some(i18n::not_a_number(lang, label)),
            };
            let bounds = field.validation.as_ref()?;
            if let Some(min) = bounds.min.filter(|&min| number < min) {
                return Some(i18n::min_value(lang, label, min));
            }
            if let Some(max) = bounds.max.filter(|&max| number > max) {
                return Some(i18n::max_value(lang, label, max));
            }
            None
        }
        _ => None,
    }
}

/// Upstream patterns that fail to compile are ignored
fn check_pattern(field: &FieldSchema, text: &str, label: &str, lang: Lang) -> Option<String> {
    let pattern = field.validation.as_ref()?.pattern.as_deref()?;
    if pattern.is_empty() {
        return None;
    }

    match Regex::new(pattern) {
        Ok(re) if !re.is_match(text) => Some(i18n::invalid_format(lang, label)),
        Ok(_) => None,
        Err(e) => {
            warn!("Ignoring invalid pattern for field {}: {}", field.field_name, e);
            None
        }
    }
}
