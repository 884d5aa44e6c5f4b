// src/application.rs
//! A recruiter application form session: load the recruiter, schema and option
//! lists, collect values, validate and submit.

use serde_json::Value;
use thiserror::Error;
use tracing::{info, warn};

use crate::core::{ApiClient, ApiError, OptionListKind};
use crate::form::{FormErrorMap, FormState, FormValueMap, OptionLists, Widget};
use crate::i18n::{self, Lang};
use crate::payload::{
    attach_cv, build_submission_payload, collect_cv_attachments, PayloadContext, PayloadError,
    UploadedFile,
};
use crate::types::{FieldRole, FieldSchema, RecruiterData, SubmissionPayload};
use crate::utils::normalize_role_code;

/// What the page was opened with
#[derive(Debug, Clone, PartialEq)]
pub struct FormRequest {
    pub recruiter_slug: Option<String>,
    pub role_code_param: Option<String>,
    pub lang: Lang,
    pub view: String,
}

impl FormRequest {
    pub fn new(recruiter_slug: &str, view: &str) -> Self {
        Self {
            recruiter_slug: Some(recruiter_slug.to_string()),
            role_code_param: None,
            lang: Lang::default(),
            view: view.to_string(),
        }
    }

    pub fn with_role_code(mut self, role_code: &str) -> Self {
        self.role_code_param = Some(role_code.to_string());
        self
    }

    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }
}

/// The form cannot be shown; the page leaves with a notification
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no recruiter slug given")]
    MissingSlug,
    #[error("recruiter lookup failed: {0}")]
    Recruiter(#[source] ApiError),
    #[error("form configuration fetch failed: {0}")]
    Config(#[source] ApiError),
    #[error("recruiter '{slug}' is not active")]
    RecruiterInactive { slug: String },
}

impl LoadError {
    pub fn message(&self, lang: Lang) -> String {
        match self {
            Self::MissingSlug => i18n::invalid_recruiter_url(lang),
            Self::Recruiter(err) => err.user_message(&i18n::recruiter_fetch_failed(lang)),
            Self::Config(err) => err.user_message(&i18n::config_fetch_failed(lang)),
            Self::RecruiterInactive { .. } => i18n::form_unavailable(lang),
        }
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("form has {} invalid field(s)", .0.len())]
    Incomplete(FormErrorMap),
    #[error("a CV is required for '{label}'")]
    MissingAttachment { label: String },
    #[error(transparent)]
    Payload(#[from] PayloadError),
    #[error("submission failed: {0}")]
    Api(#[from] ApiError),
}

impl SubmitError {
    pub fn message(&self, lang: Lang) -> String {
        match self {
            Self::Incomplete(_) => i18n::form_incomplete(lang),
            Self::MissingAttachment { label } => i18n::required(lang, label),
            Self::Payload(err) => err.message(lang),
            Self::Api(err) => err.user_message(&i18n::submission_failed(lang)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApplicationForm {
    recruiter: RecruiterData,
    schema: Vec<FieldSchema>,
    state: FormState,
    options: OptionLists,
    recruiter_slug: String,
    role_code: Option<String>,
    lang: Lang,
}

impl ApplicationForm {
    /// Fetch everything the form needs concurrently and prepare initial values
    pub async fn load(client: &ApiClient, request: FormRequest) -> Result<Self, LoadError> {
        let slug = request
            .recruiter_slug
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(LoadError::MissingSlug)?
            .to_string();
        let role_code_param = normalize_role_code(request.role_code_param.as_deref());
        let lang = request.lang;
        let client = client.clone().with_lang(lang);

        info!("Loading application form '{}' for recruiter {}", request.view, slug);

        let (recruiter, schema, stack, tech_stack) = tokio::join!(
            client.get_recruiter_by_slug(&slug, role_code_param.as_deref()),
            client.get_form_config(&request.view, lang),
            client.get_option_list(OptionListKind::Stack),
            client.get_option_list(OptionListKind::TechStack),
        );

        let recruiter = recruiter.map_err(|err| match err {
            ApiError::RecruiterInactive { slug } => LoadError::RecruiterInactive { slug },
            other => LoadError::Recruiter(other),
        })?;
        let schema = schema.map_err(LoadError::Config)?;
        let options = OptionLists {
            stack: stack.unwrap_or_else(|err| {
                warn!("Stack list unavailable: {}", err);
                Vec::new()
            }),
            tech_stack: tech_stack.unwrap_or_else(|err| {
                warn!("Tech stack list unavailable: {}", err);
                Vec::new()
            }),
        };

        let role_code = role_code_param
            .or_else(|| normalize_role_code(recruiter.recruitment_role_code.as_deref()));

        Ok(Self::from_parts(recruiter, schema, options, &slug, role_code, lang))
    }

    /// Assemble a session from already fetched data
    pub fn from_parts(
        recruiter: RecruiterData,
        mut schema: Vec<FieldSchema>,
        options: OptionLists,
        recruiter_slug: &str,
        role_code: Option<String>,
        lang: Lang,
    ) -> Self {
        schema.sort_by_key(|field| field.order);

        let mut state = FormState::from_schema(&schema);
        state.set_value("recruiterSlug", Value::String(recruiter_slug.to_string()));

        let recruiter_name = recruiter.full_name();
        for field in &schema {
            match field.role() {
                FieldRole::Recruiter => {
                    state.set_value(&field.field_name, Value::String(recruiter_name.clone()));
                }
                FieldRole::RoleCode => {
                    if let Some(code) = &role_code {
                        state.set_value(&field.field_name, Value::String(code.clone()));
                    }
                }
                _ => {}
            }
        }

        Self {
            recruiter,
            schema,
            state,
            options,
            recruiter_slug: recruiter_slug.to_string(),
            role_code,
            lang,
        }
    }

    pub fn recruiter(&self) -> &RecruiterData {
        &self.recruiter
    }

    pub fn schema(&self) -> &[FieldSchema] {
        &self.schema
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn role_code(&self) -> Option<&str> {
        self.role_code.as_deref()
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn set_value(&mut self, field_name: &str, value: Value) {
        self.state.set_value(field_name, value);
    }

    /// Apply a batch of values, e.g. read from a file
    pub fn set_values(&mut self, values: FormValueMap) {
        for (field_name, value) in values {
            self.state.set_value(&field_name, value);
        }
    }

    pub fn widget_for(&self, field: &FieldSchema) -> Widget {
        Widget::for_field(field, &self.options, self.role_code.is_some())
    }

    /// Schema in display order paired with the widget for each field
    pub fn widgets(&self) -> Vec<(&FieldSchema, Widget)> {
        self.schema
            .iter()
            .map(|field| (field, self.widget_for(field)))
            .collect()
    }

    pub fn validate(&mut self) -> bool {
        self.state.validate(&self.schema, self.lang)
    }

    /// Validate and shape the payload, CV attachments included, without sending it
    pub fn build_payload(
        &mut self,
        upload: Option<&UploadedFile>,
        upload_base_url: &str,
    ) -> Result<SubmissionPayload, SubmitError> {
        if !self.validate() {
            return Err(SubmitError::Incomplete(self.state.errors().clone()));
        }

        let attachments =
            collect_cv_attachments(self.state.values(), &self.schema, upload, upload_base_url);
        if attachments.is_empty() {
            if let Some(field) = self
                .schema
                .iter()
                .find(|field| field.required && field.role() == FieldRole::Cv)
            {
                return Err(SubmitError::MissingAttachment {
                    label: field.display_label().to_string(),
                });
            }
        }

        let context = PayloadContext {
            recruiter_slug: Some(&self.recruiter_slug),
            role_code: self.role_code.as_deref(),
        };
        let mut payload = build_submission_payload(self.state.values(), &self.schema, &context)?;
        attach_cv(&mut payload, &attachments);

        Ok(payload)
    }

    /// Validate, build and post. Nothing is sent when validation or shaping fails.
    pub async fn submit(
        &mut self,
        client: &ApiClient,
        upload: Option<&UploadedFile>,
        upload_base_url: &str,
    ) -> Result<Value, SubmitError> {
        let payload = self.build_payload(upload, upload_base_url)?;
        let client = client.clone().with_lang(self.lang);

        // The slug in the payload is the one the form carried; the session slug backs it up
        let recruiter_slug = payload
            .get("recruiterSlug")
            .and_then(Value::as_str)
            .unwrap_or(&self.recruiter_slug)
            .to_string();

        match client.submit_application(&payload, &recruiter_slug).await {
            Ok(response) => {
                info!("Application submitted for recruiter {}", recruiter_slug);
                Ok(response)
            }
            Err(err) => {
                warn!("Application submission failed: {}", err);
                Err(SubmitError::Api(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FieldType, SelectOption};
    use serde_json::json;

    fn recruiter() -> RecruiterData {
        serde_json::from_value(json!({
            "id": "rec1",
            "name": "Julieta",
            "lastName": "Pérez",
            "urlSlug": "julieta",
            "active": true,
            "recruitmentRoleCode": " RB-7 "
        }))
        .unwrap()
    }

    fn schema() -> Vec<FieldSchema> {
        vec![
            FieldSchema::new("email", FieldType::Email).required().with_order(2),
            FieldSchema::new("nombre", FieldType::Text).required().with_order(1),
            FieldSchema::new("recruiter", FieldType::Text).with_order(0),
            FieldSchema::new("rolAlQueAplica", FieldType::Text).with_order(0),
            FieldSchema::new("techStack", FieldType::MultiSelect).with_order(3),
        ]
    }

    fn form(role_code: Option<&str>) -> ApplicationForm {
        let options = OptionLists {
            stack: Vec::new(),
            tech_stack: vec![SelectOption::new("Rust", "Rust")],
        };
        ApplicationForm::from_parts(
            recruiter(),
            schema(),
            options,
            "julieta",
            role_code.map(str::to_string),
            Lang::Es,
        )
    }

    #[test]
    fn test_schema_sorted_stably() {
        let form = form(None);
        let names: Vec<_> = form.schema().iter().map(|f| f.field_name.as_str()).collect();
        assert_eq!(names, vec!["recruiter", "rolAlQueAplica", "nombre", "email", "techStack"]);
    }

    #[test]
    fn test_initial_values() {
        let form = form(Some("RB-7"));
        let state = form.state();
        assert_eq!(state.value("recruiterSlug"), Some(&json!("julieta")));
        assert_eq!(state.value("recruiter"), Some(&json!("Julieta Pérez")));
        assert_eq!(state.value("rolAlQueAplica"), Some(&json!("RB-7")));
        assert_eq!(state.value("nombre"), Some(&json!("")));
        assert_eq!(state.value("techStack"), Some(&json!([])));
    }

    #[test]
    fn test_widgets_follow_role_code_lock() {
        let locked = form(Some("RB-7"));
        let field = &locked.schema()[1];
        assert_eq!(locked.widget_for(field), Widget::RoleCode { read_only: true });

        let open = form(None);
        assert_eq!(open.widget_for(field), Widget::RoleCode { read_only: false });

        let (_, stack_widget) = &open.widgets()[4];
        assert_eq!(
            stack_widget,
            &Widget::MultiSelect {
                options: vec![SelectOption::new("Rust", "Rust")]
            }
        );
    }

    #[test]
    fn test_build_payload_blocks_invalid_form() {
        let mut form = form(None);
        let err = form.build_payload(None, "https://cdn.test").unwrap_err();
        match err {
            SubmitError::Incomplete(errors) => {
                assert!(errors.contains_key("nombre"));
                assert!(errors.contains_key("email"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        form.set_value("nombre", json!("Ana"));
        assert!(form.state().error("nombre").is_none());
    }

    #[test]
    fn test_build_payload() {
        let mut form = form(Some("RB-7"));
        form.set_value("nombre", json!("Ana"));
        form.set_value("email", json!("ana@x.com"));
        form.set_value("techStack", json!([{ "value": "Rust" }]));

        let payload = form.build_payload(None, "https://cdn.test").unwrap();
        assert_eq!(payload["firstName"], "Ana");
        assert_eq!(payload["email"], "ana@x.com");
        assert_eq!(payload["recruiterSlug"], "julieta");
        assert_eq!(payload["code"], "RB-7");
        assert_eq!(payload["techStack"], json!(["Rust"]));
        assert_eq!(payload["recruiter"], "Julieta Pérez");
        assert!(payload.get("cv").is_none());
    }

    #[test]
    fn test_required_cv_enforced_at_submit() {
        let mut schema = schema();
        schema.push(FieldSchema::new("cV", FieldType::File).required().with_label("CV"));
        let mut form = ApplicationForm::from_parts(
            recruiter(),
            schema,
            OptionLists::default(),
            "julieta",
            None,
            Lang::En,
        );
        form.set_value("nombre", json!("Ana"));
        form.set_value("email", json!("ana@x.com"));

        let err = form.build_payload(None, "https://cdn.test").unwrap_err();
        assert!(matches!(err, SubmitError::MissingAttachment { ref label } if label == "CV"));
        assert_eq!(err.message(Lang::En), i18n::required(Lang::En, "CV"));

        let upload = UploadedFile::new("abc123", Some("ana.pdf"));
        let payload = form.build_payload(Some(&upload), "https://cdn.test").unwrap();
        assert_eq!(
            payload["cv"],
            json!([{ "url": "https://cdn.test/abc123", "filename": "ana.pdf" }])
        );
    }

    #[test]
    fn test_load_error_messages() {
        assert_eq!(
            LoadError::MissingSlug.message(Lang::Es),
            i18n::invalid_recruiter_url(Lang::Es)
        );
        let inactive = LoadError::RecruiterInactive {
            slug: "x".to_string(),
        };
        assert_eq!(inactive.message(Lang::En), i18n::form_unavailable(Lang::En));
    }
}
