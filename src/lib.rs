// src/lib.rs
//! Recruiter application form client: schema-driven validation, payload
//! shaping and submission against the recruitment backend, plus job
//! description helpers.

pub mod application;
pub mod cli;
pub mod core;
pub mod environment;
pub mod form;
pub mod i18n;
pub mod jobs;
pub mod payload;
pub mod types;
pub mod utils;

pub use application::{ApplicationForm, FormRequest, LoadError, SubmitError};
pub use crate::core::{ApiClient, ApiError, OptionListKind};
pub use environment::AppConfig;
pub use form::{validate_field, FormErrorMap, FormState, FormValueMap, OptionLists, Widget};
pub use i18n::Lang;
pub use payload::{build_submission_payload, PayloadContext, PayloadError, UploadedFile};
pub use types::{FieldRole, FieldSchema, FieldType, RecruiterData, SubmissionPayload};
