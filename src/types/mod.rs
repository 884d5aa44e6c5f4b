// src/types/mod.rs
pub mod field_schema;
pub mod recruiter;
pub mod response;

pub use field_schema::{FieldRole, FieldSchema, FieldType, FieldValidation, SelectOption};
pub use recruiter::{OptionItem, RecruiterData};
pub use response::{Attachment, BackendMessage, SubmissionPayload};
