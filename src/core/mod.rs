// src/core/mod.rs
//! Backend access shared by the form session, the CLI and the job pages

pub mod api_client;

pub use api_client::{ApiClient, ApiError, OptionListKind};
