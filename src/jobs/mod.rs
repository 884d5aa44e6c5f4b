// src/jobs/mod.rs
//! Job offers: wire types, per-language views, listing helpers and the
//! schema.org representation of a single posting.

pub mod html;
pub mod listing;
pub mod posting;

use serde::{Deserialize, Serialize};

pub use listing::{active_offers, apply_eligibility, ApplyEligibility, JobPager, Viewer, JOBS_PER_PAGE};
pub use posting::{job_posting_schema, meta_description, page_title, LocalizedJob};

/// Job description as served by `/jds/find`; Spanish fields at the top level,
/// English translations under `en`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobDescription {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub modality: Option<String>,
    #[serde(default)]
    pub stack: Option<Vec<String>>,
    #[serde(default)]
    pub about_us: Option<String>,
    #[serde(default)]
    pub about_client: Option<String>,
    #[serde(default)]
    pub responsabilities: Option<Vec<String>>,
    #[serde(default)]
    pub requirements: Option<Vec<String>>,
    #[serde(default)]
    pub nice_to_have: Option<Vec<String>>,
    #[serde(default)]
    pub benefits: Option<Vec<String>>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub job_type: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub expiration_date: Option<String>,
    #[serde(default)]
    pub archived: bool,
    #[serde(default)]
    pub en: Option<JobTranslation>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobTranslation {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub modality: Option<String>,
    #[serde(default)]
    pub stack: Option<Vec<String>>,
    #[serde(default)]
    pub about_us: Option<String>,
    #[serde(default)]
    pub about_client: Option<String>,
    #[serde(default)]
    pub responsabilities: Option<Vec<String>>,
    #[serde(default)]
    pub requirements: Option<Vec<String>>,
    #[serde(default)]
    pub nice_to_have: Option<Vec<String>>,
    #[serde(default)]
    pub benefits: Option<Vec<String>>,
}
