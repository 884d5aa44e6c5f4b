// src/core/api_client.rs
//! HTTP client for the recruitment backend: form config, recruiters, option
//! lists, postulations and job descriptions.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::environment::AppConfig;
use crate::i18n::Lang;
use crate::jobs::JobDescription;
use crate::types::{BackendMessage, FieldSchema, OptionItem, RecruiterData, SelectOption, SubmissionPayload};

const FORM_CONFIG_ENDPOINT: &str = "/resources/form-config";
const RECRUITER_ENDPOINT: &str = "/recruiters/payroll";
const STACK_LIST_ENDPOINT: &str = "/resources/stackList";
const TECH_STACK_ENDPOINT: &str = "/resources/techStack";
const POSTULATION_ENDPOINT: &str = "/postulations/create";
const JOB_DESCRIPTION_ENDPOINT: &str = "/jds/find";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("backend returned {status}: {}", .body.render("no message"))]
    Backend {
        status: StatusCode,
        body: BackendMessage,
    },
    #[error("recruiter '{slug}' is not active")]
    RecruiterInactive { slug: String },
    #[error("failed to decode {what}: {source}")]
    Decode {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("no job description found for code '{code}'")]
    JobNotFound { code: String },
}

impl ApiError {
    /// Backend-supplied message when there is one, otherwise the fallback
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Backend { body, .. } => body.render(fallback),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Backend { status, .. } => Some(*status),
            Self::Request(e) => e.status(),
            _ => None,
        }
    }
}

/// Which remote option list to fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionListKind {
    Stack,
    TechStack,
}

impl OptionListKind {
    fn endpoint(&self) -> &'static str {
        match self {
            Self::Stack => STACK_LIST_ENDPOINT,
            Self::TechStack => TECH_STACK_ENDPOINT,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
    lang: Lang,
}

impl ApiClient {
    pub fn new(config: &AppConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            token: config.api_token.clone(),
            lang: config.lang,
        })
    }

    /// Same client, different UI language for `Accept-Language`
    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }

    pub fn lang(&self) -> Lang {
        self.lang
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ordered field schema for a form view
    pub async fn get_form_config(&self, view: &str, lang: Lang) -> Result<Vec<FieldSchema>, ApiError> {
        let request = self
            .get(FORM_CONFIG_ENDPOINT, lang)
            .query(&[("view", view), ("lang", lang.code())]);

        self.fetch_json(request, "form config", lang).await
    }

    /// Recruiter record by slug; inactive recruiters are rejected
    pub async fn get_recruiter_by_slug(
        &self,
        slug: &str,
        role_code: Option<&str>,
    ) -> Result<RecruiterData, ApiError> {
        let mut query = vec![("slug", slug)];
        if let Some(code) = role_code {
            query.push(("roleCode", code));
        }
        let request = self.get(RECRUITER_ENDPOINT, self.lang).query(&query);

        let recruiter: RecruiterData = self.fetch_json(request, "recruiter", self.lang).await?;
        if !recruiter.active {
            warn!("Recruiter {} is not active", slug);
            return Err(ApiError::RecruiterInactive {
                slug: slug.to_string(),
            });
        }

        Ok(recruiter)
    }

    /// Stack or tech-stack option list (`[{name}]` on the wire)
    pub async fn get_option_list(&self, kind: OptionListKind) -> Result<Vec<SelectOption>, ApiError> {
        let request = self.get(kind.endpoint(), self.lang);
        let items: Vec<OptionItem> = self.fetch_json(request, "option list", self.lang).await?;

        Ok(items
            .into_iter()
            .map(|item| SelectOption::new(&item.name, &item.name))
            .collect())
    }

    /// Post a built payload together with the recruiter slug
    pub async fn submit_application(
        &self,
        payload: &SubmissionPayload,
        recruiter_slug: &str,
    ) -> Result<Value, ApiError> {
        let mut body = payload.clone();
        body.insert(
            "recruiterSlug".to_string(),
            Value::String(recruiter_slug.to_string()),
        );

        let url = format!("{}{}", self.base_url, POSTULATION_ENDPOINT);
        info!("Submitting postulation for recruiter {} to {}", recruiter_slug, url);

        let request = self.authorize(self.client.post(&url), self.lang).json(&body);
        let response = request.send().await?;
        let response = self.check_status(response, self.lang).await?;

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        // Success bodies are informational; non-JSON text is kept as a string
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    /// Job description by code; the backend may answer with a one-element list
    pub async fn find_job(&self, code: &str, lang: Lang) -> Result<JobDescription, ApiError> {
        let request = self
            .get(JOB_DESCRIPTION_ENDPOINT, lang)
            .query(&[("code", code)]);
        let value: Value = self.fetch_json(request, "job description", lang).await?;

        let job = match value {
            Value::Array(items) => items.into_iter().next(),
            Value::Null => None,
            other => Some(other),
        }
        .ok_or_else(|| ApiError::JobNotFound {
            code: code.to_string(),
        })?;

        serde_json::from_value(job).map_err(|source| ApiError::Decode {
            what: "job description",
            source,
        })
    }

    fn get(&self, endpoint: &str, lang: Lang) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET {}", url);
        self.authorize(self.client.get(url), lang)
    }

    fn authorize(&self, request: RequestBuilder, lang: Lang) -> RequestBuilder {
        let request = request.header("Accept-Language", lang.code());
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn fetch_json<R>(
        &self,
        request: RequestBuilder,
        what: &'static str,
        lang: Lang,
    ) -> Result<R, ApiError>
    where
        R: DeserializeOwned,
    {
        let response = request.send().await?;
        let response = self.check_status(response, lang).await?;

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|source| {
            error!("Failed to decode {} response: {}", what, text);
            ApiError::Decode { what, source }
        })
    }

    async fn check_status(&self, response: Response, lang: Lang) -> Result<Response, ApiError> {
        let status = response.status();
        debug!("Response status: {}", status);
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        error!("Backend error {}: {}", status, error_text);
        Err(ApiError::Backend {
            status,
            body: BackendMessage::parse(&error_text, lang),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_prefers_backend() {
        let err = ApiError::Backend {
            status: StatusCode::BAD_REQUEST,
            body: BackendMessage {
                message: Some("Email already applied".to_string()),
                details: Vec::new(),
            },
        };
        assert_eq!(err.user_message("fallback"), "Email already applied");
        assert_eq!(err.status(), Some(StatusCode::BAD_REQUEST));

        let inactive = ApiError::RecruiterInactive {
            slug: "julieta".to_string(),
        };
        assert_eq!(inactive.user_message("fallback"), "fallback");
    }

    #[test]
    fn test_base_url_is_trimmed() {
        let config = AppConfig::with_base_url("http://localhost:3001/");
        let client = ApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3001");
        assert_eq!(client.lang(), Lang::Es);
    }
}
