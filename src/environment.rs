// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::i18n::Lang;

pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";
pub const DEFAULT_UPLOAD_BASE_URL: &str = "https://res.cloudinary.com/dquhriqz3/image/upload";
pub const DEFAULT_FORM_VIEW: &str = "RecruiterFormWebView";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Application configuration, resolved once at startup and handed to the client
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub api_base_url: String,
    /// Bearer credential sent with every request
    pub api_token: Option<String>,
    pub lang: Lang,
    pub upload_base_url: String,
    pub form_view: String,
    pub timeout_seconds: u64,
    pub log_file: Option<PathBuf>,
}

/// One environment section of `config.yaml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigSection {
    api_base_url: Option<String>,
    api_token: Option<String>,
    lang: Option<String>,
    upload_base_url: Option<String>,
    form_view: Option<String>,
    timeout_seconds: Option<u64>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: ConfigSection,
    #[serde(default)]
    production: ConfigSection,
}

impl AppConfig {
    /// Load `config.yaml` (or the given path) and apply environment overrides.
    ///
    /// The default file is optional; an explicitly requested one must exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let content = match path {
            Some(path) => Some(
                std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
            ),
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if default_path.exists() {
                    Some(
                        std::fs::read_to_string(&default_path)
                            .context("Failed to read config.yaml")?,
                    )
                } else {
                    None
                }
            }
        };

        Self::resolve(content.as_deref(), &environment, |key| std::env::var(key).ok())
    }

    fn get_environment() -> String {
        std::env::var("RECRUITER_FORM_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    /// Merge file section and environment lookups into a complete configuration
    pub fn resolve<F>(yaml: Option<&str>, environment: &str, env: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file: ConfigFile = match yaml {
            Some(content) => {
                serde_yaml::from_str(content).context("Failed to parse configuration file")?
            }
            None => ConfigFile::default(),
        };

        let section = match environment {
            "production" => file.production,
            _ => file.local,
        };

        let api_base_url = env("API_BASE_URL")
            .or(section.api_base_url)
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .context("API base URL not configured (set API_BASE_URL or api_base_url in config.yaml)")?;

        let timeout_seconds = match env("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .context("HTTP_TIMEOUT_SECS must be a whole number of seconds")?,
            None => section.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_base_url,
            api_token: env("API_TOKEN")
                .or(section.api_token)
                .filter(|token| !token.trim().is_empty()),
            lang: Lang::parse(env("APP_LANG").or(section.lang).as_deref()),
            upload_base_url: env("UPLOAD_BASE_URL")
                .or(section.upload_base_url)
                .unwrap_or_else(|| DEFAULT_UPLOAD_BASE_URL.to_string()),
            form_view: env("FORM_VIEW")
                .or(section.form_view)
                .unwrap_or_else(|| DEFAULT_FORM_VIEW.to_string()),
            timeout_seconds,
            log_file: env("LOG_FILE").map(PathBuf::from).or(section.log_file),
        })
    }

    /// Configuration pointing at a given base URL with defaults everywhere else
    pub fn with_base_url(api_base_url: &str) -> Self {
        Self {
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            api_token: None,
            lang: Lang::default(),
            upload_base_url: DEFAULT_UPLOAD_BASE_URL.to_string(),
            form_view: DEFAULT_FORM_VIEW.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            log_file: None,
        }
    }

    pub fn with_token(mut self, token: &str) -> Self {
        self.api_token = Some(token.to_string());
        self
    }

    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }
}
