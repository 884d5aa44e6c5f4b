// src/cli.rs
use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::application::{ApplicationForm, FormRequest};
use crate::core::ApiClient;
use crate::environment::AppConfig;
use crate::form::{FormState, FormValueMap, OptionLists, Widget};
use crate::i18n::Lang;
use crate::jobs::html::list_items;
use crate::jobs::{html::plain_text, job_posting_schema, meta_description, page_title, LocalizedJob};
use crate::payload::{
    attach_cv, build_submission_payload, collect_cv_attachments, PayloadContext, UploadedFile,
};
use crate::types::FieldSchema;

#[derive(Parser)]
#[command(name = "recruiter-form")]
#[command(about = "Fill, validate and submit recruiter application forms")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// UI language for messages and Accept-Language (es, en)
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// Configuration file (defaults to ./config.yaml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print the ordered form schema with the widget used for each field
    Schema {
        #[arg(long)]
        view: Option<String>,
    },
    /// Look up a recruiter by slug
    Recruiter {
        slug: String,
        #[arg(long)]
        role_code: Option<String>,
    },
    /// Load a recruiter's form, fill it from a values file and submit it
    Apply {
        slug: String,
        /// JSON or YAML mapping of field name to value
        #[arg(long)]
        values: PathBuf,
        #[arg(long)]
        role_code: Option<String>,
        /// Public id of a CV already uploaded to the file CDN
        #[arg(long)]
        cv_public_id: Option<String>,
        #[arg(long, requires = "cv_public_id")]
        cv_name: Option<String>,
        /// Print the payload instead of sending it
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate values against a schema file and print the payload, offline
    Validate {
        #[arg(long)]
        schema: PathBuf,
        #[arg(long)]
        values: PathBuf,
        #[arg(long)]
        slug: Option<String>,
    },
    /// Job descriptions
    Jobs {
        #[command(subcommand)]
        command: JobsCommand,
    },
}

#[derive(Subcommand)]
pub enum JobsCommand {
    /// Show one job description by code
    Show {
        code: String,
        /// Print the schema.org JobPosting document instead
        #[arg(long)]
        json_ld: bool,
    },
}

impl Cli {
    pub fn resolve_lang(&self, config: &AppConfig) -> Lang {
        match self.lang.as_deref() {
            Some(lang) => Lang::parse(Some(lang)),
            None => config.lang,
        }
    }
}

/// Run a command. Only `validate` works without a configured backend.
pub async fn handle_command(cli: Cli, config: Option<AppConfig>) -> Result<()> {
    let lang = match &config {
        Some(config) => cli.resolve_lang(config),
        None => Lang::parse(cli.lang.as_deref()),
    };

    match cli.command {
        Command::Validate {
            schema,
            values,
            slug,
        } => validate_offline(&schema, &values, slug.as_deref(), lang)?,

        Command::Schema { view } => {
            let (config, client) = connect(config, lang)?;
            let view = view.unwrap_or_else(|| config.form_view.clone());
            let mut schema = client.get_form_config(&view, lang).await?;
            schema.sort_by_key(|field| field.order);

            let lists = OptionLists::default();
            let rows: Vec<Value> = schema
                .iter()
                .map(|field| {
                    json!({
                        "field": field,
                        "role": field.role(),
                        "widget": Widget::for_field(field, &lists, false),
                    })
                })
                .collect();
            print_json(&rows)?;
        }

        Command::Recruiter { slug, role_code } => {
            let (_, client) = connect(config, lang)?;
            let recruiter = client
                .get_recruiter_by_slug(&slug, role_code.as_deref())
                .await?;
            print_json(&recruiter)?;
        }

        Command::Apply {
            slug,
            values,
            role_code,
            cv_public_id,
            cv_name,
            dry_run,
        } => {
            let (config, client) = connect(config, lang)?;
            let mut request = FormRequest::new(&slug, &config.form_view).with_lang(lang);
            if let Some(code) = role_code.as_deref() {
                request = request.with_role_code(code);
            }

            let mut form = match ApplicationForm::load(&client, request).await {
                Ok(form) => form,
                Err(e) => {
                    error!("Failed to load form: {}", e);
                    anyhow::bail!(e.message(lang));
                }
            };
            form.set_values(read_values(&values)?);

            let upload = cv_public_id
                .as_deref()
                .map(|id| UploadedFile::new(id, cv_name.as_deref()));

            if dry_run {
                match form.build_payload(upload.as_ref(), &config.upload_base_url) {
                    Ok(payload) => print_json(&payload)?,
                    Err(e) => {
                        print_json(form.state().errors())?;
                        anyhow::bail!(e.message(lang));
                    }
                }
                return Ok(());
            }

            match form
                .submit(&client, upload.as_ref(), &config.upload_base_url)
                .await
            {
                Ok(response) => {
                    info!("Postulation created for {}", slug);
                    print_json(&response)?;
                }
                Err(e) => {
                    if !form.state().errors().is_empty() {
                        print_json(form.state().errors())?;
                    }
                    anyhow::bail!(e.message(lang));
                }
            }
        }

        Command::Jobs {
            command: JobsCommand::Show { code, json_ld },
        } => {
            let (_, client) = connect(config, lang)?;
            let job = client.find_job(&code, lang).await?;
            let localized = LocalizedJob::from_job(&job, lang);

            if json_ld {
                let document = job_posting_schema(&job, &localized, &code, Utc::now())
                    .context("Job description has no title")?;
                print_json(&document)?;
            } else {
                print_json(&json!({
                    "title": page_title(&localized, lang),
                    "metaDescription": meta_description(&localized, lang),
                    "location": localized.location,
                    "modality": localized.modality,
                    "stack": localized.stack,
                    "description": plain_text(&localized.description),
                    "responsabilities": list_items(&localized.responsabilities),
                    "requirements": list_items(&localized.requirements),
                    "niceToHave": list_items(&localized.nice_to_have),
                    "benefits": list_items(&localized.benefits),
                }))?;
            }
        }
    }

    Ok(())
}

/// Client for the commands that talk to the backend
fn connect(config: Option<AppConfig>, lang: Lang) -> Result<(AppConfig, ApiClient)> {
    let config = config.context("Backend configuration is required for this command")?;
    let client = ApiClient::new(&config)?.with_lang(lang);
    Ok((config, client))
}

fn validate_offline(
    schema_path: &Path,
    values_path: &Path,
    slug: Option<&str>,
    lang: Lang,
) -> Result<()> {
    let mut schema: Vec<FieldSchema> = read_document(schema_path)?;
    schema.sort_by_key(|field| field.order);

    let mut state = FormState::from_schema(&schema);
    for (field_name, value) in read_values(values_path)? {
        state.set_value(&field_name, value);
    }

    if !state.validate(&schema, lang) {
        print_json(state.errors())?;
        anyhow::bail!(crate::i18n::form_incomplete(lang));
    }

    let context = PayloadContext {
        recruiter_slug: slug,
        role_code: None,
    };
    let mut payload = build_submission_payload(state.values(), &schema, &context)
        .map_err(|e| anyhow::anyhow!(e.message(lang)))?;
    let attachments = collect_cv_attachments(state.values(), &schema, None, "");
    attach_cv(&mut payload, &attachments);

    print_json(&payload)
}

fn read_values(path: &Path) -> Result<FormValueMap> {
    read_document(path)
}

/// JSON by extension, YAML otherwise
fn read_document<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    let is_json = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    if is_json {
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
    } else {
        serde_yaml::from_str(&content).with_context(|| format!("Invalid YAML in {}", path.display()))
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_apply() {
        let cli = Cli::try_parse_from([
            "recruiter-form",
            "--lang",
            "en",
            "apply",
            "julieta",
            "--values",
            "values.yaml",
            "--cv-public-id",
            "abc",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(cli.lang.as_deref(), Some("en"));
        match cli.command {
            Command::Apply {
                slug,
                cv_public_id,
                dry_run,
                ..
            } => {
                assert_eq!(slug, "julieta");
                assert_eq!(cv_public_id.as_deref(), Some("abc"));
                assert!(dry_run);
            }
            _ => panic!("expected apply"),
        }
    }

    #[test]
    fn test_parse_jobs_show() {
        let cli = Cli::try_parse_from(["recruiter-form", "jobs", "show", "RB-1", "--json-ld"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Jobs {
                command: JobsCommand::Show { json_ld: true, .. }
            }
        ));
    }

    #[test]
    fn test_read_document_formats() {
        let dir = std::env::temp_dir().join(format!("recruiter-form-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();

        let json_path = dir.join("values.json");
        std::fs::write(&json_path, r#"{"nombre": "Ana", "stack": ["Rust"]}"#).unwrap();
        let values = read_values(&json_path).unwrap();
        assert_eq!(values["nombre"], "Ana");

        let yaml_path = dir.join("values.yaml");
        std::fs::write(&yaml_path, "nombre: Ana\nsalary: 50000\n").unwrap();
        let values = read_values(&yaml_path).unwrap();
        assert_eq!(values["salary"], 50000);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
