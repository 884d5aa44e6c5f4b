// src/jobs/posting.rs
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{json, Value};

use super::html::{plain_text, plain_text_list};
use super::JobDescription;
use crate::i18n::Lang;

const DEFAULT_COMPANY: &str = "LinkIT";
const DEFAULT_LOCATION: &str = "Remoto";
const DEFAULT_EMPLOYMENT_TYPE: &str = "FULL_TIME";
const ORGANIZATION_URL: &str = "https://www.linkit-hr.com";
const ORGANIZATION_LOGO: &str = "https://www.linkit-hr.com/Linkit-logo/linkit-logo-2024-blue.svg";
const META_DESCRIPTION_LEN: usize = 160;

/// A job description resolved to one language
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedJob {
    pub title: String,
    pub description: String,
    pub location: String,
    pub modality: String,
    pub stack: Vec<String>,
    pub about_us: String,
    pub about_client: String,
    pub responsabilities: Vec<String>,
    pub requirements: Vec<String>,
    pub nice_to_have: Vec<String>,
    pub benefits: Vec<String>,
}

impl LocalizedJob {
    /// English reads the `en` translation; scalar texts fall back to the
    /// Spanish originals, lists do not
    pub fn from_job(job: &JobDescription, lang: Lang) -> Self {
        let base = |v: &Option<String>| v.clone().unwrap_or_default();
        let list = |v: &Option<Vec<String>>| v.clone().unwrap_or_default();

        if lang.is_spanish() {
            return Self {
                title: base(&job.title),
                description: base(&job.description),
                location: base(&job.location),
                modality: base(&job.modality),
                stack: list(&job.stack),
                about_us: base(&job.about_us),
                about_client: base(&job.about_client),
                responsabilities: list(&job.responsabilities),
                requirements: list(&job.requirements),
                nice_to_have: list(&job.nice_to_have),
                benefits: list(&job.benefits),
            };
        }

        let en = job.en.clone().unwrap_or_default();
        let or_base = |translated: Option<String>, original: &Option<String>| {
            translated.or_else(|| original.clone()).unwrap_or_default()
        };
        let non_empty_or_base = |translated: Option<String>, original: &Option<String>| {
            translated
                .filter(|t| !t.is_empty())
                .or_else(|| original.clone())
                .unwrap_or_default()
        };

        Self {
            title: or_base(en.title, &job.title),
            description: or_base(en.description, &job.description),
            location: or_base(en.location, &job.location),
            modality: or_base(en.modality, &job.modality),
            stack: en.stack.unwrap_or_default(),
            about_us: non_empty_or_base(en.about_us, &job.about_us),
            about_client: non_empty_or_base(en.about_client, &job.about_client),
            responsabilities: en.responsabilities.unwrap_or_default(),
            requirements: en.requirements.unwrap_or_default(),
            nice_to_have: en.nice_to_have.unwrap_or_default(),
            benefits: en.benefits.unwrap_or_default(),
        }
    }
}

pub fn page_title(localized: &LocalizedJob, lang: Lang) -> String {
    if localized.title.is_empty() {
        match lang {
            Lang::Es => "Oferta de trabajo | LinkIT".to_string(),
            Lang::En => "Job offer | LinkIT".to_string(),
        }
    } else {
        format!("{} | LinkIT", localized.title)
    }
}

/// Plain-text description cut to 160 characters, or a generic blurb
pub fn meta_description(localized: &LocalizedJob, lang: Lang) -> String {
    let text = plain_text(&localized.description);
    if text.is_empty() {
        return match lang {
            Lang::Es => "Descubre esta oportunidad laboral en el sector IT con LinkIT. Aplica ahora y da el siguiente paso en tu carrera profesional.".to_string(),
            Lang::En => "Discover this IT job opportunity with LinkIT. Apply now and take the next step in your career.".to_string(),
        };
    }
    text.chars().take(META_DESCRIPTION_LEN).collect()
}

/// schema.org `JobPosting` document; `None` until the job has a title
pub fn job_posting_schema(
    job: &JobDescription,
    localized: &LocalizedJob,
    code: &str,
    now: DateTime<Utc>,
) -> Option<Value> {
    if localized.title.is_empty() {
        return None;
    }

    let date_posted = job
        .created_at
        .clone()
        .unwrap_or_else(|| iso(now - Duration::days(7)));
    let valid_through = job
        .expiration_date
        .clone()
        .unwrap_or_else(|| iso(now + Duration::days(30)));
    let location = if localized.location.is_empty() {
        DEFAULT_LOCATION
    } else {
        localized.location.as_str()
    };
    let location_type = if localized.location == DEFAULT_LOCATION {
        "TELECOMMUTE"
    } else {
        "ONSITE"
    };

    let mut schema = json!({
        "@context": "https://schema.org",
        "@type": "JobPosting",
        "title": localized.title,
        "description": plain_text(&localized.description),
        "datePosted": date_posted,
        "validThrough": valid_through,
        "employmentType": job.job_type.as_deref().unwrap_or(DEFAULT_EMPLOYMENT_TYPE),
        "hiringOrganization": {
            "@type": "Organization",
            "name": job.company.as_deref().unwrap_or(DEFAULT_COMPANY),
            "sameAs": ORGANIZATION_URL,
            "logo": ORGANIZATION_LOGO,
        },
        "jobLocation": {
            "@type": "Place",
            "address": {
                "@type": "PostalAddress",
                "addressCountry": location,
            },
        },
        "applicantLocationRequirements": {
            "@type": "Country",
            "name": location,
        },
        "jobLocationType": location_type,
        "identifier": {
            "@type": "PropertyValue",
            "name": "LinkIT Job Code",
            "value": code,
        },
    });

    if let Some(obj) = schema.as_object_mut() {
        if !localized.requirements.is_empty() {
            let requirements = plain_text_list(&localized.requirements);
            obj.insert("skills".to_string(), json!(requirements));
            obj.insert("qualifications".to_string(), json!(requirements));
        }
        if !localized.responsabilities.is_empty() {
            obj.insert(
                "responsibilities".to_string(),
                json!(plain_text_list(&localized.responsabilities)),
            );
        }
        if !localized.benefits.is_empty() {
            obj.insert(
                "jobBenefits".to_string(),
                json!(plain_text_list(&localized.benefits)),
            );
        }
    }

    Some(schema)
}

fn iso(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::JobTranslation;
    use chrono::TimeZone;

    fn job() -> JobDescription {
        JobDescription {
            code: Some("RB-101".to_string()),
            title: Some("Desarrollador Rust".to_string()),
            description: Some("<p>Buscamos <b>talento</b></p>".to_string()),
            location: Some("Remoto".to_string()),
            stack: Some(vec!["Rust".to_string()]),
            about_us: Some("Somos LinkIT".to_string()),
            requirements: Some(vec!["<li>3 años</li>".to_string()]),
            en: Some(JobTranslation {
                title: Some("Rust Developer".to_string()),
                about_us: Some(String::new()),
                requirements: Some(vec!["3 years".to_string()]),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_spanish_view() {
        let localized = LocalizedJob::from_job(&job(), Lang::Es);
        assert_eq!(localized.title, "Desarrollador Rust");
        assert_eq!(localized.stack, vec!["Rust"]);
        assert_eq!(localized.requirements, vec!["<li>3 años</li>"]);
    }

    #[test]
    fn test_english_view_fallbacks() {
        let localized = LocalizedJob::from_job(&job(), Lang::En);
        assert_eq!(localized.title, "Rust Developer");
        // Scalars fall back to Spanish, empty about-us included
        assert_eq!(localized.description, "<p>Buscamos <b>talento</b></p>");
        assert_eq!(localized.about_us, "Somos LinkIT");
        // Lists come only from the translation
        assert!(localized.stack.is_empty());
        assert_eq!(localized.requirements, vec!["3 years"]);
    }

    #[test]
    fn test_job_posting_schema() {
        let now = Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap();
        let job = job();
        let localized = LocalizedJob::from_job(&job, Lang::Es);
        let schema = job_posting_schema(&job, &localized, "RB-101", now).unwrap();

        assert_eq!(schema["title"], "Desarrollador Rust");
        assert_eq!(schema["description"], "Buscamos talento");
        assert_eq!(schema["datePosted"], "2025-03-03T12:00:00.000Z");
        assert_eq!(schema["validThrough"], "2025-04-09T12:00:00.000Z");
        assert_eq!(schema["employmentType"], "FULL_TIME");
        assert_eq!(schema["hiringOrganization"]["name"], "LinkIT");
        assert_eq!(schema["jobLocationType"], "TELECOMMUTE");
        assert_eq!(schema["skills"], "3 años");
        assert_eq!(schema["identifier"]["value"], "RB-101");
        assert!(schema.get("jobBenefits").is_none());
    }

    #[test]
    fn test_schema_requires_title() {
        let localized = LocalizedJob::default();
        assert!(job_posting_schema(&JobDescription::default(), &localized, "X", Utc::now()).is_none());
    }

    #[test]
    fn test_titles_and_meta() {
        let localized = LocalizedJob::from_job(&job(), Lang::Es);
        assert_eq!(page_title(&localized, Lang::Es), "Desarrollador Rust | LinkIT");
        assert_eq!(meta_description(&localized, Lang::Es), "Buscamos talento");

        let long = LocalizedJob {
            description: "a".repeat(300),
            ..Default::default()
        };
        assert_eq!(meta_description(&long, Lang::En).chars().count(), 160);
        assert!(meta_description(&LocalizedJob::default(), Lang::En).starts_with("Discover"));
    }
}
