// src/i18n.rs
//! User-facing language selection and the localized messages shown for
//! validation and submission failures.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lang {
    #[default]
    Es,
    En,
}

impl Lang {
    /// Lenient parse, unknown or missing values fall back to Spanish
    pub fn parse(lang: Option<&str>) -> Self {
        match lang.map(|s| s.trim().to_lowercase()).as_deref() {
            Some("en") | Some("english") | Some("inglés") | Some("ingles") => Lang::En,
            Some(s) if s.starts_with("en-") || s.starts_with("en_") => Lang::En,
            _ => Lang::Es,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Lang::Es => "es",
            Lang::En => "en",
        }
    }

    pub fn is_spanish(&self) -> bool {
        matches!(self, Lang::Es)
    }
}

impl fmt::Display for Lang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl std::str::FromStr for Lang {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Lang::parse(Some(s)))
    }
}

// ===== Field validation messages =====

pub fn required(lang: Lang, label: &str) -> String {
    match lang {
        Lang::Es => format!("{} es requerido", label),
        Lang::En => format!("{} is required", label),
    }
}

pub fn length_between(lang: Lang, label: &str, min: usize, max: usize) -> String {
    match lang {
        Lang::Es => format!("{} debe tener entre {} y {} caracteres", label, min, max),
        Lang::En => format!("{} must be between {} and {} characters", label, min, max),
    }
}

pub fn name_characters(lang: Lang, label: &str) -> String {
    match lang {
        Lang::Es => format!(
            "{} solo puede contener letras, espacios, guiones y apóstrofes",
            label
        ),
        Lang::En => format!(
            "{} can only contain letters, spaces, hyphens and apostrophes",
            label
        ),
    }
}

pub fn invalid_linkedin(lang: Lang) -> String {
    match lang {
        Lang::Es => {
            "URL de LinkedIn inválida (ej: https://www.linkedin.com/in/tu-perfil)".to_string()
        }
        Lang::En => {
            "Invalid LinkedIn URL (e.g. https://www.linkedin.com/in/your-profile)".to_string()
        }
    }
}

pub fn min_chars(lang: Lang, label: &str, min: f64) -> String {
    match lang {
        Lang::Es => format!("{} debe tener al menos {} caracteres", label, min),
        Lang::En => format!("{} must have at least {} characters", label, min),
    }
}

pub fn max_chars(lang: Lang, label: &str, max: f64) -> String {
    match lang {
        Lang::Es => format!("{} debe tener máximo {} caracteres", label, max),
        Lang::En => format!("{} must have at most {} characters", label, max),
    }
}

pub fn min_value(lang: Lang, label: &str, min: f64) -> String {
    match lang {
        Lang::Es => format!("{} debe ser al menos {}", label, min),
        Lang::En => format!("{} must be at least {}", label, min),
    }
}

pub fn max_value(lang: Lang, label: &str, max: f64) -> String {
    match lang {
        Lang::Es => format!("{} debe ser máximo {}", label, max),
        Lang::En => format!("{} must be at most {}", label, max),
    }
}

pub fn not_a_number(lang: Lang, label: &str) -> String {
    match lang {
        Lang::Es => format!("{} debe ser un número válido", label),
        Lang::En => format!("{} must be a valid number", label),
    }
}

pub fn free_text_characters(lang: Lang, label: &str) -> String {
    match lang {
        Lang::Es => format!("{} contiene caracteres no permitidos", label),
        Lang::En => format!("{} contains characters that are not allowed", label),
    }
}

pub fn salary_negative(lang: Lang) -> String {
    match lang {
        Lang::Es => "La expectativa salarial no puede ser negativa".to_string(),
        Lang::En => "Salary expectation cannot be negative".to_string(),
    }
}

pub fn salary_too_high(lang: Lang, max: f64) -> String {
    match lang {
        Lang::Es => format!("La expectativa salarial no puede superar {}", max),
        Lang::En => format!("Salary expectation cannot exceed {}", max),
    }
}

pub fn invalid_email(lang: Lang) -> String {
    match lang {
        Lang::Es => "Email inválido".to_string(),
        Lang::En => "Invalid email".to_string(),
    }
}

pub fn invalid_url(lang: Lang) -> String {
    match lang {
        Lang::Es => "URL inválida".to_string(),
        Lang::En => "Invalid URL".to_string(),
    }
}

pub fn invalid_format(lang: Lang, label: &str) -> String {
    match lang {
        Lang::Es => format!("{} tiene un formato inválido", label),
        Lang::En => format!("{} has an invalid format", label),
    }
}

// ===== Payload and submission messages =====

pub fn salary_not_numeric(lang: Lang) -> String {
    match lang {
        Lang::Es => "La expectativa salarial debe ser un número válido.".to_string(),
        Lang::En => "Salary expectation must be a valid number.".to_string(),
    }
}

pub fn salary_out_of_range(lang: Lang) -> String {
    match lang {
        Lang::Es => "La expectativa salarial debe estar entre 0 y 1.000.000.".to_string(),
        Lang::En => "Salary expectation must be between 0 and 1,000,000.".to_string(),
    }
}

pub fn form_incomplete(lang: Lang) -> String {
    match lang {
        Lang::Es => "Por favor completa todos los campos requeridos".to_string(),
        Lang::En => "Please complete all required fields".to_string(),
    }
}

pub fn invalid_recruiter_url(lang: Lang) -> String {
    match lang {
        Lang::Es => "URL de recruiter no válida".to_string(),
        Lang::En => "Invalid recruiter URL".to_string(),
    }
}

pub fn form_unavailable(lang: Lang) -> String {
    match lang {
        Lang::Es => "Este formulario no está disponible actualmente".to_string(),
        Lang::En => "This form is not currently available".to_string(),
    }
}

pub fn config_fetch_failed(lang: Lang) -> String {
    match lang {
        Lang::Es => "Error al obtener configuración del formulario".to_string(),
        Lang::En => "Could not load the form configuration".to_string(),
    }
}

pub fn recruiter_fetch_failed(lang: Lang) -> String {
    match lang {
        Lang::Es => "Error al obtener datos del reclutador".to_string(),
        Lang::En => "Could not load recruiter data".to_string(),
    }
}

pub fn submission_failed(lang: Lang) -> String {
    match lang {
        Lang::Es => "Error al enviar la postulación".to_string(),
        Lang::En => "Could not submit the application".to_string(),
    }
}

pub fn job_fetch_failed(lang: Lang) -> String {
    match lang {
        Lang::Es => "Error al obtener la vacante".to_string(),
        Lang::En => "Could not load the job offer".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lang() {
        assert_eq!(Lang::parse(Some("en")), Lang::En);
        assert_eq!(Lang::parse(Some("English")), Lang::En);
        assert_eq!(Lang::parse(Some("en-US")), Lang::En);
        assert_eq!(Lang::parse(Some("es")), Lang::Es);
        assert_eq!(Lang::parse(Some("fr")), Lang::Es);
        assert_eq!(Lang::parse(None), Lang::Es);
    }

    #[test]
    fn test_required_message() {
        assert_eq!(required(Lang::En, "Email"), "Email is required");
        assert_eq!(required(Lang::Es, "Email"), "Email es requerido");
    }
}
