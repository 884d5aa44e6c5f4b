// src/types/recruiter.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecruiterData {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    pub url_slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recruitment_role_code: Option<String>,
}

impl RecruiterData {
    /// "<name> <lastName>" when a last name is present, otherwise the name
    pub fn full_name(&self) -> String {
        match self.last_name.as_deref().map(str::trim) {
            Some(last) if !last.is_empty() => format!("{} {}", self.name, last).trim().to_string(),
            _ => self.name.trim().to_string(),
        }
    }
}

/// Entry of the stack / tech-stack option lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionItem {
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_full_name() {
        let mut recruiter: RecruiterData = serde_json::from_value(json!({
            "id": "rec1",
            "name": "Julieta",
            "lastName": "Gómez",
            "urlSlug": "julieta",
            "active": true
        }))
        .unwrap();
        assert_eq!(recruiter.full_name(), "Julieta Gómez");

        recruiter.last_name = Some("  ".to_string());
        assert_eq!(recruiter.full_name(), "Julieta");
    }
}
