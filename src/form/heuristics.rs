// src/form/heuristics.rs
//! Semantic role detection for remotely configured fields.
//!
//! The schema carries free-form names, so roles are inferred by matching
//! substrings of the internal field name and the backend key (lowercased).
//! An explicit `role` on the schema entry always wins.

use crate::types::{FieldRole, FieldSchema, FieldType};

const ROLE_CODE_MARKERS: [&str; 5] = [
    "role code",
    "recruitment role",
    "rol al que aplica",
    "rolalqueaplica",
    "rolecode",
];
const PHONE_MARKERS: [&str; 5] = ["phone", "telefono", "teléfono", "celular", "whatsapp"];
const SALARY_MARKERS: [&str; 3] = ["salary", "salario", "salarial"];
const AVAILABILITY_MARKERS: [&str; 4] = ["availability", "disponibilidad", "whentostart", "when to start"];
const REASON_MARKERS: [&str; 5] = ["whychange", "why change", "reason", "motivo", "por qué"];
const COUNTRY_NAMES: [&str; 3] = ["country", "pais", "país"];

/// Inference precedence for the single role a field is rendered and mapped by
const ROLE_PRECEDENCE: [FieldRole; 13] = [
    FieldRole::RecruiterSlug,
    FieldRole::Cv,
    FieldRole::Recruiter,
    FieldRole::RoleCode,
    FieldRole::Linkedin,
    FieldRole::Phone,
    FieldRole::Salary,
    FieldRole::Availability,
    FieldRole::Reason,
    FieldRole::Country,
    FieldRole::TechStack,
    FieldRole::Stack,
    FieldRole::PersonName,
];

impl FieldSchema {
    /// Explicit role when the schema tags one, otherwise inferred from names
    pub fn role(&self) -> FieldRole {
        self.role.unwrap_or_else(|| infer_role(self))
    }

    /// Whether the rules of `role` apply to this field.
    ///
    /// An untagged field can match several heuristics at once (e.g. a name
    /// mentioning both availability and a reason); validation runs all of them.
    pub fn has_role(&self, role: FieldRole) -> bool {
        match self.role {
            Some(explicit) => explicit == role,
            None => matches_role(self, role),
        }
    }
}

/// First matching role in precedence order, `Generic` when nothing matches
pub fn infer_role(field: &FieldSchema) -> FieldRole {
    ROLE_PRECEDENCE
        .into_iter()
        .find(|role| matches_role(field, *role))
        .unwrap_or(FieldRole::Generic)
}

/// Name/backend-key heuristic for one role
pub fn matches_role(field: &FieldSchema, role: FieldRole) -> bool {
    let name = field.field_name.to_lowercase();
    let backend = field.backend_field.to_lowercase();
    let any = |pred: &dyn Fn(&str) -> bool| pred(&name) || pred(&backend);
    let contains_any = |markers: &[&str]| any(&|s: &str| markers.iter().any(|m| s.contains(m)));

    match role {
        FieldRole::RecruiterSlug => field.field_name == "recruiterSlug",
        FieldRole::Cv => {
            field.field_type == FieldType::File
                || any(&|s: &str| s == "cv" || s.contains("curriculum"))
        }
        FieldRole::Recruiter => any(&|s: &str| s == "recruiter"),
        FieldRole::RoleCode => contains_any(&ROLE_CODE_MARKERS),
        FieldRole::Linkedin => contains_any(&["linkedin"]),
        FieldRole::Phone => contains_any(&PHONE_MARKERS),
        FieldRole::Salary => contains_any(&SALARY_MARKERS),
        FieldRole::Availability => contains_any(&AVAILABILITY_MARKERS),
        FieldRole::Reason => contains_any(&REASON_MARKERS),
        FieldRole::Country => any(&|s: &str| COUNTRY_NAMES.contains(&s)),
        FieldRole::TechStack => contains_any(&["stack"]) && contains_any(&["tech"]),
        FieldRole::Stack => contains_any(&["stack"]) && !contains_any(&["tech"]),
        FieldRole::PersonName => any(&is_person_name),
        FieldRole::Generic => false,
    }
}

/// Contains "name"/"nombre" but is not a company or user name
fn is_person_name(name: &str) -> bool {
    (name.contains("name") || name.contains("nombre"))
        && !name.contains("company")
        && !name.contains("user")
}
