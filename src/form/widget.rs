// src/form/widget.rs
//! Input widget chosen for each schema entry, from its declared type and inferred role

use serde::Serialize;

use crate::types::{FieldRole, FieldSchema, FieldType, SelectOption};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Email,
    Url,
    Tel,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "widget", rename_all = "kebab-case")]
pub enum Widget {
    Hidden,
    CountryPicker,
    ReadOnly,
    RoleCode { read_only: bool },
    FileUpload,
    TextArea,
    Number { min: Option<f64>, max: Option<f64> },
    Select { options: Vec<SelectOption> },
    MultiSelect { options: Vec<SelectOption> },
    Input { kind: InputKind },
}

/// Remote option lists used by stack multi-selects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionLists {
    pub stack: Vec<SelectOption>,
    pub tech_stack: Vec<SelectOption>,
}

impl Widget {
    /// `role_code_locked` is true when a role code came from the URL or recruiter record
    pub fn for_field(field: &FieldSchema, lists: &OptionLists, role_code_locked: bool) -> Self {
        if field.field_name == "recruiterSlug" {
            return Widget::Hidden;
        }

        match field.role() {
            FieldRole::RecruiterSlug => return Widget::Hidden,
            FieldRole::Country => return Widget::CountryPicker,
            FieldRole::Recruiter => return Widget::ReadOnly,
            FieldRole::RoleCode => {
                return Widget::RoleCode {
                    read_only: role_code_locked,
                }
            }
            FieldRole::Cv => return Widget::FileUpload,
            // International-format phone input
            FieldRole::Phone => {
                return Widget::Input {
                    kind: InputKind::Tel,
                }
            }
            _ => {}
        }

        match field.field_type {
            FieldType::File => Widget::FileUpload,
            FieldType::Textarea => Widget::TextArea,
            FieldType::Number => {
                let bounds = field.validation.as_ref();
                Widget::Number {
                    min: bounds.and_then(|v| v.min),
                    max: bounds.and_then(|v| v.max),
                }
            }
            FieldType::Select => Widget::Select {
                options: field.options.clone(),
            },
            FieldType::MultiSelect => Widget::MultiSelect {
                options: multi_select_options(field, lists),
            },
            FieldType::Email => Widget::Input {
                kind: InputKind::Email,
            },
            FieldType::Url => Widget::Input {
                kind: InputKind::Url,
            },
            FieldType::Text => Widget::Input {
                kind: InputKind::Text,
            },
        }
    }

    pub fn is_full_width(&self) -> bool {
        matches!(
            self,
            Widget::FileUpload | Widget::TextArea | Widget::MultiSelect { .. }
        )
    }
}

/// Stack fields draw on the remote lists, everything else on its own options
fn multi_select_options(field: &FieldSchema, lists: &OptionLists) -> Vec<SelectOption> {
    let name = field.field_name.to_lowercase();
    let backend = field.backend_field.to_lowercase();

    if name.contains("stack") || backend.contains("stack") {
        if name.contains("tech") || backend.contains("tech") {
            lists.tech_stack.clone()
        } else {
            lists.stack.clone()
        }
    } else {
        field.options.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lists() -> OptionLists {
        OptionLists {
            stack: vec![SelectOption::new("Jira", "Jira")],
            tech_stack: vec![SelectOption::new("Rust", "Rust")],
        }
    }

    #[test]
    fn test_special_fields() {
        let lists = lists();
        assert_eq!(
            Widget::for_field(&FieldSchema::new("recruiterSlug", FieldType::Text), &lists, false),
            Widget::Hidden
        );
        assert_eq!(
            Widget::for_field(&FieldSchema::new("country", FieldType::Select), &lists, false),
            Widget::CountryPicker
        );
        assert_eq!(
            Widget::for_field(&FieldSchema::new("recruiter", FieldType::Text), &lists, false),
            Widget::ReadOnly
        );
        assert_eq!(
            Widget::for_field(&FieldSchema::new("rolAlQueAplica", FieldType::Text), &lists, true),
            Widget::RoleCode { read_only: true }
        );
        assert_eq!(
            Widget::for_field(&FieldSchema::new("cV", FieldType::Text), &lists, false),
            Widget::FileUpload
        );
    }

    #[test]
    fn test_multi_select_sources() {
        let lists = lists();
        let stack = FieldSchema::new("candidateStackPmTools", FieldType::MultiSelect);
        let tech = FieldSchema::new("techStack", FieldType::MultiSelect);
        let own = FieldSchema::new("languages", FieldType::MultiSelect)
            .with_options(vec![SelectOption::new("es", "Español")]);

        assert_eq!(
            Widget::for_field(&stack, &lists, false),
            Widget::MultiSelect {
                options: lists.stack.clone()
            }
        );
        assert_eq!(
            Widget::for_field(&tech, &lists, false),
            Widget::MultiSelect {
                options: lists.tech_stack.clone()
            }
        );
        assert_eq!(
            Widget::for_field(&own, &lists, false),
            Widget::MultiSelect {
                options: vec![SelectOption::new("es", "Español")]
            }
        );
    }

    #[test]
    fn test_plain_inputs() {
        let lists = lists();
        assert_eq!(
            Widget::for_field(&FieldSchema::new("email", FieldType::Email), &lists, false),
            Widget::Input {
                kind: InputKind::Email
            }
        );
        assert!(Widget::for_field(&FieldSchema::new("bio", FieldType::Textarea), &lists, false)
            .is_full_width());
    }

    #[test]
    fn test_phone_input() {
        let phone = FieldSchema::new("phoneNumber", FieldType::Text).with_backend_field("Teléfono");
        let widget = Widget::for_field(&phone, &lists(), false);
        assert_eq!(
            widget,
            Widget::Input {
                kind: InputKind::Tel
            }
        );
        assert_eq!(
            serde_json::to_value(&widget).unwrap(),
            serde_json::json!({ "widget": "input", "kind": "tel" })
        );
    }
}
