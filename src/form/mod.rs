// src/form/mod.rs
//! Schema-driven form: role heuristics, validation, state and widget choice

pub mod heuristics;
pub mod state;
pub mod validator;
pub mod widget;

pub use heuristics::infer_role;
pub use state::{FormErrorMap, FormState, FormValueMap};
pub use validator::validate_field;
pub use widget::{InputKind, OptionLists, Widget};
