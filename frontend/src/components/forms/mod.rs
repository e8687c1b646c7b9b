pub mod create_commons_form;
pub mod field_group;

pub use create_commons_form::{CreateCommonsForm, SubmitAction};
pub use field_group::FieldGroup;
