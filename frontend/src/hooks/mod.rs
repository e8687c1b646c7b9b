pub mod use_commons_form;

pub use use_commons_form::use_commons_form;
