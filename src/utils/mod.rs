//! Utility functions

pub mod validation;

pub use validation::{validate_email, validate_nickname, validate_password, validate_url};
