//! user-schemas - Input validation for user-management records
//!
//! This library validates the user-facing records of a user-management
//! application before they are constructed or updated: nicknames, email
//! addresses, passwords, profile URLs and login credentials.
//!
//! # Features
//!
//! - One entry point per record shape via [`Schema::parse`]
//! - Ordered rules per field, first violation only
//! - Errors from every failing field collected into a [`ValidationReport`]
//! - Immutable validated records with read-only accessors
//! - An Axum extractor for callers behind an HTTP layer
//!
//! # Architecture
//!
//! - **Schemas**: record shapes and their field declarations
//! - **Utils**: the pure validation rules
//! - **Models**: types shared between schemas
//! - **Error**: field errors, reports and their HTTP mapping

pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod models;
pub mod schemas;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use error::{AppError, AppResult, FieldError, ValidationReport};
pub use extract::Validated;
pub use schemas::{
    LoginRequest, Schema, UserBase, UserCreate, UserListResponse, UserResponse, UserUpdate,
};
