//! Domain models
//!
//! Types shared by several schemas.

pub mod user;

pub use user::*;
