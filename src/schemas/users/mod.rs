//! User schemas

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::models::UserRole;
use crate::utils::validation::{email_rule, nickname_rule, password_rule, url_rule};

/// Raw user fields after the shape check.
///
/// Fields a schema does not declare are stripped before deserialization, so
/// one draft serves every user record.
#[derive(Debug, Default, Deserialize, Validate)]
pub(crate) struct UserDraft {
    pub id: Option<Uuid>,

    #[validate(custom(function = "nickname_rule"))]
    pub nickname: Option<String>,

    #[validate(custom(function = "email_rule"))]
    pub email: Option<String>,

    #[validate(custom(function = "password_rule"))]
    pub password: Option<String>,

    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,

    #[validate(custom(function = "url_rule"))]
    pub profile_picture_url: Option<String>,

    #[validate(custom(function = "url_rule"))]
    pub linkedin_profile_url: Option<String>,

    #[validate(custom(function = "url_rule"))]
    pub github_profile_url: Option<String>,

    pub role: Option<UserRole>,
    pub is_professional: Option<bool>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl UserDraft {
    /// Profile fields shared by every full user record
    pub(crate) fn into_base(self) -> UserBase {
        UserBase {
            nickname: self.nickname.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            first_name: self.first_name,
            last_name: self.last_name,
            bio: self.bio,
            profile_picture_url: self.profile_picture_url,
            linkedin_profile_url: self.linkedin_profile_url,
            github_profile_url: self.github_profile_url,
        }
    }
}
