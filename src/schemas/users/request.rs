//! User request schemas

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use validator::Validate;

use super::UserDraft;
use crate::constants::messages;
use crate::error::ValidationReport;
use crate::schemas::{validate_fields, FieldKind, FieldSpec, Schema, ROOT_FIELD};
use crate::utils::validation::{email_rule, login_password_rule};

const USER_BASE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("nickname", FieldKind::String),
    FieldSpec::required("email", FieldKind::String),
    FieldSpec::optional("first_name", FieldKind::String),
    FieldSpec::optional("last_name", FieldKind::String),
    FieldSpec::optional("bio", FieldKind::String),
    FieldSpec::optional("profile_picture_url", FieldKind::String),
    FieldSpec::optional("linkedin_profile_url", FieldKind::String),
    FieldSpec::optional("github_profile_url", FieldKind::String),
];

const USER_CREATE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("nickname", FieldKind::String),
    FieldSpec::required("email", FieldKind::String),
    FieldSpec::required("password", FieldKind::String).redacted(),
    FieldSpec::optional("first_name", FieldKind::String),
    FieldSpec::optional("last_name", FieldKind::String),
    FieldSpec::optional("bio", FieldKind::String),
    FieldSpec::optional("profile_picture_url", FieldKind::String),
    FieldSpec::optional("linkedin_profile_url", FieldKind::String),
    FieldSpec::optional("github_profile_url", FieldKind::String),
];

const USER_UPDATE_FIELDS: &[FieldSpec] = &[
    FieldSpec::optional("email", FieldKind::String),
    FieldSpec::optional("nickname", FieldKind::String),
    FieldSpec::optional("first_name", FieldKind::String),
    FieldSpec::optional("last_name", FieldKind::String),
    FieldSpec::optional("bio", FieldKind::String),
    FieldSpec::optional("profile_picture_url", FieldKind::String),
    FieldSpec::optional("linkedin_profile_url", FieldKind::String),
    FieldSpec::optional("github_profile_url", FieldKind::String),
];

const LOGIN_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("email", FieldKind::String),
    FieldSpec::required("password", FieldKind::String).redacted(),
];

/// Profile fields shared by every full user record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserBase {
    pub(super) nickname: String,
    pub(super) email: String,
    pub(super) first_name: Option<String>,
    pub(super) last_name: Option<String>,
    pub(super) bio: Option<String>,
    pub(super) profile_picture_url: Option<String>,
    pub(super) linkedin_profile_url: Option<String>,
    pub(super) github_profile_url: Option<String>,
}

impl UserBase {
    pub fn nickname(&self) -> &str {
        &self.nickname
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    pub fn profile_picture_url(&self) -> Option<&str> {
        self.profile_picture_url.as_deref()
    }

    pub fn linkedin_profile_url(&self) -> Option<&str> {
        self.linkedin_profile_url.as_deref()
    }

    pub fn github_profile_url(&self) -> Option<&str> {
        self.github_profile_url.as_deref()
    }
}

impl Schema for UserBase {
    const NAME: &'static str = "UserBase";

    fn parse(fields: Map<String, Value>) -> Result<Self, ValidationReport> {
        validate_fields(
            ValidationReport::new(Self::NAME),
            fields,
            USER_BASE_FIELDS,
            UserDraft::into_base,
        )
    }
}

/// Registration payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserCreate {
    #[serde(flatten)]
    base: UserBase,
    #[serde(skip_serializing)]
    password: String,
}

impl UserCreate {
    pub fn base(&self) -> &UserBase {
        &self.base
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl Schema for UserCreate {
    const NAME: &'static str = "UserCreate";

    fn parse(fields: Map<String, Value>) -> Result<Self, ValidationReport> {
        validate_fields(
            ValidationReport::new(Self::NAME),
            fields,
            USER_CREATE_FIELDS,
            |mut draft: UserDraft| {
                let password = draft.password.take().unwrap_or_default();
                UserCreate {
                    base: draft.into_base(),
                    password,
                }
            },
        )
    }
}

/// Partial profile update; absent fields are left unchanged
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nickname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    bio: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    profile_picture_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    linkedin_profile_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    github_profile_url: Option<String>,
}

impl UserUpdate {
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn nickname(&self) -> Option<&str> {
        self.nickname.as_deref()
    }

    pub fn first_name(&self) -> Option<&str> {
        self.first_name.as_deref()
    }

    pub fn last_name(&self) -> Option<&str> {
        self.last_name.as_deref()
    }

    pub fn bio(&self) -> Option<&str> {
        self.bio.as_deref()
    }

    pub fn profile_picture_url(&self) -> Option<&str> {
        self.profile_picture_url.as_deref()
    }

    pub fn linkedin_profile_url(&self) -> Option<&str> {
        self.linkedin_profile_url.as_deref()
    }

    pub fn github_profile_url(&self) -> Option<&str> {
        self.github_profile_url.as_deref()
    }

    /// Produce the profile that results from applying this update to `current`
    pub fn apply(&self, current: &UserBase) -> UserBase {
        fn pick(update: &Option<String>, current: &Option<String>) -> Option<String> {
            update.clone().or_else(|| current.clone())
        }

        UserBase {
            nickname: self
                .nickname
                .clone()
                .unwrap_or_else(|| current.nickname.clone()),
            email: self.email.clone().unwrap_or_else(|| current.email.clone()),
            first_name: pick(&self.first_name, &current.first_name),
            last_name: pick(&self.last_name, &current.last_name),
            bio: pick(&self.bio, &current.bio),
            profile_picture_url: pick(&self.profile_picture_url, &current.profile_picture_url),
            linkedin_profile_url: pick(&self.linkedin_profile_url, &current.linkedin_profile_url),
            github_profile_url: pick(&self.github_profile_url, &current.github_profile_url),
        }
    }
}

impl Schema for UserUpdate {
    const NAME: &'static str = "UserUpdate";

    fn parse(fields: Map<String, Value>) -> Result<Self, ValidationReport> {
        let mut report = ValidationReport::new(Self::NAME);
        let provided = USER_UPDATE_FIELDS
            .iter()
            .any(|spec| fields.get(spec.name).is_some_and(|v| !v.is_null()));
        if !provided {
            report.push(ROOT_FIELD, messages::UPDATE_EMPTY, None);
        }

        validate_fields(report, fields, USER_UPDATE_FIELDS, |draft: UserDraft| {
            UserUpdate {
                email: draft.email,
                nickname: draft.nickname,
                first_name: draft.first_name,
                last_name: draft.last_name,
                bio: draft.bio,
                profile_picture_url: draft.profile_picture_url,
                linkedin_profile_url: draft.linkedin_profile_url,
                github_profile_url: draft.github_profile_url,
            }
        })
    }
}

#[derive(Debug, Deserialize, Validate)]
struct LoginDraft {
    #[validate(custom(function = "email_rule"))]
    email: Option<String>,

    #[validate(custom(function = "login_password_rule"))]
    password: Option<String>,
}

/// Login credentials. Password strength is not checked here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    email: String,
    #[serde(skip_serializing)]
    password: String,
}

impl LoginRequest {
    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl Schema for LoginRequest {
    const NAME: &'static str = "LoginRequest";

    fn parse(fields: Map<String, Value>) -> Result<Self, ValidationReport> {
        validate_fields(
            ValidationReport::new(Self::NAME),
            fields,
            LOGIN_FIELDS,
            |draft: LoginDraft| LoginRequest {
                email: draft.email.unwrap_or_default(),
                password: draft.password.unwrap_or_default(),
            },
        )
    }
}
