//! User response schemas

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use super::{UserBase, UserDraft};
use crate::constants::{MIN_PAGE, MIN_PAGE_SIZE};
use crate::error::ValidationReport;
use crate::models::UserRole;
use crate::schemas::{validate_fields, FieldKind, FieldSpec, Schema};

const USER_RESPONSE_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("id", FieldKind::Uuid),
    FieldSpec::required("nickname", FieldKind::String),
    FieldSpec::required("email", FieldKind::String),
    FieldSpec::optional("first_name", FieldKind::String),
    FieldSpec::optional("last_name", FieldKind::String),
    FieldSpec::optional("bio", FieldKind::String),
    FieldSpec::optional("profile_picture_url", FieldKind::String),
    FieldSpec::optional("linkedin_profile_url", FieldKind::String),
    FieldSpec::optional("github_profile_url", FieldKind::String),
    FieldSpec::optional("role", FieldKind::Role),
    FieldSpec::optional("is_professional", FieldKind::Bool),
    FieldSpec::optional("last_login_at", FieldKind::Timestamp),
    FieldSpec::optional("created_at", FieldKind::Timestamp),
    FieldSpec::optional("updated_at", FieldKind::Timestamp),
];

const USER_LIST_FIELDS: &[FieldSpec] = &[
    FieldSpec::required("items", FieldKind::Array),
    FieldSpec::required("total", FieldKind::Integer),
    FieldSpec::required("page", FieldKind::Integer),
    FieldSpec::required("size", FieldKind::Integer),
];

/// User record as returned to clients, with server-assigned metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserResponse {
    id: Uuid,
    #[serde(flatten)]
    base: UserBase,
    role: UserRole,
    is_professional: bool,
    last_login_at: Option<DateTime<Utc>>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl UserResponse {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn base(&self) -> &UserBase {
        &self.base
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn is_professional(&self) -> bool {
        self.is_professional
    }

    pub fn last_login_at(&self) -> Option<DateTime<Utc>> {
        self.last_login_at
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }
}

impl Schema for UserResponse {
    const NAME: &'static str = "UserResponse";

    fn parse(fields: Map<String, Value>) -> Result<Self, ValidationReport> {
        validate_fields(
            ValidationReport::new(Self::NAME),
            fields,
            USER_RESPONSE_FIELDS,
            |mut draft: UserDraft| {
                let id = draft.id.take().unwrap_or_default();
                let role = draft.role.take().unwrap_or_default();
                let is_professional = draft.is_professional.take().unwrap_or(false);
                let last_login_at = draft.last_login_at.take();
                let created_at = draft.created_at.take();
                let updated_at = draft.updated_at.take();
                UserResponse {
                    id,
                    base: draft.into_base(),
                    role,
                    is_professional,
                    last_login_at,
                    created_at,
                    updated_at,
                }
            },
        )
    }
}

#[derive(Debug, Deserialize, Validate)]
struct UserListDraft {
    total: Option<u64>,

    #[validate(range(min = MIN_PAGE, message = "Page must be at least 1"))]
    page: Option<u64>,

    #[validate(range(min = MIN_PAGE_SIZE, message = "Page size must be at least 1"))]
    size: Option<u64>,
}

/// One page of users
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserListResponse {
    items: Vec<UserResponse>,
    total: u64,
    page: u64,
    size: u64,
}

impl UserListResponse {
    pub fn items(&self) -> &[UserResponse] {
        &self.items
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn page(&self) -> u64 {
        self.page
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

impl Schema for UserListResponse {
    const NAME: &'static str = "UserListResponse";

    fn parse(fields: Map<String, Value>) -> Result<Self, ValidationReport> {
        let mut nested = ValidationReport::new(Self::NAME);
        let mut items = Vec::new();

        let raw_items = match fields.get("items") {
            Some(Value::Array(raw)) => raw.clone(),
            _ => Vec::new(),
        };
        for (index, item) in raw_items.into_iter().enumerate() {
            let path = format!("items[{}]", index);
            match UserResponse::parse_value(item) {
                Ok(user) => items.push(user),
                Err(report) => nested.extend_nested(&path, report),
            }
        }

        let page = validate_fields(
            ValidationReport::new(Self::NAME),
            fields,
            USER_LIST_FIELDS,
            |draft: UserListDraft| {
                (
                    draft.total.unwrap_or_default(),
                    draft.page.unwrap_or(MIN_PAGE),
                    draft.size.unwrap_or(MIN_PAGE_SIZE),
                )
            },
        );

        match page {
            Ok((total, page, size)) if nested.is_empty() => Ok(UserListResponse {
                items,
                total,
                page,
                size,
            }),
            Ok(_) => Err(nested),
            Err(mut report) => {
                report.errors.extend(nested.errors);
                Err(report)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::messages;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    fn user_response_data() -> Value {
        json!({
            "id": "6f1c2b0e-3f7a-4c55-9b8e-2d1f0a9c7e11",
            "nickname": "john_doe_123",
            "email": "test@example.com",
            "first_name": "John",
            "last_name": "Doe",
            "role": "AUTHENTICATED",
            "is_professional": true,
            "last_login_at": "2024-05-01T12:30:00Z",
            "created_at": "2024-01-01T00:00:00+00:00",
        })
    }

    #[test]
    fn test_user_response_valid() {
        let user = UserResponse::parse_value(user_response_data()).unwrap();
        assert_eq!(
            user.id(),
            Uuid::parse_str("6f1c2b0e-3f7a-4c55-9b8e-2d1f0a9c7e11").unwrap()
        );
        assert_eq!(user.base().nickname(), "john_doe_123");
        assert_eq!(user.role(), UserRole::Authenticated);
        assert!(user.is_professional());
        assert_eq!(
            user.last_login_at().map(|t| t.to_rfc3339()),
            Some("2024-05-01T12:30:00+00:00".to_string())
        );
        assert_eq!(user.updated_at(), None);
    }

    #[test]
    fn test_user_response_defaults() {
        let user = UserResponse::parse(object(json!({
            "id": "6f1c2b0e-3f7a-4c55-9b8e-2d1f0a9c7e11",
            "nickname": "jane",
            "email": "jane@example.com",
        })))
        .unwrap();
        assert_eq!(user.role(), UserRole::Authenticated);
        assert!(!user.is_professional());
        assert_eq!(user.last_login_at(), None);
    }

    #[test]
    fn test_user_response_metadata_errors() {
        let mut data = object(user_response_data());
        data.insert("id".into(), json!("not-a-uuid"));
        data.insert("role".into(), json!("OWNER"));
        data.insert("last_login_at".into(), json!("yesterday"));

        let report = UserResponse::parse(data).unwrap_err();
        let fields: Vec<&str> = report.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["id", "role", "last_login_at"]);
        assert_eq!(report.errors[0].message, messages::EXPECTED_UUID);
        assert_eq!(report.errors[1].message, messages::EXPECTED_ROLE);
    }

    #[test]
    fn test_user_response_serializes_flat() {
        let user = UserResponse::parse_value(user_response_data()).unwrap();
        let rendered = serde_json::to_value(&user).unwrap();
        assert_eq!(rendered["nickname"], "john_doe_123");
        assert_eq!(rendered["role"], "AUTHENTICATED");
        assert!(rendered.get("base").is_none());
    }

    #[test]
    fn test_user_list_valid() {
        let list = UserListResponse::parse(object(json!({
            "items": [user_response_data()],
            "total": 1,
            "page": 1,
            "size": 10,
        })))
        .unwrap();
        assert_eq!(list.items().len(), 1);
        assert_eq!(list.total(), 1);
        assert_eq!(list.size(), 10);
    }

    #[test]
    fn test_user_list_reports_nested_paths() {
        let mut bad = object(user_response_data());
        bad.insert("email".into(), json!("broken"));

        let report = UserListResponse::parse(object(json!({
            "items": [user_response_data(), Value::Object(bad), 7],
            "total": 3,
            "page": 0,
            "size": 10,
        })))
        .unwrap_err();

        let fields: Vec<&str> = report.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["page", "items[1].email", "items[2].__all__"]);
        assert_eq!(report.errors[0].message, messages::PAGE_TOO_SMALL);
        assert_eq!(report.errors[1].message, messages::INVALID_EMAIL);
        assert_eq!(report.errors[2].message, messages::EXPECTED_OBJECT);
    }

    #[test]
    fn test_user_list_rejects_empty_page_size() {
        let report = UserListResponse::parse(object(json!({
            "items": [],
            "total": 0,
            "page": 1,
            "size": 0,
        })))
        .unwrap_err();
        assert_eq!(report.len(), 1);
        let error = report.field("size").unwrap();
        assert_eq!(error.message, messages::PAGE_SIZE_TOO_SMALL);
        assert_eq!(error.input, Some(json!(0)));
    }

    #[test]
    fn test_user_list_missing_fields() {
        let report = UserListResponse::parse(Map::new()).unwrap_err();
        assert_eq!(report.len(), 4);
        assert!(report
            .errors
            .iter()
            .all(|e| e.message == messages::FIELD_REQUIRED));
    }
}
