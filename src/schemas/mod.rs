//! Validation schemas
//!
//! Every record shape is built through [`Schema::parse`], which runs the same
//! three stages:
//!
//! 1. **Shape**: required fields are present and every present field has the
//!    expected JSON type. Fields failing here are dropped from later stages.
//! 2. **Rules**: the remaining fields are deserialized into a private draft
//!    struct and checked with `validator`. Each field carries one ordered rule
//!    function, so it reports at most one message.
//! 3. **Build**: if nothing was reported, the draft becomes the immutable
//!    public record.
//!
//! Errors from all fields are collected into one [`ValidationReport`].

pub mod users;

use chrono::DateTime;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use uuid::Uuid;
use validator::Validate;

use crate::constants::messages;
use crate::error::{AppResult, ValidationReport};
use crate::models::UserRole;

pub use users::*;

/// Field name used for errors that concern the record as a whole
pub const ROOT_FIELD: &str = "__all__";

/// A record that can only be obtained by validating raw input
pub trait Schema: Sized {
    /// Record name shown in reports
    const NAME: &'static str;

    /// Validate a mapping of field names to raw values
    fn parse(fields: Map<String, Value>) -> Result<Self, ValidationReport>;

    /// Validate an arbitrary JSON value, which must be an object
    fn parse_value(value: Value) -> Result<Self, ValidationReport> {
        match value {
            Value::Object(fields) => Self::parse(fields),
            other => {
                let mut report = ValidationReport::new(Self::NAME);
                report.push(ROOT_FIELD, messages::EXPECTED_OBJECT, Some(other));
                Err(report)
            }
        }
    }

    /// Validate a JSON document
    fn parse_json(input: &str) -> AppResult<Self> {
        let value: Value = serde_json::from_str(input)?;
        Ok(Self::parse_value(value)?)
    }
}

/// Expected JSON shape of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldKind {
    String,
    Bool,
    Integer,
    Array,
    Uuid,
    Timestamp,
    Role,
}

impl FieldKind {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Bool => value.is_boolean(),
            Self::Integer => value.is_u64(),
            Self::Array => value.is_array(),
            Self::Uuid => value
                .as_str()
                .is_some_and(|s| Uuid::parse_str(s).is_ok()),
            Self::Timestamp => value
                .as_str()
                .is_some_and(|s| DateTime::parse_from_rfc3339(s).is_ok()),
            Self::Role => serde_json::from_value::<UserRole>(value.clone()).is_ok(),
        }
    }

    fn mismatch_message(self) -> &'static str {
        match self {
            Self::String => messages::EXPECTED_STRING,
            Self::Bool => messages::EXPECTED_BOOL,
            Self::Integer => messages::EXPECTED_INTEGER,
            Self::Array => messages::EXPECTED_ARRAY,
            Self::Uuid => messages::EXPECTED_UUID,
            Self::Timestamp => messages::EXPECTED_TIMESTAMP,
            Self::Role => messages::EXPECTED_ROLE,
        }
    }
}

/// Declared field of a schema
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Never echo the value back
    pub redacted: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            redacted: false,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            redacted: false,
        }
    }

    pub const fn redacted(self) -> Self {
        Self {
            redacted: true,
            ..self
        }
    }
}

/// Report shape errors and strip the offending fields from `input`.
///
/// Nulls are treated as absent. Unknown fields are dropped.
fn check_shape(
    report: &mut ValidationReport,
    mut input: Map<String, Value>,
    fields: &[FieldSpec],
) -> Map<String, Value> {
    let mut accepted = Map::new();
    for spec in fields {
        match input.remove(spec.name) {
            None | Some(Value::Null) => {
                if spec.required {
                    report.push(spec.name, messages::FIELD_REQUIRED, None);
                }
            }
            Some(value) if spec.kind.accepts(&value) => {
                accepted.insert(spec.name.to_string(), value);
            }
            Some(value) => {
                let echoed = (!spec.redacted).then_some(value);
                report.push(spec.name, spec.kind.mismatch_message(), echoed);
            }
        }
    }
    accepted
}

/// Run the shape and rule stages, then `build` the record if nothing failed.
///
/// `report` may already hold errors found by schema-specific prechecks.
pub(crate) fn validate_fields<D, T>(
    mut report: ValidationReport,
    input: Map<String, Value>,
    fields: &[FieldSpec],
    build: impl FnOnce(D) -> T,
) -> Result<T, ValidationReport>
where
    D: DeserializeOwned + Validate,
{
    let accepted = check_shape(&mut report, input, fields);

    let draft: D = match serde_json::from_value(Value::Object(accepted.clone())) {
        Ok(draft) => draft,
        Err(e) => {
            report.push(ROOT_FIELD, e.to_string(), None);
            return Err(rejected(report));
        }
    };

    if let Err(errors) = draft.validate() {
        let order: Vec<&str> = fields.iter().map(|f| f.name).collect();
        let redacted: Vec<&str> = fields
            .iter()
            .filter(|f| f.redacted)
            .map(|f| f.name)
            .collect();
        report.extend_from_validator(&errors, &accepted, &order, &redacted);
    }

    if !report.is_empty() {
        return Err(rejected(report));
    }

    tracing::debug!(schema = report.schema, "record validated");
    Ok(build(draft))
}

fn rejected(report: ValidationReport) -> ValidationReport {
    let fields: Vec<&str> = report.errors.iter().map(|e| e.field.as_str()).collect();
    tracing::warn!(
        schema = report.schema,
        errors = report.len(),
        fields = ?fields,
        "record rejected"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::optional("secret", FieldKind::String).redacted(),
        FieldSpec::optional("count", FieldKind::Integer),
        FieldSpec::optional("at", FieldKind::Timestamp),
    ];

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected object"),
        }
    }

    #[test]
    fn test_shape_reports_missing_and_mismatched() {
        let mut report = ValidationReport::new("Probe");
        let accepted = check_shape(
            &mut report,
            object(json!({"secret": 7, "count": -1, "at": "2024-01-01T00:00:00Z", "extra": 1})),
            FIELDS,
        );

        assert_eq!(report.len(), 3);
        assert_eq!(report.errors[0].field, "name");
        assert_eq!(report.errors[0].message, messages::FIELD_REQUIRED);
        assert_eq!(report.errors[1].field, "secret");
        assert_eq!(report.errors[1].input, None);
        assert_eq!(report.errors[2].field, "count");
        assert_eq!(report.errors[2].input, Some(json!(-1)));

        assert_eq!(accepted.len(), 1);
        assert!(accepted.contains_key("at"));
    }

    #[test]
    fn test_null_counts_as_absent() {
        let mut report = ValidationReport::new("Probe");
        let accepted = check_shape(
            &mut report,
            object(json!({"name": "x", "secret": null})),
            FIELDS,
        );
        assert!(report.is_empty());
        assert!(!accepted.contains_key("secret"));
    }

    #[test]
    fn test_bad_timestamp() {
        let mut report = ValidationReport::new("Probe");
        check_shape(
            &mut report,
            object(json!({"name": "x", "at": "yesterday"})),
            FIELDS,
        );
        assert_eq!(report.errors[0].message, messages::EXPECTED_TIMESTAMP);
    }
}
