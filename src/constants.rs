//! Application-wide constants
//!
//! This module contains the bounds, reserved words and message catalog used
//! by the validation rules. Constants are grouped by the field they govern.

// =============================================================================
// LOGGING DEFAULTS
// =============================================================================

/// Default tracing filter directive
pub const DEFAULT_RUST_LOG: &str = "info";

/// Default log output format (`text` or `json`)
pub const DEFAULT_LOG_FORMAT: &str = "text";

// =============================================================================
// NICKNAME
// =============================================================================

/// Nickname minimum length (characters)
pub const MIN_NICKNAME_LENGTH: usize = 3;

/// Nickname maximum length (characters)
pub const MAX_NICKNAME_LENGTH: usize = 30;

/// Allowed nickname alphabet
pub const NICKNAME_PATTERN: &str = r"^[A-Za-z0-9_-]+$";

/// Nicknames that regular users cannot register (matched case-insensitively)
pub const RESERVED_NICKNAMES: &[&str] = &[
    "admin",
    "administrator",
    "system",
    "root",
    "superuser",
    "moderator",
];

// =============================================================================
// PASSWORD
// =============================================================================

/// Minimum password length (characters)
pub const MIN_PASSWORD_LENGTH: usize = 8;

// =============================================================================
// URLS
// =============================================================================

/// Maximum length of any profile URL (characters)
pub const MAX_URL_LENGTH: usize = 2048;

/// Accepted URL schemes, with their separator
pub const ALLOWED_URL_PREFIXES: &[&str] = &["http://", "https://"];

// =============================================================================
// PAGINATION
// =============================================================================

/// Smallest valid page number
pub const MIN_PAGE: u64 = 1;

/// Smallest valid page size
pub const MIN_PAGE_SIZE: u64 = 1;

// =============================================================================
// MESSAGES
// =============================================================================

/// Human-readable messages returned by the validation rules.
///
/// Consumers may match on these strings, so they must not change.
pub mod messages {
    pub const NICKNAME_TOO_SHORT: &str = "Nickname must be at least 3 characters";
    pub const NICKNAME_TOO_LONG: &str = "Nickname must be at most 30 characters";
    pub const NICKNAME_CHARSET: &str =
        "Nickname can only contain letters, numbers, underscores, and hyphens";
    pub const NICKNAME_RESERVED: &str = "This nickname is reserved and cannot be used";

    pub const INVALID_EMAIL: &str = "value is not a valid email address";

    pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
    pub const PASSWORD_NO_UPPERCASE: &str = "Password must contain an uppercase letter";
    pub const PASSWORD_NO_LOWERCASE: &str = "Password must contain a lowercase letter";
    pub const PASSWORD_NO_DIGIT: &str = "Password must contain a number";
    pub const PASSWORD_NO_SPECIAL: &str = "Password must contain a special character";
    pub const PASSWORD_REQUIRED: &str = "Password is required";

    pub const URL_TOO_LONG: &str = "URL is too long";
    pub const URL_BAD_PROTOCOL: &str = "URL must start with http:// or https://";
    pub const URL_INVALID: &str = "Invalid URL format";

    pub const UPDATE_EMPTY: &str = "At least one field must be provided for update";

    pub const PAGE_TOO_SMALL: &str = "Page must be at least 1";
    pub const PAGE_SIZE_TOO_SMALL: &str = "Page size must be at least 1";

    pub const FIELD_REQUIRED: &str = "Field required";
    pub const EXPECTED_STRING: &str = "Input should be a valid string";
    pub const EXPECTED_BOOL: &str = "Input should be a valid boolean";
    pub const EXPECTED_INTEGER: &str = "Input should be a non-negative integer";
    pub const EXPECTED_ARRAY: &str = "Input should be a valid array";
    pub const EXPECTED_OBJECT: &str = "Input should be a valid object";
    pub const EXPECTED_UUID: &str = "Input should be a valid UUID";
    pub const EXPECTED_TIMESTAMP: &str = "Input should be a valid RFC 3339 datetime";
    pub const EXPECTED_ROLE: &str =
        "Input should be 'ANONYMOUS', 'AUTHENTICATED', 'MANAGER' or 'ADMIN'";
}

// =============================================================================
// SCHEMA NAMES
// =============================================================================

/// Identifiers accepted by the CLI `--schema` flag
pub mod schema_names {
    pub const USER_BASE: &str = "user-base";
    pub const USER_CREATE: &str = "user-create";
    pub const USER_UPDATE: &str = "user-update";
    pub const USER_RESPONSE: &str = "user-response";
    pub const USER_LIST_RESPONSE: &str = "user-list-response";
    pub const LOGIN_REQUEST: &str = "login-request";

    /// All schema identifiers
    pub const ALL: &[&str] = &[
        USER_BASE,
        USER_CREATE,
        USER_UPDATE,
        USER_RESPONSE,
        USER_LIST_RESPONSE,
        LOGIN_REQUEST,
    ];
}
