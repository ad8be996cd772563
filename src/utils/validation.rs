//! Input validation rules
//!
//! Each rule runs its checks in a fixed order and stops at the first one that
//! fails, so a field never reports more than one message.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use url::{Host, Url};
use validator::{ValidateEmail, ValidationError};

use crate::constants::{
    messages, ALLOWED_URL_PREFIXES, MAX_NICKNAME_LENGTH, MAX_URL_LENGTH, MIN_NICKNAME_LENGTH,
    MIN_PASSWORD_LENGTH, NICKNAME_PATTERN, RESERVED_NICKNAMES,
};

static NICKNAME_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(NICKNAME_PATTERN).expect("nickname pattern is a valid regex")
});

/// Validate nickname length, alphabet and reserved words
pub fn validate_nickname(nickname: &str) -> Result<(), &'static str> {
    let length = nickname.chars().count();
    if length < MIN_NICKNAME_LENGTH {
        return Err(messages::NICKNAME_TOO_SHORT);
    }
    if length > MAX_NICKNAME_LENGTH {
        return Err(messages::NICKNAME_TOO_LONG);
    }
    if !NICKNAME_REGEX.is_match(nickname) {
        return Err(messages::NICKNAME_CHARSET);
    }
    if is_reserved_nickname(nickname) {
        return Err(messages::NICKNAME_RESERVED);
    }
    Ok(())
}

/// Check whether a nickname is reserved for privileged roles
pub fn is_reserved_nickname(nickname: &str) -> bool {
    RESERVED_NICKNAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(nickname))
}

/// Validate password strength
pub fn validate_password(password: &str) -> Result<(), &'static str> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(messages::PASSWORD_TOO_SHORT);
    }
    if !password.chars().any(char::is_uppercase) {
        return Err(messages::PASSWORD_NO_UPPERCASE);
    }
    if !password.chars().any(char::is_lowercase) {
        return Err(messages::PASSWORD_NO_LOWERCASE);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Err(messages::PASSWORD_NO_DIGIT);
    }
    if !password.chars().any(is_special_char) {
        return Err(messages::PASSWORD_NO_SPECIAL);
    }
    Ok(())
}

fn is_special_char(c: char) -> bool {
    !c.is_alphanumeric() && !c.is_whitespace()
}

/// Validate email syntax, with a dotted domain and no stray dots in the local part
pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !email.validate_email() {
        return Err(messages::INVALID_EMAIL);
    }
    let (local, domain) = email.rsplit_once('@').ok_or(messages::INVALID_EMAIL)?;
    if local.starts_with('.') || local.ends_with('.') || local.contains("..") {
        return Err(messages::INVALID_EMAIL);
    }
    match Host::parse(domain) {
        Ok(Host::Domain(ascii)) if is_qualified_domain(&ascii) => Ok(()),
        _ => Err(messages::INVALID_EMAIL),
    }
}

/// Validate an absolute http(s) URL
pub fn validate_url(url: &str) -> Result<(), &'static str> {
    if url.chars().count() > MAX_URL_LENGTH {
        return Err(messages::URL_TOO_LONG);
    }
    if !ALLOWED_URL_PREFIXES
        .iter()
        .any(|prefix| url.starts_with(prefix))
    {
        return Err(messages::URL_BAD_PROTOCOL);
    }

    let parsed = Url::parse(url).map_err(|_| messages::URL_INVALID)?;
    match parsed.host() {
        Some(Host::Domain(domain)) if is_qualified_domain(domain) => Ok(()),
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => Ok(()),
        _ => Err(messages::URL_INVALID),
    }
}

/// A domain needs at least two labels, none of them empty
fn is_qualified_domain(domain: &str) -> bool {
    domain.contains('.')
        && domain.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

/// Validate that a credential was supplied at all
pub fn validate_present(value: &str, message: &'static str) -> Result<(), &'static str> {
    if value.is_empty() {
        return Err(message);
    }
    Ok(())
}

// =============================================================================
// validator adapters
// =============================================================================

fn to_validation_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub(crate) fn nickname_rule(nickname: &str) -> Result<(), ValidationError> {
    validate_nickname(nickname).map_err(|message| to_validation_error("nickname", message))
}

pub(crate) fn email_rule(email: &str) -> Result<(), ValidationError> {
    validate_email(email).map_err(|message| to_validation_error("email", message))
}

pub(crate) fn password_rule(password: &str) -> Result<(), ValidationError> {
    validate_password(password).map_err(|message| to_validation_error("password", message))
}

pub(crate) fn login_password_rule(password: &str) -> Result<(), ValidationError> {
    validate_present(password, messages::PASSWORD_REQUIRED)
        .map_err(|message| to_validation_error("required", message))
}

pub(crate) fn url_rule(url: &str) -> Result<(), ValidationError> {
    validate_url(url).map_err(|message| to_validation_error("url", message))
}
