//! User model

use serde::{Deserialize, Serialize};

/// Role assigned to a user account by the server
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Anonymous,
    #[default]
    Authenticated,
    Manager,
    Admin,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_wire_format() {
        let role: UserRole = serde_json::from_str("\"MANAGER\"").unwrap();
        assert_eq!(role, UserRole::Manager);
        assert_eq!(
            serde_json::to_string(&UserRole::Admin).unwrap(),
            "\"ADMIN\""
        );
        assert!(serde_json::from_str::<UserRole>("\"OWNER\"").is_err());
    }

    #[test]
    fn test_role_default() {
        assert_eq!(UserRole::default(), UserRole::Authenticated);
    }
}
