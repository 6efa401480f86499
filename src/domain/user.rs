//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// User domain entity
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i32,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial profile change requested by the account owner.
///
/// `current_password` gates the whole change; the other fields are applied
/// only when present and non-empty.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub current_password: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub new_password: Option<String>,
}

impl ProfileUpdate {
    /// Drop fields that were sent as empty strings.
    pub fn normalized(self) -> Self {
        fn non_empty(value: Option<String>) -> Option<String> {
            value.filter(|v| !v.is_empty())
        }

        Self {
            current_password: self.current_password,
            name: non_empty(self.name),
            email: non_empty(self.email),
            new_password: non_empty(self.new_password),
        }
    }
}

/// Field changes to persist for a user (password already hashed).
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

/// Public profile (safe to return to client)
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct UserResponse {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Alice")]
    pub name: String,
    #[schema(example = "a@x.com")]
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 7,
            email: "a@x.com".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            name: "Alice".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_user_serialization_skips_hash() {
        let json = serde_json::to_value(user()).unwrap();
        assert!(json.get("password_hash").is_none());
    }

    #[test]
    fn test_user_response_fields() {
        let json = serde_json::to_value(UserResponse::from(user())).unwrap();
        assert_eq!(json, serde_json::json!({"id": 7, "name": "Alice", "email": "a@x.com"}));
    }

    #[test]
    fn test_profile_update_normalized_drops_empty_fields() {
        let update = ProfileUpdate {
            current_password: Some("pw".to_string()),
            name: Some(String::new()),
            email: Some("b@x.com".to_string()),
            new_password: Some(String::new()),
        }
        .normalized();

        assert_eq!(update.current_password.as_deref(), Some("pw"));
        assert!(update.name.is_none());
        assert_eq!(update.email.as_deref(), Some("b@x.com"));
        assert!(update.new_password.is_none());
    }
}
