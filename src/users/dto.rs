use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::users::repo_types::User;

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Request body for editing a user. Absent or empty fields keep their
/// previous values.
#[derive(Debug, Default, Deserialize)]
pub struct EditRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Public part of the user returned to clients. No hash, no audit fields.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: i64,
    pub email: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub updated_at: Option<OffsetDateTime>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edit_request_fields_default_to_absent() {
        let req: EditRequest = serde_json::from_str("{}").unwrap();
        assert!(req.email.is_none());
        assert!(req.password.is_none());

        let req: EditRequest =
            serde_json::from_str(r#"{"password":"newpw"}"#).unwrap();
        assert!(req.email.is_none());
        assert_eq!(req.password.as_deref(), Some("newpw"));
    }

    #[test]
    fn public_user_never_serializes_a_password() {
        let user = User {
            id: 7,
            email: "a@x.com".into(),
            password_hash: "$argon2id$v=19$secret".into(),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: None,
            deleted_at: None,
            created_by: None,
            updated_by: None,
            deleted_by: None,
        };
        let json = serde_json::to_string(&PublicUser::from(user)).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
        assert!(json.contains("a@x.com"));
    }
}
