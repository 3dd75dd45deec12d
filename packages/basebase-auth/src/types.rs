//! Wire types for the identity service's GraphQL API.
//!
//! Field names mirror the GraphQL schema (camelCase on the wire).

use serde::{Deserialize, Serialize};

use crate::phone::PhoneNumber;

/// The identity service's view of an account.
///
/// Replaced wholesale on each fetch, never patched field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Stable, server-assigned id.
    pub id: String,
    pub name: String,
    pub phone: PhoneNumber,
    pub profile_image_url: Option<String>,
}

/// A bearer token plus the profile it authenticates.
///
/// Only the token is ever persisted; the profile is refetched on resume
/// rather than trusted from storage.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_profile_parses_camel_case() {
        let user: UserProfile = serde_json::from_str(
            r#"{"id":"user_1","name":"Ann","phone":"+14155551234","profileImageUrl":"https://cdn.example/a.png"}"#,
        )
        .unwrap();

        assert_eq!(user.id, "user_1");
        assert_eq!(user.phone.as_str(), "+14155551234");
        assert_eq!(user.profile_image_url.as_deref(), Some("https://cdn.example/a.png"));
    }

    #[test]
    fn test_missing_profile_image_is_none() {
        let user: UserProfile = serde_json::from_str(
            r#"{"id":"user_1","name":"Ann","phone":"+14155551234","profileImageUrl":null}"#,
        )
        .unwrap();

        assert!(user.profile_image_url.is_none());
    }

    #[test]
    fn test_session_parses_token_and_user() {
        let session: Session = serde_json::from_str(
            r#"{"token":"tok_123","user":{"id":"user_1","name":"Ann","phone":"+14155551234","profileImageUrl":null}}"#,
        )
        .unwrap();

        assert_eq!(session.token, "tok_123");
        assert_eq!(session.user.name, "Ann");
    }
}
