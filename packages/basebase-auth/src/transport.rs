//! Remote operations against the identity service.
//!
//! [`AuthTransport`] is the seam the session manager calls through;
//! [`GraphqlTransport`] is the production implementation. No retries live
//! here: every failure goes straight back to the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{AuthError, Result};
use crate::graphql::{ClientError, GraphqlClient};
use crate::phone::PhoneNumber;
use crate::types::{Session, UserProfile};

// ============================================================================
// GraphQL documents
// ============================================================================

pub const REQUEST_CODE: &str = r#"
  mutation RequestCode($phone: String!, $name: String!) {
    requestCode(phone: $phone, name: $name)
  }
"#;

pub const VERIFY_CODE: &str = r#"
  mutation VerifyCode($phone: String!, $code: String!, $projectId: String!) {
    verifyCode(phone: $phone, code: $code, projectId: $projectId) {
      token
      user {
        id
        name
        phone
        profileImageUrl
      }
    }
  }
"#;

pub const GET_CURRENT_USER: &str = r#"
  query GetCurrentUser {
    me {
      id
      name
      phone
      profileImageUrl
    }
  }
"#;

// ============================================================================
// Transport seam
// ============================================================================

/// The three remote operations the session manager needs.
#[async_trait]
pub trait AuthTransport: Send + Sync {
    /// Ask the service to send a one-time code to `phone`, associating
    /// `name` with the attempt.
    async fn request_code(&self, name: &str, phone: &PhoneNumber) -> Result<()>;

    /// Exchange a one-time code for a bearer token and profile.
    async fn verify_code(&self, phone: &PhoneNumber, code: &str) -> Result<Session>;

    /// Validate a bearer token and fetch the profile it belongs to.
    async fn current_user(&self, token: &str) -> Result<UserProfile>;
}

/// [`AuthTransport`] over the BaseBase GraphQL API.
pub struct GraphqlTransport {
    client: GraphqlClient,
    project_id: String,
}

impl GraphqlTransport {
    /// Build a transport from configuration.
    ///
    /// Fails with [`AuthError::Config`] when the project id is empty, so a
    /// misconfigured caller finds out before any network call happens.
    pub fn new(config: &Config) -> Result<Self> {
        if config.project_id.trim().is_empty() {
            return Err(AuthError::Config("project id must not be empty".into()));
        }

        Ok(Self {
            client: GraphqlClient::new(config.endpoint.clone()),
            project_id: config.project_id.clone(),
        })
    }
}

/// Map a GraphQL client failure onto the uniform remote error.
fn remote_error(err: ClientError) -> AuthError {
    match err {
        // Structured messages come from the service and are user-displayable.
        ClientError::Graphql(message) => AuthError::Remote(message),
        // Transport-level failures get a generic message; detail goes to the log.
        other => {
            tracing::warn!(error = %other, "identity service call failed");
            AuthError::Remote("Could not reach the sign-in service".into())
        }
    }
}

#[async_trait]
impl AuthTransport for GraphqlTransport {
    async fn request_code(&self, name: &str, phone: &PhoneNumber) -> Result<()> {
        #[derive(Serialize)]
        struct Variables<'a> {
            phone: &'a PhoneNumber,
            name: &'a str,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            request_code: bool,
        }

        let response: Response = self
            .client
            .execute(REQUEST_CODE, Some(Variables { phone, name }), None)
            .await
            .map_err(remote_error)?;

        if !response.request_code {
            return Err(AuthError::Remote(
                "The service declined to send a code".into(),
            ));
        }

        tracing::debug!(phone = %phone, "verification code requested");
        Ok(())
    }

    async fn verify_code(&self, phone: &PhoneNumber, code: &str) -> Result<Session> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Variables<'a> {
            phone: &'a PhoneNumber,
            code: &'a str,
            project_id: &'a str,
        }

        #[derive(Deserialize)]
        #[serde(rename_all = "camelCase")]
        struct Response {
            verify_code: Session,
        }

        let response: Response = self
            .client
            .execute(
                VERIFY_CODE,
                Some(Variables {
                    phone,
                    code,
                    project_id: &self.project_id,
                }),
                None,
            )
            .await
            .map_err(remote_error)?;

        tracing::debug!(phone = %phone, "code verified");
        Ok(response.verify_code)
    }

    async fn current_user(&self, token: &str) -> Result<UserProfile> {
        #[derive(Deserialize)]
        struct Response {
            me: UserProfile,
        }

        let response: Response = self
            .client
            .execute::<(), Response>(GET_CURRENT_USER, None, Some(token))
            .await
            .map_err(remote_error)?;

        Ok(response.me)
    }
}
