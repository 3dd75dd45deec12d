//! Client configuration.

use crate::error::{AuthError, Result};

/// Production endpoint of the BaseBase identity service.
pub const DEFAULT_ENDPOINT: &str = "https://app.basebase.us/graphql";

/// Connection settings for the identity service.
#[derive(Debug, Clone)]
pub struct Config {
    /// GraphQL endpoint.
    pub endpoint: String,
    /// Project/tenant the sign-in is scoped to. Required; never user input.
    pub project_id: String,
}

impl Config {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            project_id: project_id.into(),
        }
    }

    /// Point at a non-production endpoint (staging, local stack).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Load from environment variables: `BASEBASE_PROJECT` (required) and
    /// `BASEBASE_ENDPOINT` (optional, defaults to production).
    pub fn from_env() -> Result<Self> {
        let project_id = std::env::var("BASEBASE_PROJECT")
            .map_err(|_| AuthError::Config("BASEBASE_PROJECT must be set".into()))?;
        let endpoint = std::env::var("BASEBASE_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        Ok(Self {
            endpoint,
            project_id,
        })
    }
}
