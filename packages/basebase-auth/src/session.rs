//! The authentication session state machine.
//!
//! Long-lived and cycling: `Initializing` resolves once at startup, then the
//! machine moves between `Unauthenticated`, `CodeRequested` and
//! `Authenticated` for the life of the client.

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{AuthError, Result};
use crate::phone::PhoneNumber;
use crate::store::TokenStore;
use crate::transport::AuthTransport;
use crate::types::UserProfile;

/// The single value UIs render from. Exactly one variant at any time.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthState {
    /// Construction state; resolved by [`AuthSession::start`].
    Initializing,
    /// No valid session. `error` carries the message of a failed
    /// `request_code`, if any.
    Unauthenticated { error: Option<String> },
    /// A one-time code was sent to `phone`; waiting for the user to enter it.
    CodeRequested {
        phone: PhoneNumber,
        error: Option<String>,
    },
    /// A validated session exists for `user`.
    Authenticated { user: UserProfile },
}

impl AuthState {
    /// Stable name for logging and error messages.
    pub fn name(&self) -> &'static str {
        match self {
            AuthState::Initializing => "initializing",
            AuthState::Unauthenticated { .. } => "unauthenticated",
            AuthState::CodeRequested { .. } => "code_requested",
            AuthState::Authenticated { .. } => "authenticated",
        }
    }
}

/// Drives a client through sign-in and resumes a prior session at startup.
///
/// State-changing operations take `&mut self`, so the borrow checker
/// enforces the serialization the flow needs: each transition reads then
/// writes the single state value and the single token slot, and interleaved
/// writes would corrupt which phone number a pending code belongs to. UIs
/// should disable the triggering control while a call is in flight.
pub struct AuthSession {
    transport: Arc<dyn AuthTransport>,
    store: Arc<dyn TokenStore>,
    state: watch::Sender<AuthState>,
}

impl AuthSession {
    /// Create a session manager in the `Initializing` state.
    pub fn new(transport: Arc<dyn AuthTransport>, store: Arc<dyn TokenStore>) -> Self {
        let (state, _) = watch::channel(AuthState::Initializing);
        Self {
            transport,
            store,
            state,
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> AuthState {
        self.state.borrow().clone()
    }

    /// Subscribe to state changes. Receivers observe the latest value.
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    fn transition(&mut self, to: AuthState) {
        let from = self.state.borrow().name();
        tracing::info!(from, to = to.name(), "auth state transition");
        self.state.send_replace(to);
    }

    fn invalid(&self, operation: &'static str) -> AuthError {
        AuthError::InvalidState {
            operation,
            state: self.state.borrow().name(),
        }
    }

    /// Resolve `Initializing`: silently resume the stored session if its
    /// token still validates, otherwise land in `Unauthenticated`.
    ///
    /// Resume failure is the normal expired-session path, not an error:
    /// nothing is surfaced to the user, and the stale token is cleared so a
    /// corrupt token cannot fail the same way on every launch.
    pub async fn start(&mut self) -> Result<()> {
        if !matches!(self.state(), AuthState::Initializing) {
            return Err(self.invalid("start"));
        }

        let Some(token) = self.store.load().await else {
            self.transition(AuthState::Unauthenticated { error: None });
            return Ok(());
        };

        match self.transport.current_user(&token).await {
            Ok(user) => self.transition(AuthState::Authenticated { user }),
            Err(err) => {
                tracing::debug!(error = %err, "stored session did not validate");
                self.store.clear().await;
                self.transition(AuthState::Unauthenticated { error: None });
            }
        }

        Ok(())
    }

    /// Normalize the phone number and ask the service to send a one-time
    /// code to it.
    pub async fn request_code(&mut self, name: &str, raw_phone: &str) -> Result<()> {
        if !matches!(self.state(), AuthState::Unauthenticated { .. }) {
            return Err(self.invalid("request_code"));
        }

        let phone = PhoneNumber::normalize(raw_phone);
        match self.transport.request_code(name, &phone).await {
            Ok(()) => {
                self.transition(AuthState::CodeRequested { phone, error: None });
                Ok(())
            }
            Err(err) => {
                self.transition(AuthState::Unauthenticated {
                    error: Some(err.to_string()),
                });
                Err(err)
            }
        }
    }

    /// Exchange the one-time code for a session.
    ///
    /// The token is persisted before the state update, so a verified session
    /// is never lost to a later step failing.
    pub async fn verify_code(&mut self, code: &str) -> Result<()> {
        let AuthState::CodeRequested { phone, .. } = self.state() else {
            return Err(self.invalid("verify_code"));
        };

        match self.transport.verify_code(&phone, code).await {
            Ok(session) => {
                self.store.save(&session.token).await;
                self.transition(AuthState::Authenticated { user: session.user });
                Ok(())
            }
            Err(err) => {
                self.transition(AuthState::CodeRequested {
                    phone,
                    error: Some(err.to_string()),
                });
                Err(err)
            }
        }
    }

    /// Abandon the pending code and return to the phone-entry step.
    pub fn back_to_phone(&mut self) -> Result<()> {
        if !matches!(self.state(), AuthState::CodeRequested { .. }) {
            return Err(self.invalid("back_to_phone"));
        }

        self.transition(AuthState::Unauthenticated { error: None });
        Ok(())
    }

    /// Drop the session and clear the stored token.
    pub async fn sign_out(&mut self) -> Result<()> {
        if !matches!(self.state(), AuthState::Authenticated { .. }) {
            return Err(self.invalid("sign_out"));
        }

        self.store.clear().await;
        self.transition(AuthState::Unauthenticated { error: None });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_names_are_stable() {
        assert_eq!(AuthState::Initializing.name(), "initializing");
        assert_eq!(
            AuthState::Unauthenticated { error: None }.name(),
            "unauthenticated"
        );
        assert_eq!(
            AuthState::CodeRequested {
                phone: PhoneNumber::normalize("4155551234"),
                error: None,
            }
            .name(),
            "code_requested"
        );
    }
}
