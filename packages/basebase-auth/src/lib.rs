//! Client-side session manager for BaseBase phone-number sign-in.
//!
//! Drives the phone + one-time-code login flow against the BaseBase identity
//! service: normalizes user-entered phone numbers, requests and verifies
//! codes over GraphQL, persists the bearer token, and silently resumes a
//! prior session at startup so a returning user is not re-prompted.
//!
//! The crate owns no rendering. UIs read [`AuthState`] (or subscribe to it)
//! and call the four operations on [`AuthSession`].
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use basebase_auth::{AuthSession, Config, FileTokenStore, GraphqlTransport};
//!
//! let config = Config::from_env()?;
//! let transport = Arc::new(GraphqlTransport::new(&config)?);
//! let store = Arc::new(FileTokenStore::new("/home/ann/.basebase/token"));
//!
//! let mut session = AuthSession::new(transport, store);
//! session.start().await?; // resumes a stored session if it still validates
//!
//! session.request_code("Ann", "(415) 555-1234").await?;
//! session.verify_code("123456").await?;
//! ```

pub mod config;
pub mod error;
pub mod graphql;
pub mod phone;
pub mod session;
pub mod store;
pub mod transport;
pub mod types;

pub use config::{Config, DEFAULT_ENDPOINT};
pub use error::{AuthError, Result};
pub use phone::PhoneNumber;
pub use session::{AuthSession, AuthState};
pub use store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use transport::{AuthTransport, GraphqlTransport};
pub use types::{Session, UserProfile};
