//
//  marketplace-sdk
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! The marketplace authenticates API calls with an opaque token obtained from
//! `GET users/authenticate`. It travels in a custom header scheme:
//!
//! ```text
//! Authorization: token <opaque-string>
//! ```
//!
//! ## Module Structure
//!
//! - [`Credential`]: the token plus the user id it belongs to; immutable.
//! - [`Session`]: the per-client holder of the current credential.
//! - [`basic_authorization`]: the `Basic` header used once, during login.
//!
//! Each [`ApiClient`](crate::api::ApiClient) owns its own session. Two clients
//! in the same process never share credentials; use one client per identity.

use std::sync::{Arc, PoisonError, RwLock};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};

/// An API credential.
///
/// Deserialized straight from the authentication response, which may name the
/// token either `token` or `apiKey` and the user either `userId` or `id`.
///
/// # Example
///
/// ```rust
/// use marketplace_sdk::auth::Credential;
///
/// let credential: Credential = serde_json::from_str(r#"{"id": 12, "apiKey": "abc"}"#)?;
/// assert_eq!(credential.token(), "abc");
/// assert_eq!(credential.user_id(), Some(12));
/// assert_eq!(credential.authorization_header(), "token abc");
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    #[serde(alias = "apiKey")]
    token: String,

    #[serde(default, rename = "userId", alias = "id")]
    user_id: Option<u64>,
}

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user_id: None,
        }
    }

    /// A credential that also knows its owner.
    pub fn with_user_id(token: impl Into<String>, user_id: u64) -> Self {
        Self {
            token: token.into(),
            user_id: Some(user_id),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user_id(&self) -> Option<u64> {
        self.user_id
    }

    /// Value of the `Authorization` header for this credential.
    pub fn authorization_header(&self) -> String {
        format!("token {}", self.token)
    }
}

// Keep tokens out of logs.
impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("token", &"<redacted>")
            .field("user_id", &self.user_id)
            .finish()
    }
}

/// Holder of the current credential for one client.
///
/// Writes replace the whole `Arc`; reads hand out a clone of it. A call that
/// is already building its request keeps whatever credential it read, so a
/// concurrent [`Session::set`] only affects later calls. Last write wins.
#[derive(Debug, Default)]
pub struct Session {
    credential: RwLock<Option<Arc<Credential>>>,
}

impl Session {
    /// An anonymous session.
    pub fn new() -> Self {
        Self::default()
    }

    /// A session that starts out authenticated.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            credential: RwLock::new(Some(Arc::new(credential))),
        }
    }

    /// The current credential, if any.
    pub fn get(&self) -> Option<Arc<Credential>> {
        self.credential
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the current credential. `None` logs out.
    pub fn set(&self, credential: Option<Credential>) {
        let mut slot = self
            .credential
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *slot = credential.map(Arc::new);
    }

    pub fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}

/// Builds an HTTP `Basic` authorization header value.
///
/// Only the login call uses this; every other call carries the token.
pub fn basic_authorization(identifier: &str, secret: &str) -> String {
    let encoded = STANDARD.encode(format!("{}:{}", identifier, secret));
    format!("Basic {}", encoded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_from_token_response() {
        let credential: Credential = serde_json::from_str(r#"{"token":"abc"}"#).unwrap();
        assert_eq!(credential.token(), "abc");
        assert_eq!(credential.user_id(), None);
    }

    #[test]
    fn test_credential_from_api_key_response() {
        let credential: Credential =
            serde_json::from_str(r#"{"id": 7, "apiKey": "xyz"}"#).unwrap();
        assert_eq!(credential, Credential::with_user_id("xyz", 7));
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", Credential::new("super-secret"));
        assert!(!rendered.contains("super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_session_last_write_wins() {
        let session = Session::new();
        assert!(!session.is_authenticated());

        session.set(Some(Credential::new("first")));
        let held = session.get().unwrap();
        session.set(Some(Credential::new("second")));

        // The earlier reader keeps its snapshot.
        assert_eq!(held.token(), "first");
        assert_eq!(session.get().unwrap().token(), "second");

        session.set(None);
        assert!(session.get().is_none());
    }

    #[test]
    fn test_basic_authorization() {
        // "user:pass" in base64
        assert_eq!(basic_authorization("user", "pass"), "Basic dXNlcjpwYXNz");
    }
}
