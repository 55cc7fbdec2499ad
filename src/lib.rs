//
//  marketplace-sdk
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Marketplace SDK
//!
//! A client library for a multi-vendor marketplace REST API.
//!
//! ## Overview
//!
//! Every call goes through one request pipeline ([`api::ApiClient`]) that
//! injects the session credential, sets a consistent `User-Agent`, decodes
//! JSON in a single place and turns HTTP failures into typed errors. On top
//! of it sit small resource services (divisions, CMS, catalog, basket,
//! orders, organisations, companies, discussions).
//!
//! ## Features
//!
//! - **Session handling**: `authenticate`, an in-memory credential and an
//!   advisory `must_be_authenticated` guard
//! - **Typed errors**: one [`api::ApiError`] enum, with domain error codes
//!   and structured context for endpoint-specific failures
//! - **Tree rebuilding**: flat parent-pointer lists (divisions) become owned
//!   trees through [`tree::denormalize`]
//! - **Pluggable transport**: anything implementing [`api::HttpTransport`];
//!   a reqwest implementation ships by default
//! - **Memoization**: a TTL cache decorator for read-mostly endpoints
//!
//! ## Module Structure
//!
//! - [`api`]: request pipeline, transport seam, errors, pagination
//! - [`auth`]: credential and session
//! - [`config`]: programmatic client configuration
//! - [`services`]: typed per-resource endpoints
//! - [`tree`]: generic tree denormalizer
//! - [`cache`]: memoizing cache decorator
//! - [`cli`]: the `mkp` developer tool
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use marketplace_sdk::{ApiClient, ClientConfig};
//!
//! # async fn example() -> marketplace_sdk::api::ApiResult<()> {
//! let client = ApiClient::new(ClientConfig::new("https://marketplace.example.com/api/v1")?)?;
//!
//! for country in client.divisions().divisions("FR").await? {
//!     println!("{} ({} sub-divisions)", country.code, country.children.len());
//! }
//!
//! client.authenticate("buyer@example.com", "hunter2").await?;
//! let orders = client.orders().orders(10, 0).await?;
//! println!("{} orders", orders.pagination.total.unwrap_or(0));
//! # Ok(())
//! # }
//! ```

/// Request pipeline and everything it speaks.
///
/// Holds the [`ApiClient`](api::ApiClient), the [`HttpTransport`](api::HttpTransport)
/// seam with its reqwest implementation, the error types and the two
/// pagination conventions the API uses.
pub mod api;

/// Credential and session state.
pub mod auth;

/// Memoizing cache decorator.
pub mod cache;

/// Command-line interface of the `mkp` developer tool.
///
/// Not part of the SDK proper; it only uses the public API.
pub mod cli;

/// Client configuration (base URL, timeout, language).
pub mod config;

/// Typed resource services, reached through accessors on
/// [`ApiClient`](api::ApiClient) such as `client.basket()`.
pub mod services;

/// Flat-list to tree denormalization.
pub mod tree;

pub use api::{ApiClient, ApiError, ApiResult};
pub use auth::Credential;
pub use config::ClientConfig;

use once_cell::sync::Lazy;

/// SDK name, first half of the `User-Agent`.
pub const SDK_NAME: &str = "marketplace-sdk-rust";

/// SDK version, derived from Cargo.toml at compile time.
///
/// Falls back to `"unknown"` when the crate is built outside Cargo.
///
/// ```rust
/// use marketplace_sdk::VERSION;
///
/// assert!(!VERSION.is_empty());
/// ```
pub const VERSION: &str = match option_env!("CARGO_PKG_VERSION") {
    Some(version) => version,
    None => "unknown",
};

/// `User-Agent` sent with every request: `marketplace-sdk-rust/<version>`.
pub static USER_AGENT: Lazy<String> = Lazy::new(|| format!("{}/{}", SDK_NAME, VERSION));

/// Exit codes for the `mkp` binary.
///
/// - `0`: Success
/// - `1`: General error
/// - `2`: Invalid usage or arguments
/// - `4`: Authentication required or rejected
/// - `8`: Resource not found
pub mod exit_codes {
    use crate::api::ApiError;

    pub const SUCCESS: i32 = 0;
    pub const ERROR: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH_ERROR: i32 = 4;
    pub const NOT_FOUND: i32 = 8;

    /// Picks the exit code for an error returned by a command.
    ///
    /// ```rust
    /// use marketplace_sdk::{exit_codes, ApiError};
    ///
    /// let err = anyhow::Error::from(ApiError::AuthenticationRequired(None));
    /// assert_eq!(exit_codes::for_error(&err), exit_codes::AUTH_ERROR);
    /// ```
    pub fn for_error(err: &anyhow::Error) -> i32 {
        match err.downcast_ref::<ApiError>() {
            Some(ApiError::AuthenticationRequired(_) | ApiError::BadCredentials(_)) => AUTH_ERROR,
            Some(ApiError::InvalidRequest(_)) => USAGE,
            Some(api) if api.is_not_found() => NOT_FOUND,
            _ => ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_agent_format() {
        assert_eq!(*USER_AGENT, format!("marketplace-sdk-rust/{}", VERSION));
        assert_ne!(VERSION, "unknown");
    }

    #[test]
    fn test_exit_codes_for_errors() {
        let usage = anyhow::Error::from(ApiError::InvalidRequest("bad".to_string()));
        let other = anyhow::anyhow!("boom");

        assert_eq!(exit_codes::for_error(&usage), exit_codes::USAGE);
        assert_eq!(exit_codes::for_error(&other), exit_codes::ERROR);
    }
}
