//
//  marketplace-sdk
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Client Configuration
//!
//! The SDK reads no files and no environment variables. Everything the
//! pipeline needs is handed over programmatically through [`ClientConfig`]:
//!
//! | Setting | Default | Used by |
//! |---------|---------|---------|
//! | `base_url` | `http://localhost:8080/api/v1/` | pipeline (URL joining) |
//! | `timeout` | 30 seconds | [`ReqwestTransport`](crate::api::ReqwestTransport) |
//! | `language` | none | pipeline (`Accept-Language`) |
//!
//! ## Example
//!
//! ```rust
//! use std::time::Duration;
//! use marketplace_sdk::config::ClientConfig;
//!
//! let config = ClientConfig::new("https://marketplace.example.com/api/v1")?
//!     .with_timeout(Duration::from_secs(10))
//!     .with_language("fr");
//!
//! assert_eq!(config.base_url.as_str(), "https://marketplace.example.com/api/v1/");
//! # Ok::<(), marketplace_sdk::api::ApiError>(())
//! ```

use std::time::Duration;

use url::Url;

use crate::api::ApiError;

/// Base URL used by [`ClientConfig::default`].
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api/v1/";

/// Default request timeout applied by the reqwest transport.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Settings for an [`ApiClient`](crate::api::ApiClient).
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// Root of the API. Always ends with `/` so relative paths join below it.
    pub base_url: Url,

    /// Total request timeout. Only the transport looks at this.
    pub timeout: Duration,

    /// Content language requested from the API (`Accept-Language`).
    pub language: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL"),
            timeout: DEFAULT_TIMEOUT,
            language: None,
        }
    }
}

impl ClientConfig {
    /// Creates a config for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidRequest`] if the URL doesn't parse or can't
    /// be a base (e.g. `mailto:`).
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            ..Self::default()
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }
}

/// Parses a base URL and makes sure it ends with a slash.
///
/// Without the trailing slash `Url::join` would replace the last segment
/// (`/api/v1` + `orders` = `/api/orders`).
pub fn normalize_base_url(raw: &str) -> Result<Url, ApiError> {
    let trimmed = raw.trim();
    let with_slash = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };

    let url = Url::parse(&with_slash)
        .map_err(|e| ApiError::InvalidRequest(format!("Invalid base URL '{}': {}", raw, e)))?;

    if url.cannot_be_a_base() {
        return Err(ApiError::InvalidRequest(format!(
            "Base URL '{}' cannot be used as a base",
            raw
        )));
    }

    Ok(url)
}
