//
//  marketplace-sdk
//  api/error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Error Types
//!
//! Every failure surfaced by the SDK is an [`ApiError`]. The variants fall into
//! three families:
//!
//! | Family | Variants |
//! |--------|----------|
//! | Transport | `JsonDecoding`, `Http`, `Transport`, `UnexpectedResponse`, `InvalidRequest` |
//! | Authentication | `AuthenticationRequired`, `BadCredentials` |
//! | Domain | `AccessDenied`, `NotFound`, `Conflict`, `FeatureNotEnabled`, `SomeParametersAreInvalid`, `Domain` |
//!
//! The pipeline only ever produces transport and authentication errors (plus
//! `Domain` when the server sends a structured error envelope). Resource
//! services refine generic [`HttpError`]s into domain errors with the
//! [`StatusTranslation`] helpers.
//!
//! ## Example
//!
//! ```rust
//! use marketplace_sdk::api::{ApiError, DomainError, ErrorCode};
//!
//! let err: ApiError = DomainError::new(ErrorCode::ProductNotFound, "Declination not found")
//!     .with_context("declinationId", "42_1_2")
//!     .into();
//!
//! assert_eq!(err.error_code(), Some(ErrorCode::ProductNotFound));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

use super::transport::Method;

/// Result alias used by every SDK operation.
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified error type for all marketplace API operations.
#[derive(Error, Debug)]
pub enum ApiError {
    /// The response body was not well-formed JSON.
    ///
    /// Produced in exactly one place, the pipeline's response decoder, so every
    /// endpoint reports malformed payloads identically.
    #[error("Unable to decode JSON response ({category}) at line {line}, column {column}: {message}")]
    JsonDecoding {
        /// The parser's error message.
        message: String,
        /// The parser's error category (`syntax`, `eof`, ...).
        category: JsonErrorCategory,
        /// Line of the failure (1-based).
        line: usize,
        /// Column of the failure (1-based).
        column: usize,
        /// The underlying parser error.
        #[source]
        source: serde_json::Error,
    },

    /// An operation requires a credential and none is set, or the server
    /// rejected the request with 401.
    #[error("Authentication required")]
    AuthenticationRequired(#[source] Option<HttpError>),

    /// The authentication endpoint rejected the identifier/secret pair.
    #[error("Bad credentials")]
    BadCredentials(#[source] HttpError),

    /// 403 without a more specific meaning.
    #[error("Access denied")]
    AccessDenied(#[source] HttpError),

    /// 404 without a more specific meaning.
    #[error("Not found")]
    NotFound(#[source] HttpError),

    /// 409 without a more specific meaning.
    #[error("Conflict")]
    Conflict(#[source] HttpError),

    /// 501: the marketplace has this feature switched off.
    #[error("Feature not enabled")]
    FeatureNotEnabled(#[source] HttpError),

    /// 400: the request failed validation.
    ///
    /// `errors` holds the per-field messages when the server sent them.
    #[error("Some parameters are invalid{}", format_field_errors(.errors))]
    SomeParametersAreInvalid {
        /// Field level validation failures.
        errors: Vec<FieldError>,
        /// The originating HTTP failure.
        #[source]
        source: Option<HttpError>,
    },

    /// A domain-specific error carrying a machine-readable [`ErrorCode`].
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A non-2xx response no translator claimed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The transport could not complete the exchange.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The body was valid JSON but did not match the expected model.
    #[error("Unexpected response shape for {expected}: {source}")]
    UnexpectedResponse {
        /// Name of the model being decoded.
        expected: &'static str,
        /// The underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// The request could not be built (bad path, header, body...).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ApiError {
    /// Builds a [`ApiError::JsonDecoding`] from a parser failure.
    pub(crate) fn json_decoding(source: serde_json::Error) -> Self {
        Self::JsonDecoding {
            message: source.to_string(),
            category: source.classify().into(),
            line: source.line(),
            column: source.column(),
            source,
        }
    }

    /// The HTTP status behind this error, if there is one.
    ///
    /// Auxiliary metadata only; match on the variant to decide what to do.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AuthenticationRequired(http) => http.as_ref().map(|h| h.status),
            Self::SomeParametersAreInvalid { source, .. } => source.as_ref().map(|h| h.status),
            Self::BadCredentials(http)
            | Self::AccessDenied(http)
            | Self::NotFound(http)
            | Self::Conflict(http)
            | Self::FeatureNotEnabled(http)
            | Self::Http(http) => Some(http.status),
            Self::Domain(domain) => domain.source.as_ref().map(|h| h.status),
            _ => None,
        }
    }

    /// The domain error code, for [`ApiError::Domain`] only.
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Domain(domain) => Some(domain.code),
            _ => None,
        }
    }

    /// Returns `true` for 404-class errors, generic or domain-specific.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound(_) => true,
            Self::Domain(domain) => domain.code.is_not_found(),
            _ => false,
        }
    }
}

fn format_field_errors(errors: &[FieldError]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let joined = errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ");
    format!(": {}", joined)
}

/// Category of a JSON decoding failure, mirroring the parser's own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonErrorCategory {
    Io,
    Syntax,
    Data,
    Eof,
}

impl From<serde_json::error::Category> for JsonErrorCategory {
    fn from(category: serde_json::error::Category) -> Self {
        use serde_json::error::Category;
        match category {
            Category::Io => Self::Io,
            Category::Syntax => Self::Syntax,
            Category::Data => Self::Data,
            Category::Eof => Self::Eof,
        }
    }
}

impl fmt::Display for JsonErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Io => "io",
            Self::Syntax => "syntax",
            Self::Data => "data",
            Self::Eof => "eof",
        };
        f.write_str(name)
    }
}

/// A non-2xx response, as received.
///
/// This is the "generic HTTP client error" every translator starts from. It
/// keeps the raw body so callers can inspect payloads the SDK doesn't model.
#[derive(Error, Debug, Clone)]
#[error("HTTP {status} on {method} {url}: {}", summarize_body(.body))]
pub struct HttpError {
    /// HTTP status code.
    pub status: u16,
    /// Method of the failed request.
    pub method: Method,
    /// Absolute URL of the failed request.
    pub url: String,
    /// Raw response body.
    pub body: String,
}

impl HttpError {
    /// Parses the body as JSON, if it is JSON.
    pub fn json_body(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

fn summarize_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.is_empty() {
        return "<empty body>".to_string();
    }
    match body.char_indices().nth(MAX) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}

/// The transport failed before a response was available.
#[derive(Error, Debug)]
#[error("Transport error: {message}")]
pub struct TransportError {
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl TransportError {
    /// Creates a transport error with a message only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// Creates a transport error wrapping the client library's error.
    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "connection failed".to_string()
        } else {
            err.to_string()
        };
        Self::with_source(message, err)
    }
}

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The offending field (`"email"`, `"address.zipcode"`...).
    #[serde(default, alias = "name", alias = "property")]
    pub field: String,
    /// Human readable reason.
    #[serde(default)]
    pub message: String,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.field.is_empty() {
            f.write_str(&self.message)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl FieldError {
    /// Extracts field errors from a 400 body.
    ///
    /// Understands `{"errors": [{"field": .., "message": ..}]}` and a bare
    /// `{"message": ..}`. Anything else yields an empty list.
    pub fn parse_list(body: &str) -> Vec<FieldError> {
        let Ok(json) = serde_json::from_str::<Value>(body) else {
            return Vec::new();
        };

        if let Some(errors) = json.get("errors").and_then(Value::as_array) {
            return errors
                .iter()
                .filter_map(|e| serde_json::from_value::<FieldError>(e.clone()).ok())
                .collect();
        }

        match json.get("message").and_then(Value::as_str) {
            Some(message) => vec![FieldError {
                field: String::new(),
                message: message.to_string(),
            }],
            None => Vec::new(),
        }
    }
}

/// Machine-readable domain error codes.
///
/// Each code maps to exactly one wire value; the server sends it inside
/// `{"error": {"code": <n>, ...}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    BasketNotFound,
    CouponCodeDoesNotApply,
    CouponCodeAlreadyApplied,
    CompanyHasNoAdministrator,
    CompanyNotFound,
    DeclinationIsNotActive,
    DiscussionNotFound,
    FavoriteAlreadyExists,
    ProductNotFound,
    ReviewsAreDisabled,
    SenderIsAlsoRecipient,
    OrderNotFound,
    OrganisationNotFound,
    OrganisationAccessDenied,
    ProductAttachmentNotFound,
}

impl ErrorCode {
    const ALL: [ErrorCode; 15] = [
        Self::BasketNotFound,
        Self::CouponCodeDoesNotApply,
        Self::CouponCodeAlreadyApplied,
        Self::CompanyHasNoAdministrator,
        Self::CompanyNotFound,
        Self::DeclinationIsNotActive,
        Self::DiscussionNotFound,
        Self::FavoriteAlreadyExists,
        Self::ProductNotFound,
        Self::ReviewsAreDisabled,
        Self::SenderIsAlsoRecipient,
        Self::OrderNotFound,
        Self::OrganisationNotFound,
        Self::OrganisationAccessDenied,
        Self::ProductAttachmentNotFound,
    ];

    /// The numeric wire value.
    pub fn value(self) -> u32 {
        match self {
            Self::BasketNotFound => 1,
            Self::CouponCodeDoesNotApply => 2,
            Self::CouponCodeAlreadyApplied => 3,
            Self::CompanyHasNoAdministrator => 4,
            Self::CompanyNotFound => 5,
            Self::DeclinationIsNotActive => 6,
            Self::DiscussionNotFound => 7,
            Self::FavoriteAlreadyExists => 8,
            Self::ProductNotFound => 9,
            Self::ReviewsAreDisabled => 10,
            Self::SenderIsAlsoRecipient => 11,
            Self::OrderNotFound => 12,
            Self::OrganisationNotFound => 13,
            Self::OrganisationAccessDenied => 14,
            Self::ProductAttachmentNotFound => 15,
        }
    }

    /// Looks a code up by wire value.
    pub fn from_value(value: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|code| code.value() == value)
    }

    /// `true` for the "X not found" family.
    pub fn is_not_found(self) -> bool {
        matches!(
            self,
            Self::BasketNotFound
                | Self::CompanyNotFound
                | Self::DiscussionNotFound
                | Self::ProductNotFound
                | Self::OrderNotFound
                | Self::OrganisationNotFound
                | Self::ProductAttachmentNotFound
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.value())
    }
}

/// A domain-specific error.
///
/// Carries the [`ErrorCode`], a message, a free-form context map holding the
/// identifiers a generic handler would not know about (the id that wasn't
/// found, the coupon that didn't apply...) and the HTTP failure that caused
/// it.
#[derive(Error, Debug, Clone)]
#[error("{message} [{code}]")]
pub struct DomainError {
    code: ErrorCode,
    message: String,
    context: Map<String, Value>,
    #[source]
    source: Option<HttpError>,
}

impl DomainError {
    /// Creates a domain error with an empty context.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: Map::new(),
            source: None,
        }
    }

    /// Adds one entry to the context.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Replaces the whole context.
    pub fn with_context_map(mut self, context: Map<String, Value>) -> Self {
        self.context = context;
        self
    }

    /// Records the HTTP failure that caused this error.
    pub fn caused_by(mut self, http: HttpError) -> Self {
        self.source = Some(http);
        self
    }

    pub fn code(&self) -> ErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn context(&self) -> &Map<String, Value> {
        &self.context
    }

    /// The HTTP failure this error was translated from.
    pub fn http_error(&self) -> Option<&HttpError> {
        self.source.as_ref()
    }

    /// Adds the entries of `context` whose keys are not already set.
    pub fn merge_context(mut self, context: Map<String, Value>) -> Self {
        for (key, value) in context {
            self.context.entry(key).or_insert(value);
        }
        self
    }

    /// Decodes a server error envelope:
    ///
    /// ```json
    /// {"error": {"code": 5, "message": "Company not found", "context": {"companyId": 3}}}
    /// ```
    ///
    /// Returns `None` when the body isn't an envelope or the code is unknown.
    pub(crate) fn from_envelope(http: &HttpError) -> Option<Self> {
        #[derive(Deserialize)]
        struct Envelope {
            error: EnvelopeError,
        }

        #[derive(Deserialize)]
        struct EnvelopeError {
            code: u32,
            #[serde(default)]
            message: String,
            #[serde(default)]
            context: Map<String, Value>,
        }

        let envelope: Envelope = serde_json::from_str(&http.body).ok()?;
        let code = ErrorCode::from_value(envelope.error.code)?;

        Some(
            Self::new(code, envelope.error.message)
                .with_context_map(envelope.error.context)
                .caused_by(http.clone()),
        )
    }
}

/// Per-call-site status translation.
///
/// Services chain these on the result of a pipeline call. Only
/// [`ApiError::Http`] and envelope-decoded [`ApiError::Domain`] errors are
/// inspected, and a status nobody claims passes through untouched.
///
/// When the server already sent an error envelope, its code and message are
/// kept and the call site only contributes the context keys the server left
/// out:
///
/// ```rust
/// use marketplace_sdk::api::{ApiError, ApiResult, DomainError, ErrorCode, StatusTranslation};
///
/// fn lookup(result: ApiResult<()>, id: u64) -> ApiResult<()> {
///     result
///         .on_status(404, |http| {
///             DomainError::new(ErrorCode::OrderNotFound, "Order not found")
///                 .with_context("orderId", id)
///                 .caused_by(http)
///                 .into()
///         })
///         .or_default_status_errors()
/// }
/// ```
pub trait StatusTranslation<T> {
    /// Maps an [`ApiError::Http`] with the given status through `translate`.
    ///
    /// An [`ApiError::Domain`] caused by that status gets the context of the
    /// translated error merged into it.
    fn on_status<F>(self, status: u16, translate: F) -> ApiResult<T>
    where
        F: FnOnce(HttpError) -> ApiError;

    /// Applies the default mapping table (400, 401, 403, 404, 409, 501).
    fn or_default_status_errors(self) -> ApiResult<T>;
}

impl<T> StatusTranslation<T> for ApiResult<T> {
    fn on_status<F>(self, status: u16, translate: F) -> ApiResult<T>
    where
        F: FnOnce(HttpError) -> ApiError,
    {
        match self {
            Err(ApiError::Http(http)) if http.status == status => Err(translate(http)),
            Err(ApiError::Domain(domain))
                if domain.source.as_ref().is_some_and(|h| h.status == status) =>
            {
                match domain.source.clone().map(translate) {
                    Some(ApiError::Domain(call_site)) => {
                        Err(domain.merge_context(call_site.context).into())
                    }
                    _ => Err(domain.into()),
                }
            }
            other => other,
        }
    }

    fn or_default_status_errors(self) -> ApiResult<T> {
        match self {
            Err(ApiError::Http(http)) => Err(default_translation(http)),
            other => other,
        }
    }
}

fn default_translation(http: HttpError) -> ApiError {
    match http.status {
        400 => ApiError::SomeParametersAreInvalid {
            errors: FieldError::parse_list(&http.body),
            source: Some(http),
        },
        401 => ApiError::AuthenticationRequired(Some(http)),
        403 => ApiError::AccessDenied(http),
        404 => ApiError::NotFound(http),
        409 => ApiError::Conflict(http),
        501 => ApiError::FeatureNotEnabled(http),
        _ => ApiError::Http(http),
    }
}
