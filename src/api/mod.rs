//
//  marketplace-sdk
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! The generic request pipeline and everything it depends on.
//!
//! ## Architecture
//!
//! - [`client`]: [`ApiClient`], the request pipeline (auth, headers, decoding)
//! - [`transport`]: the [`HttpTransport`] seam and its reqwest implementation
//! - [`error`]: the [`ApiError`] taxonomy and status translation helpers
//! - [`common`]: response wrapper and pagination types
//!
//! ## Error Handling
//!
//! The pipeline reports non-2xx responses as [`ApiError::Http`]. Services
//! refine them per call site:
//!
//! - `SomeParametersAreInvalid`: 400 Bad Request
//! - `AuthenticationRequired`: 401 Unauthorized
//! - `AccessDenied`: 403 Forbidden
//! - `NotFound`: 404 Not Found
//! - `Conflict`: 409 Conflict
//! - `FeatureNotEnabled`: 501 Not Implemented
//!
//! or into a [`DomainError`] carrying an [`ErrorCode`] and a context map.

pub mod client;
pub mod common;
pub mod error;
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::{path_segment, ApiClient, QueryValue, RequestOptions};
pub use common::ApiResponse;
pub use error::{
    ApiError, ApiResult, DomainError, ErrorCode, FieldError, HttpError, JsonErrorCategory,
    StatusTranslation, TransportError,
};
pub use transport::{
    HttpRequest, HttpResponse, HttpTransport, Method, Part, PartContents, ReqwestTransport,
    RequestBody,
};
