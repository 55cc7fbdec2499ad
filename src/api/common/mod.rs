//
//  marketplace-sdk
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Common API Types
//!
//! Shared types used by the pipeline and the resource services:
//!
//! - [`ApiResponse`] - status, headers and decoded body of one call
//! - [`Page`] - the `{page, nbResults, ...}` pagination envelope
//! - [`HeaderPagination`] / [`Paginated`] - pagination via `x-pagination-*` headers
//!
//! The pipeline doesn't care which pagination convention an endpoint uses;
//! each service knows.

use std::collections::BTreeMap;

use serde_json::Value;

use super::client::into_model;
use super::error::ApiResult;

mod pagination;

pub use pagination::*;

/// One successful response.
///
/// Header names are lowercase. `data` is `None` when the body was empty.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub headers: BTreeMap<String, String>,
    pub data: Option<Value>,
}

impl ApiResponse {
    /// Reads a header (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    /// Decodes the body into a model.
    pub fn into_data<T: serde::de::DeserializeOwned>(self) -> ApiResult<T> {
        into_model(self.data)
    }

    /// Decodes a bare-array body and pairs it with the header pagination.
    pub fn into_paginated<T: serde::de::DeserializeOwned>(self) -> ApiResult<Paginated<T>> {
        let pagination = HeaderPagination::from_headers(&self.headers);
        let items: Vec<T> = into_model(self.data)?;
        Ok(Paginated { items, pagination })
    }
}
