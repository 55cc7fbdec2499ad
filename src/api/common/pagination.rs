//
//  marketplace-sdk
//  api/common/pagination.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Pagination Types for Marketplace API Responses
//!
//! List endpoints paginate in one of two ways.
//!
//! | Type | Strategy |
//! |------|----------|
//! | [`Page`] | Envelope in the body (`page`, `nbResults`, `nbPages`, `resultsPerPage`, `results`) |
//! | [`Paginated`] + [`HeaderPagination`] | Bare array body, `x-pagination-limit/offset/total` headers |
//!
//! # Example
//!
//! ```rust
//! use marketplace_sdk::api::common::Page;
//!
//! let json = r#"{
//!     "page": 1,
//!     "nbResults": 25,
//!     "nbPages": 3,
//!     "resultsPerPage": 10,
//!     "results": ["a", "b"]
//! }"#;
//!
//! let page: Page<String> = serde_json::from_str(json).unwrap();
//! assert!(page.has_next());
//! assert_eq!(page.next_page(), Some(2));
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Header carrying the page size.
pub const PAGINATION_LIMIT_HEADER: &str = "x-pagination-limit";
/// Header carrying the offset of the first item.
pub const PAGINATION_OFFSET_HEADER: &str = "x-pagination-offset";
/// Header carrying the total item count.
pub const PAGINATION_TOTAL_HEADER: &str = "x-pagination-total";

/// Envelope-style paginated response.
///
/// `page` is 1-indexed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    /// Items of the current page.
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,

    /// Current page number (1-indexed).
    #[serde(default = "first_page")]
    pub page: u32,

    /// Total number of items across all pages.
    #[serde(default)]
    pub nb_results: u64,

    /// Total number of pages.
    #[serde(default)]
    pub nb_pages: u32,

    /// Requested page size.
    #[serde(default)]
    pub results_per_page: u32,
}

fn first_page() -> u32 {
    1
}

impl<T> Page<T> {
    /// Checks whether more pages follow this one.
    pub fn has_next(&self) -> bool {
        self.page < self.nb_pages
    }

    /// The page number to request next, if any.
    pub fn next_page(&self) -> Option<u32> {
        self.has_next().then(|| self.page + 1)
    }
}

/// Pagination reported through response headers.
///
/// Each value is `None` when its header was missing or not a number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeaderPagination {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
    pub total: Option<u64>,
}

impl HeaderPagination {
    /// Reads the `x-pagination-*` headers from a lowercase header map.
    pub fn from_headers(headers: &BTreeMap<String, String>) -> Self {
        let read = |name: &str| headers.get(name).and_then(|v| v.trim().parse::<u64>().ok());
        Self {
            limit: read(PAGINATION_LIMIT_HEADER),
            offset: read(PAGINATION_OFFSET_HEADER),
            total: read(PAGINATION_TOTAL_HEADER),
        }
    }

    /// Checks whether items remain past the current window.
    ///
    /// Without all three headers there is no way to tell, so `false`.
    pub fn has_next(&self) -> bool {
        self.next_offset().is_some()
    }

    /// The `offset` to request next, if any.
    pub fn next_offset(&self) -> Option<u64> {
        match (self.limit, self.offset, self.total) {
            (Some(limit), Some(offset), Some(total)) if limit > 0 => {
                offset.checked_add(limit).filter(|next| *next < total)
            }
            _ => None,
        }
    }
}

/// A bare-array page together with its header pagination.
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: HeaderPagination,
}
