//
//  marketplace-sdk
//  services/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Resource Services
//!
//! Thin, typed wrappers over [`ApiClient`], one per API area. Each service
//! borrows the client, so creating one is free:
//!
//! ```rust,no_run
//! # async fn example(client: &marketplace_sdk::api::ApiClient) -> marketplace_sdk::api::ApiResult<()> {
//! let tree = client.divisions().divisions("FR").await?;
//! let basket_id = client.basket().create().await?;
//! # Ok(())
//! # }
//! ```
//!
//! Services translate HTTP statuses into domain errors where an endpoint has
//! a known meaning for them (404 on a basket is
//! [`ErrorCode::BasketNotFound`](crate::api::ErrorCode::BasketNotFound)) and
//! fall back to the generic table otherwise.

pub mod basket;
pub mod catalog;
pub mod cms;
pub mod companies;
pub mod discussions;
pub mod divisions;
pub mod orders;
pub mod organisations;

use crate::api::{ApiClient, Part};

pub use basket::BasketService;
pub use catalog::CatalogService;
pub use cms::{BannerService, CachedBannerService, CmsService};
pub use companies::CompanyService;
pub use discussions::DiscussionService;
pub use divisions::DivisionService;
pub use orders::OrderService;
pub use organisations::OrganisationService;

/// A file sent as one part of a multipart upload.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadFile {
    /// Form field the server expects the file under.
    pub field: String,
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(field: impl Into<String>, filename: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            field: field.into(),
            filename: filename.into(),
            content_type: None,
            bytes,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub(crate) fn into_part(self) -> Part {
        Part::file(
            self.field,
            self.filename,
            self.content_type.as_deref(),
            self.bytes,
        )
    }
}

impl ApiClient {
    pub fn divisions(&self) -> DivisionService<'_> {
        DivisionService::new(self)
    }

    pub fn cms(&self) -> CmsService<'_> {
        CmsService::new(self)
    }

    pub fn banners(&self) -> BannerService<'_> {
        BannerService::new(self)
    }

    pub fn catalog(&self) -> CatalogService<'_> {
        CatalogService::new(self)
    }

    pub fn basket(&self) -> BasketService<'_> {
        BasketService::new(self)
    }

    pub fn orders(&self) -> OrderService<'_> {
        OrderService::new(self)
    }

    pub fn organisations(&self) -> OrganisationService<'_> {
        OrganisationService::new(self)
    }

    pub fn companies(&self) -> CompanyService<'_> {
        CompanyService::new(self)
    }

    pub fn discussions(&self) -> DiscussionService<'_> {
        DiscussionService::new(self)
    }
}
