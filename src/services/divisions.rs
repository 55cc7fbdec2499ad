//
//  marketplace-sdk
//  services/divisions.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Divisions API.
//!
//! Divisions are the geographic/administrative regions (country, region,
//! department...) the marketplace uses to scope where products sell and
//! ship. The API returns them flat, each pointing at its parent by code; this
//! module rebuilds the tree with [`crate::tree::denormalize`].
//!
//! # Hierarchy
//!
//! ```text
//! FR            (level 1)
//! ├── FR-ARA    (level 2)
//! │   ├── FR-01 (level 3)
//! │   └── FR-69 (level 3)
//! └── ...
//! ```
//!
//! A division can be switched off by the marketplace admin or by a vendor;
//! [`Division::disabled_by`] says who.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::api::{
    path_segment, ApiClient, ApiError, ApiResult, DomainError, ErrorCode, RequestOptions,
    StatusTranslation,
};
use crate::tree::{denormalize, denormalize_grouped, TreeNode};

/// Who disabled a division.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DisabledBy {
    #[serde(rename = "admin", alias = "ADMIN")]
    Admin,
    #[serde(rename = "vendor", alias = "VENDOR")]
    Vendor,
}

/// One division and its sub-divisions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Division {
    /// Unique code, e.g. `FR-69`.
    pub code: String,

    #[serde(default)]
    pub parent_code: Option<String>,

    #[serde(default)]
    pub level: u32,

    #[serde(default = "enabled_by_default")]
    pub is_enabled: bool,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub disabled_by: Option<DisabledBy>,

    /// Sub-divisions, in the order the API listed them.
    #[serde(default)]
    pub children: Vec<Division>,
}

fn enabled_by_default() -> bool {
    true
}

impl Division {
    /// A bare enabled division; mostly useful in tests and examples.
    pub fn new(code: impl Into<String>, parent_code: Option<&str>) -> Self {
        Self {
            code: code.into(),
            parent_code: parent_code.map(str::to_string),
            level: 0,
            is_enabled: true,
            description: String::new(),
            disabled_by: None,
            children: Vec::new(),
        }
    }

    /// Appends a sub-division.
    pub fn add_child(&mut self, child: Division) {
        self.children.push(child);
    }

    /// Depth-first search for a code in this subtree.
    pub fn find(&self, code: &str) -> Option<&Division> {
        if self.code == code {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(code))
    }
}

impl TreeNode for Division {
    type Key = String;

    fn key(&self) -> &String {
        &self.code
    }

    fn parent_key(&self) -> Option<&String> {
        self.parent_code.as_ref()
    }

    fn take_children(&mut self) -> Vec<Self> {
        std::mem::take(&mut self.children)
    }

    fn push_child(&mut self, child: Self) {
        self.add_child(child);
    }
}

/// Division endpoints.
pub struct DivisionService<'a> {
    client: &'a ApiClient,
}

impl<'a> DivisionService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Marketplace-wide division tree for a country.
    pub async fn divisions(&self, country_code: &str) -> ApiResult<Vec<Division>> {
        let flat: Vec<Division> = self
            .client
            .get(&format!("divisions/{}", path_segment(country_code)?))
            .await
            .or_default_status_errors()?;
        Ok(denormalize(flat))
    }

    /// Divisions a company sells in. Requires authentication.
    pub async fn company_divisions(&self, company_id: u64) -> ApiResult<Vec<Division>> {
        self.client.must_be_authenticated()?;
        let flat: Vec<Division> = self
            .client
            .get(&format!("companies/{}/divisions", company_id))
            .await
            .on_status(404, |http| company_not_found(company_id, http))
            .or_default_status_errors()?;
        Ok(denormalize(flat))
    }

    /// Replaces the enabled divisions of a company and returns the new tree.
    pub async fn set_company_divisions(
        &self,
        company_id: u64,
        enabled_codes: &[String],
    ) -> ApiResult<Vec<Division>> {
        self.client.must_be_authenticated()?;
        let options = RequestOptions::new().json(json!({ "divisionsEnabled": enabled_codes }));
        let flat: Vec<Division> = self
            .client
            .put(&format!("companies/{}/divisions", company_id), options)
            .await
            .on_status(404, |http| company_not_found(company_id, http))
            .or_default_status_errors()?;
        Ok(denormalize(flat))
    }

    /// Divisions a product is available in.
    pub async fn product_divisions(&self, product_id: &str) -> ApiResult<Vec<Division>> {
        let flat: Vec<Division> = self
            .client
            .get(&format!("catalog/products/{}/divisions", path_segment(product_id)?))
            .await
            .on_status(404, |http| {
                DomainError::new(ErrorCode::ProductNotFound, "Product not found")
                    .with_context("productId", product_id)
                    .caused_by(http)
                    .into()
            })
            .or_default_status_errors()?;
        Ok(denormalize(flat))
    }

    /// Availability trees for several products at once, keyed by product id.
    ///
    /// The response maps each product id to its own flat list; each list is
    /// denormalized on its own.
    pub async fn products_divisions(
        &self,
        product_ids: &[String],
    ) -> ApiResult<BTreeMap<String, Vec<Division>>> {
        let options = RequestOptions::new().query("productIds", product_ids.to_vec());
        let by_product: BTreeMap<String, Vec<Division>> = self
            .client
            .get_with("catalog/products/divisions", options)
            .await
            .or_default_status_errors()?;
        Ok(denormalize_grouped(by_product))
    }
}

fn company_not_found(company_id: u64, http: crate::api::HttpError) -> ApiError {
    DomainError::new(ErrorCode::CompanyNotFound, "Company not found")
        .with_context("companyId", company_id)
        .caused_by(http)
        .into()
}
