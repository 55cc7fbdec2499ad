//
//  marketplace-sdk
//  services/basket.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Basket API.
//!
//! Baskets are anonymous: anyone holding a basket id can read and modify it,
//! so none of these endpoints require authentication.

use serde::{Deserialize, Serialize};

use super::catalog::DeclinationId;
use crate::api::{
    path_segment, ApiClient, ApiError, ApiResult, DomainError, ErrorCode, HttpError,
    RequestOptions, StatusTranslation,
};

/// A basket and its contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Basket {
    pub id: String,
    #[serde(default)]
    pub coupons: Vec<String>,
    #[serde(default)]
    pub subtotal: f64,
    #[serde(default)]
    pub total: f64,
    #[serde(default)]
    pub total_quantity: u32,
    #[serde(default)]
    pub items: Vec<BasketItem>,
}

impl Basket {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// One line of a basket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BasketItem {
    pub declination_id: DeclinationId,
    #[serde(default)]
    pub product_name: String,
    pub quantity: u32,
    #[serde(default)]
    pub individual_price: f64,
    #[serde(default)]
    pub total: f64,
}

#[derive(Deserialize)]
struct CreatedBasket {
    id: String,
}

#[derive(Deserialize)]
struct AddedQuantity {
    quantity: u32,
}

/// Basket endpoints.
pub struct BasketService<'a> {
    client: &'a ApiClient,
}

impl<'a> BasketService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Creates an empty basket and returns its id.
    pub async fn create(&self) -> ApiResult<String> {
        let created: CreatedBasket = self
            .client
            .post("basket", RequestOptions::new())
            .await
            .or_default_status_errors()?;
        tracing::debug!("Created basket {}", created.id);
        Ok(created.id)
    }

    pub async fn basket(&self, basket_id: &str) -> ApiResult<Basket> {
        self.client
            .get(&format!("basket/{}", path_segment(basket_id)?))
            .await
            .on_status(404, |http| basket_not_found(basket_id, http))
            .or_default_status_errors()
    }

    /// Adds `quantity` of a declination and returns the quantity the server
    /// actually added (stock may cap it).
    pub async fn add_product(
        &self,
        basket_id: &str,
        declination_id: &DeclinationId,
        quantity: u32,
    ) -> ApiResult<u32> {
        if quantity == 0 {
            return Err(ApiError::InvalidRequest(
                "Quantity must be at least 1".to_string(),
            ));
        }

        let path = format!("basket/{}/add", path_segment(basket_id)?);
        let options = RequestOptions::new().form([
            ("declinationId", declination_id.to_string()),
            ("quantity", quantity.to_string()),
        ]);
        let added: AddedQuantity = self
            .client
            .post(&path, options)
            .await
            .on_status(404, |http| basket_not_found(basket_id, http))
            .or_default_status_errors()?;
        Ok(added.quantity)
    }

    /// Applies a coupon code.
    ///
    /// # Errors
    ///
    /// - [`ErrorCode::CouponCodeDoesNotApply`] when the server refuses the code
    /// - [`ErrorCode::CouponCodeAlreadyApplied`] when it is already on the basket
    /// - [`ErrorCode::BasketNotFound`] for an unknown basket
    pub async fn apply_coupon(&self, basket_id: &str, coupon: &str) -> ApiResult<()> {
        self.client
            .call(
                crate::api::Method::Post,
                &coupon_path(basket_id, coupon)?,
                RequestOptions::new(),
            )
            .await
            .map(|_| ())
            .on_status(400, |http| {
                coupon_error(ErrorCode::CouponCodeDoesNotApply, basket_id, coupon, http)
            })
            .on_status(409, |http| {
                coupon_error(ErrorCode::CouponCodeAlreadyApplied, basket_id, coupon, http)
            })
            .on_status(404, |http| basket_not_found(basket_id, http))
            .or_default_status_errors()
    }

    pub async fn remove_coupon(&self, basket_id: &str, coupon: &str) -> ApiResult<()> {
        self.client
            .delete(&coupon_path(basket_id, coupon)?)
            .await
            .on_status(404, |http| basket_not_found(basket_id, http))
            .or_default_status_errors()
    }
}

fn coupon_path(basket_id: &str, coupon: &str) -> ApiResult<String> {
    Ok(format!(
        "basket/{}/coupons/{}",
        path_segment(basket_id)?,
        path_segment(coupon)?
    ))
}

fn basket_not_found(basket_id: &str, http: HttpError) -> ApiError {
    DomainError::new(ErrorCode::BasketNotFound, "Basket not found")
        .with_context("basketId", basket_id)
        .caused_by(http)
        .into()
}

fn coupon_error(code: ErrorCode, basket_id: &str, coupon: &str, http: HttpError) -> ApiError {
    let message = match code {
        ErrorCode::CouponCodeAlreadyApplied => "Coupon code already applied",
        _ => "Coupon code does not apply",
    };
    DomainError::new(code, message)
        .with_context("basketId", basket_id)
        .with_context("coupon", coupon)
        .caused_by(http)
        .into()
}
