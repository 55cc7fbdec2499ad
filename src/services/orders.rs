//
//  marketplace-sdk
//  services/orders.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Orders API for the authenticated buyer.
//!
//! The order list is a bare JSON array; its window and total come back in the
//! `x-pagination-*` headers (see [`HeaderPagination`](crate::api::common::HeaderPagination)).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::catalog::DeclinationId;
use crate::api::common::Paginated;
use crate::api::{
    ApiClient, ApiResult, DomainError, ErrorCode, Method, RequestOptions, StatusTranslation,
};

/// Lifecycle state of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Created,
    Standby,
    Processing,
    Processed,
    Completed,
    Cancelled,
    Refused,
    Refunded,
}

impl OrderStatus {
    /// Whether the order can still change state.
    pub fn is_open(self) -> bool {
        !matches!(
            self,
            Self::Completed | Self::Cancelled | Self::Refused | Self::Refunded
        )
    }
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: u64,
    pub company_id: u64,
    pub status: OrderStatus,
    pub total: f64,
    #[serde(default)]
    pub tax_total: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// One line of an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    pub declination_id: DeclinationId,
    #[serde(default)]
    pub product_name: String,
    pub amount: u32,
    pub price: f64,
}

/// Order endpoints. All require authentication.
pub struct OrderService<'a> {
    client: &'a ApiClient,
}

impl<'a> OrderService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// One window of the buyer's orders, newest first.
    ///
    /// ```rust,no_run
    /// # async fn example(client: &marketplace_sdk::api::ApiClient) -> marketplace_sdk::api::ApiResult<()> {
    /// let mut offset = 0;
    /// loop {
    ///     let page = client.orders().orders(20, offset).await?;
    ///     for order in &page.items {
    ///         println!("#{} {:?}", order.id, order.status);
    ///     }
    ///     match page.pagination.next_offset() {
    ///         Some(next) => offset = next,
    ///         None => break,
    ///     }
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn orders(&self, limit: u64, offset: u64) -> ApiResult<Paginated<Order>> {
        self.client.must_be_authenticated()?;
        let options = RequestOptions::new()
            .query("limit", limit)
            .query("offset", offset);
        self.client
            .call_raw(Method::Get, "user/orders", options)
            .await
            .or_default_status_errors()?
            .into_paginated()
    }

    pub async fn order(&self, order_id: u64) -> ApiResult<Order> {
        self.client.must_be_authenticated()?;
        self.client
            .get(&format!("user/orders/{}", order_id))
            .await
            .on_status(404, |http| {
                DomainError::new(ErrorCode::OrderNotFound, "Order not found")
                    .with_context("orderId", order_id)
                    .caused_by(http)
                    .into()
            })
            .or_default_status_errors()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{stub_client, StubTransport};
    use crate::api::{ApiError, HttpResponse};
    use crate::auth::Credential;
    use chrono::TimeZone;
    use serde_json::json;

    fn order_json(id: u64) -> serde_json::Value {
        json!({
            "id": id,
            "companyId": 3,
            "status": "PROCESSING",
            "total": 12.5,
            "timestamp": "2026-01-12T09:30:00Z",
            "items": [{"declinationId": "42_0", "productName": "Mug", "amount": 1, "price": 12.5}]
        })
    }

    #[tokio::test]
    async fn test_orders_reads_header_pagination() {
        let body = json!([order_json(1), order_json(2)]).to_string();
        let stub = StubTransport::with_responses(vec![HttpResponse::new(200, body)
            .with_header("X-Pagination-Limit", "2")
            .with_header("X-Pagination-Offset", "0")
            .with_header("X-Pagination-Total", "5")]);
        let client = stub_client(&stub);
        client.set_credential(Some(Credential::new("abc")));

        let page = client.orders().orders(2, 0).await.unwrap();

        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[0].status, OrderStatus::Processing);
        assert_eq!(
            page.items[0].timestamp,
            Utc.with_ymd_and_hms(2026, 1, 12, 9, 30, 0).unwrap()
        );
        assert_eq!(page.pagination.total, Some(5));
        assert_eq!(page.pagination.next_offset(), Some(2));
        assert_eq!(stub.requests()[0].url.query(), Some("limit=2&offset=0"));
    }

    #[tokio::test]
    async fn test_orders_requires_authentication() {
        let stub = StubTransport::with_responses(vec![]);
        let client = stub_client(&stub);

        let err = client.orders().orders(10, 0).await.unwrap_err();

        assert!(matches!(err, ApiError::AuthenticationRequired(None)));
        assert_eq!(stub.calls(), 0);
    }

    #[tokio::test]
    async fn test_order_not_found() {
        let stub = StubTransport::with_responses(vec![HttpResponse::new(404, "")]);
        let client = stub_client(&stub);
        client.set_credential(Some(Credential::new("abc")));

        let err = client.orders().order(99).await.unwrap_err();

        assert_eq!(err.error_code(), Some(ErrorCode::OrderNotFound));
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn test_order_status_is_open() {
        assert!(OrderStatus::Created.is_open());
        assert!(!OrderStatus::Refunded.is_open());
        assert!(serde_json::from_value::<OrderStatus>(json!("LOST")).is_err());
    }
}
