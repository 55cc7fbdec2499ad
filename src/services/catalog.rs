//
//  marketplace-sdk
//  services/catalog.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Catalog API: product search and declinations.
//!
//! A declination is a purchasable variant of a product (one size/colour
//! combination). Its id is composite: the product id followed by the chosen
//! option variant ids, joined with `_` (`42_1_2`). A product without options
//! has a single declination whose id is `<productId>_0`.

use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::api::common::Page;
use crate::api::{
    ApiClient, ApiError, ApiResult, DomainError, ErrorCode, RequestOptions, StatusTranslation,
};

static DECLINATION_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+)((?:_\d+)+)$").expect("declination id pattern is valid"));

/// Composite declination identifier.
///
/// ```rust
/// use marketplace_sdk::services::catalog::DeclinationId;
///
/// let id: DeclinationId = "42_1_2".parse().unwrap();
/// assert_eq!(id.product_id(), 42);
/// assert_eq!(id.variant_ids(), &[1, 2]);
/// assert_eq!(id.to_string(), "42_1_2");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclinationId {
    product_id: u64,
    variant_ids: Vec<u64>,
}

impl DeclinationId {
    pub fn product_id(&self) -> u64 {
        self.product_id
    }

    pub fn variant_ids(&self) -> &[u64] {
        &self.variant_ids
    }
}

impl FromStr for DeclinationId {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ApiError::InvalidRequest(format!("Invalid declination id: '{}'", s));

        let captures = DECLINATION_ID.captures(s.trim()).ok_or_else(invalid)?;
        let product_id = captures[1].parse().map_err(|_| invalid())?;
        let variant_ids = captures[2]
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| part.parse().map_err(|_| invalid()))
            .collect::<Result<Vec<u64>, _>>()?;

        Ok(Self {
            product_id,
            variant_ids,
        })
    }
}

impl fmt::Display for DeclinationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.product_id)?;
        for variant in &self.variant_ids {
            write!(f, "_{}", variant)?;
        }
        Ok(())
    }
}

impl Serialize for DeclinationId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DeclinationId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// A search hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub product_id: u64,
    pub name: String,
    #[serde(default)]
    pub minimum_price: f64,
    #[serde(default)]
    pub url: String,
}

/// A purchasable declination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Declination {
    pub id: DeclinationId,
    pub product_id: u64,
    pub name: String,
    #[serde(default)]
    pub code: String,
    pub price: f64,
    #[serde(default)]
    pub amount: u32,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
}

fn active_by_default() -> bool {
    true
}

/// Catalog endpoints. All public.
pub struct CatalogService<'a> {
    client: &'a ApiClient,
}

impl<'a> CatalogService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Full-text product search, envelope paginated.
    pub async fn search(
        &self,
        query: &str,
        page: u32,
        results_per_page: u32,
    ) -> ApiResult<Page<ProductSummary>> {
        let options = RequestOptions::new()
            .query("query", query)
            .query("page", page)
            .query("resultsPerPage", results_per_page);
        self.client
            .get_with("catalog/search/products", options)
            .await
            .or_default_status_errors()
    }

    /// One declination.
    ///
    /// A 404 becomes [`ErrorCode::ProductNotFound`] with the id under
    /// `declinationId` in the context.
    pub async fn declination(&self, id: &DeclinationId) -> ApiResult<Declination> {
        self.client
            .get(&format!("catalog/declinations/{}", id))
            .await
            .on_status(404, |http| {
                DomainError::new(ErrorCode::ProductNotFound, "Declination not found")
                    .with_context("declinationId", id.to_string())
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
    use crate::api::HttpResponse;
    use serde_json::{json, Map, Value};

    #[test]
    fn test_declination_id_parsing() {
        let id: DeclinationId = "42_0".parse().unwrap();
        assert_eq!(id.product_id(), 42);
        assert_eq!(id.variant_ids(), &[0]);

        assert!("42".parse::<DeclinationId>().is_err());
        assert!("42_".parse::<DeclinationId>().is_err());
        assert!("abc_1".parse::<DeclinationId>().is_err());
        assert!("".parse::<DeclinationId>().is_err());
    }

    #[test]
    fn test_declination_id_serde() {
        let id: DeclinationId = serde_json::from_value(json!("7_3_5")).unwrap();
        assert_eq!(serde_json::to_value(&id).unwrap(), json!("7_3_5"));
        assert!(serde_json::from_value::<DeclinationId>(json!("nope")).is_err());
    }

    #[tokio::test]
    async fn test_search_reads_envelope() {
        let body = json!({
            "page": 1,
            "nbResults": 11,
            "nbPages": 2,
            "resultsPerPage": 10,
            "results": [{"productId": 1, "name": "Red shoes", "minimumPrice": 49.9, "url": "/red-shoes"}]
        });
        let stub = StubTransport::with_responses(vec![HttpResponse::new(200, body.to_string())]);
        let client = stub_client(&stub);

        let page = client.catalog().search("shoes", 1, 10).await.unwrap();

        assert_eq!(page.results[0].name, "Red shoes");
        assert_eq!(page.next_page(), Some(2));
        assert_eq!(
            stub.requests()[0].url.query(),
            Some("query=shoes&page=1&resultsPerPage=10")
        );
    }

    #[tokio::test]
    async fn test_declination_not_found_carries_id() {
        let stub = StubTransport::with_responses(vec![HttpResponse::new(404, "")]);
        let client = stub_client(&stub);
        let id: DeclinationId = "42_1_2".parse().unwrap();

        let err = client.catalog().declination(&id).await.unwrap_err();

        let mut expected = Map::new();
        expected.insert("declinationId".to_string(), Value::from("42_1_2"));
        match err {
            ApiError::Domain(domain) => {
                assert_eq!(domain.code(), ErrorCode::ProductNotFound);
                assert_eq!(domain.context(), &expected);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_declination_not_found_envelope_keeps_id() {
        let body = json!({"error": {"code": 9, "message": "Product not found"}});
        let stub = StubTransport::with_responses(vec![HttpResponse::new(404, body.to_string())]);
        let client = stub_client(&stub);
        let id: DeclinationId = "42_1_2".parse().unwrap();

        let err = client.catalog().declination(&id).await.unwrap_err();

        match err {
            ApiError::Domain(domain) => {
                assert_eq!(domain.code(), ErrorCode::ProductNotFound);
                assert_eq!(domain.message(), "Product not found");
                assert_eq!(domain.context().get("declinationId"), Some(&json!("42_1_2")));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
