//
//  marketplace-sdk
//  services/cms.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! CMS API: navigation menus and banners.
//!
//! Menus arrive already nested (`items[].children[]`); they are mapped into
//! owned [`MenuItem`] trees with each level ordered by `position`.
//!
//! Banners change rarely and are fetched on every page render, so
//! [`CachedBannerService`] memoizes them for a TTL.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::api::{ApiClient, ApiResult, RequestOptions, StatusTranslation};
use crate::cache::Memoized;

/// A navigation menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Menu {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub items: Vec<MenuItem>,
}

/// One entry of a menu, possibly with sub-entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub name: String,
    #[serde(default)]
    pub position: i32,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub target_blank: bool,
    #[serde(default)]
    pub children: Vec<MenuItem>,
}

impl MenuItem {
    fn sort_recursively(&mut self) {
        sort_items(&mut self.children);
    }
}

fn sort_items(items: &mut [MenuItem]) {
    items.sort_by_key(|item| item.position);
    for item in items.iter_mut() {
        item.sort_recursively();
    }
}

/// Target device for banners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Desktop,
    Mobile,
}

impl Device {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An image reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub id: u64,
}

/// A promotional banner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Banner {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub should_open_in_new_window: bool,
    #[serde(default)]
    pub image: Option<Image>,
}

/// Menu endpoints.
pub struct CmsService<'a> {
    client: &'a ApiClient,
}

impl<'a> CmsService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// All menus with their items ordered by position.
    pub async fn menus(&self) -> ApiResult<Vec<Menu>> {
        let mut menus: Vec<Menu> = self
            .client
            .get("cms/menus")
            .await
            .or_default_status_errors()?;
        for menu in &mut menus {
            sort_items(&mut menu.items);
        }
        Ok(menus)
    }
}

/// Banner endpoints.
pub struct BannerService<'a> {
    client: &'a ApiClient,
}

impl<'a> BannerService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    pub async fn homepage_banners(&self, device: Device) -> ApiResult<Vec<Banner>> {
        self.client
            .get_with(
                "cms/banners",
                RequestOptions::new().query("device", device.as_str()),
            )
            .await
            .or_default_status_errors()
    }

    pub async fn category_banners(&self, category_id: u64, device: Device) -> ApiResult<Vec<Banner>> {
        self.client
            .get_with(
                &format!("cms/banners/category/{}", category_id),
                RequestOptions::new().query("device", device.as_str()),
            )
            .await
            .or_default_status_errors()
    }
}

/// [`BannerService`] behind a [`Memoized`] cache.
pub struct CachedBannerService<'a> {
    inner: BannerService<'a>,
    memo: Memoized,
    ttl: Duration,
}

impl<'a> CachedBannerService<'a> {
    /// Default lifetime of a cached banner list.
    pub const DEFAULT_TTL: Duration = Duration::from_secs(300);

    pub fn new(inner: BannerService<'a>, memo: Memoized) -> Self {
        Self {
            inner,
            memo,
            ttl: Self::DEFAULT_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    pub async fn homepage_banners(&self, device: Device) -> ApiResult<Vec<Banner>> {
        let key = format!("banners.home.{}", device);
        self.memo
            .get_or_fetch(&key, self.ttl, || self.inner.homepage_banners(device))
            .await
    }

    pub async fn category_banners(&self, category_id: u64, device: Device) -> ApiResult<Vec<Banner>> {
        let key = format!("banners.category.{}.{}", category_id, device);
        self.memo
            .get_or_fetch(&key, self.ttl, || {
                self.inner.category_banners(category_id, device)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{stub_client, StubTransport};
    use crate::api::HttpResponse;
    use crate::cache::MemoryCache;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_menus_are_sorted_by_position() {
        let body = json!([{
            "id": 1,
            "name": "Main",
            "items": [
                {"name": "Shop", "position": 2, "url": "/shop", "targetBlank": false, "children": [
                    {"name": "Shoes", "position": 1, "url": "/shop/shoes"},
                    {"name": "Bags", "position": 0, "url": "/shop/bags"}
                ]},
                {"name": "Home", "position": 0, "url": "/", "targetBlank": false},
                {"name": "Blog", "position": 1, "url": "https://blog.test", "targetBlank": true}
            ]
        }]);
        let stub = StubTransport::with_responses(vec![HttpResponse::new(200, body.to_string())]);
        let client = stub_client(&stub);

        let menus = client.cms().menus().await.unwrap();

        let names: Vec<_> = menus[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, ["Home", "Blog", "Shop"]);
        assert!(menus[0].items[1].target_blank);
        let children: Vec<_> = menus[0].items[2].children.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(children, ["Bags", "Shoes"]);
    }

    #[tokio::test]
    async fn test_homepage_banners_query() {
        let body = json!([{"name": "Sale", "link": "/sale", "shouldOpenInNewWindow": false, "image": {"id": 9}}]);
        let stub = StubTransport::with_responses(vec![HttpResponse::new(200, body.to_string())]);
        let client = stub_client(&stub);

        let banners = client.banners().homepage_banners(Device::Mobile).await.unwrap();

        assert_eq!(banners[0].image, Some(Image { id: 9 }));
        assert_eq!(stub.requests()[0].url.query(), Some("device=mobile"));
    }

    #[tokio::test]
    async fn test_cached_banners_hit_the_api_once_per_key() {
        let body = json!([{"name": "Sale", "link": "/sale"}]).to_string();
        let stub = StubTransport::with_responses(vec![
            HttpResponse::new(200, body.clone()),
            HttpResponse::new(200, body),
        ]);
        let client = stub_client(&stub);
        let cached = CachedBannerService::new(
            client.banners(),
            Memoized::new(Arc::new(MemoryCache::new())),
        );

        cached.homepage_banners(Device::Desktop).await.unwrap();
        cached.homepage_banners(Device::Desktop).await.unwrap();
        cached.category_banners(4, Device::Desktop).await.unwrap();
        cached.category_banners(4, Device::Desktop).await.unwrap();

        assert_eq!(stub.calls(), 2);
    }
}
