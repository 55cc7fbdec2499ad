//
//  marketplace-sdk
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Request Pipeline
//!
//! [`ApiClient`] executes one logical API call at a time:
//!
//! 1. joins the path onto the configured base URL and encodes the query;
//! 2. sets `User-Agent`, `Accept-Language` (when configured) and, if the
//!    session holds a credential, `Authorization: token <token>`;
//! 3. hands the request to the injected [`HttpTransport`];
//! 4. turns non-2xx responses into [`ApiError::Http`] (or
//!    [`ApiError::Domain`] when the body is a domain error envelope);
//! 5. decodes the body as JSON, an empty body being `None`.
//!
//! The pipeline never retries and never recovers locally; every failure goes
//! back to the caller.
//!
//! ## Example
//!
//! ```rust,no_run
//! use marketplace_sdk::api::{ApiClient, Method, RequestOptions};
//! use marketplace_sdk::config::ClientConfig;
//!
//! # async fn example() -> marketplace_sdk::api::ApiResult<()> {
//! let client = ApiClient::new(ClientConfig::new("https://marketplace.example.com/api/v1")?)?;
//! client.authenticate("buyer@example.com", "hunter2").await?;
//!
//! let orders = client
//!     .call(Method::Get, "user/orders", RequestOptions::new().query("limit", "10"))
//!     .await?;
//! println!("{:?}", orders);
//! # Ok(())
//! # }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use super::common::ApiResponse;
use super::error::{ApiError, ApiResult, DomainError, HttpError};
use super::transport::{HttpRequest, HttpResponse, HttpTransport, Method, Part, ReqwestTransport, RequestBody};
use crate::auth::{basic_authorization, Credential, Session};
use crate::config::ClientConfig;

/// Path of the login endpoint, relative to the base URL.
pub const AUTHENTICATE_PATH: &str = "users/authenticate";

/// Percent-encodes one caller-supplied path segment.
///
/// Ids and coupon codes go through here before being formatted into a path,
/// so `/`, `?`, `#` and spaces in them stay data. Empty, `.` and `..`
/// segments are rejected.
///
/// ```rust
/// use marketplace_sdk::api::client::path_segment;
///
/// assert_eq!(path_segment("SAVE#10").unwrap(), "SAVE%2310");
/// assert!(path_segment("..").is_err());
/// ```
pub fn path_segment(value: &str) -> ApiResult<String> {
    if matches!(value, "" | "." | "..") {
        return Err(ApiError::InvalidRequest(format!(
            "Invalid path segment '{}'",
            value
        )));
    }
    Ok(urlencoding::encode(value).into_owned())
}

/// A query string value: one value, or a list encoded as repeated `key[]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    Single(String),
    Many(Vec<String>),
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<u32> for QueryValue {
    fn from(value: u32) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::Many(values)
    }
}

/// Everything a call carries besides its method and path.
///
/// ```rust
/// use marketplace_sdk::api::RequestOptions;
/// use serde_json::json;
///
/// let options = RequestOptions::new()
///     .query("page", 2u32)
///     .header("X-Request-Id", "abc")
///     .json(json!({"quantity": 3}));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    pub query: Vec<(String, QueryValue)>,
    pub body: RequestBody,
    pub headers: BTreeMap<String, String>,
}

impl RequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Appends a query parameter when `value` is `Some`.
    pub fn query_opt<V: Into<QueryValue>>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Adds an extra header. `Authorization` and `User-Agent` are always
    /// overwritten by the pipeline when it sets them.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sends a JSON body.
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Serializes a model as the JSON body.
    pub fn json_body<T: Serialize + ?Sized>(self, body: &T) -> ApiResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidRequest(format!("Unserializable body: {}", e)))?;
        Ok(self.json(value))
    }

    /// Sends URL-encoded form fields.
    pub fn form<K, V>(mut self, fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.body = RequestBody::Form(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Sends a multipart body.
    pub fn multipart(mut self, parts: Vec<Part>) -> Self {
        self.body = RequestBody::Multipart(parts);
        self
    }
}

/// The marketplace API client.
///
/// Owns its configuration, its transport and its [`Session`]. Cheap to share
/// behind an `Arc`; all calls take `&self`.
pub struct ApiClient {
    transport: Arc<dyn HttpTransport>,
    config: ClientConfig,
    session: Session,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Creates a client using the default reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> ApiResult<Self> {
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Arc::new(transport)))
    }

    /// Creates a client with an injected transport and an anonymous session.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            config,
            session: Session::new(),
        }
    }

    /// Replaces the session (builder style).
    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn base_url(&self) -> &Url {
        &self.config.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// The current credential, if any.
    pub fn credential(&self) -> Option<Arc<Credential>> {
        self.session.get()
    }

    /// Replaces the current credential; `None` logs out.
    pub fn set_credential(&self, credential: Option<Credential>) {
        match &credential {
            Some(c) => tracing::debug!("Credential set (user id {:?})", c.user_id()),
            None => tracing::debug!("Credential cleared"),
        }
        self.session.set(credential);
    }

    /// Fails fast when no credential is set.
    ///
    /// Advisory only: nothing is sent. The server stays the authority and a
    /// stale token still fails there with 401.
    pub fn must_be_authenticated(&self) -> ApiResult<Arc<Credential>> {
        self.session
            .get()
            .ok_or(ApiError::AuthenticationRequired(None))
    }

    /// Logs in and stores the resulting credential in the session.
    ///
    /// The request uses HTTP basic credentials and never carries the token
    /// header, even when a credential is already set.
    ///
    /// # Errors
    ///
    /// - [`ApiError::BadCredentials`] on 401
    /// - [`ApiError::Http`] on any other non-2xx status
    /// - [`ApiError::JsonDecoding`] / [`ApiError::UnexpectedResponse`] on a
    ///   malformed body
    pub async fn authenticate(&self, identifier: &str, secret: &str) -> ApiResult<Credential> {
        let url = self.build_url(AUTHENTICATE_PATH, &[])?;
        let mut request = HttpRequest::new(Method::Get, url);
        self.apply_client_headers(&mut request);
        request.set_header("Authorization", basic_authorization(identifier, secret));

        let method = request.method;
        let url = request.url.to_string();
        let response = self.send(request).await?;

        if !response.is_success() {
            let http = HttpError {
                status: response.status,
                method,
                url,
                body: response.body,
            };
            if http.status == 401 {
                tracing::debug!("Authentication rejected for {}", identifier);
                return Err(ApiError::BadCredentials(http));
            }
            return Err(ApiError::Http(http));
        }

        let credential: Credential = into_model(decode_body(&response.body)?)?;
        self.set_credential(Some(credential.clone()));
        Ok(credential)
    }

    /// Executes a call and returns the decoded body.
    ///
    /// `Ok(None)` means the server answered with an empty body.
    pub async fn call(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<Option<Value>> {
        Ok(self.call_raw(method, path, options).await?.data)
    }

    /// Executes a call and returns status, headers and decoded body.
    ///
    /// Needed by endpoints that report pagination through headers.
    pub async fn call_raw(
        &self,
        method: Method,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<ApiResponse> {
        let request = self.prepare(method, path, options)?;
        let url = request.url.to_string();
        let response = self.send(request).await?;

        if !response.is_success() {
            let http = HttpError {
                status: response.status,
                method,
                url,
                body: response.body,
            };
            if let Some(domain) = DomainError::from_envelope(&http) {
                tracing::debug!("Domain error {} from {} {}", domain.code(), method, http.url);
                return Err(domain.into());
            }
            return Err(http.into());
        }

        let data = decode_body(&response.body)?;
        Ok(ApiResponse {
            status: response.status,
            headers: response.headers,
            data,
        })
    }

    /// `GET` and decode into `T`.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        self.get_with(path, RequestOptions::new()).await
    }

    /// `GET` with options and decode into `T`.
    pub async fn get_with<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        into_model(self.call(Method::Get, path, options).await?)
    }

    /// `POST` and decode into `T`.
    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        into_model(self.call(Method::Post, path, options).await?)
    }

    /// `PUT` and decode into `T`.
    pub async fn put<T: DeserializeOwned>(&self, path: &str, options: RequestOptions) -> ApiResult<T> {
        into_model(self.call(Method::Put, path, options).await?)
    }

    /// `PATCH` and decode into `T`.
    pub async fn patch<T: DeserializeOwned>(
        &self,
        path: &str,
        options: RequestOptions,
    ) -> ApiResult<T> {
        into_model(self.call(Method::Patch, path, options).await?)
    }

    /// `DELETE`, ignoring any body.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        self.call(Method::Delete, path, RequestOptions::new())
            .await
            .map(|_| ())
    }

    /// Resolves `path` against the base URL and appends the query.
    ///
    /// Leading slashes are ignored so `"/orders"` and `"orders"` both land
    /// under the base. Absolute URLs and paths that resolve outside the base
    /// are rejected.
    pub fn build_url(&self, path: &str, query: &[(String, QueryValue)]) -> ApiResult<Url> {
        if path.contains("://") {
            return Err(ApiError::InvalidRequest(format!(
                "Expected a path relative to the base URL, got '{}'",
                path
            )));
        }

        let mut url = self
            .config
            .base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ApiError::InvalidRequest(format!("Invalid path '{}': {}", path, e)))?;

        let base = &self.config.base_url;
        if url.origin() != base.origin() || !url.path().starts_with(base.path()) {
            return Err(ApiError::InvalidRequest(format!(
                "Path '{}' resolves outside the base URL",
                path
            )));
        }

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                match value {
                    QueryValue::Single(v) => {
                        pairs.append_pair(key, v);
                    }
                    QueryValue::Many(values) => {
                        let list_key = format!("{}[]", key);
                        for v in values {
                            pairs.append_pair(&list_key, v);
                        }
                    }
                }
            }
        }

        Ok(url)
    }

    fn prepare(&self, method: Method, path: &str, options: RequestOptions) -> ApiResult<HttpRequest> {
        let url = self.build_url(path, &options.query)?;
        let mut request = HttpRequest::new(method, url);

        for (name, value) in options.headers {
            request.set_header(&name, value);
        }
        self.apply_client_headers(&mut request);

        if let Some(credential) = self.session.get() {
            request.set_header("Authorization", credential.authorization_header());
        }

        request.body = options.body;
        Ok(request)
    }

    fn apply_client_headers(&self, request: &mut HttpRequest) {
        request.set_header("User-Agent", crate::USER_AGENT.as_str());
        request.set_header("Accept", "application/json");
        if let Some(language) = &self.config.language {
            if request.header("Accept-Language").is_none() {
                request.set_header("Accept-Language", language.as_str());
            }
        }
    }

    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        tracing::debug!("{} {}", request.method, request.url);
        let response = self.transport.send(request).await?;
        tracing::debug!("-> HTTP {} ({} bytes)", response.status, response.body.len());
        Ok(response)
    }
}

/// Decodes a response body. The only place JSON parsing of responses happens.
fn decode_body(body: &str) -> ApiResult<Option<Value>> {
    if body.is_empty() {
        return Ok(None);
    }
    serde_json::from_str(body).map(Some).map_err(|e| {
        tracing::warn!("Malformed JSON response: {}", e);
        ApiError::json_decoding(e)
    })
}

/// Converts a decoded body into a model. An absent body decodes as `null`.
pub(crate) fn into_model<T: DeserializeOwned>(data: Option<Value>) -> ApiResult<T> {
    serde_json::from_value(data.unwrap_or(Value::Null)).map_err(|source| {
        ApiError::UnexpectedResponse {
            expected: std::any::type_name::<T>(),
            source,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{stub_client, StubTransport};
    use serde_json::json;

    #[tokio::test]
    async fn test_authorization_header_injected_when_credential_set() {
        let stub = StubTransport::with_responses(vec![HttpResponse::new(200, "{}")]);
        let client = stub_client(&stub);
        client.set_credential(Some(Credential::new("abc")));

        client
            .call(Method::Get, "catalog/products", RequestOptions::new())
            .await
            .unwrap();

        let requests = stub.requests();
        assert_eq!(requests[0].header("Authorization"), Some("token abc"));
    }

    #[tokio::test]
    async fn test_authorization_header_absent_without_credential() {
        let stub = StubTransport::with_responses(vec![HttpResponse::new(200, "{}")]);
        let client = stub_client(&stub);

        client
            .call(Method::Get, "catalog/products", RequestOptions::new())
            .await
            .unwrap();

        assert_eq!(stub.requests()[0].header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_credential_overrides_caller_authorization() {
        let stub = StubTransport::with_responses(vec![HttpResponse::new(200, "")]);
        let client = stub_client(&stub);
        client.set_credential(Some(Credential::new("abc")));

        client
            .call(
                Method::Post,
                "basket",
                RequestOptions::new().header("authorization", "Bearer nope"),
            )
            .await
            .unwrap();

        assert_eq!(stub.requests()[0].header("Authorization"), Some("token abc"));
    }

    #[tokio::test]
    async fn test_logout_removes_authorization_header() {
        let stub = StubTransport::with_responses(vec![
            HttpResponse::new(200, "{}"),
            HttpResponse::new(200, "{}"),
        ]);
        let client = stub_client(&stub);
        client.set_credential(Some(Credential::new("abc")));
        client.call(Method::Get, "a", RequestOptions::new()).await.unwrap();
        client.set_credential(None);
        client.call(Method::Get, "b", RequestOptions::new()).await.unwrap();

        let requests = stub.requests();
        assert_eq!(requests[0].header("Authorization"), Some("token abc"));
        assert_eq!(requests[1].header("Authorization"), None);
    }

    #[tokio::test]
    async fn test_user_agent_always_sent() {
        let stub = StubTransport::with_responses(vec![HttpResponse::new(200, "{}")]);
        let client = stub_client(&stub);

        client
            .call(
                Method::Get,
                "cms/menus",
                RequestOptions::new().header("User-Agent", "spoofed"),
            )
            .await
            .unwrap();

        let user_agent = stub.requests()[0].header("user-agent").unwrap().to_string();
        assert_eq!(user_agent, crate::USER_AGENT.as_str());
        assert!(user_agent.starts_with("marketplace-sdk-rust/"));
    }

    #[tokio::test]
    async fn test_empty_body_decodes_to_none() {
        let stub = StubTransport::with_responses(vec![HttpResponse::new(200, "")]);
        let client = stub_client(&stub);

        let data = client
            .call(Method::Delete, "basket/1/coupons/X", RequestOptions::new())
            .await
            .unwrap();

        assert!(data.is_none());
    }

    #[tokio::test]
    async fn test_malformed_json_is_a_decoding_error() {
        let stub = StubTransport::with_responses(vec![HttpResponse::new(
            200,
            r#"{"malformedJSON":[]]}"#,
        )]);
        let client = stub_client(&stub);

        let err = client
            .call(Method::Get, "catalog/products", RequestOptions::new())
            .await
            .unwrap_err();

        match err {
            ApiError::JsonDecoding { category, line, .. } => {
                assert_eq!(category, crate::api::JsonErrorCategory::Syntax);
                assert_eq!(line, 1);
            }
            other => panic!("expected JsonDecoding, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_success_becomes_http_error() {
        let stub = StubTransport::with_responses(vec![HttpResponse::new(500, "oops")]);
        let client = stub_client(&stub);

        let err = client
            .call(Method::Get, "orders", RequestOptions::new())
            .await
            .unwrap_err();

        match err {
            ApiError::Http(http) => {
                assert_eq!(http.status, 500);
                assert_eq!(http.body, "oops");
                assert_eq!(http.method, Method::Get);
                assert_eq!(http.url, "https://marketplace.test/api/v1/orders");
            }
            other => panic!("expected Http, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_domain_envelope_becomes_domain_error() {
        let body = json!({"error": {"code": 1, "message": "Basket not found", "context": {"basketId": "b-1"}}});
        let stub = StubTransport::with_responses(vec![HttpResponse::new(404, body.to_string())]);
        let client = stub_client(&stub);

        let err = client
            .call(Method::Get, "basket/b-1", RequestOptions::new())
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), Some(crate::api::ErrorCode::BasketNotFound));
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_authenticate_bad_credentials() {
        let stub = StubTransport::with_responses(vec![HttpResponse::new(401, "")]);
        let client = stub_client(&stub);

        let err = client.authenticate("user", "wrongpass").await.unwrap_err();

        assert!(matches!(err, ApiError::BadCredentials(ref http) if http.status == 401));
        assert!(client.credential().is_none());
    }

    #[tokio::test]
    async fn test_authenticate_stores_credential() {
        let stub = StubTransport::with_responses(vec![HttpResponse::new(200, r#"{"token":"abc"}"#)]);
        let client = stub_client(&stub);

        let credential = client.authenticate("user", "rightpass").await.unwrap();

        assert_eq!(credential.token(), "abc");
        assert_eq!(client.credential().unwrap().token(), "abc");

        let request = &stub.requests()[0];
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url.path(), "/api/v1/users/authenticate");
        assert_eq!(request.header("Authorization"), Some("Basic dXNlcjpyaWdodHBhc3M="));
    }

    #[tokio::test]
    async fn test_authenticate_ignores_existing_token() {
        let stub = StubTransport::with_responses(vec![HttpResponse::new(200, r#"{"token":"new"}"#)]);
        let client = stub_client(&stub);
        client.set_credential(Some(Credential::new("old")));

        client.authenticate("user", "pass").await.unwrap();

        let header = stub.requests()[0].header("Authorization").unwrap().to_string();
        assert!(header.starts_with("Basic "));
        assert_eq!(client.credential().unwrap().token(), "new");
    }

    #[tokio::test]
    async fn test_authenticate_other_status_is_generic() {
        let stub = StubTransport::with_responses(vec![HttpResponse::new(503, "maintenance")]);
        let client = stub_client(&stub);

        let err = client.authenticate("user", "pass").await.unwrap_err();

        assert!(matches!(err, ApiError::Http(ref http) if http.status == 503));
    }

    #[test]
    fn test_must_be_authenticated_makes_no_call() {
        let stub = StubTransport::with_responses(vec![]);
        let client = stub_client(&stub);

        let err = client.must_be_authenticated().unwrap_err();

        assert!(matches!(err, ApiError::AuthenticationRequired(None)));
        assert_eq!(stub.calls(), 0);
    }

    #[test]
    fn test_build_url_joins_and_encodes_query() {
        let stub = StubTransport::with_responses(vec![]);
        let client = stub_client(&stub);

        let url = client
            .build_url(
                "/catalog/search/products",
                &[
                    ("query".to_string(), QueryValue::from("red shoes")),
                    (
                        "filters".to_string(),
                        QueryValue::from(vec!["a".to_string(), "b".to_string()]),
                    ),
                ],
            )
            .unwrap();

        assert_eq!(url.path(), "/api/v1/catalog/search/products");
        assert_eq!(
            url.query(),
            Some("query=red+shoes&filters%5B%5D=a&filters%5B%5D=b")
        );
    }

    #[test]
    fn test_build_url_rejects_absolute_urls() {
        let stub = StubTransport::with_responses(vec![]);
        let client = stub_client(&stub);

        assert!(client.build_url("https://elsewhere.test/x", &[]).is_err());
    }

    #[test]
    fn test_build_url_rejects_paths_leaving_the_base() {
        let stub = StubTransport::with_responses(vec![]);
        let client = stub_client(&stub);

        assert!(client.build_url("basket/../../../admin/users", &[]).is_err());
        assert!(client.build_url("basket/%2e%2e/%2e%2e/%2e%2e/admin", &[]).is_err());
    }

    #[test]
    fn test_path_segment_encodes_url_syntax() {
        assert_eq!(path_segment("SAVE#10 /x?y").unwrap(), "SAVE%2310%20%2Fx%3Fy");
        assert_eq!(path_segment("b-1").unwrap(), "b-1");
        for bad in ["", ".", ".."] {
            assert!(matches!(path_segment(bad), Err(ApiError::InvalidRequest(_))));
        }
    }

    #[tokio::test]
    async fn test_language_header() {
        let stub = StubTransport::with_responses(vec![HttpResponse::new(200, "[]")]);
        let config = ClientConfig::new("https://marketplace.test/api/v1")
            .unwrap()
            .with_language("fr");
        let client = ApiClient::with_transport(config, stub.clone());

        client.call(Method::Get, "cms/menus", RequestOptions::new()).await.unwrap();

        assert_eq!(stub.requests()[0].header("accept-language"), Some("fr"));
    }

    #[tokio::test]
    async fn test_typed_get_reports_shape_mismatch() {
        let stub = StubTransport::with_responses(vec![HttpResponse::new(200, r#"{"id":"x"}"#)]);
        let client = stub_client(&stub);

        #[derive(Debug, serde::Deserialize)]
        struct Thing {
            #[allow(dead_code)]
            id: u64,
        }

        let err = client.get::<Thing>("things/x").await.unwrap_err();
        assert!(matches!(err, ApiError::UnexpectedResponse { .. }));
    }

    #[tokio::test]
    async fn test_transport_failure_propagates() {
        // No stubbed response: the stub reports a transport failure.
        let stub = StubTransport::with_responses(vec![]);
        let client = stub_client(&stub);

        let err = client
            .call(Method::Get, "orders", RequestOptions::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ApiError::Transport(_)));
        assert_eq!(stub.calls(), 1);
    }
}
