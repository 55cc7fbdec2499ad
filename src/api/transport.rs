//
//  marketplace-sdk
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # HTTP Transport
//!
//! The pipeline never talks to the network itself. It hands a fully built
//! [`HttpRequest`] to an [`HttpTransport`] and gets an [`HttpResponse`] back.
//!
//! [`ReqwestTransport`] is the default implementation. Tests and embedding
//! applications can inject their own (a recording stub, a client with a
//! custom TLS setup, a proxy...).
//!
//! Timeouts, connection reuse and TLS are transport concerns; the pipeline has
//! no opinion about them.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::error::TransportError;
use crate::config::ClientConfig;

/// HTTP methods supported by the marketplace API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// The method name as sent on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            other => Err(format!(
                "Invalid HTTP method: {}. Use GET, POST, PUT, PATCH, or DELETE",
                other
            )),
        }
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// One multipart part.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    /// Form field name.
    pub name: String,
    /// Part payload.
    pub contents: PartContents,
}

/// Payload of a multipart [`Part`].
#[derive(Debug, Clone, PartialEq)]
pub enum PartContents {
    /// A plain text field.
    Text(String),
    /// A file upload.
    File {
        filename: String,
        content_type: Option<String>,
        bytes: Vec<u8>,
    },
}

impl Part {
    /// A text field part.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: PartContents::Text(value.into()),
        }
    }

    /// A file part.
    pub fn file(
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: Option<&str>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            name: name.into(),
            contents: PartContents::File {
                filename: filename.into(),
                content_type: content_type.map(str::to_string),
                bytes,
            },
        }
    }
}

/// Request body variants.
///
/// JSON is the default wire format; form fields and multipart uploads are
/// used by a handful of endpoints (basket edits, document uploads).
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Form(Vec<(String, String)>),
    Multipart(Vec<Part>),
}

/// A fully built outgoing request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    /// Header map; names are stored lowercase.
    pub headers: BTreeMap<String, String>,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: BTreeMap::new(),
            body: RequestBody::Empty,
        }
    }

    /// Sets a header, replacing any existing value regardless of case.
    pub fn set_header(&mut self, name: &str, value: impl Into<String>) {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
    }

    /// Reads a header (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }
}

/// A response as received from the transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    /// Header map; names are stored lowercase.
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    /// Convenience constructor, mostly for stubs.
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            headers: BTreeMap::new(),
            body: body.into(),
        }
    }

    /// Adds a header (builder style).
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Reads a header (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Abstraction over the HTTP client doing the actual exchange.
///
/// Implementations must return `Ok` for every response that arrived,
/// whatever its status; status handling belongs to the pipeline.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// [`HttpTransport`] backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: Client,
}

impl ReqwestTransport {
    /// Builds a transport honouring the config's timeout.
    pub fn new(config: &ClientConfig) -> Result<Self, TransportError> {
        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| TransportError::with_source("Failed to create HTTP client", e))?;
        Ok(Self { http })
    }

    /// Wraps an existing `reqwest::Client`.
    pub fn from_client(http: Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let mut builder = self.http.request(request.method.into(), request.url);

        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Form(fields) => builder.form(&fields),
            RequestBody::Multipart(parts) => builder.multipart(build_multipart(parts)?),
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();

        let mut headers = BTreeMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_ascii_lowercase(), value.to_string());
            }
        }

        let body = response.text().await?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn build_multipart(parts: Vec<Part>) -> Result<reqwest::multipart::Form, TransportError> {
    use reqwest::multipart::{Form, Part as FormPart};

    let mut form = Form::new();
    for part in parts {
        form = match part.contents {
            PartContents::Text(value) => form.text(part.name, value),
            PartContents::File {
                filename,
                content_type,
                bytes,
            } => {
                let mut file = FormPart::bytes(bytes).file_name(filename);
                if let Some(mime) = content_type {
                    file = file.mime_str(&mime).map_err(|e| {
                        TransportError::with_source(format!("Invalid content type: {}", mime), e)
                    })?;
                }
                form.part(part.name, file)
            }
        };
    }
    Ok(form)
}
