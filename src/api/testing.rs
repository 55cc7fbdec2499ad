//
//  marketplace-sdk
//  api/testing.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Recording stub transport shared by the unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::client::ApiClient;
use super::error::TransportError;
use super::transport::{HttpRequest, HttpResponse, HttpTransport};
use crate::config::ClientConfig;

/// Replays canned responses in order and records every request it sees.
///
/// Once the canned responses run out, every call fails with a transport
/// error.
#[derive(Default)]
pub(crate) struct StubTransport {
    responses: Mutex<VecDeque<HttpResponse>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubTransport {
    pub(crate) fn with_responses(responses: Vec<HttpResponse>) -> Arc<Self> {
        Arc::new(Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub(crate) fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| TransportError::new("no stubbed response left"))
    }
}

/// A client pointed at `https://marketplace.test/api/v1/` using `stub`.
pub(crate) fn stub_client(stub: &Arc<StubTransport>) -> ApiClient {
    let config = ClientConfig::new("https://marketplace.test/api/v1").unwrap();
    ApiClient::with_transport(config, stub.clone())
}
