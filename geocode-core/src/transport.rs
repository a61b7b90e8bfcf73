use std::fmt::Debug;

use async_trait::async_trait;
use reqwest::Client;

use crate::{
    model::{EndpointRequest, HttpMethod},
    normalizer::HttpOutcome,
};

/// Performs the HTTP call for a built request.
///
/// Implementations never fail: every problem is reported through
/// [`HttpOutcome`] so the batch keeps going.
#[async_trait]
pub trait GeoTransport: Send + Sync + Debug {
    async fn get(&self, request: &EndpointRequest) -> HttpOutcome;
}

/// `reqwest`-backed transport talking to the real geocoding API.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self { http: Client::new() }
    }
}

#[async_trait]
impl GeoTransport for HttpTransport {
    async fn get(&self, request: &EndpointRequest) -> HttpOutcome {
        let builder = match request.method {
            HttpMethod::Get => self.http.get(request.url.clone()),
        };

        let res = match builder.send().await {
            Ok(res) => res,
            Err(e) => return HttpOutcome::TransportError(e.to_string()),
        };

        let status = res.status();
        if status.is_client_error() || status.is_server_error() {
            return HttpOutcome::HttpError {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                url: res.url().to_string(),
            };
        }

        let body = match res.text().await {
            Ok(body) => body,
            Err(e) => return HttpOutcome::TransportError(e.to_string()),
        };

        match serde_json::from_str(&body) {
            Ok(value) => HttpOutcome::JsonBody(value),
            Err(e) => HttpOutcome::InvalidBody(e.to_string()),
        }
    }
}
