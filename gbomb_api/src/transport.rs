//! The HTTP exchange capability the [`Invoker`](crate::Invoker) is built on.
//!
//! The invoker never constructs its own HTTP client: it is handed an
//! `Arc<dyn Transport>`, which lets tests substitute an in-process double.

use std::time::Duration;

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_util::stream::BoxStream;
use futures_util::{StreamExt, TryStreamExt};
use url::Url;

use crate::Error;

/// Request timeout for the reqwest transport.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Longest body excerpt carried in errors and log lines.
const MAX_SNIPPET: usize = 2000;

/// A response body delivered chunk by chunk. Dropping it releases the connection.
pub type ByteStream = BoxStream<'static, Result<Bytes, Error>>;

/// Status and body of a completed HTTP exchange.
pub struct HttpResponse {
    pub status: u16,
    pub body: ByteStream,
}

impl HttpResponse {
    /// Builds a response from an in-memory body.
    pub fn from_bytes(status: u16, body: impl Into<Bytes>) -> Self {
        let body: Bytes = body.into();
        Self {
            status,
            body: futures_util::stream::once(async move { Ok(body) }).boxed(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Reads the whole body into memory.
    pub async fn bytes(mut self) -> Result<Bytes, Error> {
        let mut buf = BytesMut::new();
        while let Some(chunk) = self.body.next().await {
            buf.extend_from_slice(&chunk?);
        }
        Ok(buf.freeze())
    }

    /// Reads the body and turns a non-2xx status into [`Error::HttpStatus`].
    pub async fn success_bytes(self) -> Result<Bytes, Error> {
        let status = self.status;
        let ok = self.is_success();
        let body = self.bytes().await?;
        if !ok {
            let snippet = truncate_body(&String::from_utf8_lossy(&body));
            tracing::error!("Request failed with status {}: {}", status, snippet);
            return Err(Error::HttpStatus {
                status,
                body: snippet,
            });
        }
        Ok(body)
    }

    /// Hands back the open body stream, or [`Error::HttpStatus`] for a non-2xx status.
    pub async fn success_stream(self) -> Result<ByteStream, Error> {
        if self.is_success() {
            Ok(self.body)
        } else {
            self.success_bytes()
                .await
                .map(|b| futures_util::stream::once(async move { Ok(b) }).boxed())
        }
    }
}

/// Performs one GET exchange. Implementations must be safe to share between tasks.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: Url) -> Result<HttpResponse, Error>;
}

/// [`Transport`] backed by a shared `reqwest::Client`.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("gbomb/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| {
                tracing::error!("Failed to build HTTP client: {}", e);
                Error::from(e)
            })?;
        Ok(Self { client })
    }

    /// Wraps an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, url: Url) -> Result<HttpResponse, Error> {
        let resp = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Failed to get resource: {}", e);
            Error::from(e)
        })?;
        let status = resp.status().as_u16();
        let body = resp.bytes_stream().map_err(Error::from).boxed();
        Ok(HttpResponse { status, body })
    }
}

pub(crate) fn truncate_body(body: &str) -> String {
    if body.len() <= MAX_SNIPPET {
        body.to_string()
    } else {
        let mut end = MAX_SNIPPET;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...[truncated]", &body[..end])
    }
}
