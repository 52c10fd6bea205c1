//! Request handling and transformation.
//!
//! # Responsibilities
//! - Extract the routing- and environment-relevant parts of a request
//! - Buffer the body when form parsing needs it
//!
//! # Design Decisions
//! - Extraction happens once, up front; downstream code works on the plain
//!   RequestContext and never touches the hyper types
//! - The body is only read when form mode asks for it, capped at 1 MiB
//! - A body that fails to read is logged and treated as empty

use axum::body::{Body, Bytes};
use axum::extract::Request;
use axum::http::{header, HeaderMap, Method, Version};
use std::net::SocketAddr;

/// Largest body the form parser will buffer.
const MAX_FORM_BODY: usize = 1024 * 1024;

/// Per-request data derived from the incoming HTTP request.
///
/// Lifetime is one request; it feeds exactly one environment build.
#[derive(Debug)]
pub struct RequestContext {
    pub method: Method,
    /// URL path, exactly as requested.
    pub path: String,
    /// Raw query string, without the `?`; empty when absent.
    pub raw_query: String,
    /// Path plus query, as sent in the request line.
    pub uri: String,
    pub version: Version,
    pub headers: HeaderMap,
    /// Peer address; `None` when connect info is unavailable.
    pub remote: Option<SocketAddr>,
    /// Buffered body; empty unless form parsing requested it.
    pub body: Bytes,
}

impl RequestContext {
    /// Consume a request into a context. `read_body` is set when form mode
    /// is on; otherwise the body is dropped unread.
    pub async fn from_request(
        request: Request,
        remote: Option<SocketAddr>,
        read_body: bool,
    ) -> Self {
        let (parts, body) = request.into_parts();

        let body = if read_body {
            read_buffered(body).await
        } else {
            Bytes::new()
        };

        let path = parts.uri.path().to_string();
        let raw_query = parts.uri.query().unwrap_or("").to_string();
        let uri = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| path.clone());

        Self {
            method: parts.method,
            path,
            raw_query,
            uri,
            version: parts.version,
            headers: parts.headers,
            remote,
            body,
        }
    }

    /// The request protocol as a CGI SERVER_PROTOCOL string.
    pub fn protocol(&self) -> &'static str {
        match self.version {
            Version::HTTP_09 => "HTTP/0.9",
            Version::HTTP_10 => "HTTP/1.0",
            Version::HTTP_2 => "HTTP/2.0",
            Version::HTTP_3 => "HTTP/3.0",
            _ => "HTTP/1.1",
        }
    }

    /// Whether the buffered body should be parsed as an HTML form.
    pub fn has_form_body(&self) -> bool {
        if self.body.is_empty() {
            return false;
        }
        self.headers
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false)
    }
}

async fn read_buffered(body: Body) -> Bytes {
    match axum::body::to_bytes(body, MAX_FORM_BODY).await {
        Ok(bytes) => bytes,
        Err(err) => {
            tracing::warn!(error = %err, "Failed to buffer request body, treating as empty");
            Bytes::new()
        }
    }
}
