//! Declarative request descriptors.
//!
//! An `ApiRequest` is plain data: the HTTP method, the path relative to the
//! configured base endpoint, and an optional JSON body. Building one never
//! touches the network, which keeps the route table testable on its own.

use reqwest::Method;
use serde::Serialize;
use serde_json::Value;

use super::{ApiError, ApiResult};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
        }
    }

    /// Attach a JSON body, serializing the payload eagerly
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> ApiResult<Self> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidRequest(format!("Failed to encode body: {}", e)))?;
        self.body = Some(value);
        Ok(self)
    }
}

/// Encode an identifier as a single path segment.
///
/// Unreserved characters pass through; everything else is percent-encoded
/// so a stray `/` or `?` in an id can never change the route.
pub fn segment(id: &str) -> String {
    urlencoding::encode(id).into_owned()
}
