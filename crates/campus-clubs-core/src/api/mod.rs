//! REST API client module for the Campus Clubs server.
//!
//! Requests are described declaratively by the functions in `routes`
//! (method, path, body) and dispatched through `ApiClient`, which attaches
//! a bearer token from the injected `TokenProvider` when one is available.

pub mod client;
pub mod error;
pub mod request;
pub mod routes;

pub use client::{ApiClient, HomeFeed, DEFAULT_BASE_URL};
pub use error::{ApiError, ApiResult};
pub use request::ApiRequest;
