//! Route table for the clubs/events server.
//!
//! Each function maps (identifier, payload) to an `ApiRequest` and does
//! nothing else. `ApiClient` wraps these with typed responses.

use serde::Serialize;

use super::request::{segment, ApiRequest};
use super::ApiResult;

pub mod auth {
    use super::*;

    pub fn register<B: Serialize>(data: &B) -> ApiResult<ApiRequest> {
        ApiRequest::post("/auth/register").json(data)
    }

    pub fn login<B: Serialize>(data: &B) -> ApiResult<ApiRequest> {
        ApiRequest::post("/auth/login").json(data)
    }

    pub fn me() -> ApiRequest {
        ApiRequest::get("/auth/me")
    }
}

pub mod clubs {
    use super::*;

    pub fn list() -> ApiRequest {
        ApiRequest::get("/clubs/")
    }

    pub fn get(uid: &str) -> ApiRequest {
        ApiRequest::get(format!("/clubs/{}", segment(uid)))
    }

    pub fn join(uid: &str) -> ApiRequest {
        ApiRequest::post(format!("/clubs/{}/join", segment(uid)))
    }

    pub fn members(uid: &str) -> ApiRequest {
        ApiRequest::get(format!("/clubs/{}/members", segment(uid)))
    }
}

pub mod events {
    use super::*;

    pub fn list() -> ApiRequest {
        ApiRequest::get("/events/")
    }

    pub fn get(uid: &str) -> ApiRequest {
        ApiRequest::get(format!("/events/{}", segment(uid)))
    }

    pub fn join(uid: &str) -> ApiRequest {
        ApiRequest::post(format!("/events/{}/join", segment(uid)))
    }

    pub fn for_club(club_uid: &str) -> ApiRequest {
        ApiRequest::get(format!("/events/club/{}", segment(club_uid)))
    }

    pub fn delete(uid: &str) -> ApiRequest {
        ApiRequest::delete(format!("/events/{}", segment(uid)))
    }
}

pub mod comments {
    use super::*;

    pub fn for_event(event_uid: &str) -> ApiRequest {
        ApiRequest::get(format!("/comments/event/{}", segment(event_uid)))
    }

    pub fn create<B: Serialize>(data: &B) -> ApiResult<ApiRequest> {
        ApiRequest::post("/comments/").json(data)
    }

    pub fn reply<B: Serialize>(comment_uid: &str, data: &B) -> ApiResult<ApiRequest> {
        ApiRequest::post(format!("/comments/{}/reply", segment(comment_uid))).json(data)
    }
}
