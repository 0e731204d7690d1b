//! API client for communicating with the Campus Clubs REST API.
//!
//! `ApiClient` owns the connection pool, the base endpoint and the token
//! provider. Route functions describe requests; the client sends them.

use std::sync::Arc;

use reqwest::{header, Client};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::auth::TokenProvider;
use crate::models::{
    Ack, Club, ClubMember, Comment, CommentReply, Event, LoginRequest, LoginResponse, NewComment,
    RegisterRequest, User,
};

use super::request::ApiRequest;
use super::routes::{auth, clubs, comments, events};
use super::{ApiError, ApiResult};

// ============================================================================
// Constants
// ============================================================================

/// Base endpoint used when neither config nor environment names one
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Clubs and events fetched together for the home feed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeFeed {
    pub clubs: Vec<Club>,
    pub events: Vec<Event>,
}

/// API client for the clubs/events server.
/// Clone is cheap - reqwest::Client and the token provider are both Arc-backed.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider>,
}

impl ApiClient {
    /// Create a client for `base_url` that asks `tokens` for credentials
    pub fn new(base_url: &str, tokens: Arc<dyn TokenProvider>) -> ApiResult<Self> {
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder().default_headers(default_headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn auth_headers(&self) -> ApiResult<header::HeaderMap> {
        let mut headers = header::HeaderMap::new();
        if let Some(token) = self.tokens.bearer_token() {
            let mut value = header::HeaderValue::from_str(&format!("Bearer {}", token))
                .map_err(|_| ApiError::InvalidHeader)?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(headers)
    }

    /// Turn a descriptor into a concrete request, attaching the bearer token
    pub fn build(&self, request: &ApiRequest) -> ApiResult<reqwest::Request> {
        let mut builder = self
            .client
            .request(request.method.clone(), self.url(&request.path))
            .headers(self.auth_headers()?);

        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        Ok(builder.build()?)
    }

    /// Check if response is successful, returning an error with body if not.
    async fn check_response(response: reqwest::Response) -> ApiResult<reqwest::Response> {
        if response.status().is_success() {
            Ok(response)
        } else {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            Err(ApiError::from_status(status, &body))
        }
    }

    /// Send a request and return the raw response body
    async fn send_raw(&self, request: ApiRequest) -> ApiResult<String> {
        debug!(method = %request.method, path = %request.path, "Sending request");
        let built = self.build(&request)?;

        let response = self.client.execute(built).await?;
        let response = Self::check_response(response).await.inspect_err(|e| {
            warn!(method = %request.method, path = %request.path, error = %e, "Request rejected");
        })?;

        Ok(response.text().await?)
    }

    /// Send a request and decode the JSON response
    pub async fn send<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<T> {
        let path = request.path.clone();
        let text = self.send_raw(request).await?;
        let body = if text.trim().is_empty() { "null" } else { text.as_str() };
        serde_json::from_str(body)
            .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response from {}: {}", path, e)))
    }

    /// Send a request whose response is at most a message
    async fn send_ack(&self, request: ApiRequest) -> ApiResult<Ack> {
        let ack: Option<Ack> = self.send(request).await?;
        Ok(ack.unwrap_or_default())
    }

    /// Send a request for a list; a `null` body is an empty list
    async fn send_list<T: DeserializeOwned>(&self, request: ApiRequest) -> ApiResult<Vec<T>> {
        let list: Option<Vec<T>> = self.send(request).await?;
        Ok(list.unwrap_or_default())
    }

    // ===== Auth =====

    pub async fn register(&self, data: &RegisterRequest) -> ApiResult<Ack> {
        self.send_ack(auth::register(data)?).await
    }

    pub async fn login(&self, data: &LoginRequest) -> ApiResult<LoginResponse> {
        self.send(auth::login(data)?).await
    }

    /// Fetch the signed-in user
    pub async fn me(&self) -> ApiResult<User> {
        self.send(auth::me()).await
    }

    // ===== Clubs =====

    pub async fn list_clubs(&self) -> ApiResult<Vec<Club>> {
        self.send_list(clubs::list()).await
    }

    pub async fn get_club(&self, uid: &str) -> ApiResult<Club> {
        self.send(clubs::get(uid)).await
    }

    pub async fn join_club(&self, uid: &str) -> ApiResult<Ack> {
        self.send_ack(clubs::join(uid)).await
    }

    pub async fn club_members(&self, uid: &str) -> ApiResult<Vec<ClubMember>> {
        self.send_list(clubs::members(uid)).await
    }

    // ===== Events =====

    pub async fn list_events(&self) -> ApiResult<Vec<Event>> {
        self.send_list(events::list()).await
    }

    pub async fn get_event(&self, uid: &str) -> ApiResult<Event> {
        self.send(events::get(uid)).await
    }

    pub async fn join_event(&self, uid: &str) -> ApiResult<Ack> {
        self.send_ack(events::join(uid)).await
    }

    pub async fn club_events(&self, club_uid: &str) -> ApiResult<Vec<Event>> {
        self.send_list(events::for_club(club_uid)).await
    }

    pub async fn delete_event(&self, uid: &str) -> ApiResult<Ack> {
        self.send_ack(events::delete(uid)).await
    }

    // ===== Comments =====

    /// Fetch an event's comment threads, newest first
    pub async fn event_comments(&self, event_uid: &str) -> ApiResult<Vec<Comment>> {
        self.send_list(comments::for_event(event_uid)).await
    }

    pub async fn create_comment(&self, data: &NewComment) -> ApiResult<Comment> {
        self.send(comments::create(data)?).await
    }

    pub async fn reply_to_comment(&self, comment_uid: &str, data: &CommentReply) -> ApiResult<Comment> {
        self.send(comments::reply(comment_uid, data)?).await
    }

    // ===== Composite =====

    /// Fetch clubs and events concurrently; fails if either request fails
    pub async fn fetch_home_feed(&self) -> ApiResult<HomeFeed> {
        let (clubs, events) = futures::try_join!(self.list_clubs(), self.list_events())?;
        debug!(clubs = clubs.len(), events = events.len(), "Home feed fetched");
        Ok(HomeFeed { clubs, events })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{NoToken, StaticToken};
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client_with(url: &str, token: Option<&str>) -> ApiClient {
        let tokens: Arc<dyn TokenProvider> = match token {
            Some(t) => Arc::new(StaticToken(t.to_string())),
            None => Arc::new(NoToken),
        };
        ApiClient::new(url, tokens).unwrap()
    }

    #[test]
    fn test_build_attaches_bearer_when_token_present() {
        let api = client_with("http://127.0.0.1:5000", Some("tok-1"));
        let req = api.build(&clubs::list()).unwrap();
        assert_eq!(req.url().as_str(), "http://127.0.0.1:5000/clubs/");
        assert_eq!(
            req.headers().get(header::AUTHORIZATION).unwrap(),
            "Bearer tok-1"
        );
    }

    #[test]
    fn test_build_omits_auth_without_token() {
        let api = client_with("http://127.0.0.1:5000/", None);
        let req = api.build(&events::get("e1")).unwrap();
        assert_eq!(req.url().as_str(), "http://127.0.0.1:5000/events/e1");
        assert!(req.headers().get(header::AUTHORIZATION).is_none());
    }

    #[test]
    fn test_build_rejects_unencodable_token() {
        let api = client_with("http://127.0.0.1:5000", Some("bad\ntoken"));
        assert!(matches!(api.build(&auth::me()), Err(ApiError::InvalidHeader)));
    }

    #[test]
    fn test_build_json_body() {
        let api = client_with("http://127.0.0.1:5000", None);
        let body = NewComment {
            event_uid: "e1".to_string(),
            content: "hello".to_string(),
        };
        let req = api.build(&comments::create(&body).unwrap()).unwrap();
        assert_eq!(req.method(), reqwest::Method::POST);
        let bytes = req.body().and_then(|b| b.as_bytes()).unwrap();
        let sent: serde_json::Value = serde_json::from_slice(bytes).unwrap();
        assert_eq!(sent, json!({"event_uid": "e1", "content": "hello"}));
    }

    #[tokio::test]
    async fn test_bearer_sent_only_with_token() {
        let mut server = Server::new_async().await;

        let authed = server
            .mock("GET", "/auth/me")
            .match_header("authorization", "Bearer secret")
            .match_header("content-type", "application/json")
            .with_status(200)
            .with_body(r#"{"uid": "u1", "name": "Ada"}"#)
            .create_async()
            .await;

        let api = client_with(&server.url(), Some("secret"));
        let me = api.me().await.unwrap();
        assert_eq!(me.uid, "u1");
        authed.assert_async().await;

        let anonymous = server
            .mock("GET", "/clubs/")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let api = client_with(&server.url(), None);
        assert!(api.list_clubs().await.unwrap().is_empty());
        anonymous.assert_async().await;
    }

    #[tokio::test]
    async fn test_token_read_per_request() {
        use std::sync::Mutex;

        struct Swappable(Mutex<Option<String>>);
        impl TokenProvider for Swappable {
            fn bearer_token(&self) -> Option<String> {
                self.0.lock().unwrap().clone()
            }
        }

        let mut server = Server::new_async().await;
        let first = server
            .mock("GET", "/events/")
            .match_header("authorization", Matcher::Missing)
            .with_body("[]")
            .create_async()
            .await;

        let provider = Arc::new(Swappable(Mutex::new(None)));
        let api = ApiClient::new(&server.url(), provider.clone()).unwrap();
        api.list_events().await.unwrap();
        first.assert_async().await;

        *provider.0.lock().unwrap() = Some("fresh".to_string());
        let second = server
            .mock("GET", "/events/")
            .match_header("authorization", "Bearer fresh")
            .with_body("[]")
            .create_async()
            .await;
        api.list_events().await.unwrap();
        second.assert_async().await;
    }

    #[tokio::test]
    async fn test_login_posts_credentials() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/auth/login")
            .match_body(Matcher::Json(json!({"email": "ada@campus.edu", "password": "pw"})))
            .with_status(200)
            .with_body(r#"{"access_token": "tok", "uid": "u1"}"#)
            .create_async()
            .await;

        let api = client_with(&server.url(), None);
        let resp = api
            .login(&LoginRequest {
                email: "ada@campus.edu".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(resp.access_token, "tok");
        assert_eq!(resp.uid, "u1");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rejection_carries_server_message() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/auth/login")
            .with_status(401)
            .with_body(r#"{"msg": "Bad email or password"}"#)
            .create_async()
            .await;
        server
            .mock("DELETE", "/events/e1")
            .with_status(500)
            .with_body("Internal Server Error")
            .create_async()
            .await;

        let api = client_with(&server.url(), Some("t"));
        let err = api
            .login(&LoginRequest {
                email: "a".to_string(),
                password: "b".to_string(),
            })
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(reqwest::StatusCode::UNAUTHORIZED));
        assert_eq!(err.message_or("Failed to login"), "Bad email or password");

        let err = api.delete_event("e1").await.unwrap_err();
        assert_eq!(err.message_or("Failed to delete event"), "Failed to delete event");
    }

    #[tokio::test]
    async fn test_empty_and_null_bodies() {
        let mut server = Server::new_async().await;
        server
            .mock("DELETE", "/events/e1")
            .with_status(204)
            .create_async()
            .await;
        server
            .mock("GET", "/events/club/c1")
            .with_status(200)
            .with_body("null")
            .create_async()
            .await;
        server
            .mock("POST", "/clubs/c1/join")
            .with_status(200)
            .with_body(r#"{"msg": "joined club"}"#)
            .create_async()
            .await;

        let api = client_with(&server.url(), Some("t"));
        assert_eq!(api.delete_event("e1").await.unwrap(), Ack::default());
        assert!(api.club_events("c1").await.unwrap().is_empty());
        assert_eq!(
            api.join_club("c1").await.unwrap().message_or("Joined"),
            "joined club"
        );
    }

    #[tokio::test]
    async fn test_invalid_json_is_invalid_response() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/clubs/c1")
            .with_status(200)
            .with_body("<html></html>")
            .create_async()
            .await;

        let api = client_with(&server.url(), None);
        assert!(matches!(
            api.get_club("c1").await,
            Err(ApiError::InvalidResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_home_feed_requires_both() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/clubs/")
            .with_status(200)
            .with_body(r#"[{"uid": "c1", "name": "Chess"}]"#)
            .create_async()
            .await;
        server
            .mock("GET", "/events/")
            .with_status(200)
            .with_body(r#"[{"uid": "e1", "name": "Blitz"}]"#)
            .create_async()
            .await;

        let api = client_with(&server.url(), None);
        let feed = api.fetch_home_feed().await.unwrap();
        assert_eq!(feed.clubs.len(), 1);
        assert_eq!(feed.events[0].name, "Blitz");
    }

    #[tokio::test]
    async fn test_home_feed_fails_if_either_fails() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/clubs/")
            .with_status(200)
            .with_body(r#"[{"uid": "c1", "name": "Chess"}]"#)
            .create_async()
            .await;
        server
            .mock("GET", "/events/")
            .with_status(503)
            .with_body(r#"{"msg": "maintenance"}"#)
            .create_async()
            .await;

        let api = client_with(&server.url(), None);
        let err = api.fetch_home_feed().await.unwrap_err();
        assert_eq!(err.server_message(), Some("maintenance"));

        let mut server = Server::new_async().await;
        server
            .mock("GET", "/clubs/")
            .with_status(500)
            .create_async()
            .await;
        server
            .mock("GET", "/events/")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let api = client_with(&server.url(), None);
        assert!(api.fetch_home_feed().await.is_err());
    }

    #[tokio::test]
    async fn test_comment_reply() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/comments/k1/reply")
            .match_header("authorization", "Bearer t")
            .match_body(Matcher::Json(json!({"content": "same"})))
            .with_status(201)
            .with_body(r#"{"uid": "k2", "content": "same", "user_name": "Ada", "replies": []}"#)
            .create_async()
            .await;

        let api = client_with(&server.url(), Some("t"));
        let reply = api
            .reply_to_comment("k1", &CommentReply { content: "same".to_string() })
            .await
            .unwrap();
        assert_eq!(reply.uid, "k2");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_club_members_and_event_detail() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/clubs/c1/members")
            .with_status(200)
            .with_body(
                r#"[{"uid": "u1", "name": "Ada", "email": "ada@campus.edu", "role": "president"},
                    {"uid": "u2"}]"#,
            )
            .create_async()
            .await;
        server
            .mock("GET", "/events/e1")
            .with_status(200)
            .with_body(r#"{"uid": "e1", "name": "Blitz", "participant_count": 3, "limit": 16}"#)
            .create_async()
            .await;
        let join = server
            .mock("POST", "/events/e1/join")
            .match_header("authorization", "Bearer t")
            .with_status(200)
            .with_body(r#"{"msg": "joined event"}"#)
            .create_async()
            .await;

        let api = client_with(&server.url(), Some("t"));
        let members = api.club_members("c1").await.unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0].role.as_deref(), Some("president"));
        assert!(members[1].name.is_none());

        let event = api.get_event("e1").await.unwrap();
        assert_eq!(event.participant_count, 3);
        assert_eq!(event.limit, Some(16));

        let ack = api.join_event("e1").await.unwrap();
        assert_eq!(ack.message_or("Joined event"), "joined event");
        join.assert_async().await;
    }

    #[tokio::test]
    async fn test_event_comments_and_create() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/comments/event/e1")
            .with_status(200)
            .with_body(
                r#"[{"uid": "k1", "content": "Who's bringing boards?", "user_name": "Ada",
                     "replies": [{"uid": "k2", "content": "Me", "replies": [
                         {"uid": "k3", "content": "Thanks", "user_name": "Ada"}]}]}]"#,
            )
            .create_async()
            .await;
        let create = server
            .mock("POST", "/comments/")
            .match_body(Matcher::Json(json!({"event_uid": "e1", "content": "See you there"})))
            .with_status(201)
            .with_body(r#"{"uid": "k4", "content": "See you there", "user_name": "Grace"}"#)
            .create_async()
            .await;

        let api = client_with(&server.url(), Some("t"));
        let thread = api.event_comments("e1").await.unwrap();
        assert_eq!(thread.len(), 1);
        assert_eq!(Comment::count(&thread), 3);
        assert_eq!(thread[0].replies[0].user_name, "Unknown");
        assert_eq!(thread[0].replies[0].replies[0].uid, "k3");

        let created = api
            .create_comment(&NewComment {
                event_uid: "e1".to_string(),
                content: "See you there".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(created.uid, "k4");
        assert!(created.replies.is_empty());
        create.assert_async().await;
    }
}
