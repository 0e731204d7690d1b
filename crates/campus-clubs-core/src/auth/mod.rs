//! Authentication module for bearer tokens and the persisted session.
//!
//! This module provides:
//! - `TokenProvider`: the capability `ApiClient` asks for a token before
//!   every request
//! - `SessionStore`: the login session on disk, optionally with the token
//!   itself held in the OS keychain via `CredentialStore`
//!
//! Tokens have no local expiry; the server decides when one stops working.

pub mod credentials;
pub mod session;
pub mod token;

pub use credentials::CredentialStore;
pub use session::{SessionData, SessionStore, TokenStorage};
pub use token::{NoToken, StaticToken, TokenProvider};
