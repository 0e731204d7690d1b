//! Data models for Campus Clubs entities.
//!
//! Server DTOs are decoded leniently: every field the pages can live without
//! is optional or defaulted, so a sparse payload still renders.
//!
//! - `User`, `LoginResponse`: account and authentication payloads
//! - `Club`, `ClubMember`: student organizations and their rosters
//! - `Event`: club events
//! - `Comment`: threaded event discussion

pub mod club;
pub mod comment;
pub mod event;
pub mod message;
pub mod user;

pub use club::{Club, ClubMember};
pub use comment::{Comment, CommentReply, FlatComment, NewComment};
pub use event::Event;
pub use message::Ack;
pub use user::{LoginRequest, LoginResponse, RegisterRequest, User};
