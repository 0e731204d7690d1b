//! Page content renderers, one per top-level page.

pub mod comments;
pub mod events;
pub mod home;
pub mod landing;
pub mod login;
pub mod settings;
