//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Frame layout, title/status bars and overlays
//! - `input`: Keyboard event handling
//! - `styles`: Palettes and text styling
//! - `pages`: Page-specific content rendering (home, events, etc.)

pub mod input;
pub mod pages;
pub mod render;
pub mod styles;
