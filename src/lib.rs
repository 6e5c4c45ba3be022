//! Siedler - a "coming soon" placeholder page with an embedded Snake game
//!
//! This library provides:
//! - Core game logic (game module)
//! - Keyboard and swipe input (input module)
//! - TUI rendering of the page (render module)
//! - The interactive page session (modes module)
//! - Optional file logging (logging module)

pub mod game;
pub mod input;
pub mod logging;
pub mod modes;
pub mod render;
