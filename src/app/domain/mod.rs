//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Geometry primitives shared by the canvas and the pane layout
//! - The split-pane layout tree
//! - The mind-map diagram model
//! - Application settings
//! - Message types for the event system

pub mod geometry;
pub mod layout;
pub mod messages;
pub mod mindmap;
pub mod settings;

pub use geometry::{Point, Rect};
pub use messages::Message;
pub use settings::{AppSettings, ThemeMode};
