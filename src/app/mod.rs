//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (pane layout, mind map, settings, messages)
//! - `controllers/` - Orchestration (open documents, Git panel state)
//! - `services/` - Operations against the outside world (filesystem, git, diagram files)
//! - `infrastructure/` - Platform integration and error types
//! - `state.rs` - Main application coordinator

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod state;

// Re-exports for convenient external access
pub use controllers::documents::{DocumentId, DocumentStore, EditorDocument};
pub use controllers::git_panel::GitPanelState;
pub use domain::layout::{Orientation, PaneId, PaneLayout, TabId};
pub use domain::mindmap::MindMap;
pub use domain::{AppSettings, Message, ThemeMode};
pub use infrastructure::error::{AppError, Result};
pub use infrastructure::platform::detect_system_dark_mode;
