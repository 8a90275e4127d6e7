//! Controllers layer - orchestration and coordination.
//!
//! This module contains controllers that coordinate between
//! domain models, services, and the UI:
//! - Open editor documents and their buffers
//! - Git panel state (output log, file status, auto refresh)

pub mod documents;
pub mod git_panel;
