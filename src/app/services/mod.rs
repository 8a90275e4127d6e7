//! Services layer - operations against the outside world.
//!
//! This module contains the I/O the controllers build on:
//! - Workspace file scanning, filtering and text file access
//! - The `git` command line wrapper
//! - Mind-map file persistence

pub mod files;
pub mod git;
pub mod mindmap_io;
