//! Command-based file management core: a capability-gated command processor
//! over an abstract file-system provider, with a physical implementation
//! rooted at a directory tree on disk.

pub mod cli;
pub mod commands;
pub mod config;
pub mod content_type;
pub mod error;
pub mod items;
pub mod provider;
pub mod upload;
