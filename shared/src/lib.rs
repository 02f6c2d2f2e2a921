//! # TokenSession Shared
//!
//! Configuration and response types shared by every crate in the workspace.

pub mod config;
pub mod types;
