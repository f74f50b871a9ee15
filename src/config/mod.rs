//! Configuration module for costwatch
//!
//! This module provides configuration management including:
//! - Platform config path resolution
//! - Report settings persistence

pub mod paths;
pub mod settings;

pub use paths::CostwatchPaths;
pub use settings::{MailSettings, Settings};
