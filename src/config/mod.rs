//! Configuration module for spendtrack
//!
//! This module provides configuration management including:
//! - platform path resolution for config and data files
//! - user settings persistence, including the analytics engine knobs

pub mod paths;
pub mod settings;

pub use paths::SpendPaths;
pub use settings::{FallbackCategory, Settings};
