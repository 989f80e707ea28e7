//! Infrastructure layer - External concerns
//!
//! This layer contains:
//! - Config: YAML configuration describing plugins

pub mod config;
