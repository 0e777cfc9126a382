//! Application Layer
//!
//! User-facing CLI and configuration management.

pub mod cli;
pub mod config;

pub use cli::{Cli, Commands, ConfigAction};
pub use config::{Config, PatternSettings, SimilaritySettings, SyncSettings};
