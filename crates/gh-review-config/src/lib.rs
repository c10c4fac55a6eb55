//! Configuration for gh-review
//!
//! This crate provides:
//! - Config directory path utilities
//! - Configuration file discovery and loading (TOML)
//! - Application configuration (AppConfig)

pub mod app_config;
pub mod config_file;
pub mod paths;

pub use app_config::AppConfig;
pub use config_file::{load_config_file, read_config_file};
pub use paths::{app_config_path, config_dir, local_config_path};
