//! Shared utilities for AlphaInsight
//!
//! This crate provides common functionality used across the workspace,
//! including logging setup and environment-variable helpers.

pub mod config;
pub mod logging;

pub use config::{ConfigError, env_parse, env_var, env_var_any};
pub use logging::{LogFormat, init_tracing};
