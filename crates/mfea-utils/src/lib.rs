//! Shared utilities for mfea-rs
//!
//! This crate provides common functionality used across the mfea-rs workspace,
//! including logging setup, environment lookup, and application configuration.

pub mod config;
pub mod logging;

pub use config::{Config, EnvLookup, env_lookup};
pub use logging::{init_tracing, init_tracing_with};
