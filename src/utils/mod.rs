//! Configuration and parsing utilities.

/// Strict-then-fallback parsing of completion output.
pub mod parsing;
/// TOML configuration (`scout.toml`).
pub mod toml_config;
