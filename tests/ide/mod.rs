//! IDE feature tests
//!
//! Tests for:
//! - Semantic tokens (span classifier)
//! - Interception shim and plugin activation
//! - Host service classification and navigation

pub mod tests_host;
pub mod tests_intercept;
pub mod tests_semantic_tokens;
