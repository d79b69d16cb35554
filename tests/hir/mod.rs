//! HIR tests
//!
//! Tests for:
//! - Name resolution through scopes, members and heritage
//! - Declaration merging and duplicate diagnostics
//! - Program construction across files

pub mod tests_program;
pub mod tests_resolution;
