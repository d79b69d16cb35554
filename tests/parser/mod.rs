//! Parser tests
//!
//! Tests for:
//! - Lossless trees over valid and broken input
//! - Node shapes the binder and classifier rely on

pub mod tests_lossless;
pub mod tests_node_shapes;
