//! # ts-sh
//!
//! Semantic highlighting override for a TypeScript-subset language service.
//!
//! The crate wraps a [`LanguageService`](ide::LanguageService) so that semantic
//! classification is answered by a span-bounded, symbol-resolved token walk,
//! syntactic classification is answered with nothing, and every other request
//! reaches the wrapped service untouched.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! ide       → LanguageService, host service, semantic tokens, interception, plugin
//!   ↓
//! hir       → Declarations, symbols, binder, TypeChecker
//!   ↓
//! parser    → Logos lexer, recursive-descent parser, rowan CST
//!   ↓
//! base      → Primitives (FileId, TextSpan, TextRange)
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → hir → ide)
// ============================================================================

/// Foundation types: FileId, TextSpan, TextRange
pub mod base;

/// Parser: Logos lexer, recursive-descent parser, typed CST accessors
pub mod parser;

/// Semantic model: declarations, symbols, binder, resolution
pub mod hir;

/// IDE features: language service, classifications, plugin activation
pub mod ide;

// Re-export foundation types
pub use base::{FileId, TextRange, TextSize, TextSpan};
