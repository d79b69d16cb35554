//! Lossless parser for the TypeScript subset
//!
//! This module provides a lossless parser using:
//! - **logos** for fast lexing
//! - **rowan** for the CST (Concrete Syntax Tree)
//!
//! ## Architecture
//!
//! ```text
//! Source Text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → GreenNode tree (immutable, cheap to clone)
//!     ↓
//! SyntaxNode (rowan) → CST with parent pointers
//!     ↓
//! AST layer → Typed wrappers and range helpers over SyntaxNode
//!     ↓
//! HIR → Binder and TypeChecker
//! ```
//!
//! Every identifier, declaring or referencing, is an `IDENTIFIER` node
//! wrapping one `IDENT` token, so the classifier only ever looks at nodes.

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
mod lexer;
mod syntax_kind;

pub use ast::*;
pub use lexer::{Lexer, Token, tokenize};
pub use parser::{Parse, SyntaxError, parse};
pub use syntax_kind::{
    SyntaxElement, SyntaxKind, SyntaxNode, SyntaxNodeChildren, SyntaxNodePtr, SyntaxToken,
    TsLanguage,
};

/// Re-export rowan types for convenience
pub use rowan::{GreenNode, TextRange, TextSize};
