//! High-level IR (HIR): binding and name resolution.
//!
//! ## Key Types
//!
//! - [`Program`]: immutable snapshot of every parsed and bound file
//! - [`TypeChecker`]: symbol queries over a program
//! - [`Symbol`] / [`Declaration`]: the bound model
//! - [`BoundFile`]: per-file output of [`bind_file`]
//!
//! ## Layers
//!
//! ```text
//! parse(text)            ← syntax tree (per file)
//!     │
//!     ▼
//! bind_file(file, root)  ← symbols, scopes, resolved identifiers
//!     │
//!     ▼
//! Program                ← every file, bound in parallel
//!     │
//!     ▼
//! TypeChecker            ← symbol_at_location, references, diagnostics
//! ```

mod binder;
mod checker;
mod diagnostics;
mod program;
mod resolve;
mod symbols;

pub use binder::{BoundFile, bind_file};
pub use checker::TypeChecker;
pub use diagnostics::{CANNOT_FIND_NAME, DUPLICATE_IDENTIFIER, Diagnostic, Severity};
pub use program::{Program, ProgramFile};
pub use symbols::{
    Declaration, DeclarationId, DeclarationKind, ModifierFlags, Symbol, SymbolFlags, SymbolId,
    SymbolTable,
};
