//! Diagnostics: binder and resolver error reporting.

use std::sync::Arc;

use rowan::TextRange;

/// "Duplicate identifier" on a declaration that cannot merge.
pub const DUPLICATE_IDENTIFIER: u32 = 2300;
/// "Cannot find name" on an unresolved reference.
pub const CANNOT_FIND_NAME: u32 = 2304;

/// Severity level of a diagnostic.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Severity {
    Error,
    Warning,
}

/// A diagnostic message with location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub range: TextRange,
    pub severity: Severity,
    pub code: u32,
    pub message: Arc<str>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(range: TextRange, code: u32, message: impl Into<Arc<str>>) -> Self {
        Self {
            range,
            severity: Severity::Error,
            code,
            message: message.into(),
        }
    }

    pub fn duplicate_identifier(range: TextRange, name: &str) -> Self {
        Self::error(
            range,
            DUPLICATE_IDENTIFIER,
            format!("Duplicate identifier '{name}'."),
        )
    }

    pub fn cannot_find_name(range: TextRange, name: &str) -> Self {
        Self::error(range, CANNOT_FIND_NAME, format!("Cannot find name '{name}'."))
    }
}
