//! The language service surface the editor talks to.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::ServiceResult;
use crate::base::TextSpan;
use crate::hir::{Diagnostic, Program};
use crate::parser::SyntaxError;

/// Lexer state carried over to the next line.
///
/// Classification here never spans lines, so only `None` is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EndOfLineState {
    #[default]
    None,
}

/// Flat `(start, length, class)` triples plus the end-of-line state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classifications {
    pub spans: Vec<u32>,
    pub end_of_line_state: EndOfLineState,
}

impl Classifications {
    pub fn new(spans: Vec<u32>) -> Self {
        Self {
            spans,
            end_of_line_state: EndOfLineState::None,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    /// Iterate the encoded triples.
    pub fn triples(&self) -> impl Iterator<Item = (u32, u32, u32)> + '_ {
        self.spans.chunks_exact(3).map(|t| (t[0], t[1], t[2]))
    }
}

/// A place in a file, as returned by navigation requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub file_name: String,
    pub span: TextSpan,
}

/// Everything an editor can ask of a language service.
///
/// The trait is object safe; plugins receive and return
/// `Box<dyn LanguageService>`.
pub trait LanguageService {
    /// Current whole-program snapshot, if one is available.
    fn program(&self) -> Option<Arc<Program>>;

    fn file_names(&self) -> Vec<String>;

    fn classify_syntactic(&self, file: &str, span: TextSpan) -> Classifications;

    fn classify_semantic(&self, file: &str, span: TextSpan) -> Classifications;

    fn syntactic_diagnostics(&self, file: &str) -> ServiceResult<Vec<SyntaxError>>;

    fn semantic_diagnostics(&self, file: &str) -> ServiceResult<Vec<Diagnostic>>;

    /// Declaration sites of the identifier at `offset`.
    fn definition_at_position(&self, file: &str, offset: u32) -> Vec<Location>;

    /// Every resolved occurrence of the identifier at `offset`.
    fn references_at_position(&self, file: &str, offset: u32) -> Vec<Location>;
}

impl<S: LanguageService + ?Sized> LanguageService for Box<S> {
    fn program(&self) -> Option<Arc<Program>> {
        (**self).program()
    }

    fn file_names(&self) -> Vec<String> {
        (**self).file_names()
    }

    fn classify_syntactic(&self, file: &str, span: TextSpan) -> Classifications {
        (**self).classify_syntactic(file, span)
    }

    fn classify_semantic(&self, file: &str, span: TextSpan) -> Classifications {
        (**self).classify_semantic(file, span)
    }

    fn syntactic_diagnostics(&self, file: &str) -> ServiceResult<Vec<SyntaxError>> {
        (**self).syntactic_diagnostics(file)
    }

    fn semantic_diagnostics(&self, file: &str) -> ServiceResult<Vec<Diagnostic>> {
        (**self).semantic_diagnostics(file)
    }

    fn definition_at_position(&self, file: &str, offset: u32) -> Vec<Location> {
        (**self).definition_at_position(file, offset)
    }

    fn references_at_position(&self, file: &str, offset: u32) -> Vec<Location> {
        (**self).references_at_position(file, offset)
    }
}
