//! Interception shim: a [`LanguageService`] decorator that replaces the
//! two classification operations and forwards everything else.

use std::sync::Arc;

use super::semantic_tokens::semantic_tokens;
use super::{Classifications, LanguageService, Location, ServiceResult};
use crate::base::TextSpan;
use crate::hir::{Diagnostic, Program};
use crate::parser::SyntaxError;

/// Wraps a language service so semantic classification comes from
/// [`semantic_tokens`] and syntactic classification is always empty.
pub struct SemanticHighlighting<S> {
    inner: S,
}

impl<S: LanguageService> SemanticHighlighting<S> {
    pub fn new(inner: S) -> Self {
        tracing::debug!("decorating language service with semantic highlighting");
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: LanguageService> LanguageService for SemanticHighlighting<S> {
    fn classify_semantic(&self, file: &str, span: TextSpan) -> Classifications {
        Classifications::new(semantic_tokens(&self.inner, file, span))
    }

    fn classify_syntactic(&self, _file: &str, _span: TextSpan) -> Classifications {
        Classifications::empty()
    }

    // Forwarded unchanged.

    fn program(&self) -> Option<Arc<Program>> {
        self.inner.program()
    }

    fn file_names(&self) -> Vec<String> {
        self.inner.file_names()
    }

    fn syntactic_diagnostics(&self, file: &str) -> ServiceResult<Vec<SyntaxError>> {
        self.inner.syntactic_diagnostics(file)
    }

    fn semantic_diagnostics(&self, file: &str) -> ServiceResult<Vec<Diagnostic>> {
        self.inner.semantic_diagnostics(file)
    }

    fn definition_at_position(&self, file: &str, offset: u32) -> Vec<Location> {
        self.inner.definition_at_position(file, offset)
    }

    fn references_at_position(&self, file: &str, offset: u32) -> Vec<Location> {
        self.inner.references_at_position(file, offset)
    }
}
