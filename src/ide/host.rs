//! HostService: the language service that owns file texts.
//!
//! The host keeps its mutable state behind a lock and hands out
//! [`Program`] snapshots, rebuilding one lazily after a change.
//!
//! ```ignore
//! let host = HostService::new();
//! host.set_file_content("main.ts", "class Foo {}");
//!
//! let program = host.program();
//! let spans = host.classify_semantic("main.ts", TextSpan::new(0, 12));
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use rustc_hash::FxBuildHasher;

use super::classification::{semantic_classifications, syntactic_classifications};
use super::{Classifications, LanguageService, Location, ServiceError, ServiceResult};
use crate::base::{FileId, TextSpan};
use crate::hir::{Diagnostic, Program, SymbolId};
use crate::parser::{SyntaxError, TextRange};

type FileMap = IndexMap<Arc<str>, Arc<str>, FxBuildHasher>;

/// Owns every file text and caches the program built from them.
#[derive(Default)]
pub struct HostService {
    state: Mutex<HostState>,
}

#[derive(Default)]
struct HostState {
    files: FileMap,
    /// Snapshot of `files`; `None` when a change has not been rebuilt yet.
    program: Option<Arc<Program>>,
}

impl HostService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Host preloaded with `(name, text)` pairs.
    pub fn with_files<'a>(files: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let host = Self::new();
        for (name, text) in files {
            host.set_file_content(name, text);
        }
        host
    }

    /// Add or replace a file.
    pub fn set_file_content(&self, name: &str, text: &str) {
        let mut state = self.state.lock();
        state.files.insert(Arc::from(name), Arc::from(text));
        state.program = None;
    }

    /// Remove a file. Returns whether it existed.
    pub fn remove_file(&self, name: &str) -> bool {
        let mut state = self.state.lock();
        let removed = state.files.shift_remove(name).is_some();
        if removed {
            state.program = None;
        }
        removed
    }

    pub fn has_file(&self, name: &str) -> bool {
        self.state.lock().files.contains_key(name)
    }

    pub fn file_count(&self) -> usize {
        self.state.lock().files.len()
    }

    fn snapshot(&self) -> Arc<Program> {
        let mut state = self.state.lock();
        if let Some(program) = &state.program {
            return Arc::clone(program);
        }
        let files = state
            .files
            .iter()
            .map(|(name, text)| (Arc::clone(name), Arc::clone(text)));
        let program = Arc::new(Program::new(files));
        state.program = Some(Arc::clone(&program));
        program
    }

    fn file_text(&self, name: &str) -> Option<Arc<str>> {
        self.state.lock().files.get(name).cloned()
    }

    fn locations(
        program: &Program,
        ranges: impl IntoIterator<Item = (FileId, TextRange)>,
    ) -> Vec<Location> {
        ranges
            .into_iter()
            .filter_map(|(file, range)| {
                let source = program.file(file)?;
                Some(Location {
                    file_name: source.name.to_string(),
                    span: range.into(),
                })
            })
            .collect()
    }

    fn symbol_at(program: &Program, file: &str, offset: u32) -> Option<SymbolId> {
        let source = program.source_file(file)?;
        let checker = program.type_checker();
        let ident = checker.identifier_at(source.id, offset)?;
        checker.symbol_at_location(source.id, &ident)
    }
}

impl LanguageService for HostService {
    fn program(&self) -> Option<Arc<Program>> {
        Some(self.snapshot())
    }

    fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .state
            .lock()
            .files
            .keys()
            .map(|name| name.to_string())
            .collect();
        names.sort();
        names
    }

    fn classify_syntactic(&self, file: &str, span: TextSpan) -> Classifications {
        match self.file_text(file) {
            Some(text) => Classifications::new(syntactic_classifications(&text, span)),
            None => Classifications::empty(),
        }
    }

    fn classify_semantic(&self, file: &str, span: TextSpan) -> Classifications {
        let program = self.snapshot();
        Classifications::new(semantic_classifications(&program, file, span))
    }

    fn syntactic_diagnostics(&self, file: &str) -> ServiceResult<Vec<SyntaxError>> {
        let program = self.snapshot();
        let source = program
            .source_file(file)
            .ok_or_else(|| ServiceError::UnknownFile(file.to_string()))?;
        Ok(source.parse_errors().to_vec())
    }

    fn semantic_diagnostics(&self, file: &str) -> ServiceResult<Vec<Diagnostic>> {
        let program = self.snapshot();
        let source = program
            .source_file(file)
            .ok_or_else(|| ServiceError::UnknownFile(file.to_string()))?;
        Ok(program.type_checker().diagnostics(source.id).to_vec())
    }

    fn definition_at_position(&self, file: &str, offset: u32) -> Vec<Location> {
        let program = self.snapshot();
        let Some(symbol) = Self::symbol_at(&program, file, offset) else {
            return Vec::new();
        };
        let checker = program.type_checker();
        let Some(symbol_data) = checker.symbol(symbol) else {
            return Vec::new();
        };
        let ranges = symbol_data.declarations.iter().filter_map(|&decl| {
            let decl = checker.declaration(decl)?;
            Some((symbol.file, decl.name_range?))
        });
        Self::locations(&program, ranges)
    }

    fn references_at_position(&self, file: &str, offset: u32) -> Vec<Location> {
        let program = self.snapshot();
        let Some(symbol) = Self::symbol_at(&program, file, offset) else {
            return Vec::new();
        };
        let ranges = program
            .type_checker()
            .references(symbol)
            .into_iter()
            .map(|range| (symbol.file, range));
        Self::locations(&program, ranges)
    }
}
