//! Program: an immutable snapshot of parsed and bound files.

use std::sync::Arc;

use rayon::prelude::*;
use rustc_hash::FxHashMap;

use super::binder::{BoundFile, bind_file};
use super::checker::TypeChecker;
use crate::base::FileId;
use crate::parser::{Parse, SyntaxError, SyntaxNode, parse};

/// One file of a program: text, tree and binding.
#[derive(Debug, Clone)]
pub struct ProgramFile {
    pub id: FileId,
    pub name: Arc<str>,
    pub text: Arc<str>,
    parse: Parse,
    bound: BoundFile,
}

impl ProgramFile {
    /// Root of the syntax tree.
    pub fn syntax(&self) -> SyntaxNode {
        self.parse.syntax()
    }

    pub fn parse_errors(&self) -> &[SyntaxError] {
        &self.parse.errors
    }

    pub fn bound(&self) -> &BoundFile {
        &self.bound
    }
}

/// Every file known to the host, parsed and bound.
///
/// Files are ordered by name; [`FileId`]s index that order.
#[derive(Debug, Clone, Default)]
pub struct Program {
    files: Vec<ProgramFile>,
    by_name: FxHashMap<Arc<str>, FileId>,
}

impl Program {
    /// Parse and bind `files` (name, text) in parallel.
    pub fn new<I>(files: I) -> Self
    where
        I: IntoIterator<Item = (Arc<str>, Arc<str>)>,
    {
        let mut inputs: Vec<_> = files.into_iter().collect();
        inputs.sort_by(|a, b| a.0.cmp(&b.0));
        inputs.dedup_by(|a, b| a.0 == b.0);

        let files: Vec<ProgramFile> = inputs
            .into_par_iter()
            .enumerate()
            .map(|(index, (name, text))| {
                let id = FileId::new(index);
                let parse = parse(&text);
                let bound = bind_file(id, &parse.syntax());
                ProgramFile {
                    id,
                    name,
                    text,
                    parse,
                    bound,
                }
            })
            .collect();

        let by_name = files.iter().map(|f| (f.name.clone(), f.id)).collect();
        tracing::debug!(files = files.len(), "built program");
        Self { files, by_name }
    }

    pub fn source_file(&self, name: &str) -> Option<&ProgramFile> {
        let id = *self.by_name.get(name)?;
        self.file(id)
    }

    pub fn file(&self, id: FileId) -> Option<&ProgramFile> {
        self.files.get(id.index())
    }

    pub fn source_files(&self) -> impl Iterator<Item = &ProgramFile> + '_ {
        self.files.iter()
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.files.iter().map(|f| &*f.name)
    }

    /// Resolution facility over this snapshot.
    pub fn type_checker(&self) -> TypeChecker<'_> {
        TypeChecker::new(self)
    }
}
