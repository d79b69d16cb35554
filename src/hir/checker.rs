//! TypeChecker: symbol queries over a [`Program`].

use rowan::{TextRange, TextSize};

use super::diagnostics::Diagnostic;
use super::program::Program;
use super::symbols::{Declaration, DeclarationId, Symbol, SymbolId};
use crate::base::FileId;
use crate::parser::{NodeExt, SyntaxKind, SyntaxNode, SyntaxNodePtr};

/// Read-only resolution facility borrowed from a program snapshot.
#[derive(Clone, Copy)]
pub struct TypeChecker<'p> {
    program: &'p Program,
}

impl<'p> TypeChecker<'p> {
    pub(crate) fn new(program: &'p Program) -> Self {
        Self { program }
    }

    /// Symbol named at `node`, which must be an identifier of `file`.
    ///
    /// Returns `None` for any other node, and for identifiers nothing
    /// resolved to.
    pub fn symbol_at_location(&self, file: FileId, node: &SyntaxNode) -> Option<SymbolId> {
        if node.kind() != SyntaxKind::IDENTIFIER {
            return None;
        }
        self.program.file(file)?.bound().symbol_at(node)
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&'p Symbol> {
        self.program.file(id.file)?.bound().symbol(id)
    }

    pub fn declaration(&self, id: DeclarationId) -> Option<&'p Declaration> {
        self.program.file(id.file)?.bound().declaration(id)
    }

    /// Declaration node behind `id`, reconstructed from its file's tree.
    pub fn declaration_node(&self, id: DeclarationId) -> Option<SyntaxNode> {
        let decl = self.declaration(id)?;
        let root = self.program.file(id.file)?.syntax();
        decl.ptr.try_to_node(&root)
    }

    /// Value declaration if any, otherwise the first declaration.
    pub fn representative_declaration(&self, id: SymbolId) -> Option<&'p Declaration> {
        let decl = self.symbol(id)?.representative_declaration()?;
        self.declaration(decl)
    }

    /// Identifier at `offset` in `file`, preferring the one ending there
    /// when the offset sits between two tokens.
    pub fn identifier_at(&self, file: FileId, offset: u32) -> Option<SyntaxNode> {
        let root = self.program.file(file)?.syntax();
        let offset = TextSize::from(offset);
        if offset > root.text_range().end() {
            return None;
        }
        root.token_at_offset(offset)
            .filter_map(|token| token.parent())
            .find(|node| node.kind() == SyntaxKind::IDENTIFIER)
    }

    /// Trimmed ranges of every identifier resolved to `symbol`, sorted.
    pub fn references(&self, symbol: SymbolId) -> Vec<TextRange> {
        let Some(file) = self.program.file(symbol.file) else {
            return Vec::new();
        };
        let root = file.syntax();
        let mut ranges: Vec<TextRange> = file
            .bound()
            .locations()
            .filter(|(_, id)| *id == symbol)
            .filter_map(|(ptr, _)| SyntaxNodePtr::try_to_node(ptr, &root))
            .map(|node| node.trimmed_range())
            .collect();
        ranges.sort_by_key(|r| (r.start(), r.end()));
        ranges
    }

    /// Binder and resolver diagnostics of `file`.
    pub fn diagnostics(&self, file: FileId) -> &'p [Diagnostic] {
        self.program
            .file(file)
            .map(|f| f.bound().diagnostics())
            .unwrap_or_default()
    }
}
