//! Typed AST wrappers over the untyped rowan CST.
//!
//! This module provides strongly-typed accessors for the syntax nodes the
//! binder and the classifiers need, plus range helpers that distinguish a
//! node's full (trivia-inclusive) extent from its trimmed extent.

use smol_str::SmolStr;

use super::syntax_kind::SyntaxKind;
use super::{SyntaxElement, SyntaxNode, SyntaxToken};
use rowan::{TextRange, TextSize};

/// Trait for AST nodes that wrap a SyntaxNode
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

// ============================================================================
// Helper macros
// ============================================================================

macro_rules! ast_node {
    ($name:ident, $kind:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == SyntaxKind::$kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                if Self::can_cast(node.kind()) {
                    Some(Self(node))
                } else {
                    None
                }
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

// ============================================================================
// Ranges
// ============================================================================

/// Range queries shared by every node.
pub trait NodeExt {
    /// Extent including leading trivia.
    fn full_range(&self) -> TextRange;

    /// Extent from the first to the last significant token.
    fn trimmed_range(&self) -> TextRange;

    fn trimmed_start(&self) -> TextSize {
        self.trimmed_range().start()
    }

    fn trimmed_width(&self) -> TextSize {
        self.trimmed_range().len()
    }
}

impl NodeExt for SyntaxNode {
    fn full_range(&self) -> TextRange {
        self.text_range()
    }

    fn trimmed_range(&self) -> TextRange {
        let mut significant = self
            .descendants_with_tokens()
            .filter_map(SyntaxElement::into_token)
            .filter(|t| !t.kind().is_trivia());
        let Some(first) = significant.next() else {
            return TextRange::empty(self.text_range().end());
        };
        let last = significant.last().unwrap_or_else(|| first.clone());
        TextRange::new(first.text_range().start(), last.text_range().end())
    }
}

// ============================================================================
// Names
// ============================================================================

ast_node!(Identifier, IDENTIFIER);

impl Identifier {
    pub fn token(&self) -> Option<SyntaxToken> {
        self.0
            .children_with_tokens()
            .filter_map(SyntaxElement::into_token)
            .find(|t| t.kind() == SyntaxKind::IDENT)
    }

    pub fn text(&self) -> SmolStr {
        self.token()
            .map(|t| SmolStr::new(t.text()))
            .unwrap_or_default()
    }
}

ast_node!(QualifiedName, QUALIFIED_NAME);

impl QualifiedName {
    /// `A.B` in `A.B.C`, or the identifier `A` in `A.B`.
    pub fn left(&self) -> Option<SyntaxNode> {
        self.0.first_child()
    }

    pub fn right(&self) -> Option<Identifier> {
        name_after_dot(&self.0)
    }
}

/// Declared name of a declaration node.
///
/// Leading modifier and declaration keywords are skipped; the first other
/// significant element must be an `IDENTIFIER` node, so literal names
/// (`'x'`, `1`) and anonymous forms yield `None`.
pub fn declaration_name(node: &SyntaxNode) -> Option<Identifier> {
    match node.kind() {
        SyntaxKind::NAMESPACE_IMPORT | SyntaxKind::IMPORT_SPECIFIER => {
            node.children().filter_map(Identifier::cast).last()
        }
        SyntaxKind::PROPERTY_ACCESS_EXPRESSION | SyntaxKind::QUALIFIED_NAME => {
            name_after_dot(node)
        }
        _ => {
            for element in node.children_with_tokens() {
                match element {
                    rowan::NodeOrToken::Node(child) => return Identifier::cast(child),
                    rowan::NodeOrToken::Token(token) => {
                        let kind = token.kind();
                        if kind.is_trivia() || kind.is_keyword() {
                            continue;
                        }
                        return None;
                    }
                }
            }
            None
        }
    }
}

/// Text of [`declaration_name`].
pub fn name_text(node: &SyntaxNode) -> Option<SmolStr> {
    declaration_name(node).map(|ident| ident.text())
}

fn name_after_dot(node: &SyntaxNode) -> Option<Identifier> {
    node.children_with_tokens()
        .skip_while(|e| e.kind() != SyntaxKind::DOT)
        .find_map(|e| e.into_node().and_then(Identifier::cast))
}

// ============================================================================
// Modifiers
// ============================================================================

/// Modifier keywords written before a declaration's keyword or name.
pub fn modifier_tokens(node: &SyntaxNode) -> impl Iterator<Item = SyntaxToken> + '_ {
    node.children_with_tokens()
        .map_while(SyntaxElement::into_token)
        .filter(|t| !t.kind().is_trivia())
        .take_while(|t| t.kind().is_modifier_keyword())
}

/// Check for a direct child token of the given kind.
pub fn has_token(node: &SyntaxNode, kind: SyntaxKind) -> bool {
    node.children_with_tokens()
        .filter_map(SyntaxElement::into_token)
        .any(|t| t.kind() == kind)
}

// ============================================================================
// Root and statements
// ============================================================================

ast_node!(SourceFile, SOURCE_FILE);

impl SourceFile {
    pub fn statements(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0.children()
    }
}

ast_node!(VariableStatement, VARIABLE_STATEMENT);

impl VariableStatement {
    pub fn declaration_list(&self) -> Option<VariableDeclarationList> {
        self.0.children().find_map(VariableDeclarationList::cast)
    }
}

ast_node!(VariableDeclarationList, VARIABLE_DECLARATION_LIST);

impl VariableDeclarationList {
    /// `let` and `const` are block scoped, `var` is function scoped.
    pub fn is_block_scoped(&self) -> bool {
        has_token(&self.0, SyntaxKind::LET_KW) || has_token(&self.0, SyntaxKind::CONST_KW)
    }

    pub fn declarations(&self) -> impl Iterator<Item = SyntaxNode> + '_ {
        self.0
            .children()
            .filter(|n| n.kind() == SyntaxKind::VARIABLE_DECLARATION)
    }
}

// ============================================================================
// Types and heritage
// ============================================================================

ast_node!(HeritageClause, HERITAGE_CLAUSE);

impl HeritageClause {
    pub fn is_extends(&self) -> bool {
        has_token(&self.0, SyntaxKind::EXTENDS_KW)
    }

    pub fn types(&self) -> impl Iterator<Item = TypeReference> + '_ {
        self.0.children().filter_map(TypeReference::cast)
    }
}

ast_node!(TypeReference, TYPE_REFERENCE);

impl TypeReference {
    /// The `IDENTIFIER` or `QUALIFIED_NAME` being referenced.
    pub fn name(&self) -> Option<SyntaxNode> {
        self.0.first_child().filter(|n| {
            matches!(
                n.kind(),
                SyntaxKind::IDENTIFIER | SyntaxKind::QUALIFIED_NAME
            )
        })
    }
}

/// Type annotation of a variable, parameter, property or signature: the
/// first type node after `:`.
pub fn type_annotation(node: &SyntaxNode) -> Option<SyntaxNode> {
    node.children_with_tokens()
        .skip_while(|e| e.kind() != SyntaxKind::COLON)
        .find_map(SyntaxElement::into_node)
}

/// Initializer expression: the first node after `=`.
pub fn initializer(node: &SyntaxNode) -> Option<SyntaxNode> {
    node.children_with_tokens()
        .skip_while(|e| e.kind() != SyntaxKind::EQ)
        .find_map(SyntaxElement::into_node)
}

// ============================================================================
// Expressions
// ============================================================================

ast_node!(PropertyAccessExpression, PROPERTY_ACCESS_EXPRESSION);

impl PropertyAccessExpression {
    pub fn expression(&self) -> Option<SyntaxNode> {
        self.0.first_child()
    }

    pub fn name(&self) -> Option<Identifier> {
        name_after_dot(&self.0)
    }
}
