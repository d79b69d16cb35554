//! Semantic tokens: symbol-based highlighting of the identifiers in a span.
//!
//! Each classified identifier becomes three integers,
//! `(start, length, packed)`, where `packed` carries the token type above
//! bit 8 and the modifier set below it. See [`encode`].

use crate::base::{FileId, TextSpan};
use crate::hir::{DeclarationKind, ModifierFlags, TypeChecker};
use crate::parser::{AstNode, NodeExt, SyntaxKind, SyntaxNode, declaration_name};

use super::LanguageService;

/// Number of low bits reserved for modifiers.
const MODIFIER_BITS: u32 = 8;

/// Token type for semantic highlighting, in legend order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum TokenType {
    Class = 0,
    Enum = 1,
    Interface = 2,
    Namespace = 3,
    TypeParameter = 4,
    Type = 5,
    Parameter = 6,
    Variable = 7,
    Property = 8,
    Constant = 9,
    Function = 10,
    Member = 11,
}

impl TokenType {
    pub const ALL: [TokenType; 12] = [
        TokenType::Class,
        TokenType::Enum,
        TokenType::Interface,
        TokenType::Namespace,
        TokenType::TypeParameter,
        TokenType::Type,
        TokenType::Parameter,
        TokenType::Variable,
        TokenType::Property,
        TokenType::Constant,
        TokenType::Function,
        TokenType::Member,
    ];

    pub fn index(self) -> u32 {
        self as u32
    }

    pub fn from_index(index: u32) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Name used in the token legend.
    pub fn name(self) -> &'static str {
        match self {
            TokenType::Class => "class",
            TokenType::Enum => "enum",
            TokenType::Interface => "interface",
            TokenType::Namespace => "namespace",
            TokenType::TypeParameter => "typeParameter",
            TokenType::Type => "type",
            TokenType::Parameter => "parameter",
            TokenType::Variable => "variable",
            TokenType::Property => "property",
            TokenType::Constant => "constant",
            TokenType::Function => "function",
            TokenType::Member => "member",
        }
    }

    /// Visual kind of a declaration category, if it has one.
    pub const fn for_declaration(kind: DeclarationKind) -> Option<TokenType> {
        Some(match kind {
            DeclarationKind::VariableDeclaration => TokenType::Variable,
            DeclarationKind::Parameter => TokenType::Parameter,
            DeclarationKind::PropertyDeclaration => TokenType::Property,
            DeclarationKind::ModuleDeclaration => TokenType::Namespace,
            DeclarationKind::EnumDeclaration => TokenType::Enum,
            DeclarationKind::EnumMember => TokenType::Property,
            DeclarationKind::ClassDeclaration => TokenType::Class,
            DeclarationKind::MethodDeclaration => TokenType::Member,
            DeclarationKind::FunctionDeclaration => TokenType::Function,
            DeclarationKind::MethodSignature => TokenType::Member,
            DeclarationKind::GetAccessor => TokenType::Property,
            DeclarationKind::PropertySignature => TokenType::Property,
            DeclarationKind::InterfaceDeclaration => TokenType::Interface,
            DeclarationKind::TypeAliasDeclaration => TokenType::Type,
            DeclarationKind::TypeParameter => TokenType::TypeParameter,
            _ => return None,
        })
    }
}

bitflags::bitflags! {
    /// Independent attributes of a classified token.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct TokenModifier: u32 {
        /// The identifier is the name being declared.
        const DECLARATION = 1 << 0;
        const STATIC = 1 << 1;
        const ASYNC = 1 << 2;
    }
}

impl TokenModifier {
    /// Legend names, in bit order.
    pub const NAMES: [&'static str; 3] = ["declaration", "static", "async"];

    fn from_declaration(flags: ModifierFlags) -> Self {
        let mut modifiers = TokenModifier::empty();
        if flags.contains(ModifierFlags::STATIC) {
            modifiers |= TokenModifier::STATIC;
        }
        if flags.contains(ModifierFlags::ASYNC) {
            modifiers |= TokenModifier::ASYNC;
        }
        modifiers
    }
}

/// Pack a token type and modifier set into one integer.
pub fn encode(kind: TokenType, modifiers: TokenModifier) -> u32 {
    ((kind.index() + 1) << MODIFIER_BITS) + modifiers.bits()
}

/// Inverse of [`encode`]. `None` when the type bits are out of range.
pub fn decode(packed: u32) -> Option<(TokenType, TokenModifier)> {
    let kind = (packed >> MODIFIER_BITS).checked_sub(1)?;
    let kind = TokenType::from_index(kind)?;
    let modifiers = TokenModifier::from_bits_truncate(packed & ((1 << MODIFIER_BITS) - 1));
    Some((kind, modifiers))
}

/// Classify the identifiers of `file` whose nodes intersect `span`.
///
/// Returns flat `(start, length, packed)` triples in pre-order. A missing
/// program or file yields nothing.
pub fn semantic_tokens<S>(service: &S, file: &str, span: TextSpan) -> Vec<u32>
where
    S: LanguageService + ?Sized,
{
    let mut tokens = Vec::new();
    let Some(program) = service.program() else {
        return tokens;
    };
    let Some(source) = program.source_file(file) else {
        tracing::debug!(file, "semantic tokens requested for unknown file");
        return tokens;
    };

    let checker = program.type_checker();
    let root = source.syntax();
    let mut visitor = Visitor {
        checker: &checker,
        file: source.id,
        span,
        tokens: &mut tokens,
    };
    visitor.visit(&root);

    tracing::trace!(file, tokens = tokens.len() / 3, "semantic tokens");
    tokens
}

struct Visitor<'a, 'p> {
    checker: &'a TypeChecker<'p>,
    file: FileId,
    span: TextSpan,
    tokens: &'a mut Vec<u32>,
}

impl Visitor<'_, '_> {
    fn visit(&mut self, node: &SyntaxNode) {
        if !self.span.intersects_range(node.full_range()) {
            return;
        }
        if node.kind() == SyntaxKind::IDENTIFIER {
            self.classify(node);
        }
        for child in node.children() {
            self.visit(&child);
        }
    }

    fn classify(&mut self, ident: &SyntaxNode) {
        let Some(symbol) = self.checker.symbol_at_location(self.file, ident) else {
            return;
        };
        let Some(decl) = self.checker.representative_declaration(symbol) else {
            return;
        };
        let Some(kind) = TokenType::for_declaration(decl.kind) else {
            return;
        };

        let mut modifiers = TokenModifier::from_declaration(decl.combined_modifiers());
        if is_declaring_occurrence(ident, kind) {
            modifiers |= TokenModifier::DECLARATION;
        }

        self.tokens.extend([
            ident.trimmed_start().into(),
            ident.trimmed_width().into(),
            encode(kind, modifiers),
        ]);
    }
}

/// The parent declares a name of the same visual kind, and that name is
/// this identifier.
fn is_declaring_occurrence(ident: &SyntaxNode, kind: TokenType) -> bool {
    let Some(parent) = ident.parent() else {
        return false;
    };
    let parent_kind =
        DeclarationKind::from_syntax(parent.kind()).and_then(TokenType::for_declaration);
    parent_kind == Some(kind)
        && declaration_name(&parent).is_some_and(|name| name.syntax() == ident)
}
