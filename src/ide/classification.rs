//! Host classifications: the service's own lexical and symbol-based
//! highlighting, numbered the way editors expect from a TypeScript host.

use crate::base::{FileId, TextSpan};
use crate::hir::{DeclarationKind, Program, SymbolFlags, TypeChecker};
use crate::parser::{NodeExt, SyntaxKind, SyntaxNode, tokenize};

/// Classification numbers shared with editor front ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ClassificationType {
    Comment = 1,
    Identifier = 2,
    Keyword = 3,
    NumericLiteral = 4,
    Operator = 5,
    StringLiteral = 6,
    Punctuation = 10,
    ClassName = 11,
    EnumName = 12,
    InterfaceName = 13,
    ModuleName = 14,
    TypeParameterName = 15,
    TypeAliasName = 16,
    ParameterName = 17,
}

impl ClassificationType {
    fn of_token(kind: SyntaxKind) -> Option<Self> {
        let class = match kind {
            SyntaxKind::LINE_COMMENT | SyntaxKind::BLOCK_COMMENT => Self::Comment,
            SyntaxKind::IDENT => Self::Identifier,
            SyntaxKind::NUMBER => Self::NumericLiteral,
            SyntaxKind::STRING => Self::StringLiteral,
            k if k.is_keyword() => Self::Keyword,
            k if k.is_operator() => Self::Operator,
            k if k.is_punct() => Self::Punctuation,
            _ => return None,
        };
        Some(class)
    }

    fn of_symbol(flags: SymbolFlags, decl: Option<DeclarationKind>) -> Option<Self> {
        let class = if flags.contains(SymbolFlags::CLASS) {
            Self::ClassName
        } else if flags.intersects(SymbolFlags::ENUM) {
            Self::EnumName
        } else if flags.contains(SymbolFlags::TYPE_ALIAS) {
            Self::TypeAliasName
        } else if flags.intersects(SymbolFlags::MODULE) {
            Self::ModuleName
        } else if flags.contains(SymbolFlags::INTERFACE) {
            Self::InterfaceName
        } else if flags.contains(SymbolFlags::TYPE_PARAMETER) {
            Self::TypeParameterName
        } else if decl == Some(DeclarationKind::Parameter) {
            Self::ParameterName
        } else {
            return None;
        };
        Some(class)
    }
}

/// Lexical classification of every token touching `span`.
pub fn syntactic_classifications(text: &str, span: TextSpan) -> Vec<u32> {
    let mut spans = Vec::new();
    for token in tokenize(text) {
        if !span.intersects_range(token.range()) {
            continue;
        }
        let Some(class) = ClassificationType::of_token(token.kind) else {
            continue;
        };
        spans.extend([
            token.offset.into(),
            u32::try_from(token.text.len()).unwrap_or(u32::MAX),
            class as u32,
        ]);
    }
    spans
}

/// Symbol-based classification of the type-like names in `span`.
pub fn semantic_classifications(program: &Program, file: &str, span: TextSpan) -> Vec<u32> {
    let mut spans = Vec::new();
    let Some(source) = program.source_file(file) else {
        return spans;
    };
    let checker = program.type_checker();
    let root = source.syntax();
    collect(&checker, source.id, &root, span, &mut spans);
    spans
}

fn collect(
    checker: &TypeChecker<'_>,
    file: FileId,
    node: &SyntaxNode,
    span: TextSpan,
    spans: &mut Vec<u32>,
) {
    if !span.intersects_range(node.full_range()) {
        return;
    }
    if node.kind() == SyntaxKind::IDENTIFIER {
        let class = checker.symbol_at_location(file, node).and_then(|id| {
            let symbol = checker.symbol(id)?;
            let decl = checker.representative_declaration(id).map(|d| d.kind);
            ClassificationType::of_symbol(symbol.flags, decl)
        });
        if let Some(class) = class {
            spans.extend([
                node.trimmed_start().into(),
                node.trimmed_width().into(),
                class as u32,
            ]);
        }
    }
    for child in node.children() {
        collect(checker, file, &child, span, spans);
    }
}
