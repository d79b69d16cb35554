//! Logos-based lexer for the TypeScript subset
//!
//! Fast, lossless tokenization using the logos crate. Every byte of the
//! input ends up in exactly one token; bytes logos cannot match become
//! `ERROR` tokens.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use rowan::{TextRange, TextSize};

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
    offset: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
            offset: 0,
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.offset);
        self.offset = self
            .offset
            .saturating_add(u32::try_from(text.len()).unwrap_or(u32::MAX));

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Consume the rest of a block comment through its closing `*/`.
///
/// An unterminated comment runs to the end of the input.
fn block_comment(lex: &mut logos::Lexer<'_, LogosToken>) -> bool {
    let rest = lex.remainder();
    let len = rest.find("*/").map_or(rest.len(), |end| end + 2);
    lex.bump(len);
    true
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n\f]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[token("/*", block_comment)]
    BlockComment,

    // =========================================================================
    // LITERALS
    // =========================================================================
    #[regex(r"[a-zA-Z_$][a-zA-Z0-9_$]*")]
    Ident,

    #[regex(r"[0-9]+(\.[0-9]+)?([eE][+-]?[0-9]+)?")]
    #[regex(r"0[xX][0-9a-fA-F]+")]
    Number,

    #[regex(r#""([^"\\\n]|\\.)*""#)]
    #[regex(r#"'([^'\\\n]|\\.)*'"#)]
    String,

    // =========================================================================
    // MULTI-CHARACTER PUNCTUATION (must come before single-char)
    // =========================================================================
    #[token("=>")]
    FatArrow,
    #[token("===")]
    EqEqEq,
    #[token("!==")]
    BangEqEq,
    #[token("==")]
    EqEq,
    #[token("!=")]
    BangEq,
    #[token("<=")]
    LtEq,
    #[token(">=")]
    GtEq,
    #[token("+=")]
    PlusEq,
    #[token("-=")]
    MinusEq,
    #[token("++")]
    PlusPlus,
    #[token("--")]
    MinusMinus,
    #[token("&&")]
    AmpAmp,
    #[token("||")]
    PipePipe,
    #[token("??")]
    QuestionQuestion,

    // =========================================================================
    // SINGLE-CHARACTER PUNCTUATION
    // =========================================================================
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("?")]
    Question,
    #[token("=")]
    Eq,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("%")]
    Percent,
    #[token("!")]
    Bang,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,

    // =========================================================================
    // KEYWORDS (alphabetical, longest match wins in logos)
    // =========================================================================
    #[token("abstract")]
    AbstractKw,
    #[token("any")]
    AnyKw,
    #[token("as")]
    AsKw,
    #[token("async")]
    AsyncKw,
    #[token("await")]
    AwaitKw,
    #[token("boolean")]
    BooleanKw,
    #[token("class")]
    ClassKw,
    #[token("const")]
    ConstKw,
    #[token("constructor")]
    ConstructorKw,
    #[token("declare")]
    DeclareKw,
    #[token("default")]
    DefaultKw,
    #[token("else")]
    ElseKw,
    #[token("enum")]
    EnumKw,
    #[token("export")]
    ExportKw,
    #[token("extends")]
    ExtendsKw,
    #[token("false")]
    FalseKw,
    #[token("from")]
    FromKw,
    #[token("function")]
    FunctionKw,
    #[token("get")]
    GetKw,
    #[token("if")]
    IfKw,
    #[token("implements")]
    ImplementsKw,
    #[token("import")]
    ImportKw,
    #[token("interface")]
    InterfaceKw,
    #[token("let")]
    LetKw,
    #[token("module")]
    ModuleKw,
    #[token("namespace")]
    NamespaceKw,
    #[token("never")]
    NeverKw,
    #[token("new")]
    NewKw,
    #[token("null")]
    NullKw,
    #[token("number")]
    NumberKw,
    #[token("object")]
    ObjectKw,
    #[token("private")]
    PrivateKw,
    #[token("protected")]
    ProtectedKw,
    #[token("public")]
    PublicKw,
    #[token("readonly")]
    ReadonlyKw,
    #[token("return")]
    ReturnKw,
    #[token("set")]
    SetKw,
    #[token("static")]
    StaticKw,
    #[token("string")]
    StringKw,
    #[token("symbol")]
    SymbolKw,
    #[token("this")]
    ThisKw,
    #[token("true")]
    TrueKw,
    #[token("type")]
    TypeKw,
    #[token("typeof")]
    TypeofKw,
    #[token("unknown")]
    UnknownKw,
    #[token("var")]
    VarKw,
    #[token("void")]
    VoidKw,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::BlockComment => SyntaxKind::BLOCK_COMMENT,

            LogosToken::Ident => SyntaxKind::IDENT,
            LogosToken::Number => SyntaxKind::NUMBER,
            LogosToken::String => SyntaxKind::STRING,

            LogosToken::FatArrow => SyntaxKind::FAT_ARROW,
            LogosToken::EqEqEq => SyntaxKind::EQ_EQ_EQ,
            LogosToken::BangEqEq => SyntaxKind::BANG_EQ_EQ,
            LogosToken::EqEq => SyntaxKind::EQ_EQ,
            LogosToken::BangEq => SyntaxKind::BANG_EQ,
            LogosToken::LtEq => SyntaxKind::LT_EQ,
            LogosToken::GtEq => SyntaxKind::GT_EQ,
            LogosToken::PlusEq => SyntaxKind::PLUS_EQ,
            LogosToken::MinusEq => SyntaxKind::MINUS_EQ,
            LogosToken::PlusPlus => SyntaxKind::PLUS_PLUS,
            LogosToken::MinusMinus => SyntaxKind::MINUS_MINUS,
            LogosToken::AmpAmp => SyntaxKind::AMP_AMP,
            LogosToken::PipePipe => SyntaxKind::PIPE_PIPE,
            LogosToken::QuestionQuestion => SyntaxKind::QUESTION_QUESTION,

            LogosToken::LBrace => SyntaxKind::L_BRACE,
            LogosToken::RBrace => SyntaxKind::R_BRACE,
            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::LBracket => SyntaxKind::L_BRACKET,
            LogosToken::RBracket => SyntaxKind::R_BRACKET,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
            LogosToken::Comma => SyntaxKind::COMMA,
            LogosToken::Dot => SyntaxKind::DOT,
            LogosToken::Colon => SyntaxKind::COLON,
            LogosToken::Question => SyntaxKind::QUESTION,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Lt => SyntaxKind::LT,
            LogosToken::Gt => SyntaxKind::GT,
            LogosToken::Plus => SyntaxKind::PLUS,
            LogosToken::Minus => SyntaxKind::MINUS,
            LogosToken::Star => SyntaxKind::STAR,
            LogosToken::Slash => SyntaxKind::SLASH,
            LogosToken::Percent => SyntaxKind::PERCENT,
            LogosToken::Bang => SyntaxKind::BANG,
            LogosToken::Amp => SyntaxKind::AMP,
            LogosToken::Pipe => SyntaxKind::PIPE,

            LogosToken::AbstractKw => SyntaxKind::ABSTRACT_KW,
            LogosToken::AnyKw => SyntaxKind::ANY_KW,
            LogosToken::AsKw => SyntaxKind::AS_KW,
            LogosToken::AsyncKw => SyntaxKind::ASYNC_KW,
            LogosToken::AwaitKw => SyntaxKind::AWAIT_KW,
            LogosToken::BooleanKw => SyntaxKind::BOOLEAN_KW,
            LogosToken::ClassKw => SyntaxKind::CLASS_KW,
            LogosToken::ConstKw => SyntaxKind::CONST_KW,
            LogosToken::ConstructorKw => SyntaxKind::CONSTRUCTOR_KW,
            LogosToken::DeclareKw => SyntaxKind::DECLARE_KW,
            LogosToken::DefaultKw => SyntaxKind::DEFAULT_KW,
            LogosToken::ElseKw => SyntaxKind::ELSE_KW,
            LogosToken::EnumKw => SyntaxKind::ENUM_KW,
            LogosToken::ExportKw => SyntaxKind::EXPORT_KW,
            LogosToken::ExtendsKw => SyntaxKind::EXTENDS_KW,
            LogosToken::FalseKw => SyntaxKind::FALSE_KW,
            LogosToken::FromKw => SyntaxKind::FROM_KW,
            LogosToken::FunctionKw => SyntaxKind::FUNCTION_KW,
            LogosToken::GetKw => SyntaxKind::GET_KW,
            LogosToken::IfKw => SyntaxKind::IF_KW,
            LogosToken::ImplementsKw => SyntaxKind::IMPLEMENTS_KW,
            LogosToken::ImportKw => SyntaxKind::IMPORT_KW,
            LogosToken::InterfaceKw => SyntaxKind::INTERFACE_KW,
            LogosToken::LetKw => SyntaxKind::LET_KW,
            LogosToken::ModuleKw => SyntaxKind::MODULE_KW,
            LogosToken::NamespaceKw => SyntaxKind::NAMESPACE_KW,
            LogosToken::NeverKw => SyntaxKind::NEVER_KW,
            LogosToken::NewKw => SyntaxKind::NEW_KW,
            LogosToken::NullKw => SyntaxKind::NULL_KW,
            LogosToken::NumberKw => SyntaxKind::NUMBER_KW,
            LogosToken::ObjectKw => SyntaxKind::OBJECT_KW,
            LogosToken::PrivateKw => SyntaxKind::PRIVATE_KW,
            LogosToken::ProtectedKw => SyntaxKind::PROTECTED_KW,
            LogosToken::PublicKw => SyntaxKind::PUBLIC_KW,
            LogosToken::ReadonlyKw => SyntaxKind::READONLY_KW,
            LogosToken::ReturnKw => SyntaxKind::RETURN_KW,
            LogosToken::SetKw => SyntaxKind::SET_KW,
            LogosToken::StaticKw => SyntaxKind::STATIC_KW,
            LogosToken::StringKw => SyntaxKind::STRING_KW,
            LogosToken::SymbolKw => SyntaxKind::SYMBOL_KW,
            LogosToken::ThisKw => SyntaxKind::THIS_KW,
            LogosToken::TrueKw => SyntaxKind::TRUE_KW,
            LogosToken::TypeKw => SyntaxKind::TYPE_KW,
            LogosToken::TypeofKw => SyntaxKind::TYPEOF_KW,
            LogosToken::UnknownKw => SyntaxKind::UNKNOWN_KW,
            LogosToken::VarKw => SyntaxKind::VAR_KW,
            LogosToken::VoidKw => SyntaxKind::VOID_KW,
        }
    }
}
