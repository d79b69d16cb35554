//! Syntax kinds for the Rowan-based CST
//!
//! This enum defines all possible node and token kinds in the syntax tree
//! of the TypeScript subset understood by the host.

/// All syntax kinds (tokens and nodes)
///
/// Tokens are leaves (identifiers, keywords, punctuation, trivia).
/// Nodes are composite (declarations, statements, expressions, types).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA (whitespace and comments - preserved but not semantically meaningful)
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // LITERALS
    // =========================================================================
    IDENT,  // identifier
    NUMBER, // 42, 3.14, 0xff
    STRING, // "hello" or 'hello'

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACE,   // {
    R_BRACE,   // }
    L_PAREN,   // (
    R_PAREN,   // )
    L_BRACKET, // [
    R_BRACKET, // ]
    SEMICOLON, // ;
    COMMA,     // ,
    DOT,       // .
    COLON,     // :
    QUESTION,  // ?
    FAT_ARROW, // =>

    // =========================================================================
    // OPERATORS
    // =========================================================================
    EQ,                // =
    PLUS_EQ,           // +=
    MINUS_EQ,          // -=
    EQ_EQ,             // ==
    EQ_EQ_EQ,          // ===
    BANG_EQ,           // !=
    BANG_EQ_EQ,        // !==
    LT,                // <
    GT,                // >
    LT_EQ,             // <=
    GT_EQ,             // >=
    PLUS,              // +
    MINUS,             // -
    STAR,              // *
    SLASH,             // /
    PERCENT,           // %
    PLUS_PLUS,         // ++
    MINUS_MINUS,       // --
    BANG,              // !
    AMP,               // &
    PIPE,              // |
    AMP_AMP,           // &&
    PIPE_PIPE,         // ||
    QUESTION_QUESTION, // ??

    // =========================================================================
    // KEYWORDS - reserved
    // =========================================================================
    CLASS_KW,
    CONST_KW,
    DEFAULT_KW,
    ELSE_KW,
    ENUM_KW,
    EXPORT_KW,
    EXTENDS_KW,
    FALSE_KW,
    FUNCTION_KW,
    IF_KW,
    IMPORT_KW,
    NEW_KW,
    NULL_KW,
    RETURN_KW,
    THIS_KW,
    TRUE_KW,
    TYPEOF_KW,
    VAR_KW,
    VOID_KW,

    // =========================================================================
    // KEYWORDS - contextual (usable as names)
    // =========================================================================
    ABSTRACT_KW,
    AS_KW,
    ASYNC_KW,
    AWAIT_KW,
    CONSTRUCTOR_KW,
    DECLARE_KW,
    FROM_KW,
    GET_KW,
    IMPLEMENTS_KW,
    INTERFACE_KW,
    LET_KW,
    MODULE_KW,
    NAMESPACE_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    PUBLIC_KW,
    READONLY_KW,
    SET_KW,
    STATIC_KW,
    TYPE_KW,

    // Type keywords (also contextual)
    ANY_KW,
    BOOLEAN_KW,
    NEVER_KW,
    NUMBER_KW,
    OBJECT_KW,
    STRING_KW,
    SYMBOL_KW,
    UNKNOWN_KW,

    // =========================================================================
    // NODES - structure
    // =========================================================================
    SOURCE_FILE,
    IDENTIFIER,
    QUALIFIED_NAME,

    // Declarations
    VARIABLE_STATEMENT,
    VARIABLE_DECLARATION_LIST,
    VARIABLE_DECLARATION,
    FUNCTION_DECLARATION,
    PARAMETER,
    TYPE_PARAMETER,
    CLASS_DECLARATION,
    HERITAGE_CLAUSE,
    PROPERTY_DECLARATION,
    METHOD_DECLARATION,
    CONSTRUCTOR,
    GET_ACCESSOR,
    SET_ACCESSOR,
    INTERFACE_DECLARATION,
    PROPERTY_SIGNATURE,
    METHOD_SIGNATURE,
    TYPE_ALIAS_DECLARATION,
    ENUM_DECLARATION,
    ENUM_MEMBER,
    MODULE_DECLARATION,
    MODULE_BLOCK,
    IMPORT_DECLARATION,
    IMPORT_CLAUSE,
    NAMESPACE_IMPORT,
    NAMED_IMPORTS,
    IMPORT_SPECIFIER,

    // Statements
    BLOCK,
    EXPRESSION_STATEMENT,
    RETURN_STATEMENT,
    IF_STATEMENT,
    EMPTY_STATEMENT,

    // Types
    TYPE_REFERENCE,
    KEYWORD_TYPE,
    LITERAL_TYPE,
    TYPE_LITERAL,
    ARRAY_TYPE,
    UNION_TYPE,
    INTERSECTION_TYPE,
    PARENTHESIZED_TYPE,

    // Expressions
    BINARY_EXPRESSION,
    PREFIX_UNARY_EXPRESSION,
    POSTFIX_UNARY_EXPRESSION,
    CALL_EXPRESSION,
    NEW_EXPRESSION,
    PROPERTY_ACCESS_EXPRESSION,
    ELEMENT_ACCESS_EXPRESSION,
    PARENTHESIZED_EXPRESSION,
    ARROW_FUNCTION,
    LITERAL_EXPRESSION,
    THIS_EXPRESSION,
    ARRAY_LITERAL_EXPRESSION,
    OBJECT_LITERAL_EXPRESSION,
    PROPERTY_ASSIGNMENT,
    SHORTHAND_PROPERTY_ASSIGNMENT,

    // Special
    ERROR,
    EOF, // lookahead past the last token; never stored in a tree

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    /// Check if this is a trivia token (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(self, Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    pub fn is_comment(self) -> bool {
        matches!(self, Self::LINE_COMMENT | Self::BLOCK_COMMENT)
    }

    /// Check if this is a keyword (reserved or contextual)
    pub fn is_keyword(self) -> bool {
        (self as u16) >= (Self::CLASS_KW as u16) && (self as u16) <= (Self::UNKNOWN_KW as u16)
    }

    /// Keywords that may also appear wherever an identifier is expected.
    pub fn is_contextual_keyword(self) -> bool {
        (self as u16) >= (Self::ABSTRACT_KW as u16) && (self as u16) <= (Self::UNKNOWN_KW as u16)
    }

    /// Check if this is a punctuation token
    pub fn is_punct(self) -> bool {
        (self as u16) >= (Self::L_BRACE as u16) && (self as u16) <= (Self::FAT_ARROW as u16)
    }

    /// Check if this is an operator token
    pub fn is_operator(self) -> bool {
        (self as u16) >= (Self::EQ as u16) && (self as u16) <= (Self::QUESTION_QUESTION as u16)
    }

    /// Check if this is a literal
    pub fn is_literal(self) -> bool {
        matches!(self, Self::IDENT | Self::NUMBER | Self::STRING)
    }

    /// Check if this token can name a declaration or be referenced as one.
    pub fn is_name_token(self) -> bool {
        self == Self::IDENT || self.is_contextual_keyword()
    }

    /// Check if this token is a declaration modifier keyword.
    pub fn is_modifier_keyword(self) -> bool {
        matches!(
            self,
            Self::EXPORT_KW
                | Self::DEFAULT_KW
                | Self::DECLARE_KW
                | Self::CONST_KW
                | Self::PUBLIC_KW
                | Self::PRIVATE_KW
                | Self::PROTECTED_KW
                | Self::STATIC_KW
                | Self::READONLY_KW
                | Self::ABSTRACT_KW
                | Self::ASYNC_KW
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    fn from(kind: SyntaxKind) -> Self {
        Self(kind as u16)
    }
}

impl From<rowan::SyntaxKind> for SyntaxKind {
    fn from(raw: rowan::SyntaxKind) -> Self {
        assert!(raw.0 < SyntaxKind::__LAST as u16);
        // Safety: we control all syntax kinds and check bounds above
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw.0) }
    }
}

/// Language definition for Rowan
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TsLanguage {}

impl rowan::Language for TsLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        raw.into()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        kind.into()
    }
}

/// Type aliases for convenience
pub type SyntaxNode = rowan::SyntaxNode<TsLanguage>;
pub type SyntaxToken = rowan::SyntaxToken<TsLanguage>;
pub type SyntaxElement = rowan::SyntaxElement<TsLanguage>;
pub type SyntaxNodeChildren = rowan::SyntaxNodeChildren<TsLanguage>;
pub type SyntaxNodePtr = rowan::ast::SyntaxNodePtr<TsLanguage>;
