//! Symbol and declaration types produced by the binder.
//!
//! A [`Symbol`] is a named entity; it owns one or more [`Declaration`]s
//! (merged interfaces, overloads, accessor pairs, namespace+class and so on).
//! Each declaration remembers its syntactic form as a [`DeclarationKind`].

use indexmap::IndexMap;
use rustc_hash::FxBuildHasher;
use smol_str::SmolStr;

use crate::base::FileId;
use crate::parser::{SyntaxKind, SyntaxNodePtr};
use rowan::TextRange;

/// Ordered name → symbol table (locals, members, exports).
pub type SymbolTable = IndexMap<SmolStr, SymbolId, FxBuildHasher>;

// ============================================================================
// IDS
// ============================================================================

/// Index of a symbol within one bound file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolId {
    pub file: FileId,
    local: u32,
}

impl SymbolId {
    pub(crate) fn new(file: FileId, local: usize) -> Self {
        Self {
            file,
            local: local as u32,
        }
    }

    pub(crate) fn index(self) -> usize {
        self.local as usize
    }
}

/// Index of a declaration within one bound file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeclarationId {
    pub file: FileId,
    local: u32,
}

impl DeclarationId {
    pub(crate) fn new(file: FileId, local: usize) -> Self {
        Self {
            file,
            local: local as u32,
        }
    }

    pub(crate) fn index(self) -> usize {
        self.local as usize
    }
}

// ============================================================================
// FLAGS
// ============================================================================

bitflags::bitflags! {
    /// What a symbol is, accumulated over all of its declarations.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct SymbolFlags: u32 {
        const FUNCTION_SCOPED_VARIABLE = 1 << 0;
        const BLOCK_SCOPED_VARIABLE    = 1 << 1;
        const PROPERTY                 = 1 << 2;
        const ENUM_MEMBER              = 1 << 3;
        const FUNCTION                 = 1 << 4;
        const CLASS                    = 1 << 5;
        const INTERFACE                = 1 << 6;
        const CONST_ENUM               = 1 << 7;
        const REGULAR_ENUM             = 1 << 8;
        const VALUE_MODULE             = 1 << 9;
        const NAMESPACE_MODULE         = 1 << 10;
        const TYPE_LITERAL             = 1 << 11;
        const OBJECT_LITERAL           = 1 << 12;
        const METHOD                   = 1 << 13;
        const CONSTRUCTOR              = 1 << 14;
        const GET_ACCESSOR             = 1 << 15;
        const SET_ACCESSOR             = 1 << 16;
        const TYPE_PARAMETER           = 1 << 17;
        const TYPE_ALIAS               = 1 << 18;
        const ALIAS                    = 1 << 19;

        const ENUM = Self::CONST_ENUM.bits() | Self::REGULAR_ENUM.bits();
        const VARIABLE = Self::FUNCTION_SCOPED_VARIABLE.bits() | Self::BLOCK_SCOPED_VARIABLE.bits();
        const ACCESSOR = Self::GET_ACCESSOR.bits() | Self::SET_ACCESSOR.bits();
        const VALUE = Self::VARIABLE.bits()
            | Self::PROPERTY.bits()
            | Self::ENUM_MEMBER.bits()
            | Self::OBJECT_LITERAL.bits()
            | Self::FUNCTION.bits()
            | Self::CLASS.bits()
            | Self::ENUM.bits()
            | Self::VALUE_MODULE.bits()
            | Self::METHOD.bits()
            | Self::ACCESSOR.bits();
        const TYPE = Self::CLASS.bits()
            | Self::INTERFACE.bits()
            | Self::ENUM.bits()
            | Self::ENUM_MEMBER.bits()
            | Self::TYPE_LITERAL.bits()
            | Self::TYPE_PARAMETER.bits()
            | Self::TYPE_ALIAS.bits();
        const NAMESPACE = Self::VALUE_MODULE.bits()
            | Self::NAMESPACE_MODULE.bits()
            | Self::ENUM.bits();
        const MODULE = Self::VALUE_MODULE.bits() | Self::NAMESPACE_MODULE.bits();
    }
}

impl SymbolFlags {
    /// Check whether the symbol can answer a lookup for `meaning`.
    ///
    /// Import aliases answer every meaning; their target is never followed.
    pub fn has_meaning(self, meaning: SymbolFlags) -> bool {
        self.intersects(meaning | SymbolFlags::ALIAS)
    }
}

bitflags::bitflags! {
    /// Modifier keywords written on a declaration.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierFlags: u16 {
        const EXPORT    = 1 << 0;
        const AMBIENT   = 1 << 1;
        const DEFAULT   = 1 << 2;
        const CONST     = 1 << 3;
        const PUBLIC    = 1 << 4;
        const PRIVATE   = 1 << 5;
        const PROTECTED = 1 << 6;
        const STATIC    = 1 << 7;
        const READONLY  = 1 << 8;
        const ABSTRACT  = 1 << 9;
        const ASYNC     = 1 << 10;

        /// Modifiers that turn a constructor parameter into a property.
        const PARAMETER_PROPERTY = Self::PUBLIC.bits()
            | Self::PRIVATE.bits()
            | Self::PROTECTED.bits()
            | Self::READONLY.bits();
    }
}

impl ModifierFlags {
    pub fn from_keyword(kind: SyntaxKind) -> ModifierFlags {
        match kind {
            SyntaxKind::EXPORT_KW => ModifierFlags::EXPORT,
            SyntaxKind::DECLARE_KW => ModifierFlags::AMBIENT,
            SyntaxKind::DEFAULT_KW => ModifierFlags::DEFAULT,
            SyntaxKind::CONST_KW => ModifierFlags::CONST,
            SyntaxKind::PUBLIC_KW => ModifierFlags::PUBLIC,
            SyntaxKind::PRIVATE_KW => ModifierFlags::PRIVATE,
            SyntaxKind::PROTECTED_KW => ModifierFlags::PROTECTED,
            SyntaxKind::STATIC_KW => ModifierFlags::STATIC,
            SyntaxKind::READONLY_KW => ModifierFlags::READONLY,
            SyntaxKind::ABSTRACT_KW => ModifierFlags::ABSTRACT,
            SyntaxKind::ASYNC_KW => ModifierFlags::ASYNC,
            _ => ModifierFlags::empty(),
        }
    }
}

// ============================================================================
// DECLARATIONS
// ============================================================================

/// Syntactic form of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationKind {
    VariableDeclaration,
    Parameter,
    PropertyDeclaration,
    ModuleDeclaration,
    EnumDeclaration,
    EnumMember,
    ClassDeclaration,
    MethodDeclaration,
    FunctionDeclaration,
    MethodSignature,
    GetAccessor,
    PropertySignature,
    InterfaceDeclaration,
    TypeAliasDeclaration,
    TypeParameter,
    SetAccessor,
    Constructor,
    ImportClause,
    NamespaceImport,
    ImportSpecifier,
    PropertyAssignment,
    ShorthandPropertyAssignment,
    TypeLiteral,
    ObjectLiteralExpression,
}

impl DeclarationKind {
    /// Declaration form of a syntax node, if it declares anything.
    pub fn from_syntax(kind: SyntaxKind) -> Option<Self> {
        let kind = match kind {
            SyntaxKind::VARIABLE_DECLARATION => Self::VariableDeclaration,
            SyntaxKind::PARAMETER => Self::Parameter,
            SyntaxKind::PROPERTY_DECLARATION => Self::PropertyDeclaration,
            SyntaxKind::MODULE_DECLARATION => Self::ModuleDeclaration,
            SyntaxKind::ENUM_DECLARATION => Self::EnumDeclaration,
            SyntaxKind::ENUM_MEMBER => Self::EnumMember,
            SyntaxKind::CLASS_DECLARATION => Self::ClassDeclaration,
            SyntaxKind::METHOD_DECLARATION => Self::MethodDeclaration,
            SyntaxKind::FUNCTION_DECLARATION => Self::FunctionDeclaration,
            SyntaxKind::METHOD_SIGNATURE => Self::MethodSignature,
            SyntaxKind::GET_ACCESSOR => Self::GetAccessor,
            SyntaxKind::PROPERTY_SIGNATURE => Self::PropertySignature,
            SyntaxKind::INTERFACE_DECLARATION => Self::InterfaceDeclaration,
            SyntaxKind::TYPE_ALIAS_DECLARATION => Self::TypeAliasDeclaration,
            SyntaxKind::TYPE_PARAMETER => Self::TypeParameter,
            SyntaxKind::SET_ACCESSOR => Self::SetAccessor,
            SyntaxKind::CONSTRUCTOR => Self::Constructor,
            SyntaxKind::IMPORT_CLAUSE => Self::ImportClause,
            SyntaxKind::NAMESPACE_IMPORT => Self::NamespaceImport,
            SyntaxKind::IMPORT_SPECIFIER => Self::ImportSpecifier,
            SyntaxKind::PROPERTY_ASSIGNMENT => Self::PropertyAssignment,
            SyntaxKind::SHORTHAND_PROPERTY_ASSIGNMENT => Self::ShorthandPropertyAssignment,
            SyntaxKind::TYPE_LITERAL => Self::TypeLiteral,
            SyntaxKind::OBJECT_LITERAL_EXPRESSION => Self::ObjectLiteralExpression,
            _ => return None,
        };
        Some(kind)
    }

    /// Symbol flags a declaration of this form contributes, and the flags
    /// of an existing symbol it cannot merge with.
    pub(crate) fn symbol_flags(self, form: DeclarationForm) -> (SymbolFlags, SymbolFlags) {
        use SymbolFlags as F;
        match self {
            Self::VariableDeclaration if form.block_scoped => (F::BLOCK_SCOPED_VARIABLE, F::VALUE),
            Self::VariableDeclaration => {
                (F::FUNCTION_SCOPED_VARIABLE, F::VALUE - F::FUNCTION_SCOPED_VARIABLE)
            }
            Self::Parameter => (F::FUNCTION_SCOPED_VARIABLE, F::VALUE),
            Self::PropertyDeclaration
            | Self::PropertySignature
            | Self::PropertyAssignment
            | Self::ShorthandPropertyAssignment => (F::PROPERTY, F::VALUE - F::PROPERTY),
            Self::EnumMember => (F::ENUM_MEMBER, F::VALUE | F::TYPE),
            Self::FunctionDeclaration => (
                F::FUNCTION,
                F::VALUE - (F::FUNCTION | F::VALUE_MODULE | F::CLASS),
            ),
            Self::ClassDeclaration => (
                F::CLASS,
                (F::VALUE | F::TYPE) - (F::VALUE_MODULE | F::INTERFACE | F::FUNCTION),
            ),
            Self::InterfaceDeclaration => (F::INTERFACE, F::TYPE - (F::INTERFACE | F::CLASS)),
            Self::EnumDeclaration if form.const_enum => (F::CONST_ENUM, (F::VALUE | F::TYPE) - F::CONST_ENUM),
            Self::EnumDeclaration => (
                F::REGULAR_ENUM,
                (F::VALUE | F::TYPE) - (F::REGULAR_ENUM | F::VALUE_MODULE),
            ),
            Self::ModuleDeclaration if form.instantiated => (
                F::VALUE_MODULE,
                F::VALUE - (F::FUNCTION | F::CLASS | F::REGULAR_ENUM | F::VALUE_MODULE),
            ),
            Self::ModuleDeclaration => (F::NAMESPACE_MODULE, F::empty()),
            Self::MethodDeclaration | Self::MethodSignature => (F::METHOD, F::VALUE - F::METHOD),
            Self::GetAccessor => (F::GET_ACCESSOR, F::VALUE - F::SET_ACCESSOR),
            Self::SetAccessor => (F::SET_ACCESSOR, F::VALUE - F::GET_ACCESSOR),
            Self::Constructor => (F::CONSTRUCTOR, F::empty()),
            Self::TypeParameter => (F::TYPE_PARAMETER, F::TYPE - F::TYPE_PARAMETER),
            Self::TypeAliasDeclaration => (F::TYPE_ALIAS, F::TYPE),
            Self::ImportClause | Self::NamespaceImport | Self::ImportSpecifier => {
                (F::ALIAS, F::ALIAS)
            }
            Self::TypeLiteral => (F::TYPE_LITERAL, F::empty()),
            Self::ObjectLiteralExpression => (F::OBJECT_LITERAL, F::empty()),
        }
    }

    /// Function-like forms whose parameters and body share one scope.
    pub fn is_function_like(self) -> bool {
        matches!(
            self,
            Self::FunctionDeclaration
                | Self::MethodDeclaration
                | Self::MethodSignature
                | Self::Constructor
                | Self::GetAccessor
                | Self::SetAccessor
        )
    }
}

/// Variations of a declaration form that change its symbol flags.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DeclarationForm {
    /// `let` / `const` rather than `var`.
    pub block_scoped: bool,
    pub const_enum: bool,
    /// Namespace containing values, not only types.
    pub instantiated: bool,
}

/// One declaration site of a symbol.
#[derive(Debug, Clone)]
pub struct Declaration {
    pub kind: DeclarationKind,
    pub ptr: SyntaxNodePtr,
    /// Range of the name identifier, if the declaration has one.
    pub name_range: Option<TextRange>,
    /// Modifiers written on the declaration node itself.
    pub modifiers: ModifierFlags,
    /// Own modifiers plus those inherited from the enclosing variable
    /// statement.
    pub combined_modifiers: ModifierFlags,
}

impl Declaration {
    pub fn combined_modifiers(&self) -> ModifierFlags {
        self.combined_modifiers
    }

    pub fn is_static(&self) -> bool {
        self.combined_modifiers.contains(ModifierFlags::STATIC)
    }
}

// ============================================================================
// SYMBOLS
// ============================================================================

/// A named entity and everything declared for it.
#[derive(Debug, Clone)]
pub struct Symbol {
    pub name: SmolStr,
    pub flags: SymbolFlags,
    pub declarations: Vec<DeclarationId>,
    pub value_declaration: Option<DeclarationId>,
    /// Instance members of classes, interfaces and literals.
    pub members: SymbolTable,
    /// Exported namespace members, enum members and class statics.
    pub exports: SymbolTable,
}

impl Symbol {
    pub(crate) fn new(name: SmolStr) -> Self {
        Self {
            name,
            flags: SymbolFlags::empty(),
            declarations: Vec::new(),
            value_declaration: None,
            members: SymbolTable::default(),
            exports: SymbolTable::default(),
        }
    }

    /// The declaration that stands for the symbol: its value declaration
    /// if there is one, otherwise the first declaration.
    pub fn representative_declaration(&self) -> Option<DeclarationId> {
        self.value_declaration
            .or_else(|| self.declarations.first().copied())
    }
}
