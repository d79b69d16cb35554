//! Binder: declares every named entity of a file into scopes and symbol
//! tables, merging compatible declarations.
//!
//! Binding is a single pre-order walk. Declarations are hoisted: lookups only
//! happen afterwards (in [`super::resolve`]), so the order of declarations
//! within a scope never affects resolution.
//!
//! Where a declaration lands:
//!
//! | declaration | table |
//! |---|---|
//! | `let`/`const`, class, interface, type alias, enum, function, namespace, import | locals of the enclosing block scope |
//! | `var` | locals of the enclosing function, namespace or file |
//! | exported declaration inside a namespace | exports of the namespace symbol |
//! | parameter, type parameter | locals of the owning declaration |
//! | class instance member | members of the class symbol |
//! | `static` class member | exports of the class symbol |
//! | interface / type literal / object literal member | members of the owner |
//! | enum member | exports of the enum symbol |

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use super::diagnostics::Diagnostic;
use super::resolve::Resolver;
use super::symbols::{
    Declaration, DeclarationForm, DeclarationId, DeclarationKind, ModifierFlags, Symbol,
    SymbolFlags, SymbolId, SymbolTable,
};
use crate::base::FileId;
use crate::parser::{
    AstNode, NodeExt, SyntaxKind, SyntaxNode, SyntaxNodePtr, VariableDeclarationList,
    declaration_name, modifier_tokens,
};

// ============================================================================
// BOUND FILE
// ============================================================================

/// Index of a lexical scope within one bound file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ScopeId(usize);

#[derive(Debug, Clone)]
pub(crate) struct Scope {
    pub parent: Option<ScopeId>,
    pub locals: SymbolTable,
    /// Namespace or enum whose exports are visible inside this scope.
    pub exports_of: Option<SymbolId>,
}

/// Symbols, declarations and resolved identifier locations of one file.
#[derive(Debug, Clone)]
pub struct BoundFile {
    pub file: FileId,
    pub(crate) symbols: Vec<Symbol>,
    pub(crate) declarations: Vec<Declaration>,
    pub(crate) scopes: Vec<Scope>,
    /// Scope introduced by a node (file, block, function-like, class, ...).
    pub(crate) node_scopes: FxHashMap<SyntaxNodePtr, ScopeId>,
    /// Symbol declared by a declaration node.
    pub(crate) node_symbols: FxHashMap<SyntaxNodePtr, SymbolId>,
    /// Symbol named by each resolved `IDENTIFIER` node.
    pub(crate) locations: FxHashMap<SyntaxNodePtr, SymbolId>,
    pub(crate) diagnostics: Vec<Diagnostic>,
}

impl BoundFile {
    fn new(file: FileId) -> Self {
        Self {
            file,
            symbols: Vec::new(),
            declarations: Vec::new(),
            scopes: Vec::new(),
            node_scopes: FxHashMap::default(),
            node_symbols: FxHashMap::default(),
            locations: FxHashMap::default(),
            diagnostics: Vec::new(),
        }
    }

    pub fn symbol(&self, id: SymbolId) -> Option<&Symbol> {
        if id.file != self.file {
            return None;
        }
        self.symbols.get(id.index())
    }

    pub fn declaration(&self, id: DeclarationId) -> Option<&Declaration> {
        if id.file != self.file {
            return None;
        }
        self.declarations.get(id.index())
    }

    /// Symbol named by an `IDENTIFIER` node of this file.
    pub fn symbol_at(&self, identifier: &SyntaxNode) -> Option<SymbolId> {
        self.locations
            .get(&SyntaxNodePtr::new(identifier))
            .copied()
    }

    /// Symbol declared by a declaration node of this file.
    pub fn symbol_of_declaration(&self, node: &SyntaxNode) -> Option<SymbolId> {
        self.node_symbols.get(&SyntaxNodePtr::new(node)).copied()
    }

    pub fn symbols(&self) -> impl Iterator<Item = (SymbolId, &Symbol)> + '_ {
        self.symbols
            .iter()
            .enumerate()
            .map(|(i, s)| (SymbolId::new(self.file, i), s))
    }

    /// Resolved identifier locations, in no particular order.
    pub fn locations(&self) -> impl Iterator<Item = (&SyntaxNodePtr, SymbolId)> + '_ {
        self.locations.iter().map(|(ptr, id)| (ptr, *id))
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub(crate) fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub(crate) fn scope_of(&self, node: &SyntaxNode) -> Option<ScopeId> {
        self.node_scopes.get(&SyntaxNodePtr::new(node)).copied()
    }
}

/// Bind a parsed file and resolve every identifier in it.
pub fn bind_file(file: FileId, root: &SyntaxNode) -> BoundFile {
    let mut binder = Binder {
        bound: BoundFile::new(file),
    };
    let file_scope = binder.push_scope(root, None, None);
    let cx = Context {
        block: file_scope,
        function: file_scope,
    };
    binder.bind_children(root, cx);

    let mut bound = binder.bound;
    Resolver::new(&mut bound, root).resolve_all();

    tracing::trace!(
        file = file.index(),
        symbols = bound.symbols.len(),
        locations = bound.locations.len(),
        diagnostics = bound.diagnostics.len(),
        "bound file"
    );
    bound
}

// ============================================================================
// BINDER
// ============================================================================

/// Where a declaration's symbol is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Locals(ScopeId),
    Members(SymbolId),
    Exports(SymbolId),
    /// Not reachable by name (type literals, nameless declarations).
    Anonymous,
}

#[derive(Debug, Clone, Copy)]
struct Context {
    /// Receives block-scoped declarations.
    block: ScopeId,
    /// Receives `var` declarations.
    function: ScopeId,
}

struct Binder {
    bound: BoundFile,
}

impl Binder {
    fn push_scope(
        &mut self,
        node: &SyntaxNode,
        parent: Option<ScopeId>,
        exports_of: Option<SymbolId>,
    ) -> ScopeId {
        let id = ScopeId(self.bound.scopes.len());
        self.bound.scopes.push(Scope {
            parent,
            locals: SymbolTable::default(),
            exports_of,
        });
        self.bound.node_scopes.insert(SyntaxNodePtr::new(node), id);
        id
    }

    fn bind_children(&mut self, node: &SyntaxNode, cx: Context) {
        for child in node.children() {
            self.bind_node(&child, cx);
        }
    }

    fn bind_node(&mut self, node: &SyntaxNode, cx: Context) {
        match node.kind() {
            SyntaxKind::BLOCK => {
                let owned_by_function = node
                    .parent()
                    .is_some_and(|p| introduces_function_scope(p.kind()));
                let cx = if owned_by_function {
                    cx
                } else {
                    let scope = self.push_scope(node, Some(cx.block), None);
                    Context { block: scope, ..cx }
                };
                self.bind_children(node, cx);
            }
            SyntaxKind::ARROW_FUNCTION => {
                let scope = self.push_scope(node, Some(cx.block), None);
                self.bind_children(
                    node,
                    Context {
                        block: scope,
                        function: scope,
                    },
                );
            }
            kind => match DeclarationKind::from_syntax(kind) {
                Some(decl_kind) => self.bind_declaration(node, decl_kind, cx),
                None => self.bind_children(node, cx),
            },
        }
    }

    fn bind_declaration(&mut self, node: &SyntaxNode, kind: DeclarationKind, cx: Context) {
        let name = binding_name(node, kind);
        if name.is_none() && kind == DeclarationKind::ImportClause {
            // `import { a } from ...` has no default import
            self.bind_children(node, cx);
            return;
        }
        let decl = self.add_declaration(node, kind);
        let modifiers = self.bound.declarations[decl.index()].combined_modifiers;

        let form = DeclarationForm {
            block_scoped: kind == DeclarationKind::VariableDeclaration
                && node
                    .parent()
                    .and_then(VariableDeclarationList::cast)
                    .is_some_and(|list| list.is_block_scoped()),
            const_enum: kind == DeclarationKind::EnumDeclaration
                && modifiers.contains(ModifierFlags::CONST),
            instantiated: kind == DeclarationKind::ModuleDeclaration && is_instantiated(node),
        };
        let (includes, excludes) = kind.symbol_flags(form);

        let target = match name {
            Some(_) => self.target(node, kind, form, modifiers, cx),
            None => Target::Anonymous,
        };
        let name = name.unwrap_or_else(|| anonymous_name(kind));
        let symbol = self.declare(target, name.clone(), node, decl, includes, excludes);

        if kind == DeclarationKind::Parameter
            && modifiers.intersects(ModifierFlags::PARAMETER_PROPERTY)
        {
            let class = node
                .parent()
                .filter(|p| p.kind() == SyntaxKind::CONSTRUCTOR)
                .and_then(|ctor| ctor.parent())
                .and_then(|class| self.bound.symbol_of_declaration(&class));
            if let Some(class) = class {
                let (includes, excludes) = DeclarationKind::PropertyDeclaration.symbol_flags(form);
                self.declare(Target::Members(class), name, node, decl, includes, excludes);
            }
        }

        match kind {
            DeclarationKind::ModuleDeclaration | DeclarationKind::EnumDeclaration => {
                let scope = self.push_scope(node, Some(cx.block), Some(symbol));
                let function = if kind == DeclarationKind::ModuleDeclaration {
                    scope
                } else {
                    cx.function
                };
                self.bind_children(
                    node,
                    Context {
                        block: scope,
                        function,
                    },
                );
            }
            DeclarationKind::ClassDeclaration
            | DeclarationKind::InterfaceDeclaration
            | DeclarationKind::TypeAliasDeclaration => {
                let scope = self.push_scope(node, Some(cx.block), None);
                self.bind_children(node, Context { block: scope, ..cx });
            }
            kind if kind.is_function_like() => {
                let scope = self.push_scope(node, Some(cx.block), None);
                self.bind_children(
                    node,
                    Context {
                        block: scope,
                        function: scope,
                    },
                );
            }
            _ => self.bind_children(node, cx),
        }
    }

    fn add_declaration(&mut self, node: &SyntaxNode, kind: DeclarationKind) -> DeclarationId {
        let modifiers = modifier_flags(node);
        let mut combined = modifiers;
        if kind == DeclarationKind::VariableDeclaration {
            // declaration → list → statement
            if let Some(statement) = node.parent().and_then(|list| list.parent()) {
                combined |= modifier_flags(&statement);
            }
        }
        let id = DeclarationId::new(self.bound.file, self.bound.declarations.len());
        self.bound.declarations.push(Declaration {
            kind,
            ptr: SyntaxNodePtr::new(node),
            name_range: declaration_name(node).map(|ident| ident.syntax().trimmed_range()),
            modifiers,
            combined_modifiers: combined,
        });
        id
    }

    fn target(
        &self,
        node: &SyntaxNode,
        kind: DeclarationKind,
        form: DeclarationForm,
        modifiers: ModifierFlags,
        cx: Context,
    ) -> Target {
        use DeclarationKind as K;

        let exported = modifiers.contains(ModifierFlags::EXPORT);
        let parent_symbol = || {
            node.parent()
                .and_then(|parent| self.bound.symbol_of_declaration(&parent))
        };
        match kind {
            K::VariableDeclaration => {
                let scope = if form.block_scoped { cx.block } else { cx.function };
                self.scoped_target(scope, exported)
            }
            K::Parameter | K::TypeParameter => Target::Locals(cx.block),
            K::ImportClause | K::NamespaceImport | K::ImportSpecifier => Target::Locals(cx.block),
            K::ModuleDeclaration
                if node
                    .parent()
                    .is_some_and(|p| p.kind() == SyntaxKind::MODULE_DECLARATION) =>
            {
                // inner segment of `namespace A.B`
                parent_symbol().map_or(Target::Anonymous, Target::Exports)
            }
            K::FunctionDeclaration
            | K::ClassDeclaration
            | K::InterfaceDeclaration
            | K::TypeAliasDeclaration
            | K::EnumDeclaration
            | K::ModuleDeclaration => self.scoped_target(cx.block, exported),
            K::PropertyDeclaration
            | K::MethodDeclaration
            | K::GetAccessor
            | K::SetAccessor
            | K::Constructor => {
                let in_class = node
                    .parent()
                    .is_some_and(|p| p.kind() == SyntaxKind::CLASS_DECLARATION);
                match parent_symbol() {
                    Some(owner) if in_class && modifiers.contains(ModifierFlags::STATIC) => {
                        Target::Exports(owner)
                    }
                    Some(owner) => Target::Members(owner),
                    None => Target::Anonymous,
                }
            }
            K::PropertySignature
            | K::MethodSignature
            | K::PropertyAssignment
            | K::ShorthandPropertyAssignment => {
                parent_symbol().map_or(Target::Anonymous, Target::Members)
            }
            K::EnumMember => parent_symbol().map_or(Target::Anonymous, Target::Exports),
            K::TypeLiteral | K::ObjectLiteralExpression => Target::Anonymous,
        }
    }

    fn scoped_target(&self, scope: ScopeId, exported: bool) -> Target {
        match self.bound.scope(scope).exports_of {
            Some(namespace) if exported => Target::Exports(namespace),
            _ => Target::Locals(scope),
        }
    }

    fn table(&self, target: Target) -> Option<&SymbolTable> {
        match target {
            Target::Locals(scope) => Some(&self.bound.scopes[scope.0].locals),
            Target::Members(owner) => Some(&self.bound.symbols[owner.index()].members),
            Target::Exports(owner) => Some(&self.bound.symbols[owner.index()].exports),
            Target::Anonymous => None,
        }
    }

    fn table_mut(&mut self, target: Target) -> Option<&mut SymbolTable> {
        match target {
            Target::Locals(scope) => Some(&mut self.bound.scopes[scope.0].locals),
            Target::Members(owner) => Some(&mut self.bound.symbols[owner.index()].members),
            Target::Exports(owner) => Some(&mut self.bound.symbols[owner.index()].exports),
            Target::Anonymous => None,
        }
    }

    fn new_symbol(&mut self, name: SmolStr) -> SymbolId {
        let id = SymbolId::new(self.bound.file, self.bound.symbols.len());
        self.bound.symbols.push(Symbol::new(name));
        id
    }

    /// Add `decl` to the symbol called `name` in `target`, creating it or
    /// merging into an existing one. A conflicting existing symbol is left
    /// alone and the declaration gets a fresh, unreachable symbol.
    fn declare(
        &mut self,
        target: Target,
        name: SmolStr,
        node: &SyntaxNode,
        decl: DeclarationId,
        includes: SymbolFlags,
        excludes: SymbolFlags,
    ) -> SymbolId {
        let existing = self.table(target).and_then(|t| t.get(&name).copied());
        let symbol = match existing {
            Some(id) if !self.bound.symbols[id.index()].flags.intersects(excludes) => id,
            Some(_) => {
                let range = self.bound.declarations[decl.index()]
                    .name_range
                    .unwrap_or_else(|| node.trimmed_range());
                self.bound
                    .diagnostics
                    .push(Diagnostic::duplicate_identifier(range, &name));
                self.new_symbol(name)
            }
            None => {
                let id = self.new_symbol(name.clone());
                if let Some(table) = self.table_mut(target) {
                    table.insert(name, id);
                }
                id
            }
        };

        self.add_to_symbol(symbol, decl, includes);
        let ptr = SyntaxNodePtr::new(node);
        self.bound.node_symbols.entry(ptr).or_insert(symbol);
        if let Some(ident) = declaration_name(node) {
            self.bound
                .locations
                .entry(SyntaxNodePtr::new(ident.syntax()))
                .or_insert(symbol);
        }
        symbol
    }

    fn add_to_symbol(&mut self, symbol: SymbolId, decl: DeclarationId, includes: SymbolFlags) {
        let decl_kind = self.bound.declarations[decl.index()].kind;
        let current_value_kind = self.bound.symbols[symbol.index()]
            .value_declaration
            .map(|d| self.bound.declarations[d.index()].kind);

        let entry = &mut self.bound.symbols[symbol.index()];
        entry.flags |= includes;
        entry.declarations.push(decl);
        if includes.intersects(SymbolFlags::VALUE) {
            // A namespace only keeps the value slot until a class, function
            // or enum of the same name shows up.
            let replace = match current_value_kind {
                None => true,
                Some(DeclarationKind::ModuleDeclaration) => {
                    decl_kind != DeclarationKind::ModuleDeclaration
                }
                Some(_) => false,
            };
            if replace {
                entry.value_declaration = Some(decl);
            }
        }
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn introduces_function_scope(kind: SyntaxKind) -> bool {
    kind == SyntaxKind::ARROW_FUNCTION
        || DeclarationKind::from_syntax(kind).is_some_and(DeclarationKind::is_function_like)
}

fn modifier_flags(node: &SyntaxNode) -> ModifierFlags {
    modifier_tokens(node).fold(ModifierFlags::empty(), |flags, token| {
        flags | ModifierFlags::from_keyword(token.kind())
    })
}

/// Name a declaration is bound under.
///
/// Members may be named by string or numeric literals; ambient modules
/// keep their quotes so no identifier can reach them.
fn binding_name(node: &SyntaxNode, kind: DeclarationKind) -> Option<SmolStr> {
    use DeclarationKind as K;

    if let Some(ident) = declaration_name(node) {
        return Some(ident.text());
    }
    match kind {
        K::Constructor => Some(SmolStr::new_static("__constructor")),
        K::ModuleDeclaration => literal_name_token(node).map(|t| SmolStr::new(t.text())),
        K::PropertyDeclaration
        | K::PropertySignature
        | K::MethodDeclaration
        | K::MethodSignature
        | K::GetAccessor
        | K::SetAccessor
        | K::EnumMember
        | K::PropertyAssignment => literal_name_token(node).map(|t| {
            let text = t.text();
            let unquoted = if t.kind() == SyntaxKind::STRING && text.len() >= 2 {
                &text[1..text.len() - 1]
            } else {
                text
            };
            SmolStr::new(unquoted)
        }),
        _ => None,
    }
}

fn literal_name_token(node: &SyntaxNode) -> Option<crate::parser::SyntaxToken> {
    node.children_with_tokens()
        .filter_map(|e| e.into_token())
        .find(|t| !t.kind().is_trivia() && !t.kind().is_keyword())
        .filter(|t| matches!(t.kind(), SyntaxKind::STRING | SyntaxKind::NUMBER))
}

fn anonymous_name(kind: DeclarationKind) -> SmolStr {
    match kind {
        DeclarationKind::TypeLiteral => SmolStr::new_static("__type"),
        DeclarationKind::ObjectLiteralExpression => SmolStr::new_static("__object"),
        DeclarationKind::ClassDeclaration => SmolStr::new_static("__class"),
        _ => SmolStr::new_static("__missing"),
    }
}

/// A namespace is instantiated unless its body holds nothing but types,
/// imports, const enums and other uninstantiated namespaces.
fn is_instantiated(module: &SyntaxNode) -> bool {
    if let Some(inner) = module
        .children()
        .find(|n| n.kind() == SyntaxKind::MODULE_DECLARATION)
    {
        return is_instantiated(&inner);
    }
    let Some(block) = module
        .children()
        .find(|n| n.kind() == SyntaxKind::MODULE_BLOCK)
    else {
        return true;
    };
    block.children().any(|statement| match statement.kind() {
        SyntaxKind::INTERFACE_DECLARATION
        | SyntaxKind::TYPE_ALIAS_DECLARATION
        | SyntaxKind::IMPORT_DECLARATION
        | SyntaxKind::EMPTY_STATEMENT
        | SyntaxKind::ERROR => false,
        SyntaxKind::ENUM_DECLARATION => !modifier_flags(&statement).contains(ModifierFlags::CONST),
        SyntaxKind::MODULE_DECLARATION => is_instantiated(&statement),
        _ => true,
    })
}
