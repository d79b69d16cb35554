//! Name resolution: maps every `IDENTIFIER` of a bound file to a symbol.
//!
//! Plain names are looked up through the scope chain with a meaning (value,
//! type or namespace) picked from the syntactic context. Names after a dot are
//! looked up in the member tables of whatever the left-hand side denotes:
//!
//! - `this` inside a class: instance members, or statics in a static member;
//! - a class used as a value: its statics;
//! - an enum or namespace: its exports;
//! - a variable, parameter, property or accessor: the members of its declared
//!   type (class and interface instance members following `extends`, type
//!   aliases, type literals, intersections), or failing that of its
//!   initializer (`new C()`, object literals);
//! - a call: the declared return type of the callee.
//!
//! Resolution is memoized per identifier and guarded against cycles in
//! `extends` chains, type aliases and initializers.

use rustc_hash::{FxHashMap, FxHashSet};

use super::binder::BoundFile;
use super::diagnostics::Diagnostic;
use super::symbols::{DeclarationKind, SymbolFlags, SymbolId};
use crate::parser::{
    AstNode, HeritageClause, Identifier, NodeExt, PropertyAccessExpression, QualifiedName,
    SyntaxKind, SyntaxNode, SyntaxNodePtr, TypeReference, declaration_name, initializer,
    modifier_tokens, type_annotation,
};

/// A member table to search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum MemberSource {
    Members(SymbolId),
    Exports(SymbolId),
}

pub(crate) struct Resolver<'a> {
    bound: &'a mut BoundFile,
    root: &'a SyntaxNode,
    /// Identifiers already attempted, resolved or not.
    visited: FxHashSet<SyntaxNodePtr>,
    /// Symbols whose type is being expanded.
    expanding: FxHashSet<SymbolId>,
    /// Nodes looked up by pointer while expanding declarations.
    nodes: FxHashMap<SyntaxNodePtr, SyntaxNode>,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(bound: &'a mut BoundFile, root: &'a SyntaxNode) -> Self {
        Self {
            bound,
            root,
            visited: FxHashSet::default(),
            expanding: FxHashSet::default(),
            nodes: FxHashMap::default(),
        }
    }

    /// Resolve every identifier in the file; unresolved plain references
    /// get a "Cannot find name" diagnostic.
    pub(crate) fn resolve_all(&mut self) {
        let identifiers: Vec<_> = self
            .root
            .descendants()
            .filter(|n| n.kind() == SyntaxKind::IDENTIFIER)
            .collect();
        for ident in identifiers {
            if self.resolve_identifier(&ident).is_none() && is_plain_reference(&ident) {
                let name = Identifier::cast(ident.clone())
                    .map(|i| i.text())
                    .unwrap_or_default();
                self.bound
                    .diagnostics
                    .push(Diagnostic::cannot_find_name(ident.trimmed_range(), &name));
            }
        }
    }

    /// Symbol named by an identifier, memoized in the file's location map.
    fn resolve_identifier(&mut self, ident: &SyntaxNode) -> Option<SymbolId> {
        let ptr = SyntaxNodePtr::new(ident);
        if let Some(&symbol) = self.bound.locations.get(&ptr) {
            return Some(symbol);
        }
        if !self.visited.insert(ptr.clone()) {
            return None;
        }
        let symbol = self.resolve_uncached(ident)?;
        self.bound.locations.insert(ptr, symbol);
        Some(symbol)
    }

    fn resolve_uncached(&mut self, ident: &SyntaxNode) -> Option<SymbolId> {
        let name = Identifier::cast(ident.clone())?.text();
        let parent = ident.parent()?;

        match parent.kind() {
            SyntaxKind::PROPERTY_ACCESS_EXPRESSION if !is_first_child(&parent, ident) => {
                let object = PropertyAccessExpression::cast(parent)?.expression()?;
                let sources = self.expression_members(&object);
                self.lookup_member(&sources, &name)
            }
            SyntaxKind::QUALIFIED_NAME if !is_first_child(&parent, ident) => {
                let left = QualifiedName::cast(parent.clone())?.left()?;
                let namespace = self.resolve_entity_name(&left)?;
                let meaning = qualified_meaning(&parent);
                let symbol = *self.bound.symbols[namespace.index()].exports.get(&name)?;
                self.bound.symbols[symbol.index()]
                    .flags
                    .has_meaning(meaning)
                    .then_some(symbol)
            }
            SyntaxKind::QUALIFIED_NAME => self.lookup(ident, &name, SymbolFlags::NAMESPACE),
            SyntaxKind::IMPORT_SPECIFIER => None,
            SyntaxKind::TYPE_REFERENCE => {
                let meaning = if in_class_extends(&parent) {
                    SymbolFlags::VALUE
                } else {
                    SymbolFlags::TYPE
                };
                self.lookup(ident, &name, meaning)
            }
            _ if is_declaration_name(&parent, ident) => None,
            _ => self.lookup(ident, &name, SymbolFlags::VALUE),
        }
    }

    /// Resolve the identifier or qualified name that names an entity.
    fn resolve_entity_name(&mut self, node: &SyntaxNode) -> Option<SymbolId> {
        match node.kind() {
            SyntaxKind::IDENTIFIER => self.resolve_identifier(node),
            SyntaxKind::QUALIFIED_NAME => {
                let right = QualifiedName::cast(node.clone())?.right()?;
                self.resolve_identifier(right.syntax())
            }
            _ => None,
        }
    }

    // =========================================================================
    // Scope lookup
    // =========================================================================

    /// Walk the scope chain outwards from `node` looking for `name`.
    fn lookup(&self, node: &SyntaxNode, name: &str, meaning: SymbolFlags) -> Option<SymbolId> {
        let mut scope = node.ancestors().find_map(|n| self.bound.scope_of(&n));
        while let Some(id) = scope {
            let current = self.bound.scope(id);
            if let Some(symbol) = self.table_hit(current.locals.get(name), meaning) {
                return Some(symbol);
            }
            if let Some(owner) = current.exports_of {
                let exports = &self.bound.symbols[owner.index()].exports;
                if let Some(symbol) = self.table_hit(exports.get(name), meaning) {
                    return Some(symbol);
                }
            }
            scope = current.parent;
        }
        None
    }

    fn table_hit(&self, entry: Option<&SymbolId>, meaning: SymbolFlags) -> Option<SymbolId> {
        let symbol = *entry?;
        self.bound.symbols[symbol.index()]
            .flags
            .has_meaning(meaning)
            .then_some(symbol)
    }

    fn lookup_member(&self, sources: &[MemberSource], name: &str) -> Option<SymbolId> {
        sources.iter().find_map(|source| {
            let table = match *source {
                MemberSource::Members(owner) => &self.bound.symbols[owner.index()].members,
                MemberSource::Exports(owner) => &self.bound.symbols[owner.index()].exports,
            };
            table.get(name).copied()
        })
    }

    // =========================================================================
    // Member sources
    // =========================================================================

    /// Member tables reachable by `expr.name`.
    fn expression_members(&mut self, expr: &SyntaxNode) -> Vec<MemberSource> {
        match expr.kind() {
            SyntaxKind::THIS_EXPRESSION => self.this_members(expr),
            SyntaxKind::PARENTHESIZED_EXPRESSION => match expr.first_child() {
                Some(inner) => self.expression_members(&inner),
                None => Vec::new(),
            },
            SyntaxKind::OBJECT_LITERAL_EXPRESSION => self
                .bound
                .symbol_of_declaration(expr)
                .map(MemberSource::Members)
                .into_iter()
                .collect(),
            SyntaxKind::NEW_EXPRESSION => {
                let class = expr
                    .first_child()
                    .and_then(|callee| self.expression_symbol(&callee));
                match class {
                    Some(class) if self.flags(class).contains(SymbolFlags::CLASS) => {
                        self.instance_members(class)
                    }
                    _ => Vec::new(),
                }
            }
            SyntaxKind::CALL_EXPRESSION => {
                let callee = expr
                    .first_child()
                    .and_then(|callee| self.expression_symbol(&callee));
                match callee {
                    Some(callee) => self.return_type_members(callee),
                    None => Vec::new(),
                }
            }
            _ => match self.expression_symbol(expr) {
                Some(symbol) => self.symbol_members(symbol),
                None => Vec::new(),
            },
        }
    }

    /// Symbol denoted by a name-like expression.
    fn expression_symbol(&mut self, expr: &SyntaxNode) -> Option<SymbolId> {
        match expr.kind() {
            SyntaxKind::IDENTIFIER => self.resolve_identifier(expr),
            SyntaxKind::PROPERTY_ACCESS_EXPRESSION => {
                let name = PropertyAccessExpression::cast(expr.clone())?.name()?;
                self.resolve_identifier(name.syntax())
            }
            SyntaxKind::PARENTHESIZED_EXPRESSION => self.expression_symbol(&expr.first_child()?),
            _ => None,
        }
    }

    /// Members of the class (or object literal) that `this` refers to.
    fn this_members(&mut self, expr: &SyntaxNode) -> Vec<MemberSource> {
        let mut is_static = false;
        for ancestor in expr.ancestors().skip(1) {
            match ancestor.kind() {
                SyntaxKind::ARROW_FUNCTION => {}
                SyntaxKind::METHOD_DECLARATION
                | SyntaxKind::GET_ACCESSOR
                | SyntaxKind::SET_ACCESSOR
                | SyntaxKind::CONSTRUCTOR
                | SyntaxKind::PROPERTY_DECLARATION => {
                    is_static =
                        modifier_tokens(&ancestor).any(|t| t.kind() == SyntaxKind::STATIC_KW);
                }
                SyntaxKind::CLASS_DECLARATION => {
                    let Some(class) = self.bound.symbol_of_declaration(&ancestor) else {
                        return Vec::new();
                    };
                    return if is_static {
                        self.static_members(class)
                    } else {
                        self.instance_members(class)
                    };
                }
                SyntaxKind::OBJECT_LITERAL_EXPRESSION => {
                    return self
                        .bound
                        .symbol_of_declaration(&ancestor)
                        .map(MemberSource::Members)
                        .into_iter()
                        .collect();
                }
                SyntaxKind::FUNCTION_DECLARATION
                | SyntaxKind::MODULE_DECLARATION
                | SyntaxKind::SOURCE_FILE => return Vec::new(),
                _ => {}
            }
        }
        Vec::new()
    }

    /// Member tables of a symbol used as the left side of a dot.
    fn symbol_members(&mut self, symbol: SymbolId) -> Vec<MemberSource> {
        let flags = self.flags(symbol);
        if flags.contains(SymbolFlags::CLASS) {
            self.static_members(symbol)
        } else if flags.intersects(SymbolFlags::ENUM | SymbolFlags::MODULE) {
            vec![MemberSource::Exports(symbol)]
        } else if flags.intersects(
            SymbolFlags::VARIABLE | SymbolFlags::PROPERTY | SymbolFlags::ACCESSOR,
        ) {
            self.declared_type_members(symbol)
        } else {
            Vec::new()
        }
    }

    /// Members of a value's declared type, or of its initializer.
    fn declared_type_members(&mut self, symbol: SymbolId) -> Vec<MemberSource> {
        if !self.expanding.insert(symbol) {
            return Vec::new();
        }
        let mut sources = Vec::new();
        if let Some(node) = self.representative_node(symbol) {
            if let Some(ty) = type_annotation(&node) {
                sources = self.type_members(&ty);
            } else if node.kind() != SyntaxKind::GET_ACCESSOR {
                if let Some(init) = initializer(&node) {
                    sources = self.expression_members(&init);
                }
            }
        }
        self.expanding.remove(&symbol);
        sources
    }

    fn return_type_members(&mut self, callee: SymbolId) -> Vec<MemberSource> {
        if !self.flags(callee).intersects(SymbolFlags::FUNCTION | SymbolFlags::METHOD) {
            return Vec::new();
        }
        if !self.expanding.insert(callee) {
            return Vec::new();
        }
        let sources = match self.representative_node(callee).and_then(|n| type_annotation(&n)) {
            Some(ty) => self.type_members(&ty),
            None => Vec::new(),
        };
        self.expanding.remove(&callee);
        sources
    }

    /// Member tables of a type node.
    fn type_members(&mut self, ty: &SyntaxNode) -> Vec<MemberSource> {
        match ty.kind() {
            SyntaxKind::TYPE_LITERAL => self
                .bound
                .symbol_of_declaration(ty)
                .map(MemberSource::Members)
                .into_iter()
                .collect(),
            SyntaxKind::PARENTHESIZED_TYPE => match ty.first_child() {
                Some(inner) => self.type_members(&inner),
                None => Vec::new(),
            },
            SyntaxKind::INTERSECTION_TYPE => {
                let parts: Vec<_> = ty.children().collect();
                let mut sources = Vec::new();
                for part in parts {
                    sources.extend(self.type_members(&part));
                }
                sources
            }
            SyntaxKind::TYPE_REFERENCE => {
                let Some(target) = TypeReference::cast(ty.clone())
                    .and_then(|r| r.name())
                    .and_then(|name| self.resolve_entity_name(&name))
                else {
                    return Vec::new();
                };
                let flags = self.flags(target);
                if flags.intersects(SymbolFlags::CLASS | SymbolFlags::INTERFACE) {
                    self.instance_members(target)
                } else if flags.contains(SymbolFlags::TYPE_ALIAS) {
                    self.alias_members(target)
                } else {
                    Vec::new()
                }
            }
            _ => Vec::new(),
        }
    }

    fn alias_members(&mut self, alias: SymbolId) -> Vec<MemberSource> {
        if !self.expanding.insert(alias) {
            return Vec::new();
        }
        let sources = match self.representative_node(alias).and_then(|n| initializer(&n)) {
            Some(ty) => self.type_members(&ty),
            None => Vec::new(),
        };
        self.expanding.remove(&alias);
        sources
    }

    /// Instance members of a class or interface and everything it extends.
    fn instance_members(&mut self, symbol: SymbolId) -> Vec<MemberSource> {
        self.heritage_chain(symbol)
            .into_iter()
            .map(MemberSource::Members)
            .collect()
    }

    /// Statics of a class and of its base classes.
    fn static_members(&mut self, symbol: SymbolId) -> Vec<MemberSource> {
        self.heritage_chain(symbol)
            .into_iter()
            .filter(|s| self.flags(*s).contains(SymbolFlags::CLASS))
            .map(MemberSource::Exports)
            .collect()
    }

    /// `symbol` followed by its `extends` targets, breadth first, each once.
    fn heritage_chain(&mut self, symbol: SymbolId) -> Vec<SymbolId> {
        let mut chain = vec![symbol];
        let mut seen: FxHashSet<SymbolId> = FxHashSet::default();
        seen.insert(symbol);
        let mut next = 0;
        while next < chain.len() {
            let current = chain[next];
            next += 1;
            for base in self.direct_bases(current) {
                if seen.insert(base) {
                    chain.push(base);
                }
            }
        }
        chain
    }

    fn direct_bases(&mut self, symbol: SymbolId) -> Vec<SymbolId> {
        let declarations = self.bound.symbols[symbol.index()].declarations.clone();
        let mut references = Vec::new();
        for decl in declarations {
            let kind = self.bound.declarations[decl.index()].kind;
            if !matches!(
                kind,
                DeclarationKind::ClassDeclaration | DeclarationKind::InterfaceDeclaration
            ) {
                continue;
            }
            let Some(node) = self.declaration_node(decl.index()) else {
                continue;
            };
            references.extend(
                node.children()
                    .filter_map(HeritageClause::cast)
                    .filter(|clause| clause.is_extends())
                    .flat_map(|clause| clause.types().collect::<Vec<_>>())
                    .filter_map(|reference| reference.name()),
            );
        }
        let resolved: Vec<SymbolId> = references
            .iter()
            .filter_map(|name| self.resolve_entity_name(name))
            .collect();
        resolved
            .into_iter()
            .filter(|base| {
                self.flags(*base)
                    .intersects(SymbolFlags::CLASS | SymbolFlags::INTERFACE)
            })
            .collect()
    }

    // =========================================================================
    // Helpers
    // =========================================================================

    fn flags(&self, symbol: SymbolId) -> SymbolFlags {
        self.bound.symbols[symbol.index()].flags
    }

    fn representative_node(&mut self, symbol: SymbolId) -> Option<SyntaxNode> {
        let decl = self.bound.symbols[symbol.index()].representative_declaration()?;
        self.declaration_node(decl.index())
    }

    fn declaration_node(&mut self, index: usize) -> Option<SyntaxNode> {
        let ptr = self.bound.declarations.get(index)?.ptr.clone();
        if let Some(node) = self.nodes.get(&ptr) {
            return Some(node.clone());
        }
        let node = ptr.try_to_node(self.root)?;
        self.nodes.insert(ptr, node.clone());
        Some(node)
    }
}

// ============================================================================
// SYNTACTIC CONTEXT
// ============================================================================

fn is_first_child(parent: &SyntaxNode, child: &SyntaxNode) -> bool {
    parent.first_child().as_ref() == Some(child)
}

fn is_declaration_name(parent: &SyntaxNode, ident: &SyntaxNode) -> bool {
    DeclarationKind::from_syntax(parent.kind()).is_some()
        && declaration_name(parent).is_some_and(|name| name.syntax() == ident)
}

/// Meaning of the rightmost name of a qualified name.
fn qualified_meaning(qualified: &SyntaxNode) -> SymbolFlags {
    match qualified.parent() {
        Some(parent) if parent.kind() == SyntaxKind::TYPE_REFERENCE => {
            if in_class_extends(&parent) {
                SymbolFlags::VALUE
            } else {
                SymbolFlags::TYPE
            }
        }
        _ => SymbolFlags::NAMESPACE,
    }
}

/// `class C extends Base` refers to the value `Base`.
fn in_class_extends(reference: &SyntaxNode) -> bool {
    reference
        .parent()
        .and_then(HeritageClause::cast)
        .filter(|clause| clause.is_extends())
        .and_then(|clause| clause.syntax().parent())
        .is_some_and(|owner| owner.kind() == SyntaxKind::CLASS_DECLARATION)
}

/// An identifier that must resolve through scopes, as opposed to a member
/// name, an import's exported name, or a declaration's own name.
fn is_plain_reference(ident: &SyntaxNode) -> bool {
    let Some(parent) = ident.parent() else {
        return false;
    };
    match parent.kind() {
        SyntaxKind::PROPERTY_ACCESS_EXPRESSION | SyntaxKind::QUALIFIED_NAME => {
            is_first_child(&parent, ident)
        }
        SyntaxKind::IMPORT_SPECIFIER => false,
        _ => !is_declaration_name(&parent, ident),
    }
}
