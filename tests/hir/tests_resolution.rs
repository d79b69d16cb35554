//! Name resolution tests through the TypeChecker.

use std::sync::Arc;

use rstest::rstest;
use tssh::hir::{DeclarationKind, ModifierFlags, Program, SymbolFlags};

use crate::helpers::service_helpers::{FILE, first_offset, last_offset};

fn program(source: &str) -> Program {
    Program::new([(Arc::from(FILE), Arc::from(source))])
}

/// Declaration kind the identifier at `offset` resolves to.
fn resolved_kind(program: &Program, offset: u32) -> Option<DeclarationKind> {
    let file = program.source_file(FILE)?.id;
    let checker = program.type_checker();
    let ident = checker.identifier_at(file, offset)?;
    let symbol = checker.symbol_at_location(file, &ident)?;
    checker.representative_declaration(symbol).map(|d| d.kind)
}

#[rstest]
#[case("let x = 1;\nfunction f() { return x; }", "x", DeclarationKind::VariableDeclaration)]
#[case("f();\nfunction f() {}", "f();", DeclarationKind::FunctionDeclaration)]
#[case("function f() { v; var v = 1; }", "v;", DeclarationKind::VariableDeclaration)]
#[case("class A { static s = 1; }\nA.s;", "s", DeclarationKind::PropertyDeclaration)]
#[case("namespace Outer.Inner { export const deep = 1; }\nOuter.Inner.deep;", "deep", DeclarationKind::VariableDeclaration)]
#[case("namespace Outer.Inner { export const deep = 1; }\nOuter.Inner.deep;", "Inner", DeclarationKind::ModuleDeclaration)]
#[case("namespace NS { export interface I { p: number; } }\nlet i: NS.I;\ni.p;", "p", DeclarationKind::PropertySignature)]
#[case("type T = { a: number };\nlet t: T;\nt.a;", "a", DeclarationKind::PropertySignature)]
#[case("type T = { a: number } & { b: string };\nlet t: T;\nt.b;", "b", DeclarationKind::PropertySignature)]
#[case("class C { make(): C { return new C(); } n = 1; }\nlet c = new C();\nc.make().n;", "n", DeclarationKind::PropertyDeclaration)]
#[case("function mk(): { z: number } { return { z: 1 }; }\nmk().z;", "z", DeclarationKind::PropertySignature)]
#[case("const o = { k: 1 };\no.k;", "k", DeclarationKind::PropertyAssignment)]
#[case("import * as ns from 'x';\nns;", "ns", DeclarationKind::NamespaceImport)]
#[case("import d from 'x';\nd;", "d", DeclarationKind::ImportClause)]
#[case("class K { constructor(public w: number) {} }\nnew K(1).w;", "w", DeclarationKind::Parameter)]
fn test_reference_resolves_to(
    #[case] source: &str,
    #[case] name: &str,
    #[case] expected: DeclarationKind,
) {
    let program = program(source);
    assert_eq!(
        resolved_kind(&program, last_offset(source, name)),
        Some(expected)
    );
}

#[test]
fn test_block_scoped_names_do_not_leak() {
    let source = "{ let inner = 1; }\ninner;";
    let program = program(source);
    assert_eq!(resolved_kind(&program, last_offset(source, "inner")), None);
    let diagnostics = program.type_checker().diagnostics(program.source_file(FILE).unwrap().id);
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(&*diagnostics[0].message, "Cannot find name 'inner'.");
}

#[test]
fn test_var_is_function_scoped() {
    let source = "function f() { { var hoisted = 1; } return hoisted; }";
    let program = program(source);
    assert_eq!(
        resolved_kind(&program, last_offset(source, "hoisted")),
        Some(DeclarationKind::VariableDeclaration)
    );
}

#[test]
fn test_type_and_value_meanings_are_separate() {
    let source = "interface Point { x: number; }\nconst Point = 1;\nlet p: Point = Point;";
    let program = program(source);
    let type_use = first_offset(source, "Point = Point");
    let value_use = last_offset(source, "Point");
    assert_eq!(
        resolved_kind(&program, type_use),
        Some(DeclarationKind::VariableDeclaration)
    );
    assert_eq!(
        resolved_kind(&program, value_use),
        Some(DeclarationKind::VariableDeclaration)
    );

    let file = program.source_file(FILE).unwrap().id;
    let checker = program.type_checker();
    let ident = checker.identifier_at(file, type_use).unwrap();
    let symbol = checker.symbol_at_location(file, &ident).unwrap();
    let flags = checker.symbol(symbol).unwrap().flags;
    assert!(flags.contains(SymbolFlags::INTERFACE));
    assert!(flags.contains(SymbolFlags::BLOCK_SCOPED_VARIABLE));
}

#[test]
fn test_heritage_cycle_terminates() {
    let source = "interface A extends B {}\ninterface B extends A {}\nlet a: A;\na.missing;";
    let program = program(source);
    assert_eq!(resolved_kind(&program, last_offset(source, "missing")), None);
}

#[test]
fn test_combined_modifiers_come_from_statement() {
    let source = "export const shared = 1;";
    let program = program(source);
    let file = program.source_file(FILE).unwrap().id;
    let checker = program.type_checker();
    let ident = checker.identifier_at(file, first_offset(source, "shared")).unwrap();
    let symbol = checker.symbol_at_location(file, &ident).unwrap();
    let decl = checker.representative_declaration(symbol).unwrap();
    assert!(decl.combined_modifiers().contains(ModifierFlags::EXPORT));
    assert!(decl.modifiers.is_empty());
}

#[rstest]
#[case("class A {}\nclass A {}", 1)]
#[case("let a;\nvar a;", 1)]
#[case("function f() {}\nlet f;", 1)]
#[case("interface I {}\ninterface I {}", 0)]
#[case("class C {}\ninterface C {}", 0)]
#[case("enum E { A }\nenum E { B = 1 }", 0)]
#[case("function g() {}\nnamespace g { export const x = 1; }", 0)]
#[case("var v;\nvar v;", 0)]
fn test_duplicate_identifier_diagnostics(#[case] source: &str, #[case] expected: usize) {
    let program = program(source);
    let file = program.source_file(FILE).unwrap().id;
    let count = program
        .type_checker()
        .diagnostics(file)
        .iter()
        .filter(|d| d.code == tssh::hir::DUPLICATE_IDENTIFIER)
        .count();
    assert_eq!(count, expected, "{source}");
}
