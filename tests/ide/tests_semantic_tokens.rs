//! Semantic tokens tests for the IDE layer.

use rstest::rstest;
use tssh::TextSpan;
use tssh::ide::{LanguageService, TokenModifier, TokenType, semantic_tokens};
use tssh::parser::{NodeExt, SyntaxKind};

use crate::helpers::service_helpers::*;
use crate::helpers::source_fixtures::*;
use crate::helpers::token_assertions::*;

// =============================================================================
// SCENARIOS
// =============================================================================

#[test]
fn test_static_async_method_scenario() {
    let tokens = tokens_of(STATIC_ASYNC_METHOD);

    assert_eq!(token_texts(STATIC_ASYNC_METHOD, &tokens), vec!["Foo", "bar"]);

    let foo = token_at(&tokens, 6).unwrap();
    assert_eq!(foo.kind, TokenType::Class);
    assert_eq!(foo.modifiers, TokenModifier::DECLARATION);

    let bar = token_at(&tokens, 25).unwrap();
    assert_eq!(bar.kind, TokenType::Member);
    assert_eq!(
        bar.modifiers,
        TokenModifier::DECLARATION | TokenModifier::STATIC | TokenModifier::ASYNC
    );

    assert_eq!(tokens, vec![6, 3, 257, 25, 3, 3079]);
}

#[test]
fn test_unresolved_identifier_is_skipped() {
    let tokens = tokens_of(UNRESOLVED_REFERENCE);
    let texts = token_texts(UNRESOLVED_REFERENCE, &tokens);

    assert!(!texts.contains(&"missing"));
    assert_eq!(
        texts,
        vec!["before", "broken", "before", "after", "broken"]
    );
}

#[test]
fn test_zero_width_span_between_identifiers_is_empty() {
    let source = "let first = 1; const gap = '          '; let second = 2;";
    let caret = first_offset(source, "'") + 5;
    let service = highlighting_from_source(source);

    let result = service.classify_semantic(FILE, TextSpan::new(caret, 0));
    assert!(result.spans.is_empty(), "got {:?}", result.spans);
}

#[test]
fn test_zero_width_span_touching_identifier_end() {
    let source = "let first = 1; const gap = '          ';";
    let caret = first_offset(source, "gap") + 3;
    let service = highlighting_from_source(source);

    let result = service.classify_semantic(FILE, TextSpan::new(caret, 0));
    assert_eq!(token_texts(source, &result.spans), vec!["gap"]);
}

// =============================================================================
// KIND TOTALITY
// =============================================================================

#[rstest]
#[case("var v = 1;\nv;", "v", TokenType::Variable)]
#[case("function f(p) { return p; }", "p", TokenType::Parameter)]
#[case("class C { prop = 1; m() { return this.prop; } }", "prop", TokenType::Property)]
#[case("namespace N { export const x = 1; }\nN.x;", "N", TokenType::Namespace)]
#[case("enum E { A }\nE.A;", "E", TokenType::Enum)]
#[case("enum E { A }\nE.A;", "A", TokenType::Property)]
#[case("class C {}\nnew C();", "C", TokenType::Class)]
#[case("class C { m() {} }\nnew C().m();", "m", TokenType::Member)]
#[case("function f() {}\nf();", "f", TokenType::Function)]
#[case("interface I { m(): void; }\nlet i: I;\ni.m();", "m", TokenType::Member)]
#[case("class C { get g() { return 1; } }\nnew C().g;", "g", TokenType::Property)]
#[case("interface I { p: number; }\nlet i: I;\ni.p;", "p", TokenType::Property)]
#[case("interface I {}\nlet i: I;", "I", TokenType::Interface)]
#[case("type T = number;\nlet t: T;", "T", TokenType::Type)]
#[case("function f<T>(x: T) {}", "T", TokenType::TypeParameter)]
fn test_reference_kind(#[case] source: &str, #[case] name: &str, #[case] kind: TokenType) {
    let tokens = tokens_of(source);
    let offset = last_offset(source, name);

    let token = token_at(&tokens, offset)
        .unwrap_or_else(|| panic!("no token for '{name}' at {offset}: {tokens:?}"));
    assert_eq!(token.kind, kind);
    assert_eq!(token.length, name.len() as u32);
    assert!(!token.modifiers.contains(TokenModifier::DECLARATION));
}

#[rstest]
#[case("import { x } from 'mod';\nx;", "x")]
#[case("class C { set s(v) {} }\nnew C().s = 1;", "s")]
#[case("let o = { a: 1 };\no.a;", "a")]
fn test_unmapped_declarations_produce_no_token(#[case] source: &str, #[case] name: &str) {
    let tokens = tokens_of(source);
    assert_eq!(token_at(&tokens, last_offset(source, name)), None);
}

#[test]
fn test_overloads_use_first_declaration() {
    let source = "function f(a: string): void;\nfunction f(a) {}\nf('x');";
    let tokens = tokens_of(source);
    let token = token_at(&tokens, last_offset(source, "f")).unwrap();
    assert_eq!(token.kind, TokenType::Function);
}

#[test]
fn test_namespace_merged_with_class_prefers_value_declaration() {
    let source = "namespace M { export const x = 1; }\nclass M {}\nM;";
    let tokens = tokens_of(source);
    let token = token_at(&tokens, last_offset(source, "M")).unwrap();
    assert_eq!(token.kind, TokenType::Class);
}

// =============================================================================
// MODIFIERS
// =============================================================================

#[test]
fn test_static_and_async_are_independent_of_kind() {
    let source = "class C { static async run() {} static count = 0; }\nC.run();\nC.count;";
    let tokens = tokens_of(source);

    let run = token_at(&tokens, last_offset(source, "run")).unwrap();
    assert_eq!(run.kind, TokenType::Member);
    assert_eq!(run.modifiers, TokenModifier::STATIC | TokenModifier::ASYNC);

    let count = token_at(&tokens, last_offset(source, "count")).unwrap();
    assert_eq!(count.kind, TokenType::Property);
    assert_eq!(count.modifiers, TokenModifier::STATIC);
}

#[test]
fn test_async_function() {
    let source = "async function load() {}\nload();";
    let tokens = tokens_of(source);

    let decl = token_at(&tokens, first_offset(source, "load")).unwrap();
    assert_eq!(decl.modifiers, TokenModifier::DECLARATION | TokenModifier::ASYNC);
    let call = token_at(&tokens, last_offset(source, "load")).unwrap();
    assert_eq!(call.modifiers, TokenModifier::ASYNC);
}

#[rstest]
#[case("let value = 1;\nvalue;", "value")]
#[case("class Box {}\nnew Box();", "Box")]
#[case("interface Shape {}\nlet s: Shape;", "Shape")]
#[case("enum Color { Red }\nColor.Red;", "Color")]
#[case("enum Color { Red }\nColor.Red;", "Red")]
#[case("function go() {}\ngo();", "go")]
#[case("type Id = string;\nlet i: Id;", "Id")]
fn test_declaring_occurrence(#[case] source: &str, #[case] name: &str) {
    let tokens = tokens_of(source);

    let declaring = token_at(&tokens, first_offset(source, name)).unwrap();
    assert!(declaring.modifiers.contains(TokenModifier::DECLARATION));

    let reference = token_at(&tokens, last_offset(source, name)).unwrap();
    assert!(!reference.modifiers.contains(TokenModifier::DECLARATION));
    assert_eq!(declaring.kind, reference.kind);
}

#[test]
fn test_parameter_property_name_is_not_declaring_as_parameter() {
    let source = "class P { constructor(private size: number) {} }";
    let tokens = tokens_of(source);
    let size = token_at(&tokens, first_offset(source, "size")).unwrap();
    assert_eq!(size.kind, TokenType::Parameter);
    assert!(size.modifiers.contains(TokenModifier::DECLARATION));
}

// =============================================================================
// SPAN BOUNDEDNESS AND DETERMINISM
// =============================================================================

#[rstest]
#[case(0, 0)]
#[case(0, 20)]
#[case(30, 40)]
#[case(120, 5)]
#[case(200, 150)]
#[case(400, 1000)]
fn test_tokens_come_from_nodes_intersecting_span(#[case] start: u32, #[case] length: u32) {
    let source = MIXED_DECLARATIONS;
    let service = highlighting_from_source(source);
    let span = TextSpan::new(start, length);

    let program = service.program().unwrap();
    let root = program.source_file(FILE).unwrap().syntax();
    let whole = semantic_tokens(&service, FILE, TextSpan::of_text(source));
    let partial = semantic_tokens(&service, FILE, span);

    for token in decode_all(&partial) {
        assert!(token.start + token.length <= source.len() as u32);
        let ident = root
            .descendants()
            .find(|n| n.kind() == SyntaxKind::IDENTIFIER && u32::from(n.trimmed_start()) == token.start)
            .unwrap_or_else(|| panic!("token at {} is not an identifier", token.start));
        assert!(span.intersects_range(ident.full_range()));
        assert!(token_at(&whole, token.start).is_some());
    }
}

#[test]
fn test_narrower_span_yields_subset() {
    let source = CLASS_HIERARCHY;
    let service = highlighting_from_source(source);
    let outer = semantic_tokens(&service, FILE, TextSpan::new(10, 120));
    let inner = semantic_tokens(&service, FILE, TextSpan::new(40, 30));

    let outer = decode_all(&outer);
    for token in decode_all(&inner) {
        assert!(outer.contains(&token), "{token:?} missing from wider span");
    }
}

#[test]
fn test_tokens_are_in_source_order() {
    let tokens = decode_all(&tokens_of(MIXED_DECLARATIONS));
    assert!(!tokens.is_empty());
    for pair in tokens.windows(2) {
        assert!(pair[0].start < pair[1].start);
    }
}

#[test]
fn test_classification_is_deterministic() {
    let first = tokens_of(MIXED_DECLARATIONS);
    let second = tokens_of(MIXED_DECLARATIONS);
    assert_eq!(first, second);

    let service = highlighting_from_source(MIXED_DECLARATIONS);
    let span = TextSpan::new(50, 300);
    assert_eq!(
        service.classify_semantic(FILE, span),
        service.classify_semantic(FILE, span)
    );
}

#[test]
fn test_inherited_members_resolve() {
    let source = CLASS_HIERARCHY;
    let tokens = tokens_of(source);

    let legs = token_at(&tokens, last_offset(source, "legs")).unwrap();
    assert_eq!(legs.kind, TokenType::Property);
    let speak = token_at(&tokens, last_offset(source, "speak")).unwrap();
    assert_eq!(speak.kind, TokenType::Member);
    let name = token_at(&tokens, last_offset(source, "name")).unwrap();
    assert_eq!(name.kind, TokenType::Property);
    let owner = token_at(&tokens, last_offset(source, "owner")).unwrap();
    assert_eq!(owner.kind, TokenType::Property);
}

// =============================================================================
// COMMENTS
// =============================================================================

#[rstest]
#[case("let b = 1;\nlet a = b;", vec!["b", "a", "b"])]
#[case("let b = 1;\nlet a = /* c */ b;", vec!["b", "a", "b"])]
#[case("let b = 1;\nlet a = b /* x * y / z */ + b;", vec!["b", "a", "b", "b"])]
#[case("/** doc **/\nfunction f() {}\nf();", vec!["f", "f"])]
#[case("class C {\n  /**\n   * Docs.\n   */\n  m() {}\n}\nnew C().m();", vec!["C", "m", "C", "m"])]
fn test_comments_do_not_hide_identifiers(#[case] source: &str, #[case] expected: Vec<&str>) {
    let tokens = tokens_of(source);
    assert_eq!(token_texts(source, &tokens), expected);
}

#[test]
fn test_reference_after_inline_comment_is_not_a_declaration() {
    let source = "let b = 1;\nlet a = /* c */ b;";
    let tokens = tokens_of(source);
    let reference = token_at(&tokens, last_offset(source, "b")).unwrap();
    assert_eq!(reference.kind, TokenType::Variable);
    assert_eq!(reference.length, 1);
    assert!(reference.modifiers.is_empty());
}

// =============================================================================
// DEGRADED INPUT
// =============================================================================

#[test]
fn test_unknown_file_is_empty() {
    let service = highlighting_from_source("let x = 1;");
    let result = service.classify_semantic("other.ts", TextSpan::new(0, 10));
    assert!(result.spans.is_empty());
}

#[test]
fn test_missing_program_is_empty() {
    let service = RecordingService::new();
    assert!(semantic_tokens(&service, FILE, TextSpan::new(0, 100)).is_empty());
    assert_eq!(service.calls(), vec!["program"]);
}

#[rstest]
#[case("class { static }")]
#[case("let = ;")]
#[case("function (a, ) { return }")]
#[case("x.y.z(")]
#[case("}}}{{{")]
fn test_broken_source_never_panics(#[case] source: &str) {
    let tokens = tokens_of(source);
    for token in decode_all(&tokens) {
        assert!(token.start + token.length <= source.len() as u32);
    }
}
