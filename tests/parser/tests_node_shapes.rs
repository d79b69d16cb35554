//! Tree shapes the binder and the classifiers walk.

use rstest::rstest;
use tssh::parser::{NodeExt, SyntaxKind, SyntaxNode, parse};

fn root(source: &str) -> SyntaxNode {
    let parse = parse(source);
    assert!(parse.ok(), "{source}: {:?}", parse.errors);
    parse.syntax()
}

fn identifier_texts(node: &SyntaxNode) -> Vec<String> {
    node.descendants()
        .filter(|n| n.kind() == SyntaxKind::IDENTIFIER)
        .map(|n| source_of(&n))
        .collect()
}

fn source_of(node: &SyntaxNode) -> String {
    let range = node.trimmed_range();
    let text = node.text().to_string();
    let offset = usize::from(range.start() - node.text_range().start());
    text[offset..offset + usize::from(range.len())].to_string()
}

#[rstest]
#[case("let a = b;", &["a", "b"])]
#[case("class Foo { static async bar() {} }", &["Foo", "bar"])]
#[case("function f(x: T): U { return x.y; }", &["f", "x", "T", "U", "x", "y"])]
#[case("import d, { a as b } from 'm';", &["d", "a", "b"])]
#[case("let type = get;", &["type", "get"])]
#[case("namespace A.B {}", &["A", "B"])]
fn test_every_name_is_an_identifier_node(#[case] source: &str, #[case] expected: &[&str]) {
    assert_eq!(identifier_texts(&root(source)), expected);
}

#[test]
fn test_identifier_wraps_single_ident_token() {
    let root = root("let  value = other;");
    for ident in root.descendants().filter(|n| n.kind() == SyntaxKind::IDENTIFIER) {
        let significant: Vec<_> = ident
            .children_with_tokens()
            .filter_map(|e| e.into_token())
            .filter(|t| !t.kind().is_trivia())
            .collect();
        assert_eq!(significant.len(), 1);
        assert_eq!(significant[0].kind(), SyntaxKind::IDENT);
    }
}

#[rstest]
#[case("function f(a, b) {}", SyntaxKind::FUNCTION_DECLARATION, SyntaxKind::PARAMETER, 2)]
#[case("class C { m(a) {} }", SyntaxKind::METHOD_DECLARATION, SyntaxKind::PARAMETER, 1)]
#[case("class C { x = 1; m() {} get g() { return 1; } }", SyntaxKind::CLASS_DECLARATION, SyntaxKind::PROPERTY_DECLARATION, 1)]
#[case("interface I { a: number; b(): void; c: string }", SyntaxKind::INTERFACE_DECLARATION, SyntaxKind::PROPERTY_SIGNATURE, 2)]
#[case("enum E { A, B }", SyntaxKind::ENUM_DECLARATION, SyntaxKind::ENUM_MEMBER, 2)]
#[case("function f<T, U>() {}", SyntaxKind::FUNCTION_DECLARATION, SyntaxKind::TYPE_PARAMETER, 2)]
fn test_members_are_direct_children(
    #[case] source: &str,
    #[case] parent: SyntaxKind,
    #[case] child: SyntaxKind,
    #[case] count: usize,
) {
    let root = root(source);
    let node = root.descendants().find(|n| n.kind() == parent).unwrap();
    assert_eq!(node.children().filter(|n| n.kind() == child).count(), count);
}

#[test]
fn test_variable_statement_wraps_declaration_list() {
    let root = root("export const a = 1, b = 2;");
    let statement = root.first_child().unwrap();
    assert_eq!(statement.kind(), SyntaxKind::VARIABLE_STATEMENT);
    let list = statement.first_child().unwrap();
    assert_eq!(list.kind(), SyntaxKind::VARIABLE_DECLARATION_LIST);
    assert_eq!(
        list.children()
            .filter(|n| n.kind() == SyntaxKind::VARIABLE_DECLARATION)
            .count(),
        2
    );
}

#[test]
fn test_trimmed_range_excludes_leading_comment() {
    let source = "let a;\n// about b\nlet b;";
    let root = root(source);
    let second = root.children().nth(1).unwrap();
    assert_eq!(u32::from(second.full_range().start()), 6);
    assert_eq!(u32::from(second.trimmed_start()), 18);
    assert_eq!(source_of(&second), "let b;");
}
