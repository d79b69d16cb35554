//! Every parse reproduces its input byte for byte.

use rstest::rstest;
use tssh::parser::{SyntaxKind, parse, tokenize};

#[rstest]
#[case("")]
#[case("let x = 1;")]
#[case("const a = 1, b = 'two';")]
#[case("function f<T>(a: T, b?: number): T { return a; }")]
#[case("class Foo extends Bar implements I { static async bar() {} }")]
#[case("class P { private readonly x: number = 1; get v() { return this.x; } set v(n) {} }")]
#[case("interface I extends J { p: string; m(): void; }")]
#[case("type U = { a: number } | string[] | (A & B);")]
#[case("enum E { A, B = 2, C }")]
#[case("namespace A.B.C { export function f() {} }")]
#[case("import d, { a as b, c } from 'm';\nimport * as ns from \"n\";")]
#[case("const add = (a: number, b: number) => a + b;\nconst id = async x => x;")]
#[case("if (a === b) { a++; } else if (!c) { --b; } else ;")]
#[case("const o = { k: 1, s, m() { return 0; } };\nconst xs = [1, 2, 3];")]
#[case("new C(1).m()[0].p = a ?? b || c && d;")]
#[case("/* head */\n// line\nlet x = 1; // tail\n")]
fn test_valid_source_roundtrips(#[case] source: &str) {
    let parse = parse(source);
    assert!(parse.ok(), "{source}: {:?}", parse.errors);
    assert_eq!(parse.syntax().text().to_string(), source);
    assert_eq!(parse.syntax().kind(), SyntaxKind::SOURCE_FILE);
}

#[rstest]
#[case("class { broken")]
#[case("let = ;")]
#[case("function (")]
#[case(")))")]
#[case("interface I { p: }")]
#[case("let s = 'unterminated")]
#[case("@#$ let x = 1;")]
fn test_broken_source_roundtrips(#[case] source: &str) {
    let parse = parse(source);
    assert!(!parse.ok(), "{source}");
    assert_eq!(parse.syntax().text().to_string(), source);
}

#[test]
fn test_tokens_cover_input() {
    let source = "class Foo { static async bar() {} } // end";
    let tokens = tokenize(source);
    let joined: String = tokens.iter().map(|t| t.text).collect();
    assert_eq!(joined, source);

    let mut expected_offset = 0u32;
    for token in &tokens {
        assert_eq!(u32::from(token.offset), expected_offset);
        expected_offset += token.text.len() as u32;
    }
}

#[test]
fn test_errors_lie_within_input() {
    let source = "let = ; class { x: }";
    let parse = parse(source);
    for error in &parse.errors {
        assert!(u32::from(error.range.end()) <= source.len() as u32);
        assert!(!error.message.is_empty());
    }
}
