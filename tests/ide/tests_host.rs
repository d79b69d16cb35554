//! Host service tests: the undecorated classification and navigation.

use rstest::rstest;
use tssh::TextSpan;
use tssh::hir::{CANNOT_FIND_NAME, DUPLICATE_IDENTIFIER};
use tssh::ide::{ClassificationType, HostService, LanguageService};

use crate::helpers::service_helpers::*;

#[rstest]
#[case("// note", ClassificationType::Comment)]
#[case("/* block */", ClassificationType::Comment)]
#[case("name", ClassificationType::Identifier)]
#[case("class", ClassificationType::Keyword)]
#[case("42", ClassificationType::NumericLiteral)]
#[case("===", ClassificationType::Operator)]
#[case("\"text\"", ClassificationType::StringLiteral)]
#[case("{", ClassificationType::Punctuation)]
fn test_host_syntactic_classification(#[case] source: &str, #[case] class: ClassificationType) {
    let host = host_from_source(source);
    let result = host.classify_syntactic(FILE, TextSpan::of_text(source));
    assert_eq!(result.spans, vec![0, source.len() as u32, class as u32]);
}

#[test]
fn test_host_semantic_classification() {
    let source = "namespace N { export const v = 1; }\ntype A = number;\nN.v;";
    let host = host_from_source(source);
    let result = host.classify_semantic(FILE, TextSpan::of_text(source));
    let classes: Vec<u32> = result.spans.chunks_exact(3).map(|t| t[2]).collect();
    assert_eq!(
        classes,
        vec![
            ClassificationType::ModuleName as u32,
            ClassificationType::TypeAliasName as u32,
            ClassificationType::ModuleName as u32,
        ]
    );
}

#[test]
fn test_diagnostics() {
    let source = "let a = 1;\nlet a = unknown;";
    let host = host_from_source(source);

    assert!(host.syntactic_diagnostics(FILE).unwrap().is_empty());

    let mut codes: Vec<u32> = host
        .semantic_diagnostics(FILE)
        .unwrap()
        .iter()
        .map(|d| d.code)
        .collect();
    codes.sort();
    assert_eq!(codes, vec![DUPLICATE_IDENTIFIER, CANNOT_FIND_NAME]);
}

#[test]
fn test_syntax_errors_are_reported() {
    let host = host_from_source("let = ;");
    assert!(!host.syntactic_diagnostics(FILE).unwrap().is_empty());
}

#[test]
fn test_definition_across_merged_declarations() {
    let source = "interface Box { a: number; }\ninterface Box { b: number; }\nlet x: Box;";
    let host = host_from_source(source);
    let defs = host.definition_at_position(FILE, last_offset(source, "Box"));
    let starts: Vec<u32> = defs.iter().map(|l| l.span.start).collect();
    assert_eq!(starts, vec![10, 39]);
}

#[test]
fn test_references_of_member() {
    let source = "class C { m() {} run() { this.m(); } }\nnew C().m();";
    let host = host_from_source(source);
    let refs = host.references_at_position(FILE, first_offset(source, "m()"));
    assert_eq!(refs.len(), 3);
    assert!(refs.iter().all(|l| l.file_name == FILE && l.span.length == 1));
}

#[test]
fn test_edits_are_visible_to_classification() {
    let host = HostService::new();
    host.set_file_content(FILE, "let a = 1;");
    let before = host.program().unwrap();
    host.set_file_content(FILE, "class Renamed {}");
    let after = host.program().unwrap();

    assert!(before.source_file(FILE).is_some());
    let text = after.source_file(FILE).unwrap().text.clone();
    assert_eq!(&*text, "class Renamed {}");
    assert_eq!(host.file_names(), vec![FILE.to_string()]);
}
