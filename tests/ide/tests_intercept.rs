//! Interception shim and plugin activation tests.

use rstest::rstest;
use tssh::TextSpan;
use tssh::ide::{
    Classifications, EndOfLineState, LanguageService, PluginCreateInfo, PluginModule,
    SemanticHighlighting, ServiceError, init,
};

use crate::helpers::service_helpers::*;
use crate::helpers::source_fixtures::*;

// =============================================================================
// OVERRIDDEN OPERATIONS
// =============================================================================

#[rstest]
#[case("let x = 1;")]
#[case("")]
#[case("class { broken")]
#[case(MIXED_DECLARATIONS)]
fn test_syntactic_classification_is_always_empty(#[case] source: &str) {
    let service = highlighting_from_source(source);
    for span in [TextSpan::of_text(source), TextSpan::new(0, 0), TextSpan::new(3, 1000)] {
        let result = service.classify_syntactic(FILE, span);
        assert!(result.spans.is_empty());
        assert_eq!(result.end_of_line_state, EndOfLineState::None);
    }
    assert!(service.classify_syntactic("unknown.ts", TextSpan::new(0, 5)).spans.is_empty());
}

#[test]
fn test_overrides_never_reach_inner_classifiers() {
    let service = SemanticHighlighting::new(RecordingService::with_program("let a = 1;"));

    let semantic = service.classify_semantic(FILE, TextSpan::new(0, 10));
    let syntactic = service.classify_syntactic(FILE, TextSpan::new(0, 10));

    assert_eq!(semantic.spans, vec![4, 1, 2049]);
    assert_eq!(semantic.end_of_line_state, EndOfLineState::None);
    assert_eq!(syntactic, Classifications::empty());
    assert_eq!(service.inner().calls(), vec!["program"]);
}

// =============================================================================
// PASSTHROUGH
// =============================================================================

#[test]
fn test_other_operations_are_forwarded_unchanged() {
    let service = SemanticHighlighting::new(RecordingService::new());

    assert_eq!(service.file_names(), vec!["recorded.ts".to_string()]);
    assert!(service.program().is_none());

    let syntactic = service.syntactic_diagnostics("a.ts").unwrap();
    assert_eq!(syntactic.len(), 1);
    assert_eq!(syntactic[0].message, "recorded");

    assert_eq!(
        service.semantic_diagnostics("b.ts"),
        Err(ServiceError::UnknownFile("b.ts".to_string()))
    );

    let definition = service.definition_at_position("c.ts", 7);
    assert_eq!(definition[0].file_name, "c.ts");
    assert_eq!(definition[0].span, TextSpan::new(7, 1));

    let references = service.references_at_position("d.ts", 9);
    assert_eq!(references[0].span, TextSpan::new(9, 2));

    assert_eq!(
        service.inner().calls(),
        vec![
            "file_names",
            "program",
            "syntactic_diagnostics a.ts",
            "semantic_diagnostics b.ts",
            "definition_at_position c.ts 7",
            "references_at_position d.ts 9",
        ]
    );
}

#[test]
fn test_forwarding_matches_undecorated_host() {
    let source = "let a = b;\nfunction f() { return a; }\nf();";
    let plain = host_from_source(source);
    let decorated = highlighting_from_source(source);

    assert_eq!(plain.file_names(), decorated.file_names());
    assert_eq!(
        plain.semantic_diagnostics(FILE),
        decorated.semantic_diagnostics(FILE)
    );
    assert_eq!(
        plain.syntactic_diagnostics(FILE),
        decorated.syntactic_diagnostics(FILE)
    );
    let offset = last_offset(source, "f");
    assert_eq!(
        plain.definition_at_position(FILE, offset),
        decorated.definition_at_position(FILE, offset)
    );
    assert_eq!(
        plain.references_at_position(FILE, offset),
        decorated.references_at_position(FILE, offset)
    );
}

// =============================================================================
// PLUGIN ACTIVATION
// =============================================================================

#[test]
fn test_plugin_create_wraps_service() {
    let plugin = init();
    let service = plugin.create(PluginCreateInfo::new(Box::new(host_from_source(
        STATIC_ASYNC_METHOD,
    ))));

    let span = TextSpan::of_text(STATIC_ASYNC_METHOD);
    assert_eq!(
        service.classify_semantic(FILE, span).spans,
        vec![6, 3, 257, 25, 3, 3079]
    );
    assert!(service.classify_syntactic(FILE, span).spans.is_empty());
}

#[test]
fn test_plugins_chain() {
    let plugin = init();
    let inner = plugin.create(PluginCreateInfo::new(Box::new(RecordingService::new())));
    let outer = plugin.create(PluginCreateInfo {
        language_service: inner,
        config: serde_json::json!({ "theme": "dark" }),
    });

    assert!(outer.classify_semantic(FILE, TextSpan::new(0, 1)).spans.is_empty());
    assert_eq!(outer.file_names(), vec!["recorded.ts".to_string()]);
}

#[test]
fn test_configuration_change_is_accepted() {
    let plugin = init();
    plugin.on_configuration_changed(serde_json::json!({ "anything": [1, 2, 3] }));
}
