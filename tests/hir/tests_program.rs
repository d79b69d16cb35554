//! Program construction tests.

use std::sync::Arc;

use tssh::FileId;
use tssh::hir::Program;

fn program(files: &[(&str, &str)]) -> Program {
    Program::new(
        files
            .iter()
            .map(|(name, text)| (Arc::from(*name), Arc::from(*text))),
    )
}

#[test]
fn test_many_files_bind_independently() {
    let files: Vec<(String, String)> = (0..32)
        .map(|i| (format!("file{i:02}.ts"), format!("class C{i} {{}}\nnew C{i}();")))
        .collect();
    let program = Program::new(
        files
            .iter()
            .map(|(n, t)| (Arc::from(n.as_str()), Arc::from(t.as_str()))),
    );

    assert_eq!(program.source_files().count(), 32);
    for (index, file) in program.source_files().enumerate() {
        assert_eq!(file.id, FileId::new(index));
        assert!(file.parse_errors().is_empty());
        assert_eq!(file.bound().symbols().count(), 1);
        assert!(file.bound().diagnostics().is_empty());
    }
}

#[test]
fn test_symbols_belong_to_their_file() {
    let program = program(&[("a.ts", "let shared = 1;"), ("b.ts", "let shared = 2;")]);
    let a = program.source_file("a.ts").unwrap();
    let b = program.source_file("b.ts").unwrap();

    let (a_id, _) = a.bound().symbols().next().unwrap();
    let (b_id, _) = b.bound().symbols().next().unwrap();
    assert_ne!(a_id, b_id);
    assert_eq!(a_id.file, a.id);
    assert_eq!(b_id.file, b.id);

    let checker = program.type_checker();
    assert!(checker.symbol(a_id).is_some());
    assert!(a.bound().symbol(b_id).is_none());
}

#[test]
fn test_duplicate_names_keep_one_file() {
    let program = program(&[("a.ts", "let first;"), ("a.ts", "let second;")]);
    assert_eq!(program.file_names().collect::<Vec<_>>(), vec!["a.ts"]);
}

#[test]
fn test_empty_program() {
    let program = Program::default();
    assert_eq!(program.source_files().count(), 0);
    assert!(program.source_file("a.ts").is_none());
    assert!(program.type_checker().diagnostics(FileId::new(0)).is_empty());
}
