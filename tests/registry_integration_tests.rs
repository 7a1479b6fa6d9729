//! Tests for registry-level classification: extension matching, fallback
//! behavior, and per-kind command sets.
use std::path::Path;

use filetype_registry::filetype::FileTypeId;
use filetype_registry::{CommandRegistry, EditorCommand, FileTypeRegistry};

#[test]
fn builtin_extensions_resolve_to_their_kinds() {
    let registry = FileTypeRegistry::with_builtin_types();

    let cases = [
        ("report.Rnw", FileTypeId::Sweave),
        ("report.snw", FileTypeId::Sweave),
        ("analysis.Rmd", FileTypeId::RMarkdown),
        ("notes.md", FileTypeId::Markdown),
        ("script.R", FileTypeId::R),
        ("paper.tex", FileTypeId::Tex),
        ("readme.txt", FileTypeId::PlainText),
    ];

    for (path, expected) in cases {
        let ft = registry.type_for_path(Path::new(path)).expect("resolved");
        assert_eq!(ft.kind(), expected, "path {path}");
    }
}

#[test]
fn extension_matching_is_case_insensitive() {
    let registry = FileTypeRegistry::with_builtin_types();

    for path in ["report.RNW", "report.rNw", "analysis.RMD", "script.r"] {
        assert!(registry.type_for_path(Path::new(path)).is_some(), "{path}");
    }
    assert_eq!(
        registry
            .type_for_path(Path::new("report.RNW"))
            .map(|ft| ft.kind()),
        registry
            .type_for_path(Path::new("report.rnw"))
            .map(|ft| ft.kind()),
    );
}

#[test]
fn unknown_extensions_fall_back_to_plain_text() {
    let registry = FileTypeRegistry::with_builtin_types();

    for path in ["data.xyz", "no_extension", "archive.tar.gz"] {
        let ft = registry.type_for_path(Path::new(path)).expect("fallback");
        assert_eq!(ft.kind(), FileTypeId::PlainText, "path {path}");
    }
}

#[test]
fn plain_text_gets_no_navigation_commands() {
    let registry = FileTypeRegistry::with_builtin_types();
    let commands = CommandRegistry::with_builtin_commands();
    let text = registry.get(FileTypeId::PlainText).expect("registered");

    let set = text.supported_commands(&commands);
    assert!(set.contains(&EditorCommand::SaveDocument));
    assert!(set.contains(&EditorCommand::CheckSpelling));
    assert!(!set.contains(&EditorCommand::JumpTo));
    assert!(!set.contains(&EditorCommand::GoToDefinition));
    assert!(!set.contains(&EditorCommand::ExecuteCode));
}

#[test]
fn r_scripts_navigate_but_do_not_insert_doc_skeletons() {
    let registry = FileTypeRegistry::with_builtin_types();
    let commands = CommandRegistry::with_builtin_commands();
    let r = registry.get(FileTypeId::R).expect("registered");

    let set = r.supported_commands(&commands);
    assert!(set.contains(&EditorCommand::GoToHelp));
    assert!(set.contains(&EditorCommand::GoToDefinition));
    assert!(set.contains(&EditorCommand::ExecuteCode));
    assert!(!set.contains(&EditorCommand::InsertDocSkeleton));
    assert!(!set.contains(&EditorCommand::ExecuteCurrentChunk));
}

#[test]
fn rmarkdown_commands_match_its_profile() {
    let registry = FileTypeRegistry::with_builtin_types();
    let commands = CommandRegistry::with_builtin_commands();
    let rmd = registry.get(FileTypeId::RMarkdown).expect("registered");

    let set = rmd.supported_commands(&commands);
    assert!(set.contains(&EditorCommand::KnitToHtml));
    assert!(set.contains(&EditorCommand::ExecuteCurrentChunk));
    assert!(set.contains(&EditorCommand::InsertDocSkeleton));
    assert!(!set.contains(&EditorCommand::CompilePdf));
}

#[test]
fn every_supported_command_has_registry_metadata() {
    let registry = FileTypeRegistry::with_builtin_types();
    let commands = CommandRegistry::with_builtin_commands();

    for ft in registry.types() {
        for cmd in ft.supported_commands(&commands) {
            assert!(
                commands.get(cmd).is_some(),
                "{} reports '{}' without metadata",
                ft.id(),
                cmd.name()
            );
        }
    }
}
