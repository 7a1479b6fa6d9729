//! Command Schema Types
//!
//! The closed set of editor commands and the metadata records loaded from
//! the embedded command TOML.

use serde::Deserialize;

/// Named handle for an editor command.
///
/// The set is closed: file types select subsets of these, the command
/// registry attaches metadata to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    SaveDocument,
    FindReplace,
    CheckSpelling,
    SourceOnSave,
    ExecuteCode,
    ExecuteAllCode,
    ExecuteToCurrentLine,
    ExecuteCurrentChunk,
    KnitToHtml,
    PreviewHtml,
    CompilePdf,
    CompileNotebook,
    ReformatCode,
    ToggleDocumentOutline,
    JumpTo,
    JumpToMatching,
    GoToHelp,
    GoToDefinition,
    InsertDocSkeleton,
}

impl EditorCommand {
    pub const ALL: [EditorCommand; 19] = [
        EditorCommand::SaveDocument,
        EditorCommand::FindReplace,
        EditorCommand::CheckSpelling,
        EditorCommand::SourceOnSave,
        EditorCommand::ExecuteCode,
        EditorCommand::ExecuteAllCode,
        EditorCommand::ExecuteToCurrentLine,
        EditorCommand::ExecuteCurrentChunk,
        EditorCommand::KnitToHtml,
        EditorCommand::PreviewHtml,
        EditorCommand::CompilePdf,
        EditorCommand::CompileNotebook,
        EditorCommand::ReformatCode,
        EditorCommand::ToggleDocumentOutline,
        EditorCommand::JumpTo,
        EditorCommand::JumpToMatching,
        EditorCommand::GoToHelp,
        EditorCommand::GoToDefinition,
        EditorCommand::InsertDocSkeleton,
    ];

    /// Stable name used as the key in command metadata files.
    pub fn name(self) -> &'static str {
        match self {
            EditorCommand::SaveDocument => "save_document",
            EditorCommand::FindReplace => "find_replace",
            EditorCommand::CheckSpelling => "check_spelling",
            EditorCommand::SourceOnSave => "source_on_save",
            EditorCommand::ExecuteCode => "execute_code",
            EditorCommand::ExecuteAllCode => "execute_all_code",
            EditorCommand::ExecuteToCurrentLine => "execute_to_current_line",
            EditorCommand::ExecuteCurrentChunk => "execute_current_chunk",
            EditorCommand::KnitToHtml => "knit_to_html",
            EditorCommand::PreviewHtml => "preview_html",
            EditorCommand::CompilePdf => "compile_pdf",
            EditorCommand::CompileNotebook => "compile_notebook",
            EditorCommand::ReformatCode => "reformat_code",
            EditorCommand::ToggleDocumentOutline => "toggle_document_outline",
            EditorCommand::JumpTo => "jump_to",
            EditorCommand::JumpToMatching => "jump_to_matching",
            EditorCommand::GoToHelp => "go_to_help",
            EditorCommand::GoToDefinition => "go_to_definition",
            EditorCommand::InsertDocSkeleton => "insert_doc_skeleton",
        }
    }

    pub fn from_name(name: &str) -> Option<EditorCommand> {
        Self::ALL.into_iter().find(|cmd| cmd.name() == name)
    }
}

/// Root command metadata file structure (matches TOML).
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CommandsFile {
    pub registry: RegistryMeta,
    pub commands: Vec<CommandDef>,
}

/// Metadata about a command set.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RegistryMeta {
    pub name: String,
    pub version: Option<String>,
}

/// Metadata for a single editor command.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CommandDef {
    pub name: String,
    pub label: String,
    pub description: Option<String>,
    pub shortcut: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for cmd in EditorCommand::ALL {
            assert_eq!(EditorCommand::from_name(cmd.name()), Some(cmd));
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = EditorCommand::ALL.iter().map(|c| c.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), EditorCommand::ALL.len());
    }

    #[test]
    fn unknown_name_resolves_to_none() {
        assert_eq!(EditorCommand::from_name("warp_core_eject"), None);
    }
}
