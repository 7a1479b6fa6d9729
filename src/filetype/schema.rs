//! File Type Descriptors
//!
//! The descriptor record the registry hands out for every document kind:
//! identity, syntax-highlighting mode, capability profile, supported
//! command set, and (for literate kinds) the chunk delimiter patterns.

use std::collections::HashSet;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::commands::{CommandRegistry, EditorCommand};
use crate::prefs::PrefsHandle;

use super::caps::Capabilities;

/// Closed set of file-type kinds known to the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileTypeId {
    PlainText,
    R,
    Sweave,
    Markdown,
    RMarkdown,
    Tex,
}

impl FileTypeId {
    pub const ALL: [FileTypeId; 6] = [
        FileTypeId::PlainText,
        FileTypeId::R,
        FileTypeId::Sweave,
        FileTypeId::Markdown,
        FileTypeId::RMarkdown,
        FileTypeId::Tex,
    ];
}

/// Syntax-highlighting mode used by the editor surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorLanguage {
    PlainText,
    R,
    Sweave,
    Markdown,
    RMarkdown,
    Tex,
}

impl EditorLanguage {
    /// Stable mode identifier handed to the highlighter.
    pub fn highlight_mode(self) -> &'static str {
        match self {
            EditorLanguage::PlainText => "text",
            EditorLanguage::R => "r",
            EditorLanguage::Sweave => "sweave",
            EditorLanguage::Markdown => "markdown",
            EditorLanguage::RMarkdown => "rmarkdown",
            EditorLanguage::Tex => "tex",
        }
    }
}

/// Opaque handle to an icon resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Icon(&'static str);

impl Icon {
    pub const fn new(resource: &'static str) -> Self {
        Icon(resource)
    }

    pub fn resource(self) -> &'static str {
        self.0
    }
}

/// Compiled start/end patterns delimiting an embedded code chunk.
///
/// The patterns are process-wide constants, compiled once. Locating and
/// parsing chunks is the chunk-aware editor mode's job; this type only
/// exposes the delimiters.
#[derive(Debug, Clone, Copy)]
pub struct ChunkDelimiters {
    start: &'static Regex,
    end: &'static Regex,
}

impl ChunkDelimiters {
    /// Noweb-style delimiters: a line opening with `<<` after optional
    /// indentation starts a chunk header, a bare `>>=` anywhere in a line
    /// closes it.
    pub fn noweb() -> Self {
        static START: OnceLock<Regex> = OnceLock::new();
        static END: OnceLock<Regex> = OnceLock::new();
        ChunkDelimiters {
            start: START.get_or_init(|| Regex::new(r"^\s*<<").expect("noweb start pattern")),
            end: END.get_or_init(|| Regex::new(r">>=").expect("noweb end pattern")),
        }
    }

    /// Backtick-fenced delimiters used by the R Markdown family.
    pub fn backtick_fence() -> Self {
        static START: OnceLock<Regex> = OnceLock::new();
        static END: OnceLock<Regex> = OnceLock::new();
        ChunkDelimiters {
            start: START
                .get_or_init(|| Regex::new(r"^\s*`{3,}\s*\{").expect("fence start pattern")),
            end: END.get_or_init(|| Regex::new(r"^\s*`{3,}\s*$").expect("fence end pattern")),
        }
    }

    pub fn start(&self) -> &'static Regex {
        self.start
    }

    pub fn end(&self) -> &'static Regex {
        self.end
    }
}

/// A file-type descriptor.
///
/// Constructed once per kind at registry initialization and never mutated
/// afterwards; the only query whose answer can change over the descriptor's
/// lifetime is [`FileType::word_wrap`], which delegates to the live
/// preferences store.
#[derive(Debug, Clone)]
pub struct FileType {
    kind: FileTypeId,
    id: &'static str,
    label: &'static str,
    language: EditorLanguage,
    default_extension: &'static str,
    icon: Icon,
    caps: Capabilities,
    chunks: Option<ChunkDelimiters>,
}

impl FileType {
    /// Plain text: word wrap and spell check, nothing executable.
    pub fn plain_text(
        id: &'static str,
        label: &'static str,
        language: EditorLanguage,
        default_extension: &'static str,
        icon: Icon,
    ) -> Self {
        Self::with_profile(
            FileTypeId::PlainText,
            id,
            label,
            language,
            default_extension,
            icon,
            Capabilities::PLAIN_TEXT,
            None,
        )
    }

    pub fn r_script(
        id: &'static str,
        label: &'static str,
        language: EditorLanguage,
        default_extension: &'static str,
        icon: Icon,
    ) -> Self {
        Self::with_profile(
            FileTypeId::R,
            id,
            label,
            language,
            default_extension,
            icon,
            Capabilities::R_SCRIPT,
            None,
        )
    }

    /// Sweave/noweb literate documents: the fixed literate profile plus the
    /// noweb chunk delimiters. Inputs are not validated; malformed ids or
    /// extensions are the registry's responsibility.
    pub fn sweave(
        id: &'static str,
        label: &'static str,
        language: EditorLanguage,
        default_extension: &'static str,
        icon: Icon,
    ) -> Self {
        Self::with_profile(
            FileTypeId::Sweave,
            id,
            label,
            language,
            default_extension,
            icon,
            Capabilities::SWEAVE,
            Some(ChunkDelimiters::noweb()),
        )
    }

    pub fn markdown(
        id: &'static str,
        label: &'static str,
        language: EditorLanguage,
        default_extension: &'static str,
        icon: Icon,
    ) -> Self {
        Self::with_profile(
            FileTypeId::Markdown,
            id,
            label,
            language,
            default_extension,
            icon,
            Capabilities::MARKDOWN,
            None,
        )
    }

    pub fn r_markdown(
        id: &'static str,
        label: &'static str,
        language: EditorLanguage,
        default_extension: &'static str,
        icon: Icon,
    ) -> Self {
        Self::with_profile(
            FileTypeId::RMarkdown,
            id,
            label,
            language,
            default_extension,
            icon,
            Capabilities::R_MARKDOWN,
            Some(ChunkDelimiters::backtick_fence()),
        )
    }

    pub fn tex(
        id: &'static str,
        label: &'static str,
        language: EditorLanguage,
        default_extension: &'static str,
        icon: Icon,
    ) -> Self {
        Self::with_profile(
            FileTypeId::Tex,
            id,
            label,
            language,
            default_extension,
            icon,
            Capabilities::TEX,
            None,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn with_profile(
        kind: FileTypeId,
        id: &'static str,
        label: &'static str,
        language: EditorLanguage,
        default_extension: &'static str,
        icon: Icon,
        caps: Capabilities,
        chunks: Option<ChunkDelimiters>,
    ) -> Self {
        FileType {
            kind,
            id,
            label,
            language,
            default_extension,
            icon,
            caps,
            chunks,
        }
    }

    pub fn kind(&self) -> FileTypeId {
        self.kind
    }

    pub fn id(&self) -> &'static str {
        self.id
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn language(&self) -> EditorLanguage {
        self.language
    }

    pub fn default_extension(&self) -> &'static str {
        self.default_extension
    }

    pub fn icon(&self) -> Icon {
        self.icon
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    /// Whether the editor should soft-wrap this document right now.
    ///
    /// The R-markdown family reads the live `soft_wrap_rmd_files`
    /// preference on every call; every other kind answers from its fixed
    /// capability profile. No caching.
    pub fn word_wrap(&self, prefs: &PrefsHandle) -> bool {
        match self.kind {
            FileTypeId::Sweave | FileTypeId::RMarkdown => prefs.soft_wrap_rmd_files(),
            _ => self.caps.word_wrap,
        }
    }

    /// Pattern matching the first line of an embedded code chunk, if this
    /// kind has chunks at all.
    pub fn chunk_start_pattern(&self) -> Option<&'static Regex> {
        self.chunks.as_ref().map(|c| c.start())
    }

    /// Pattern matching the line that closes a chunk header.
    pub fn chunk_end_pattern(&self) -> Option<&'static Regex> {
        self.chunks.as_ref().map(|c| c.end())
    }

    /// The subset of globally available commands that apply to this file
    /// type: the base set derived from the capability profile plus the
    /// per-kind additions, restricted to commands the registry actually
    /// carries.
    pub fn supported_commands(&self, registry: &CommandRegistry) -> HashSet<EditorCommand> {
        let mut set: HashSet<EditorCommand> = base_commands(&self.caps)
            .into_iter()
            .chain(kind_commands(self.kind).iter().copied())
            .collect();

        set.retain(|cmd| {
            let known = registry.contains(*cmd);
            if !known {
                log::debug!("command '{}' not provided by the registry", cmd.name());
            }
            known
        });
        set
    }
}

/// Commands every text document supports, plus the ones its capability
/// profile switches on.
fn base_commands(caps: &Capabilities) -> Vec<EditorCommand> {
    let mut cmds = vec![EditorCommand::SaveDocument, EditorCommand::FindReplace];

    if caps.can_check_spelling {
        cmds.push(EditorCommand::CheckSpelling);
    }
    if caps.can_source_on_save {
        cmds.push(EditorCommand::SourceOnSave);
    }
    if caps.can_execute_code {
        cmds.push(EditorCommand::ExecuteCode);
    }
    if caps.can_execute_all_code {
        cmds.push(EditorCommand::ExecuteAllCode);
    }
    if caps.can_execute_to_current_line {
        cmds.push(EditorCommand::ExecuteToCurrentLine);
    }
    if caps.can_execute_chunks {
        cmds.push(EditorCommand::ExecuteCurrentChunk);
    }
    if caps.can_knit_to_html {
        cmds.push(EditorCommand::KnitToHtml);
    }
    if caps.can_preview_html {
        cmds.push(EditorCommand::PreviewHtml);
    }
    if caps.can_compile_pdf {
        cmds.push(EditorCommand::CompilePdf);
    }
    if caps.can_compile_notebook {
        cmds.push(EditorCommand::CompileNotebook);
    }
    if caps.can_auto_indent {
        cmds.push(EditorCommand::ReformatCode);
    }
    if caps.can_show_scope_tree {
        cmds.push(EditorCommand::ToggleDocumentOutline);
    }

    cmds
}

/// Per-kind command additions on top of the capability-derived base set.
fn kind_commands(kind: FileTypeId) -> &'static [EditorCommand] {
    match kind {
        FileTypeId::Sweave | FileTypeId::RMarkdown => &[
            EditorCommand::JumpTo,
            EditorCommand::JumpToMatching,
            EditorCommand::GoToHelp,
            EditorCommand::GoToDefinition,
            EditorCommand::InsertDocSkeleton,
        ],
        FileTypeId::R => &[
            EditorCommand::JumpTo,
            EditorCommand::JumpToMatching,
            EditorCommand::GoToHelp,
            EditorCommand::GoToDefinition,
        ],
        FileTypeId::PlainText | FileTypeId::Markdown | FileTypeId::Tex => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prefs::PreferencesStore;

    fn sweave_type() -> FileType {
        FileType::sweave(
            "sweave",
            "Sweave Document",
            EditorLanguage::Sweave,
            ".Rnw",
            Icon::new("icons/sweave.png"),
        )
    }

    #[test]
    fn construction_yields_fixed_profile() {
        // The capability profile does not depend on id/label/extension.
        let a = sweave_type();
        let b = FileType::sweave(
            "other",
            "Other Label",
            EditorLanguage::Sweave,
            ".snw",
            Icon::new("icons/other.png"),
        );
        assert_eq!(a.capabilities(), b.capabilities());
        assert_eq!(*a.capabilities(), Capabilities::SWEAVE);
    }

    #[test]
    fn chunk_start_matches_line_prefix_only() {
        let ft = sweave_type();
        let start = ft.chunk_start_pattern().expect("sweave has chunks");

        let m = start.find("<<foo>>=").expect("matches at line start");
        assert_eq!(m.start(), 0);
        assert!(start.is_match("   <<bar"));
        assert!(!start.is_match("x << y"));
    }

    #[test]
    fn chunk_end_matches_anywhere_in_line() {
        let ft = sweave_type();
        let end = ft.chunk_end_pattern().expect("sweave has chunks");

        assert!(end.is_match("@ >>="));
        assert!(end.is_match(">>= "));
        assert!(!end.is_match("=>>"));
    }

    #[test]
    fn patterns_are_process_wide_constants() {
        let a = sweave_type();
        let b = sweave_type();
        assert!(std::ptr::eq(
            a.chunk_start_pattern().unwrap(),
            b.chunk_start_pattern().unwrap()
        ));
        assert!(std::ptr::eq(
            a.chunk_end_pattern().unwrap(),
            b.chunk_end_pattern().unwrap()
        ));
    }

    #[test]
    fn word_wrap_reads_live_preference() {
        let store = PreferencesStore::with_defaults();
        let prefs = store.handle();
        let ft = sweave_type();

        store.update(|p| p.soft_wrap_rmd_files = false);
        assert!(!ft.word_wrap(&prefs));

        store.update(|p| p.soft_wrap_rmd_files = true);
        assert!(ft.word_wrap(&prefs));

        store.update(|p| p.soft_wrap_rmd_files = false);
        assert!(!ft.word_wrap(&prefs));
    }

    #[test]
    fn word_wrap_of_plain_text_ignores_preference() {
        let store = PreferencesStore::with_defaults();
        let prefs = store.handle();
        let ft = FileType::plain_text(
            "text",
            "Text File",
            EditorLanguage::PlainText,
            ".txt",
            Icon::new("icons/text.png"),
        );

        store.update(|p| p.soft_wrap_rmd_files = false);
        assert!(ft.word_wrap(&prefs));
        store.update(|p| p.soft_wrap_rmd_files = true);
        assert!(ft.word_wrap(&prefs));
    }

    #[test]
    fn supported_commands_adds_the_five_sweave_commands() {
        let registry = CommandRegistry::with_builtin_commands();
        let ft = sweave_type();
        let set = ft.supported_commands(&registry);

        for cmd in [
            EditorCommand::JumpTo,
            EditorCommand::JumpToMatching,
            EditorCommand::GoToHelp,
            EditorCommand::GoToDefinition,
            EditorCommand::InsertDocSkeleton,
        ] {
            assert!(set.contains(&cmd), "missing {:?}", cmd);
        }

        // Superset of the capability-derived base set.
        for cmd in base_commands(ft.capabilities()) {
            assert!(set.contains(&cmd), "missing base command {:?}", cmd);
        }
    }

    #[test]
    fn supported_commands_is_idempotent() {
        let registry = CommandRegistry::with_builtin_commands();
        let ft = sweave_type();
        assert_eq!(
            ft.supported_commands(&registry),
            ft.supported_commands(&registry)
        );
    }

    #[test]
    fn supported_commands_skips_commands_missing_from_registry() {
        let registry = CommandRegistry::new();
        let ft = sweave_type();
        assert!(ft.supported_commands(&registry).is_empty());
    }
}
