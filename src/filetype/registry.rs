//! File Type Registry
//!
//! Owns one descriptor per known kind for the life of the process and
//! matches file extensions to them.

use std::collections::HashMap;
use std::path::Path;

use super::schema::{EditorLanguage, FileType, FileTypeId, Icon};

/// In-memory registry of file-type descriptors.
#[derive(Debug, Clone)]
pub struct FileTypeRegistry {
    types: HashMap<FileTypeId, FileType>,
    by_extension: HashMap<String, FileTypeId>,
    fallback: Option<FileTypeId>,
}

impl Default for FileTypeRegistry {
    fn default() -> Self {
        Self::with_builtin_types()
    }
}

impl FileTypeRegistry {
    pub fn new() -> Self {
        Self {
            types: HashMap::new(),
            by_extension: HashMap::new(),
            fallback: None,
        }
    }

    /// Registry preloaded with the built-in descriptors and their
    /// extension mappings. Plain text is the fallback for unknown
    /// extensions.
    pub fn with_builtin_types() -> Self {
        let mut registry = Self::new();

        registry.register(
            FileType::plain_text(
                "text",
                "Text File",
                EditorLanguage::PlainText,
                ".txt",
                Icon::new("icons/text.png"),
            ),
            &["txt", "text"],
        );
        registry.register(
            FileType::r_script(
                "r_script",
                "R Script",
                EditorLanguage::R,
                ".R",
                Icon::new("icons/r.png"),
            ),
            &["r"],
        );
        registry.register(
            FileType::sweave(
                "sweave",
                "Sweave Document",
                EditorLanguage::Sweave,
                ".Rnw",
                Icon::new("icons/sweave.png"),
            ),
            &["rnw", "snw", "nw"],
        );
        registry.register(
            FileType::markdown(
                "markdown",
                "Markdown Document",
                EditorLanguage::Markdown,
                ".md",
                Icon::new("icons/markdown.png"),
            ),
            &["md", "markdown", "mdown", "mkd"],
        );
        registry.register(
            FileType::r_markdown(
                "r_markdown",
                "R Markdown Document",
                EditorLanguage::RMarkdown,
                ".Rmd",
                Icon::new("icons/rmarkdown.png"),
            ),
            &["rmd"],
        );
        registry.register(
            FileType::tex(
                "tex",
                "TeX Document",
                EditorLanguage::Tex,
                ".tex",
                Icon::new("icons/tex.png"),
            ),
            &["tex", "ltx", "sty"],
        );

        registry.set_fallback(FileTypeId::PlainText);
        registry
    }

    /// Add a descriptor and map the given extensions (lowercase, no dot)
    /// to it. Re-registering a kind replaces the previous descriptor.
    pub fn register(&mut self, file_type: FileType, extensions: &[&str]) {
        let kind = file_type.kind();
        for ext in extensions {
            self.by_extension.insert(ext.to_ascii_lowercase(), kind);
        }
        self.types.insert(kind, file_type);
    }

    /// Kind to fall back to when an extension is unknown.
    pub fn set_fallback(&mut self, kind: FileTypeId) -> bool {
        if self.types.contains_key(&kind) {
            self.fallback = Some(kind);
            true
        } else {
            false
        }
    }

    pub fn get(&self, kind: FileTypeId) -> Option<&FileType> {
        self.types.get(&kind)
    }

    /// Resolve a path to a descriptor by its extension
    /// (case-insensitive). Unknown extensions resolve to the fallback
    /// kind; `None` only when no fallback is registered.
    pub fn type_for_path(&self, path: &Path) -> Option<&FileType> {
        let kind = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(|ext| self.by_extension.get(&ext.to_ascii_lowercase()))
            .copied()
            .or(self.fallback)?;
        self.types.get(&kind)
    }

    /// All registered descriptors, in no particular order.
    pub fn types(&self) -> impl Iterator<Item = &FileType> {
        self.types.values()
    }

    /// Extensions registered for a kind, sorted for stable output.
    pub fn extensions_for(&self, kind: FileTypeId) -> Vec<&str> {
        let mut exts: Vec<&str> = self
            .by_extension
            .iter()
            .filter(|(_, k)| **k == kind)
            .map(|(ext, _)| ext.as_str())
            .collect();
        exts.sort_unstable();
        exts
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}
