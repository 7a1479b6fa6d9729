//! Capability Profiles
//!
//! Named capability switches for each file type, replacing a positional
//! boolean constructor with one named field per switch.

use serde::Serialize;

/// The capability switches of a file type.
///
/// Eighteen named flags. Each file-type kind owns exactly one fixed
/// profile, declared as a `const` below; profiles never change after
/// startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    /// Wrap long lines by default. The R-markdown family ignores this in
    /// favor of the live `soft_wrap_rmd_files` preference.
    pub word_wrap: bool,
    pub uses_completion: bool,
    pub can_source_on_save: bool,
    pub can_execute_code: bool,
    pub can_execute_all_code: bool,
    pub can_execute_to_current_line: bool,
    pub can_execute_chunks: bool,
    pub can_knit_to_html: bool,
    pub can_preview_html: bool,
    pub can_compile_pdf: bool,
    pub can_compile_notebook: bool,
    pub can_preview_from_source: bool,
    pub can_auto_indent: bool,
    pub can_check_spelling: bool,
    pub can_show_scope_tree: bool,
    /// Mixed prose-and-code format with embedded executable chunks.
    pub is_literate: bool,
    pub is_markup: bool,
    pub is_script: bool,
}

/// All switches off.
const NONE: Capabilities = Capabilities {
    word_wrap: false,
    uses_completion: false,
    can_source_on_save: false,
    can_execute_code: false,
    can_execute_all_code: false,
    can_execute_to_current_line: false,
    can_execute_chunks: false,
    can_knit_to_html: false,
    can_preview_html: false,
    can_compile_pdf: false,
    can_compile_notebook: false,
    can_preview_from_source: false,
    can_auto_indent: false,
    can_check_spelling: false,
    can_show_scope_tree: false,
    is_literate: false,
    is_markup: false,
    is_script: false,
};

impl Capabilities {
    pub const PLAIN_TEXT: Capabilities = Capabilities {
        word_wrap: true,
        can_check_spelling: true,
        ..NONE
    };

    pub const R_SCRIPT: Capabilities = Capabilities {
        uses_completion: true,
        can_source_on_save: true,
        can_execute_code: true,
        can_execute_all_code: true,
        can_execute_to_current_line: true,
        can_compile_notebook: true,
        can_auto_indent: true,
        can_show_scope_tree: true,
        is_script: true,
        ..NONE
    };

    /// Literate Sweave/noweb documents: chunk execution and PDF
    /// compilation, no HTML preview path.
    pub const SWEAVE: Capabilities = Capabilities {
        uses_completion: true,
        can_execute_code: true,
        can_execute_all_code: true,
        can_execute_chunks: true,
        can_compile_pdf: true,
        can_check_spelling: true,
        can_show_scope_tree: true,
        is_literate: true,
        is_markup: true,
        ..NONE
    };

    pub const MARKDOWN: Capabilities = Capabilities {
        word_wrap: true,
        can_preview_html: true,
        can_check_spelling: true,
        is_markup: true,
        ..NONE
    };

    pub const R_MARKDOWN: Capabilities = Capabilities {
        uses_completion: true,
        can_execute_code: true,
        can_execute_all_code: true,
        can_execute_chunks: true,
        can_knit_to_html: true,
        can_compile_notebook: true,
        can_check_spelling: true,
        can_show_scope_tree: true,
        is_literate: true,
        is_markup: true,
        ..NONE
    };

    pub const TEX: Capabilities = Capabilities {
        word_wrap: true,
        can_compile_pdf: true,
        can_check_spelling: true,
        is_markup: true,
        ..NONE
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sweave_profile_is_fixed() {
        let caps = Capabilities::SWEAVE;
        assert!(caps.is_literate);
        assert!(caps.is_markup);
        assert!(caps.can_execute_chunks);
        assert!(caps.can_compile_pdf);
        assert!(!caps.can_preview_html);
        assert!(!caps.can_knit_to_html);
        assert!(!caps.is_script);
        assert!(!caps.word_wrap);
    }

    #[test]
    fn profiles_are_value_types() {
        // Two reads of the same profile compare equal.
        assert_eq!(Capabilities::SWEAVE, Capabilities::SWEAVE);
        assert_ne!(Capabilities::SWEAVE, Capabilities::R_MARKDOWN);
    }

    #[test]
    fn only_literate_profiles_set_chunk_execution() {
        assert!(!Capabilities::PLAIN_TEXT.can_execute_chunks);
        assert!(!Capabilities::MARKDOWN.can_execute_chunks);
        assert!(!Capabilities::TEX.can_execute_chunks);
        assert!(Capabilities::SWEAVE.can_execute_chunks);
        assert!(Capabilities::R_MARKDOWN.can_execute_chunks);
    }
}
