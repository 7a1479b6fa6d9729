//! File Type Registry
//!
//! The document-classification layer of an editor: which descriptor a
//! file resolves to, which commands apply to it, whether it soft-wraps,
//! and where its embedded code chunks are delimited.
//!
//! This library provides:
//! - File-type descriptors with named capability profiles
//! - Extension-based registry lookup with a plain-text fallback
//! - A command registry backed by embedded metadata
//! - A layered, live-reloading user preference store

pub mod commands;
pub mod config;
pub mod filetype;
pub mod prefs;

// Re-exports for clean public API
pub use commands::{CommandRegistry, EditorCommand};
pub use config::Config;
pub use filetype::{Capabilities, FileType, FileTypeId, FileTypeRegistry};
pub use prefs::{PreferencesStore, PrefsHandle, UserPrefs};
