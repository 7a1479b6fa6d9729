//! File Type System
//!
//! Descriptors, capability profiles, and the registry that matches
//! documents to them.

pub mod caps;
pub mod registry;
pub mod schema;

pub use caps::Capabilities;
pub use registry::FileTypeRegistry;
pub use schema::{ChunkDelimiters, EditorLanguage, FileType, FileTypeId, Icon};
