//! Editor Command System
//!
//! The closed command set and the registry supplying metadata for it.

pub mod registry;
pub mod schema;

pub use registry::CommandRegistry;
pub use schema::{CommandDef, EditorCommand};
