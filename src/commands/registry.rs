//! Command Registry
//!
//! In-memory map from command names to their metadata, built from the
//! embedded command TOML.

use std::collections::HashMap;

use super::schema::{CommandDef, CommandsFile, EditorCommand};

/// Registry of the globally available editor commands.
#[derive(Debug, Clone)]
pub struct CommandRegistry {
    commands: HashMap<String, CommandDef>,
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::with_builtin_commands()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            commands: HashMap::new(),
        }
    }

    /// Registry populated from the command metadata embedded in the
    /// binary.
    pub fn with_builtin_commands() -> Self {
        let mut registry = Self::new();

        let embedded_toml = include_str!("../../resources/commands.toml");
        match toml::from_str::<CommandsFile>(embedded_toml) {
            Ok(file) => {
                for def in file.commands {
                    registry.add_command(def);
                }
            }
            Err(e) => {
                log::warn!(
                    "Failed to parse embedded command metadata: {}. Using minimal fallback.",
                    e
                );
                registry.add_minimal_commands();
            }
        }

        registry
    }

    /// Bare metadata for every known command, used when the embedded TOML
    /// cannot be parsed.
    fn add_minimal_commands(&mut self) {
        for cmd in EditorCommand::ALL {
            self.add_command(CommandDef {
                name: cmd.name().to_string(),
                label: cmd.name().to_string(),
                description: None,
                shortcut: None,
            });
        }
    }

    /// Add a command definition, replacing any previous one of the same
    /// name.
    pub fn add_command(&mut self, def: CommandDef) {
        self.commands.insert(def.name.clone(), def);
    }

    pub fn get(&self, cmd: EditorCommand) -> Option<&CommandDef> {
        self.commands.get(cmd.name())
    }

    pub fn get_by_name(&self, name: &str) -> Option<&CommandDef> {
        self.commands.get(name)
    }

    pub fn contains(&self, cmd: EditorCommand) -> bool {
        self.commands.contains_key(cmd.name())
    }

    /// Registered command names, sorted for stable output.
    pub fn list_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.commands.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
