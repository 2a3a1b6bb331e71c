//! Command dispatch table.
//!
//! This module provides the [`CommandRegistry`], which maps command names and
//! aliases to their [`Command`] implementation.
//!
//! # Lifecycle
//!
//! ```text
//! new(sources) → ensure_loaded() → resolve(token) ...
//!   (empty)        (populated once)   (read only)
//! ```
//!
//! The registry is built by the application root and shared behind an `Arc`.
//! Population goes through a [`OnceLock`], so concurrent first callers never
//! populate twice nor observe a partially filled table.

use std::{
    collections::HashMap,
    sync::{Arc, OnceLock},
};

use log::{debug, info, warn};

use crate::commands::Command;

/// Lookup tables filled by [`CommandRegistry::ensure_loaded`].
#[derive(Default)]
struct CommandTables {
    /// Lowercase canonical name -> command
    commands: HashMap<String, Arc<dyn Command>>,
    /// Lowercase alias -> lowercase canonical name
    aliases: HashMap<String, String>,
}

/// Registry of the commands known by the bot.
///
/// # Examples
///
/// ```no_run
/// # use std::sync::Arc;
/// # use hookbot::commands::{CommandRegistry, actions::PingCommand};
/// let registry = CommandRegistry::new(vec![Arc::new(PingCommand)]);
/// registry.ensure_loaded();
/// assert!(registry.resolve("ping").is_some());
/// ```
pub struct CommandRegistry {
    /// Commands to load, in registration order
    sources: Vec<Arc<dyn Command>>,
    /// Populated tables, set exactly once
    tables: OnceLock<CommandTables>,
}

impl CommandRegistry {
    /// Creates an empty registry that will load `sources` on
    /// [`Self::ensure_loaded`].
    pub fn new(sources: Vec<Arc<dyn Command>>) -> Self {
        CommandRegistry {
            sources,
            tables: OnceLock::new(),
        }
    }

    /// Populates the registry if it is not populated yet.
    ///
    /// Sources with an empty name are skipped. On name or alias collision the
    /// last loaded source wins. Calling this method again is a no-op.
    pub fn ensure_loaded(&self) {
        self.tables.get_or_init(|| Self::load(&self.sources));
    }

    fn load(sources: &[Arc<dyn Command>]) -> CommandTables {
        let mut tables = CommandTables::default();

        for source in sources {
            let name = source.name().trim().to_lowercase();
            if name.is_empty() {
                warn!("skipping command without name");
                continue;
            }

            if tables.commands.insert(name.clone(), Arc::clone(source)).is_some() {
                warn!("command {} registered twice, keeping the last one", name);
            }

            for alias in source.aliases() {
                let alias = alias.trim().to_lowercase();
                if alias.is_empty() {
                    continue;
                }
                debug!("alias {} -> {}", alias, name);
                tables.aliases.insert(alias, name.clone());
            }

            info!("loaded command {}", name);
        }

        info!("total commands loaded: {}", tables.commands.len());

        tables
    }

    /// Looks up a command by its canonical name, then by alias.
    ///
    /// `token` is expected to be lowercase already. Returns `None` when
    /// nothing matches or when the registry is not loaded.
    pub fn resolve(&self, token: &str) -> Option<Arc<dyn Command>> {
        let tables = self.tables.get()?;

        if let Some(command) = tables.commands.get(token) {
            return Some(Arc::clone(command));
        }

        tables
            .aliases
            .get(token)
            .and_then(|name| tables.commands.get(name))
            .cloned()
    }

    /// Returns the sorted canonical names of the loaded commands.
    pub fn command_names(&self) -> Vec<String> {
        let Some(tables) = self.tables.get() else {
            return vec![];
        };

        let mut names: Vec<String> = tables.commands.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of loaded commands.
    pub fn len(&self) -> usize {
        self.tables.get().map_or(0, |tables| tables.commands.len())
    }

    /// Returns `true` if no command is loaded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::commands::test_utils::{RecordingCommand, as_sources};

    fn create_registry(commands: Vec<RecordingCommand>) -> CommandRegistry {
        let registry = CommandRegistry::new(as_sources(commands));
        registry.ensure_loaded();
        registry
    }

    #[test]
    fn test_resolve_before_load() {
        let registry = CommandRegistry::new(as_sources(vec![RecordingCommand::new("ping")]));
        assert!(registry.resolve("ping").is_none());
        assert!(registry.is_empty());
        assert!(registry.command_names().is_empty());
    }

    #[test]
    fn test_resolve_by_name_and_alias() {
        let registry = create_registry(vec![
            RecordingCommand::new("help").with_aliases(vec!["h", "?"]),
            RecordingCommand::new("ping"),
        ]);

        let by_name = registry.resolve("help").unwrap();
        let by_alias = registry.resolve("h").unwrap();
        let by_other_alias = registry.resolve("?").unwrap();
        assert!(Arc::ptr_eq(&by_name, &by_alias));
        assert!(Arc::ptr_eq(&by_name, &by_other_alias));
        assert_eq!(registry.resolve("ping").unwrap().name(), "ping");
        assert!(registry.resolve("frobnicate").is_none());
        assert!(registry.resolve("").is_none());
    }

    #[test]
    fn test_names_and_aliases_are_folded_to_lowercase() {
        let registry = create_registry(vec![
            RecordingCommand::new("Stats").with_aliases(vec!["ST"]),
        ]);

        assert_eq!(registry.command_names(), vec!["stats".to_owned()]);
        assert!(registry.resolve("stats").is_some());
        assert!(registry.resolve("st").is_some());
        assert!(registry.resolve("Stats").is_none());
    }

    #[test]
    fn test_sources_without_name_are_skipped() {
        let registry = create_registry(vec![
            RecordingCommand::new("").with_aliases(vec!["orphan"]),
            RecordingCommand::new("   "),
            RecordingCommand::new("ping"),
        ]);

        assert_eq!(registry.len(), 1);
        assert!(registry.resolve("orphan").is_none());
        assert!(registry.resolve("ping").is_some());
    }

    #[test]
    fn test_last_loaded_wins_on_collision() {
        let first = RecordingCommand::new("ping").with_aliases(vec!["p"]);
        let second = RecordingCommand::new("ping").admin_only();
        let third = RecordingCommand::new("pong").with_aliases(vec!["p"]);
        let registry = create_registry(vec![first, second, third]);

        assert_eq!(registry.len(), 2);
        assert!(registry.resolve("ping").unwrap().admin_only());
        assert_eq!(registry.resolve("p").unwrap().name(), "pong");
    }

    #[test]
    fn test_canonical_name_wins_over_alias() {
        let registry = create_registry(vec![
            RecordingCommand::new("stats").with_aliases(vec!["status"]),
            RecordingCommand::new("status"),
        ]);

        assert_eq!(registry.resolve("status").unwrap().name(), "status");
    }

    #[test]
    fn test_ensure_loaded_is_idempotent() {
        let command = RecordingCommand::new("ping").with_aliases(vec!["p"]);
        let name_reads = Arc::clone(&command.name_reads);
        let registry = CommandRegistry::new(as_sources(vec![command]));

        registry.ensure_loaded();
        let reads_after_first_load = name_reads.load(Ordering::SeqCst);
        let names_after_first_load = registry.command_names();

        registry.ensure_loaded();
        assert_eq!(name_reads.load(Ordering::SeqCst), reads_after_first_load);
        assert_eq!(registry.command_names(), names_after_first_load);
        assert_eq!(registry.len(), 1);
        assert!(registry.resolve("p").is_some());
    }

    #[test]
    fn test_concurrent_first_load() {
        let command = RecordingCommand::new("ping").with_aliases(vec!["p"]);
        let name_reads = Arc::clone(&command.name_reads);
        let registry = CommandRegistry::new(as_sources(vec![
            command,
            RecordingCommand::new("help").with_aliases(vec!["h"]),
        ]));

        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    registry.ensure_loaded();
                    // A loaded registry is always complete
                    assert_eq!(registry.len(), 2);
                    assert!(registry.resolve("h").is_some());
                    assert!(registry.resolve("p").is_some());
                });
            }
        });

        // Loaded exactly once: the name is read a single time during load
        assert_eq!(name_reads.load(Ordering::SeqCst), 1);
    }
}
