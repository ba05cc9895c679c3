//! Id-keyed command store preserving registration order.

use std::collections::HashMap;

use tracing::debug;

use crate::command::{Command, RegistryError};

/// Owns the set of registered commands, keyed by unique id.
///
/// Registration order is what the default (unfiltered) palette view
/// displays, so commands live in a slot vector with an id-to-slot index on
/// the side. Re-registering an existing id replaces the command in its
/// original slot: last write wins, position preserved, the usual
/// insertion-ordered mapping semantics.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    slots: Vec<Command>,
    index: HashMap<String, usize>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store or overwrite by id.
    ///
    /// The only validation is a non-empty id; an empty (or all-whitespace)
    /// id is rejected and the registry is left unchanged.
    pub fn register(&mut self, command: Command) -> Result<(), RegistryError> {
        if command.id.trim().is_empty() {
            return Err(RegistryError::InvalidCommand);
        }
        match self.index.get(&command.id) {
            Some(&slot) => {
                debug!(id = %command.id, "overwriting registered command");
                self.slots[slot] = command;
            }
            None => {
                debug!(id = %command.id, "registering command");
                self.index.insert(command.id.clone(), self.slots.len());
                self.slots.push(command);
            }
        }
        Ok(())
    }

    /// Remove by id. Returns whether anything was removed; a missing id is
    /// not an error.
    pub fn unregister(&mut self, id: &str) -> bool {
        let Some(slot) = self.index.remove(id) else {
            return false;
        };
        self.slots.remove(slot);
        for idx in self.index.values_mut() {
            if *idx > slot {
                *idx -= 1;
            }
        }
        debug!(id, "unregistered command");
        true
    }

    /// All commands in registration order.
    pub fn list_all(&self) -> &[Command] {
        &self.slots
    }

    pub fn get(&self, id: &str) -> Option<&Command> {
        self.index.get(id).map(|&slot| &self.slots[slot])
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}
