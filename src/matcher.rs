//! Query filtering and category grouping.
//!
//! [`filter`] is a pure function of (registry snapshot, query): no hidden
//! state, no side effects, identical inputs give an identical grouped
//! outcome. Matching is plain case-insensitive substring containment over
//! title, description, and keywords; there is no fuzzy scoring and no
//! ranking beyond matched-or-not.

use crate::command::{Category, Command};
use crate::registry::CommandRegistry;

/// How a [`FilterOutcome`] was produced.
///
/// The distinction is observable: an empty `Filtered` outcome renders the
/// no-results indicator, while `Default` renders every registered command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterMode {
    /// Blank query: the default view of everything registered.
    Default,
    /// Non-blank query: substring-filtered view, possibly empty.
    Filtered,
}

/// One rendered section: a category and its commands, in registration
/// order.
#[derive(Clone, Debug)]
pub struct CommandGroup {
    pub category: Category,
    pub commands: Vec<Command>,
}

/// Grouped result of a [`filter`] call.
#[derive(Clone, Debug)]
pub struct FilterOutcome {
    pub mode: FilterMode,
    pub groups: Vec<CommandGroup>,
}

impl FilterOutcome {
    /// An empty default view, the state before any filtering has run.
    pub fn empty_default() -> Self {
        Self {
            mode: FilterMode::Default,
            groups: Vec::new(),
        }
    }

    /// Number of commands across all groups: the flattened length the
    /// selection index runs over.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.commands.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether this is the empty *filtered* outcome. The default view is
    /// never "no results", even over an empty registry.
    pub fn is_no_results(&self) -> bool {
        self.mode == FilterMode::Filtered && self.is_empty()
    }

    /// Commands in flattened display order (groups concatenated).
    pub fn flattened(&self) -> impl Iterator<Item = &Command> {
        self.groups.iter().flat_map(|g| g.commands.iter())
    }

    /// Command at a flattened index.
    pub fn command_at(&self, index: usize) -> Option<&Command> {
        self.flattened().nth(index)
    }
}

/// Case-fold and trim one match field or query. Applied identically to
/// both sides of the comparison so [`filter`] stays deterministic.
fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Whether a command matches an already-normalized, non-empty query.
fn matches(command: &Command, needle: &str) -> bool {
    normalize(&command.title).contains(needle)
        || normalize(&command.description).contains(needle)
        || command.keywords.iter().any(|k| normalize(k).contains(needle))
}

/// Filter the registry against a query and group the matches by category.
///
/// A blank (empty after trimming) query yields the default view: every
/// registered command, builtin categories first in their fixed order, then
/// custom categories in first-seen order, each group in registration
/// order. A non-blank query keeps a command when the case-folded query is
/// a substring of its case-folded title, description, or any keyword;
/// grouping is the same and empty groups are omitted.
pub fn filter(registry: &CommandRegistry, query: &str) -> FilterOutcome {
    let needle = normalize(query);
    let (mode, matched): (FilterMode, Vec<&Command>) = if needle.is_empty() {
        (FilterMode::Default, registry.list_all().iter().collect())
    } else {
        (
            FilterMode::Filtered,
            registry
                .list_all()
                .iter()
                .filter(|c| matches(c, &needle))
                .collect(),
        )
    };
    FilterOutcome {
        mode,
        groups: group_by_category(&matched),
    }
}

/// Partition matches into per-category groups without disturbing the
/// relative order of members. Builtin categories come first in their fixed
/// order; custom categories append in first-seen order.
fn group_by_category(matched: &[&Command]) -> Vec<CommandGroup> {
    let mut groups: Vec<CommandGroup> = Vec::new();
    for command in matched {
        match groups.iter_mut().find(|g| g.category == command.category) {
            Some(group) => group.commands.push((*command).clone()),
            None => groups.push(CommandGroup {
                category: command.category.clone(),
                commands: vec![(*command).clone()],
            }),
        }
    }
    // Stable sort: builtins by fixed rank, customs all tie past the end
    // and keep their first-seen order.
    groups.sort_by_key(|g| g.category.builtin_rank().unwrap_or(Category::BUILTIN.len()));
    groups
}
