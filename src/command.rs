//! Command records: the invocable unit the palette registry stores.
//!
//! A [`Command`] is an immutable value registered once: display metadata
//! (title, description, category, icon, keywords) plus a zero-argument
//! async callable. Commands are cheap to clone because the callable is
//! shared behind an [`Arc`]; overwriting a registration replaces the whole
//! record.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use thiserror::Error;

/// Boxed future produced by a command action.
pub type ActionFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// The invocable payload of a [`Command`].
///
/// Zero arguments, possibly asynchronous, no return contract. Failures are
/// the action's own responsibility to surface, typically through a
/// [`Notifier`](crate::services::Notifier); the palette records no error
/// state on its behalf.
pub type CommandAction = Arc<dyn Fn() -> ActionFuture + Send + Sync>;

/// Errors from registry mutation.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Registration with an empty id. The registry is left unchanged.
    #[error("command id must be non-empty")]
    InvalidCommand,
}

/// Categorical grouping for commands.
///
/// Builtin categories render in a fixed order; custom categories follow in
/// first-seen order.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Category {
    /// One-keystroke dashboard operations.
    QuickActions,
    /// Route changes within the console.
    Navigation,
    /// Bulk operations against the device fleet.
    DeviceActions,
    /// Anything a host registers outside the builtin set.
    Custom(String),
}

impl Category {
    /// Builtin categories in display order.
    pub const BUILTIN: &'static [Category] = &[
        Category::QuickActions,
        Category::Navigation,
        Category::DeviceActions,
    ];

    /// Section header label.
    pub fn label(&self) -> &str {
        match self {
            Self::QuickActions => "Quick Actions",
            Self::Navigation => "Navigation",
            Self::DeviceActions => "Device Actions",
            Self::Custom(name) => name,
        }
    }

    /// Stable identifier used in registrations and logs.
    pub fn slug(&self) -> &str {
        match self {
            Self::QuickActions => "quick-actions",
            Self::Navigation => "navigation",
            Self::DeviceActions => "device-actions",
            Self::Custom(name) => name,
        }
    }

    /// Parse a category slug. Unknown slugs become [`Category::Custom`].
    pub fn from_slug(slug: &str) -> Self {
        match slug {
            "quick-actions" => Self::QuickActions,
            "navigation" => Self::Navigation,
            "device-actions" => Self::DeviceActions,
            other => Self::Custom(other.to_string()),
        }
    }

    /// Position among the builtins, `None` for custom categories.
    pub(crate) fn builtin_rank(&self) -> Option<usize> {
        Self::BUILTIN.iter().position(|c| c == self)
    }
}

/// An invocable command with display metadata.
#[derive(Clone)]
pub struct Command {
    /// Unique id, the primary key in the registry.
    pub id: String,
    /// Primary display string, also match text.
    pub title: String,
    /// Secondary display string, also match text.
    pub description: String,
    pub category: Category,
    /// Opaque display token. The core never interprets it.
    pub icon: String,
    /// Additional match strings beyond title and description.
    pub keywords: Vec<String>,
    pub action: CommandAction,
}

impl Command {
    /// Start a command with the given id and title. Defaults: empty
    /// description/icon/keywords, [`Category::QuickActions`], no-op action.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            category: Category::QuickActions,
            icon: String::new(),
            keywords: Vec::new(),
            action: Arc::new(|| -> ActionFuture { Box::pin(async {}) }),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Attach the invocable payload.
    pub fn action<F, Fut>(mut self, f: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        self.action = Arc::new(move || -> ActionFuture { Box::pin(f()) });
        self
    }

    /// Produce the action's future without awaiting it.
    pub fn invoke(&self) -> ActionFuture {
        (self.action)()
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("description", &self.description)
            .field("category", &self.category)
            .field("icon", &self.icon)
            .field("keywords", &self.keywords)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};

    #[test]
    fn builder_defaults() {
        let cmd = Command::new("export-dashboard", "Export Dashboard Data");
        assert_eq!(cmd.id, "export-dashboard");
        assert_eq!(cmd.title, "Export Dashboard Data");
        assert!(cmd.description.is_empty());
        assert!(cmd.keywords.is_empty());
        assert_eq!(cmd.category, Category::QuickActions);
    }

    #[test]
    fn builder_sets_all_fields() {
        let cmd = Command::new("goto-devices", "Device Management")
            .description("Jump to the device management page")
            .category(Category::Navigation)
            .icon("📱")
            .keywords(["device", "machine"]);
        assert_eq!(cmd.category, Category::Navigation);
        assert_eq!(cmd.icon, "📱");
        assert_eq!(cmd.keywords, vec!["device", "machine"]);
    }

    #[tokio::test]
    async fn invoke_runs_attached_action() {
        let hit = Arc::new(AtomicBool::new(false));
        let flag = hit.clone();
        let cmd = Command::new("probe", "Probe").action(move || {
            let flag = flag.clone();
            async move {
                flag.store(true, Ordering::SeqCst);
            }
        });
        cmd.invoke().await;
        assert!(hit.load(Ordering::SeqCst));
    }

    #[test]
    fn debug_elides_the_callable() {
        let cmd = Command::new("probe", "Probe");
        let rendered = format!("{cmd:?}");
        assert!(rendered.contains("probe"));
        assert!(!rendered.contains("action"));
    }

    #[test]
    fn category_slug_round_trip() {
        for cat in Category::BUILTIN {
            assert_eq!(&Category::from_slug(cat.slug()), cat);
        }
        assert_eq!(
            Category::from_slug("maintenance"),
            Category::Custom("maintenance".to_string())
        );
    }

    #[test]
    fn builtin_ranks_follow_display_order() {
        assert_eq!(Category::QuickActions.builtin_rank(), Some(0));
        assert_eq!(Category::Navigation.builtin_rank(), Some(1));
        assert_eq!(Category::DeviceActions.builtin_rank(), Some(2));
        assert_eq!(Category::Custom("x".into()).builtin_rank(), None);
    }

    #[test]
    fn labels_are_nonempty() {
        for cat in Category::BUILTIN {
            assert!(!cat.label().is_empty(), "{cat:?} has empty label");
        }
    }
}
