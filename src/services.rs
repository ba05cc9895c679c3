//! Collaborator contracts the palette's command actions call into.
//!
//! The palette core itself only talks to a
//! [`Presentation`](crate::presentation::Presentation). Command actions
//! report outcomes through [`Notifier`], gate destructive work on
//! [`Confirmer`], and reach the dashboard through [`Navigator`],
//! [`DeviceOps`], and [`PanelOps`]. Methods that can fail use
//! `Result<(), String>`: the caller only ever relays the message into a
//! notification.

use async_trait::async_trait;

/// Severity of a notification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotifyKind {
    Info,
    Success,
    Warning,
    Error,
}

impl NotifyKind {
    /// Stable lowercase name, used in logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

/// Fire-and-forget outcome reporting (a toast, a status line, a log).
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, kind: NotifyKind);
}

/// The question a destructive action asks before dispatching.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    pub cancel_label: String,
}

impl Default for ConfirmPrompt {
    fn default() -> Self {
        Self {
            title: "Confirm".to_string(),
            message: "Continue?".to_string(),
            confirm_label: "OK".to_string(),
            cancel_label: "Cancel".to_string(),
        }
    }
}

impl ConfirmPrompt {
    /// A prompt with the default button labels.
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            ..Self::default()
        }
    }
}

/// Resolves a [`ConfirmPrompt`] to the operator's choice.
#[async_trait]
pub trait Confirmer: Send + Sync {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

/// Route changes within the console.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Bulk operations against the device fleet. Opaque to the palette: calls
/// succeed, fail, or take their time entirely on their own.
#[async_trait]
pub trait DeviceOps: Send + Sync {
    /// Force-refresh the reported state of every device.
    async fn sync_all(&self) -> Result<(), String>;

    /// Send a reboot command to every offline device.
    async fn reboot_offline(&self) -> Result<(), String>;
}

/// Dashboard panel plumbing behind the quick actions.
pub trait PanelOps: Send + Sync {
    /// Export the current dashboard metrics.
    fn export_summary(&self) -> Result<(), String>;

    /// Reload every panel's data.
    fn reload_all(&self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_labels_are_stable() {
        assert_eq!(NotifyKind::Info.label(), "info");
        assert_eq!(NotifyKind::Success.label(), "success");
        assert_eq!(NotifyKind::Warning.label(), "warning");
        assert_eq!(NotifyKind::Error.label(), "error");
    }

    #[test]
    fn prompt_defaults_fill_the_button_labels() {
        let prompt = ConfirmPrompt::new("Confirm Reboot", "Reboot all offline devices?");
        assert_eq!(prompt.title, "Confirm Reboot");
        assert_eq!(prompt.confirm_label, "OK");
        assert_eq!(prompt.cancel_label, "Cancel");
    }
}
