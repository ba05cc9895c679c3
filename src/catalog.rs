//! The default operations command set.
//!
//! Everything the console ships with, wired to the collaborator services.
//! Hosts register more commands (or replace these by id) whenever they
//! like; nothing here is special to the engine.

use std::sync::Arc;

use tracing::debug;

use crate::command::{Category, Command};
use crate::prefs::PrefsStore;
use crate::services::{
    ConfirmPrompt, Confirmer, DeviceOps, Navigator, NotifyKind, Notifier, PanelOps,
};

/// Everything the default catalog needs to reach.
#[derive(Clone)]
pub struct CatalogServices {
    pub notifier: Arc<dyn Notifier>,
    pub confirmer: Arc<dyn Confirmer>,
    pub navigator: Arc<dyn Navigator>,
    pub devices: Arc<dyn DeviceOps>,
    pub panels: Arc<dyn PanelOps>,
    pub prefs: Arc<PrefsStore>,
}

/// Build the default command set in its registration (display) order.
pub fn default_commands(services: &CatalogServices) -> Vec<Command> {
    let mut commands = Vec::new();

    // -- Quick actions ----------------------------------------------------

    {
        let panels = services.panels.clone();
        let notifier = services.notifier.clone();
        commands.push(
            Command::new("export-dashboard", "Export Dashboard Data")
                .description("Export every metric panel on the current dashboard")
                .category(Category::QuickActions)
                .icon("⬇")
                .keywords(["export", "data", "download"])
                .action(move || {
                    let panels = panels.clone();
                    let notifier = notifier.clone();
                    async move {
                        match panels.export_summary() {
                            Ok(()) => {
                                notifier.notify("Dashboard export started", NotifyKind::Success)
                            }
                            Err(err) => notifier
                                .notify(&format!("Export failed: {err}"), NotifyKind::Error),
                        }
                    }
                }),
        );
    }

    {
        let panels = services.panels.clone();
        let notifier = services.notifier.clone();
        commands.push(
            Command::new("refresh-all", "Refresh All Panels")
                .description("Reload the data behind every dashboard panel")
                .category(Category::QuickActions)
                .icon("🔄")
                .keywords(["refresh", "reload"])
                .action(move || {
                    let panels = panels.clone();
                    let notifier = notifier.clone();
                    async move {
                        panels.reload_all();
                        notifier.notify("Refreshing all panels...", NotifyKind::Info);
                    }
                }),
        );
    }

    {
        let prefs = services.prefs.clone();
        let notifier = services.notifier.clone();
        commands.push(
            Command::new("toggle-theme", "Toggle Theme")
                .description("Switch between the light and dark theme")
                .category(Category::QuickActions)
                .icon("🌙")
                .keywords(["theme", "dark", "light"])
                .action(move || {
                    let prefs = prefs.clone();
                    let notifier = notifier.clone();
                    async move {
                        let theme = prefs.toggle_theme();
                        notifier
                            .notify(&format!("Theme: {}", theme.as_str()), NotifyKind::Info);
                    }
                }),
        );
    }

    {
        let prefs = services.prefs.clone();
        let notifier = services.notifier.clone();
        commands.push(
            Command::new("toggle-density", "Toggle Density")
                .description("Switch between comfortable and compact rows")
                .category(Category::QuickActions)
                .icon("☰")
                .keywords(["density", "compact", "comfortable"])
                .action(move || {
                    let prefs = prefs.clone();
                    let notifier = notifier.clone();
                    async move {
                        let density = prefs.toggle_density();
                        notifier
                            .notify(&format!("Density: {}", density.as_str()), NotifyKind::Info);
                    }
                }),
        );
    }

    {
        let navigator = services.navigator.clone();
        commands.push(
            Command::new("command-center", "Bulk Command Center")
                .description("Open the bulk command dispatch panel")
                .category(Category::QuickActions)
                .icon("⚡")
                .keywords(["command", "batch", "bulk"])
                .action(move || {
                    let navigator = navigator.clone();
                    async move {
                        navigator.navigate("/dispatch");
                    }
                }),
        );
    }

    // -- Navigation -------------------------------------------------------

    commands.push(nav_command(
        &services.navigator,
        "goto-devices",
        "Device Management",
        "Jump to the device management page",
        "📱",
        "/devices",
        &["device", "machine"],
    ));
    commands.push(nav_command(
        &services.navigator,
        "goto-orders",
        "Order Management",
        "Review every order on record",
        "📋",
        "/orders",
        &["order", "sales"],
    ));
    commands.push(nav_command(
        &services.navigator,
        "goto-dispatch",
        "Dispatch Center",
        "Manage command dispatch and batches",
        "🚀",
        "/dispatch",
        &["dispatch", "command"],
    ));
    commands.push(nav_command(
        &services.navigator,
        "goto-alarms",
        "Alarm Management",
        "Review and resolve system alarms",
        "🚨",
        "/alarms",
        &["alarm", "alert"],
    ));

    // -- Device actions ---------------------------------------------------

    {
        let devices = services.devices.clone();
        let notifier = services.notifier.clone();
        commands.push(
            Command::new("sync-all-devices", "Sync All Device State")
                .description("Force-sync the latest state of every device")
                .category(Category::DeviceActions)
                .icon("🔄")
                .keywords(["sync", "device", "status"])
                .action(move || {
                    let devices = devices.clone();
                    let notifier = notifier.clone();
                    async move {
                        match devices.sync_all().await {
                            Ok(()) => notifier
                                .notify("Device state sync started", NotifyKind::Success),
                            Err(err) => notifier
                                .notify(&format!("Sync request failed: {err}"), NotifyKind::Error),
                        }
                    }
                }),
        );
    }

    {
        let devices = services.devices.clone();
        let notifier = services.notifier.clone();
        let confirmer = services.confirmer.clone();
        commands.push(
            Command::new("reboot-devices", "Reboot Offline Devices")
                .description("Send a reboot command to every offline device")
                .category(Category::DeviceActions)
                .icon("🔌")
                .keywords(["reboot", "offline", "restart"])
                .action(move || {
                    let devices = devices.clone();
                    let notifier = notifier.clone();
                    let confirmer = confirmer.clone();
                    async move {
                        let prompt = ConfirmPrompt::new(
                            "Confirm Reboot",
                            "Reboot all offline devices? This can take several minutes \
                             to complete.",
                        );
                        if !confirmer.confirm(&prompt).await {
                            debug!("offline reboot declined");
                            return;
                        }
                        match devices.reboot_offline().await {
                            Ok(()) => {
                                notifier.notify("Reboot command sent", NotifyKind::Success)
                            }
                            Err(err) => notifier.notify(
                                &format!("Reboot command failed: {err}"),
                                NotifyKind::Error,
                            ),
                        }
                    }
                }),
        );
    }

    commands
}

fn nav_command(
    navigator: &Arc<dyn Navigator>,
    id: &str,
    title: &str,
    description: &str,
    icon: &str,
    route: &'static str,
    keywords: &[&str],
) -> Command {
    let navigator = navigator.clone();
    Command::new(id, title)
        .description(description)
        .category(Category::Navigation)
        .icon(icon)
        .keywords(keywords.iter().copied())
        .action(move || {
            let navigator = navigator.clone();
            async move {
                navigator.navigate(route);
            }
        })
}
