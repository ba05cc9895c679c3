//! Keyboard-first command palette for a device-operations console.
//!
//! The core is presentation-agnostic: [`CommandRegistry`] owns the
//! invocable [`Command`]s, [`matcher::filter`] turns a query into a
//! grouped result set, [`SelectionController`] tracks the highlighted
//! row, and [`PaletteController`] runs the open/close session state
//! machine and dispatches the chosen action fire-and-forget. Hosts supply
//! a [`Presentation`] plus the collaborator services in [`services`];
//! `cdeck` (`src/main.rs`) is the bundled terminal host.
//!
//! # Quick tour
//!
//! - Register commands (the stock set lives in [`catalog`]) into a shared
//!   [`CommandRegistry`].
//! - Build one [`PaletteController`] at startup with the registry, a
//!   [`Presentation`], and a runtime handle.
//! - Feed it events: `toggle` on the activation shortcut,
//!   `on_query_change` as the operator types, `on_navigate` on arrow
//!   keys, `on_activate` on Enter, `on_escape` on Esc.

pub mod catalog;
pub mod command;
pub mod matcher;
pub mod palette;
pub mod prefs;
pub mod presentation;
pub mod registry;
pub mod selection;
pub mod services;
pub mod shortcuts;
pub mod toast;

pub use command::{ActionFuture, Category, Command, CommandAction, RegistryError};
pub use matcher::{filter, CommandGroup, FilterMode, FilterOutcome};
pub use palette::{NavDirection, PaletteController, SessionState, SharedRegistry};
pub use prefs::{Density, PrefsError, PrefsStore, ThemeMode, UiPrefs};
pub use presentation::{
    NullPresentation, Presentation, PresentationCall, RecordingPresentation,
};
pub use registry::CommandRegistry;
pub use selection::SelectionController;
pub use services::{
    ConfirmPrompt, Confirmer, DeviceOps, Navigator, NotifyKind, Notifier, PanelOps,
};
pub use toast::{Toast, ToastCenter, DEFAULT_TOAST_TTL};
