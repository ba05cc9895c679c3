//! Palette session lifecycle.
//!
//! [`PaletteController`] is the one stateful orchestrator: it owns the
//! current query and result snapshot, runs the Closed/Open session state
//! machine, and wires input events to the match engine, the selection, and
//! the presentation adapter.
//!
//! # Interaction contract
//!
//! | Event                | Closed          | Open                                   |
//! |----------------------|-----------------|----------------------------------------|
//! | `toggle`             | open            | close                                  |
//! | `open`               | fresh session   | no-op (in-progress query survives)     |
//! | `close` / `on_escape`| no-op           | discard session, hide                  |
//! | `on_query_change`    | no-op           | refilter, highlight back to top        |
//! | `on_navigate`        | no-op           | clamped move, re-highlight             |
//! | `on_activate`        | no-op           | spawn selected action, close           |
//!
//! Wrong-state events are silent no-ops by design: the host environment
//! can deliver duplicate or out-of-order events (key repeat, a double
//! toggle) and none of them may error.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::runtime::Handle;
use tracing::{debug, trace};

use crate::command::Command;
use crate::matcher::{self, FilterOutcome};
use crate::presentation::Presentation;
use crate::registry::CommandRegistry;
use crate::selection::SelectionController;

/// Palette session state. One open-to-close cycle is a session; query and
/// selection never survive it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Closed,
    Open,
}

/// Navigation direction for [`PaletteController::on_navigate`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavDirection {
    Up,
    Down,
}

/// Shared handle to the command registry.
///
/// Host code may register and unregister through this at any time,
/// including while the palette is open; an open palette keeps showing its
/// current snapshot until the next query change or reopen.
pub type SharedRegistry = Arc<RwLock<CommandRegistry>>;

/// The palette orchestrator. Construct exactly one per console at startup
/// and pass the instance to whoever needs it; it lives until the process
/// exits.
pub struct PaletteController {
    state: SessionState,
    query: String,
    results: FilterOutcome,
    selection: SelectionController,
    registry: SharedRegistry,
    presentation: Arc<dyn Presentation>,
    spawner: Handle,
}

impl PaletteController {
    /// `spawner` is the runtime handle command actions are launched on;
    /// dispatch is fire-and-forget, so the handle outlives every session.
    pub fn new(
        registry: SharedRegistry,
        presentation: Arc<dyn Presentation>,
        spawner: Handle,
    ) -> Self {
        Self {
            state: SessionState::Closed,
            query: String::new(),
            results: FilterOutcome::empty_default(),
            selection: SelectionController::new(),
            registry,
            presentation,
            spawner,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == SessionState::Open
    }

    /// The session's current query. Empty while closed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The result snapshot currently on display.
    pub fn results(&self) -> &FilterOutcome {
        &self.results
    }

    /// Flattened index of the highlighted row, `None` with no results.
    pub fn selection(&self) -> Option<usize> {
        self.selection.selected()
    }

    /// The highlighted command, if any.
    pub fn selected_command(&self) -> Option<&Command> {
        self.selection
            .selected()
            .and_then(|index| self.results.command_at(index))
    }

    /// The registry handle, for host-side registration.
    pub fn registry(&self) -> SharedRegistry {
        self.registry.clone()
    }

    pub fn toggle(&mut self) {
        match self.state {
            SessionState::Closed => self.open(),
            SessionState::Open => self.close(),
        }
    }

    /// Enter the open state with a fresh session: empty query, the default
    /// grouped view, highlight on the first row, input focused.
    ///
    /// Idempotent while already open; key repeat of the activation
    /// shortcut must not clobber an in-progress query.
    pub fn open(&mut self) {
        if self.state == SessionState::Open {
            trace!("open ignored, palette already open");
            return;
        }
        self.state = SessionState::Open;
        self.query.clear();
        self.results = matcher::filter(&self.registry.read(), "");
        self.selection.reset(self.results.len());
        debug!(results = self.results.len(), "palette opened");
        self.presentation.show();
        self.presentation.render_groups(&self.results.groups);
        if let Some(index) = self.selection.selected() {
            self.presentation.highlight(index);
        }
        self.presentation.focus_input();
    }

    /// Leave the open state, discarding the session's query and selection.
    /// Idempotent while already closed.
    pub fn close(&mut self) {
        if self.state == SessionState::Closed {
            trace!("close ignored, palette already closed");
            return;
        }
        self.state = SessionState::Closed;
        self.query.clear();
        self.results = FilterOutcome::empty_default();
        self.selection.reset(0);
        debug!("palette closed");
        self.presentation.hide();
    }

    /// Escape closes an open palette and is otherwise ignored.
    pub fn on_escape(&mut self) {
        if self.state == SessionState::Open {
            self.close();
        } else {
            trace!("escape ignored, palette closed");
        }
    }

    /// Store the new query, refilter against the live registry, and reset
    /// the highlight to the top. Ignored while closed.
    pub fn on_query_change(&mut self, text: &str) {
        if self.state != SessionState::Open {
            trace!("query change ignored, palette closed");
            return;
        }
        self.query = text.to_string();
        self.results = matcher::filter(&self.registry.read(), &self.query);
        self.selection.reset(self.results.len());
        debug!(
            query = %self.query,
            results = self.results.len(),
            "palette refiltered"
        );
        if self.results.is_no_results() {
            self.presentation.show_no_results();
        } else {
            self.presentation.render_groups(&self.results.groups);
            if let Some(index) = self.selection.selected() {
                self.presentation.highlight(index);
            }
        }
    }

    /// Move the highlight one row, clamped at either end. Ignored while
    /// closed; a no-op on an empty result set.
    pub fn on_navigate(&mut self, direction: NavDirection) {
        if self.state != SessionState::Open {
            trace!("navigate ignored, palette closed");
            return;
        }
        match direction {
            NavDirection::Down => self.selection.move_down(),
            NavDirection::Up => self.selection.move_up(),
        }
        if let Some(index) = self.selection.selected() {
            self.presentation.highlight(index);
        }
    }

    /// Dispatch the highlighted command's action and close.
    ///
    /// Fire-and-forget: the action future is handed to the runtime and the
    /// palette closes without awaiting it. The action owns its own failure
    /// reporting. With no selection this is a silent no-op and the palette
    /// stays open.
    pub fn on_activate(&mut self) {
        if self.state != SessionState::Open {
            trace!("activate ignored, palette closed");
            return;
        }
        let (id, future) = match self.selected_command() {
            Some(command) => (command.id.clone(), command.invoke()),
            None => {
                trace!("activate ignored, no selection");
                return;
            }
        };
        debug!(id = %id, "dispatching command action");
        self.spawner.spawn(future);
        self.close();
    }

    /// Pointer activation: highlight the clicked flattened row, then run
    /// the same path as keyboard activation.
    pub fn activate_index(&mut self, index: usize) {
        if self.state != SessionState::Open {
            trace!("activate ignored, palette closed");
            return;
        }
        self.selection.select(index);
        self.on_activate();
    }
}
