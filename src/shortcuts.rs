//! Canonical shortcut labels shown in hints and footers.
//!
//! Labels only. Actual key decoding belongs to whichever shell owns the
//! input events; keeping the strings here means every surface prints the
//! same chord for the same thing.

pub const PALETTE: &str = "Ctrl+K";
pub const CLOSE: &str = "Esc";
pub const NAVIGATE: &str = "↑/↓";
pub const ACTIVATE: &str = "Enter";
pub const CLEAR_QUERY: &str = "Ctrl+U";
pub const QUIT: &str = "q";
