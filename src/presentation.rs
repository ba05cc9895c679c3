//! Presentation adapter contract and headless implementations.
//!
//! The palette core never draws. It signals a [`Presentation`] with
//! "replace the visible results" / "mark this row selected" operations and
//! the adapter owns everything visual. [`RecordingPresentation`] is the
//! headless harness the integration tests assert against;
//! [`NullPresentation`] suits hosts that poll controller state and redraw
//! on their own schedule.

use parking_lot::Mutex;

use crate::matcher::CommandGroup;

/// Rendering operations the palette controller emits.
///
/// Implementations must tolerate any call order and must not call back
/// into the controller; the sequencing guarantees live on
/// [`PaletteController`](crate::palette::PaletteController).
pub trait Presentation: Send + Sync {
    /// Make the palette surface visible.
    fn show(&self);

    /// Hide the palette surface.
    fn hide(&self);

    /// Move input focus to the query field.
    fn focus_input(&self);

    /// Replace the visible result sections.
    fn render_groups(&self, groups: &[CommandGroup]);

    /// Mark the flattened row index as selected, scrolling it into view if
    /// the surface scrolls.
    fn highlight(&self, index: usize);

    /// Show the no-matching-commands indicator instead of sections.
    fn show_no_results(&self);
}

/// A presentation that does nothing.
#[derive(Debug, Default)]
pub struct NullPresentation;

impl Presentation for NullPresentation {
    fn show(&self) {}
    fn hide(&self) {}
    fn focus_input(&self) {}
    fn render_groups(&self, _groups: &[CommandGroup]) {}
    fn highlight(&self, _index: usize) {}
    fn show_no_results(&self) {}
}

/// One recorded presentation signal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PresentationCall {
    Show,
    Hide,
    FocusInput,
    /// Section labels with their command ids, in render order.
    RenderGroups(Vec<(String, Vec<String>)>),
    Highlight(usize),
    ShowNoResults,
}

/// Records every signal for later assertion.
#[derive(Debug, Default)]
pub struct RecordingPresentation {
    calls: Mutex<Vec<PresentationCall>>,
}

impl RecordingPresentation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the calls recorded so far.
    pub fn calls(&self) -> Vec<PresentationCall> {
        self.calls.lock().clone()
    }

    pub fn last(&self) -> Option<PresentationCall> {
        self.calls.lock().last().cloned()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    fn push(&self, call: PresentationCall) {
        self.calls.lock().push(call);
    }
}

impl Presentation for RecordingPresentation {
    fn show(&self) {
        self.push(PresentationCall::Show);
    }

    fn hide(&self) {
        self.push(PresentationCall::Hide);
    }

    fn focus_input(&self) {
        self.push(PresentationCall::FocusInput);
    }

    fn render_groups(&self, groups: &[CommandGroup]) {
        let snapshot = groups
            .iter()
            .map(|g| {
                (
                    g.category.label().to_string(),
                    g.commands.iter().map(|c| c.id.clone()).collect(),
                )
            })
            .collect();
        self.push(PresentationCall::RenderGroups(snapshot));
    }

    fn highlight(&self, index: usize) {
        self.push(PresentationCall::Highlight(index));
    }

    fn show_no_results(&self) {
        self.push(PresentationCall::ShowNoResults);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::{Category, Command};

    #[test]
    fn recorder_captures_calls_in_order() {
        let recorder = RecordingPresentation::new();
        recorder.show();
        recorder.highlight(2);
        recorder.hide();
        assert_eq!(
            recorder.calls(),
            vec![
                PresentationCall::Show,
                PresentationCall::Highlight(2),
                PresentationCall::Hide
            ]
        );
    }

    #[test]
    fn render_groups_snapshot_keeps_labels_and_ids() {
        let recorder = RecordingPresentation::new();
        let groups = vec![CommandGroup {
            category: Category::Navigation,
            commands: vec![Command::new("goto-devices", "Device Management")],
        }];
        recorder.render_groups(&groups);
        assert_eq!(
            recorder.last(),
            Some(PresentationCall::RenderGroups(vec![(
                "Navigation".to_string(),
                vec!["goto-devices".to_string()]
            )]))
        );
    }
}
