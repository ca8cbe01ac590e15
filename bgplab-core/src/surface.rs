//! Declarative rendering seam.
//!
//! The controller and sequencer never touch a concrete widget toolkit;
//! they issue declarative calls through `RenderSurface` and a frontend
//! (console, web canvas, test recorder) interprets them. All methods are
//! fire-and-forget from the caller's perspective.

use crate::log::OutputEntry;
use crate::snapshot::PacketKind;

/// Operator controls the controller enables and disables around
/// in-flight operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    Step,
    Pause,
    Input,
}

/// Lesson content rendered once during initialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonView {
    pub title: Option<String>,
    pub description: String,
    pub instructions: Vec<String>,
    pub commands: Vec<String>,
}

/// Handle to a transient visual artifact (a packet in transit).
/// Allocated by the surface, owned by the sequencer for the duration of
/// one playback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArtifactId(pub u64);

pub trait RenderSurface: Send + Sync {
    /// Appends a severity-tagged line to the output view. The surface is
    /// expected to scroll to the newest entry.
    fn append_log(&self, entry: &OutputEntry);

    /// Empties the output view. Reset writes its placeholder right after.
    fn clear_log(&self);

    /// Updates one peer's displayed protocol-state label and its
    /// case-normalized style class.
    fn set_peer_state(&self, peer: &str, label: &str, style_class: &str);

    /// Renders the `current / total` step counter.
    fn set_step_counter(&self, current: u32, total: u32);

    fn set_control_enabled(&self, control: Control, enabled: bool);

    /// Clears the command input field after a successful submission.
    fn clear_input(&self);

    /// Renders the lesson panel. Called once during initialization.
    fn show_lesson(&self, lesson: &LessonView);

    /// Creates a packet artifact anchored between two named peers.
    /// Returns `None` when either anchor is not rendered; the caller
    /// skips the animation silently in that case.
    fn create_packet(&self, from: &str, to: &str, kind: &PacketKind) -> Option<ArtifactId>;

    /// Starts the artifact's transit toward its destination anchor.
    fn begin_transit(&self, artifact: ArtifactId);

    /// Removes the artifact from the drawing surface.
    fn remove_packet(&self, artifact: ArtifactId);

    /// Marks the peering link and both endpoints as active. Holds until
    /// cleared; there is no auto-revert.
    fn highlight_connection(&self);

    /// Clears active highlighting from peers and links.
    fn clear_highlights(&self);
}
