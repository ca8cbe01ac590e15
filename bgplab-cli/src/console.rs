//! Plain-text rendering surface for terminal sessions.
//!
//! Packet transit has no visual duration on a line-oriented terminal;
//! artifacts print on creation and the timing lives entirely in the
//! sequencer.

use std::sync::atomic::{AtomicU64, Ordering};

use bgplab_core::log::OutputEntry;
use bgplab_core::snapshot::PacketKind;
use bgplab_core::surface::{ArtifactId, Control, LessonView, RenderSurface};

#[derive(Default)]
pub struct ConsoleSurface {
    next_artifact: AtomicU64,
}

impl ConsoleSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RenderSurface for ConsoleSurface {
    fn append_log(&self, entry: &OutputEntry) {
        println!("[{}] {}", entry.severity.as_str(), entry.text);
    }

    fn clear_log(&self) {
        println!("----------------------------------------");
    }

    fn set_peer_state(&self, peer: &str, label: &str, _style_class: &str) {
        println!("  {peer}: {label}");
    }

    fn set_step_counter(&self, current: u32, total: u32) {
        println!("  step {current}/{total}");
    }

    fn set_control_enabled(&self, _control: Control, _enabled: bool) {}

    fn clear_input(&self) {}

    fn show_lesson(&self, lesson: &LessonView) {
        if let Some(title) = &lesson.title {
            println!("=== {title} ===");
        }
        println!("{}", lesson.description);
        for (i, instruction) in lesson.instructions.iter().enumerate() {
            println!("  {}. {instruction}", i + 1);
        }
        for command in &lesson.commands {
            println!("  try: {command}");
        }
    }

    fn create_packet(&self, from: &str, to: &str, kind: &PacketKind) -> Option<ArtifactId> {
        let id = self.next_artifact.fetch_add(1, Ordering::Relaxed);
        println!("  {kind} packet: {from} -> {to}");
        Some(ArtifactId(id))
    }

    fn begin_transit(&self, _artifact: ArtifactId) {}

    fn remove_packet(&self, _artifact: ArtifactId) {}

    fn highlight_connection(&self) {
        println!("  [session link active]");
    }

    fn clear_highlights(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_ids_are_distinct() {
        let surface = ConsoleSurface::new();
        let a = surface.create_packet("R1", "R2", &PacketKind::Open).unwrap();
        let b = surface.create_packet("R2", "R1", &PacketKind::Open).unwrap();
        assert_ne!(a, b);
    }
}
