//! Animation playback.
//!
//! Plays exactly one visual effect to completion per call. Packet-flow
//! playback resolves only after the nominal timeline has elapsed
//! (start delay, then transit); connection highlights apply immediately
//! and hold until cleared. At most one transient artifact exists per
//! call and none survive `cancel_all`.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::Notify;
use tracing::debug;

use bgplab_config::AnimationConfig;
use bgplab_core::snapshot::{Animation, PacketKind};
use bgplab_core::surface::{ArtifactId, RenderSurface};

pub struct AnimationSequencer {
    surface: Arc<dyn RenderSurface>,
    timings: AnimationConfig,
    cancel: Notify,
    active: Mutex<Option<ArtifactId>>,
}

impl AnimationSequencer {
    pub fn new(surface: Arc<dyn RenderSurface>, timings: AnimationConfig) -> Self {
        Self {
            surface,
            timings,
            cancel: Notify::new(),
            active: Mutex::new(None),
        }
    }

    /// Plays the effect to completion. Resolves early only when
    /// `cancel_all` interrupts the playback.
    pub async fn play(&self, animation: &Animation) {
        match animation {
            Animation::PacketFlow { from, to, packet } => {
                self.play_packet_flow(from, to, packet).await;
            }
            Animation::ConnectionEstablished => {
                // Immediate highlight-and-hold; no auto-revert.
                self.surface.highlight_connection();
            }
        }
    }

    async fn play_packet_flow(&self, from: &str, to: &str, packet: &PacketKind) {
        let Some(artifact) = self.surface.create_packet(from, to, packet) else {
            // Anchors that are not rendered skip the animation silently.
            debug!(from, to, "animation anchors not rendered, skipping");
            return;
        };
        *self.active.lock() = Some(artifact);

        tokio::select! {
            _ = self.cancel.notified() => {
                // cancel_all already removed the artifact.
            }
            _ = self.run_transit(artifact) => {
                if let Some(artifact) = self.active.lock().take() {
                    self.surface.remove_packet(artifact);
                }
            }
        }
    }

    async fn run_transit(&self, artifact: ArtifactId) {
        tokio::time::sleep(self.timings.start_delay()).await;
        self.surface.begin_transit(artifact);
        tokio::time::sleep(self.timings.transit()).await;
    }

    /// Interrupts any in-flight playback, removes its artifact, and
    /// clears active highlighting. Invoked by the controller's reset.
    pub fn cancel_all(&self) {
        if let Some(artifact) = self.active.lock().take() {
            self.surface.remove_packet(artifact);
        }
        self.cancel.notify_waiters();
        self.surface.clear_highlights();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU64, Ordering};

    use bgplab_core::log::OutputEntry;
    use bgplab_core::surface::{Control, LessonView};

    /// Records surface calls relevant to artifact lifecycle.
    #[derive(Default)]
    struct ArtifactSurface {
        next_id: AtomicU64,
        events: Mutex<Vec<String>>,
        known_peers: Vec<String>,
    }

    impl ArtifactSurface {
        fn with_peers(peers: &[&str]) -> Self {
            Self {
                known_peers: peers.iter().map(|p| p.to_string()).collect(),
                ..Self::default()
            }
        }

        fn events(&self) -> Vec<String> {
            self.events.lock().clone()
        }
    }

    impl RenderSurface for ArtifactSurface {
        fn append_log(&self, _entry: &OutputEntry) {}
        fn clear_log(&self) {}
        fn set_peer_state(&self, _peer: &str, _label: &str, _style_class: &str) {}
        fn set_step_counter(&self, _current: u32, _total: u32) {}
        fn set_control_enabled(&self, _control: Control, _enabled: bool) {}
        fn clear_input(&self) {}
        fn show_lesson(&self, _lesson: &LessonView) {}

        fn create_packet(&self, from: &str, to: &str, kind: &PacketKind) -> Option<ArtifactId> {
            if !self.known_peers.iter().any(|p| p == from)
                || !self.known_peers.iter().any(|p| p == to)
            {
                return None;
            }
            let id = ArtifactId(self.next_id.fetch_add(1, Ordering::Relaxed));
            self.events.lock().push(format!("create:{}:{}", id.0, kind));
            Some(id)
        }

        fn begin_transit(&self, artifact: ArtifactId) {
            self.events.lock().push(format!("transit:{}", artifact.0));
        }

        fn remove_packet(&self, artifact: ArtifactId) {
            self.events.lock().push(format!("remove:{}", artifact.0));
        }

        fn highlight_connection(&self) {
            self.events.lock().push("highlight".to_string());
        }

        fn clear_highlights(&self) {
            self.events.lock().push("clear-highlights".to_string());
        }
    }

    fn sequencer(surface: Arc<ArtifactSurface>) -> AnimationSequencer {
        AnimationSequencer::new(surface, AnimationConfig::default())
    }

    #[tokio::test(start_paused = true)]
    async fn packet_flow_creates_moves_and_removes_one_artifact() {
        let surface = Arc::new(ArtifactSurface::with_peers(&["R1", "R2"]));
        let seq = sequencer(surface.clone());

        seq.play(&Animation::PacketFlow {
            from: "R1".into(),
            to: "R2".into(),
            packet: PacketKind::Open,
        })
        .await;

        assert_eq!(
            surface.events(),
            ["create:0:OPEN", "transit:0", "remove:0"]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn unresolved_anchor_is_a_silent_noop() {
        let surface = Arc::new(ArtifactSurface::with_peers(&["R1"]));
        let seq = sequencer(surface.clone());

        seq.play(&Animation::PacketFlow {
            from: "R1".into(),
            to: "R9".into(),
            packet: PacketKind::Keepalive,
        })
        .await;

        assert!(surface.events().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn connection_established_highlights_immediately() {
        let surface = Arc::new(ArtifactSurface::with_peers(&[]));
        let seq = sequencer(surface.clone());

        seq.play(&Animation::ConnectionEstablished).await;
        assert_eq!(surface.events(), ["highlight"]);
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_interrupts_playback_and_removes_artifact() {
        let surface = Arc::new(ArtifactSurface::with_peers(&["R1", "R2"]));
        let seq = Arc::new(sequencer(surface.clone()));

        let playback = {
            let seq = seq.clone();
            tokio::spawn(async move {
                seq.play(&Animation::PacketFlow {
                    from: "R1".into(),
                    to: "R2".into(),
                    packet: PacketKind::Open,
                })
                .await;
            })
        };

        // Let the playback reach its first suspend point, then cancel
        // well before the nominal timeline would have elapsed.
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        seq.cancel_all();
        playback.await.unwrap();

        let events = surface.events();
        assert!(events.contains(&"create:0:OPEN".to_string()));
        assert_eq!(events.iter().filter(|e| e.starts_with("remove:")).count(), 1);
        assert!(events.contains(&"clear-highlights".to_string()));
        // Transit never started: cancellation landed during the start delay.
        assert!(!events.iter().any(|e| e.starts_with("transit:")));
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_all_without_playback_only_clears_highlights() {
        let surface = Arc::new(ArtifactSurface::with_peers(&[]));
        let seq = sequencer(surface.clone());

        seq.cancel_all();
        assert_eq!(surface.events(), ["clear-highlights"]);

        // A stale cancellation must not eat the next playback's timeline:
        // highlight playback still applies.
        seq.play(&Animation::ConnectionEstablished).await;
        assert_eq!(surface.events(), ["clear-highlights", "highlight"]);
    }
}
