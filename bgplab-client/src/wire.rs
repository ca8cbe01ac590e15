//! Wire types for the simulation service API.
//!
//! Shapes follow the service's JSON exactly; endpoint paths are part of
//! the compatibility contract and live in the HTTP implementation.
//! Conversions into the `bgplab-core` model happen here so the
//! controller never sees raw wire data.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use bgplab_core::snapshot::{Animation, PacketKind, PeerState, SimulationSnapshot, StepResult};
use bgplab_core::surface::LessonView;

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_COMPLETED: &str = "completed";

/// Lesson payload from `/api/lessons/first`. The service also sends a
/// `title`, which older deployments omit.
#[derive(Debug, Clone, Deserialize)]
pub struct Lesson {
    #[serde(default)]
    pub title: Option<String>,
    pub description: String,
    #[serde(default)]
    pub instructions: Vec<String>,
    #[serde(default)]
    pub commands: Vec<String>,
}

impl Lesson {
    pub fn into_view(self) -> LessonView {
        LessonView {
            title: self.title,
            description: self.description,
            instructions: self.instructions,
            commands: self.commands,
        }
    }
}

/// Request body for `/api/command/execute`.
#[derive(Debug, Clone, Serialize)]
pub struct CommandRequest {
    pub command: String,
    pub router: String,
}

/// Reply to a command execution.
#[derive(Debug, Clone, Deserialize)]
pub struct CommandReply {
    pub status: String,
    #[serde(default)]
    pub message: String,
}

impl CommandReply {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// Per-peer state as the service reports it. Extra fields (addresses,
/// AS numbers, canvas positions) are service-internal and ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct WirePeer {
    pub bgp_state: bgplab_core::snapshot::BgpState,
}

/// One simulation step as carried inside a step reply.
#[derive(Debug, Clone, Deserialize)]
pub struct WireStep {
    pub description: String,
    #[serde(default)]
    pub animation: Option<String>,
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub packet_type: Option<String>,
}

impl WireStep {
    /// Decodes the step into the core model. An unknown animation tag or
    /// a packet-flow step missing its endpoints decodes to no animation;
    /// the step description still renders.
    pub fn into_step_result(self) -> StepResult {
        let animation = match self.animation.as_deref() {
            Some("packet_flow") => match (self.from, self.to) {
                (Some(from), Some(to)) => Some(Animation::PacketFlow {
                    from,
                    to,
                    packet: PacketKind::from(self.packet_type.unwrap_or_default()),
                }),
                _ => None,
            },
            Some("connection_established") => Some(Animation::ConnectionEstablished),
            _ => None,
        };
        StepResult {
            description: self.description,
            animation,
        }
    }
}

/// Reply to `/api/simulation/step`.
///
/// On `success` the snapshot fields and `step` are populated; on
/// `completed` or `error` only `message` is meaningful.
#[derive(Debug, Clone, Deserialize)]
pub struct StepReply {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub routers: HashMap<String, WirePeer>,
    #[serde(default)]
    pub current_step: u32,
    #[serde(default)]
    pub total_steps: u32,
    #[serde(default)]
    pub step: Option<WireStep>,
}

impl StepReply {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    pub fn is_completed(&self) -> bool {
        self.status == STATUS_COMPLETED
    }

    /// Builds the post-step snapshot. A successful step reply means the
    /// simulation is running unless it just reached the final step.
    pub fn to_snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot::new(
            peers_from_wire(&self.routers),
            self.current_step,
            self.total_steps,
            true,
        )
    }
}

/// Reply to `/api/simulation/state`. The service emits `is_running` in
/// snake_case; some frontends were written against `isRunning`, so both
/// spellings are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct StateReply {
    #[serde(default)]
    pub routers: HashMap<String, WirePeer>,
    #[serde(default)]
    pub current_step: u32,
    #[serde(default)]
    pub total_steps: u32,
    #[serde(default, rename = "isRunning", alias = "is_running")]
    pub is_running: bool,
}

impl StateReply {
    pub fn to_snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot::new(
            peers_from_wire(&self.routers),
            self.current_step,
            self.total_steps,
            self.is_running,
        )
    }
}

/// Reply to `/api/simulation/reset`. Step counters restart at zero and
/// are not part of the payload.
#[derive(Debug, Clone, Deserialize)]
pub struct ResetReply {
    pub status: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub routers: HashMap<String, WirePeer>,
}

impl ResetReply {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    pub fn to_snapshot(&self) -> SimulationSnapshot {
        SimulationSnapshot::new(peers_from_wire(&self.routers), 0, 0, false)
    }
}

fn peers_from_wire(routers: &HashMap<String, WirePeer>) -> BTreeMap<String, PeerState> {
    routers
        .iter()
        .map(|(id, peer)| {
            (
                id.clone(),
                PeerState {
                    state: peer.bgp_state.clone(),
                },
            )
        })
        .collect()
}
