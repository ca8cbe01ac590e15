//! Canonical simulation state.
//!
//! The controller owns exactly one `SimulationSnapshot` at a time and
//! replaces it wholesale on every step/command/reset response. Views only
//! read it. `StepResult` and `Animation` live for a single advance call.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-peer BGP session state as reported by the remote service.
///
/// The remote service owns the state vocabulary; labels it sends that are
/// not part of the classic FSM are preserved as `Other` rather than
/// rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum BgpState {
    Idle,
    Connect,
    Active,
    OpenSent,
    OpenConfirm,
    Established,
    Other(String),
}

impl BgpState {
    /// Display label, exactly as the status view renders it.
    pub fn label(&self) -> &str {
        match self {
            BgpState::Idle => "Idle",
            BgpState::Connect => "Connect",
            BgpState::Active => "Active",
            BgpState::OpenSent => "OpenSent",
            BgpState::OpenConfirm => "OpenConfirm",
            BgpState::Established => "Established",
            BgpState::Other(label) => label,
        }
    }

    /// Case-normalized style class derived from the label.
    pub fn style_class(&self) -> String {
        self.label().to_ascii_lowercase()
    }
}

impl From<String> for BgpState {
    fn from(label: String) -> Self {
        match label.as_str() {
            "Idle" => BgpState::Idle,
            "Connect" => BgpState::Connect,
            "Active" => BgpState::Active,
            "OpenSent" => BgpState::OpenSent,
            "OpenConfirm" => BgpState::OpenConfirm,
            "Established" => BgpState::Established,
            _ => BgpState::Other(label),
        }
    }
}

impl From<BgpState> for String {
    fn from(state: BgpState) -> Self {
        state.label().to_string()
    }
}

impl fmt::Display for BgpState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Default for BgpState {
    fn default() -> Self {
        BgpState::Idle
    }
}

/// State of a single simulated peer. Owned exclusively by the controller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerState {
    pub state: BgpState,
}

/// Full simulation state, replaced as a unit on every authoritative
/// response from the remote service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationSnapshot {
    pub peers: BTreeMap<String, PeerState>,
    pub current_step: u32,
    pub total_steps: u32,
    pub is_running: bool,
}

impl SimulationSnapshot {
    /// Builds a snapshot, normalizing the reported counters so the
    /// invariants `current_step <= total_steps` and `!is_running` at
    /// completion hold regardless of what the wire carried.
    pub fn new(
        peers: BTreeMap<String, PeerState>,
        current_step: u32,
        total_steps: u32,
        is_running: bool,
    ) -> Self {
        let current_step = current_step.min(total_steps);
        let is_running = is_running && current_step < total_steps;
        Self {
            peers,
            current_step,
            total_steps,
            is_running,
        }
    }

    /// True once every queued step has been executed. Also true for the
    /// zeroed post-reset snapshot, where no steps exist yet.
    pub fn is_complete(&self) -> bool {
        self.current_step >= self.total_steps
    }

    /// Invariant check used by tests after every controller operation.
    pub fn invariants_hold(&self) -> bool {
        self.current_step <= self.total_steps && !(self.is_complete() && self.is_running)
    }
}

/// BGP packet kinds that appear in packet-flow animations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PacketKind {
    Open,
    Keepalive,
    Update,
    Notification,
    Other(String),
}

impl PacketKind {
    pub fn label(&self) -> &str {
        match self {
            PacketKind::Open => "OPEN",
            PacketKind::Keepalive => "KEEPALIVE",
            PacketKind::Update => "UPDATE",
            PacketKind::Notification => "NOTIFICATION",
            PacketKind::Other(label) => label,
        }
    }
}

impl From<String> for PacketKind {
    fn from(label: String) -> Self {
        match label.as_str() {
            "OPEN" => PacketKind::Open,
            "KEEPALIVE" => PacketKind::Keepalive,
            "UPDATE" => PacketKind::Update,
            "NOTIFICATION" => PacketKind::Notification,
            _ => PacketKind::Other(label),
        }
    }
}

impl From<PacketKind> for String {
    fn from(kind: PacketKind) -> Self {
        kind.label().to_string()
    }
}

impl fmt::Display for PacketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Visual effect attached to a simulation step. Ephemeral: consumed by
/// the sequencer within the advance call that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Animation {
    PacketFlow {
        from: String,
        to: String,
        packet: PacketKind,
    },
    ConnectionEstablished,
}

/// Outcome of a single step advance, produced once per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepResult {
    pub description: String,
    pub animation: Option<Animation>,
}
