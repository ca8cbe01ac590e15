//! # bgplab-client
//!
//! Remote-service boundary of the simulation controller. The simulation
//! itself (BGP state transitions, step generation) lives behind a
//! JSON-over-HTTP API; this crate defines the `SimulationService` seam
//! the controller drives, the wire types for its five endpoints, and the
//! reqwest-backed production implementation.

use async_trait::async_trait;

use bgplab_core::ControllerError;

mod http;
pub mod wire;

pub use http::HttpSimulationService;
pub use wire::{CommandReply, CommandRequest, Lesson, ResetReply, StateReply, StepReply};

/// Asynchronous interface to the remote simulation service.
///
/// Semantic failures (a reply with a non-success status) are carried
/// inside the reply types; `Err` is reserved for transport, timeout, and
/// decoding failures.
#[async_trait]
pub trait SimulationService: Send + Sync {
    /// GET `/api/lessons/first`
    async fn first_lesson(&self) -> Result<Lesson, ControllerError>;

    /// POST `/api/command/execute`
    async fn execute_command(
        &self,
        request: &CommandRequest,
    ) -> Result<CommandReply, ControllerError>;

    /// POST `/api/simulation/step`
    async fn advance_step(&self) -> Result<StepReply, ControllerError>;

    /// GET `/api/simulation/state`
    async fn fetch_state(&self) -> Result<StateReply, ControllerError>;

    /// POST `/api/simulation/reset`
    async fn reset(&self) -> Result<ResetReply, ControllerError>;
}
