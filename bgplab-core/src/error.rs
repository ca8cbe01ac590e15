//! Error taxonomy for controller operations.
//!
//! Every variant is recoverable at the call site; none poisons the
//! controller. Stale responses are not represented here: a superseded
//! response is discarded silently and the caller still receives `Ok`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ControllerError {
    /// Empty or whitespace-only command input. Rejected locally, no
    /// network round-trip is made.
    #[error("command input is empty")]
    InvalidInput,

    /// The remote service reported a non-success status. The message is
    /// shown verbatim to the operator; local state is left untouched.
    #[error("service error: {0}")]
    Service(String),

    /// Network, timeout, or payload decoding failure talking to the
    /// remote service. Local state is left untouched.
    #[error("simulation service unreachable: {0}")]
    Transport(String),

    /// The controller is not ready for the operation: either a step or
    /// command round-trip is already in flight (overlap is rejected
    /// rather than serialized) or initialization has not completed.
    #[error("controller is busy or uninitialized")]
    Busy,
}
