//! # bgplab-controller
//!
//! The stepwise simulation controller: owns the canonical local snapshot,
//! sequences remote round-trips against animation playback, and keeps the
//! rendered state consistent with the remote source of truth under
//! asynchronous, potentially-overlapping operator input.
//!
//! ### Ordering guarantees
//! - Step advance and animation playback are sequenced, never concurrent:
//!   a new snapshot is not rendered while a previous step's animation is
//!   unresolved.
//! - Step and command round-trips never overlap; a second operation while
//!   one is in flight is rejected with `ControllerError::Busy`.
//! - `reset()` supersedes in-flight responses via a monotonic epoch; a
//!   late response is discarded, never rendered.

mod controller;
pub mod dispatch;
pub mod sequencer;

pub use controller::{Phase, SimulationController};
pub use dispatch::{validate_command, CommandDispatcher, CommandOutcome};
pub use sequencer::AnimationSequencer;
