//! # bgplab-core
//!
//! Foundation layer for the stepwise BGP simulation controller.
//! Holds the domain model shared by the controller, the remote-service
//! client, and the rendering frontends.
//!
//! ### Key Submodules:
//! - `snapshot`: canonical simulation state owned by the controller
//! - `log`: bounded, severity-tagged output log with FIFO eviction
//! - `surface`: declarative rendering seam consumed by frontends
//! - `error`: controller-facing error taxonomy

pub mod error;
pub mod log;
pub mod snapshot;
pub mod surface;

pub mod prelude {
    pub use crate::error::ControllerError;
    pub use crate::log::{OutputEntry, OutputLog, Severity};
    pub use crate::snapshot::{
        Animation, BgpState, PacketKind, PeerState, SimulationSnapshot, StepResult,
    };
    pub use crate::surface::{ArtifactId, Control, LessonView, RenderSurface};
}

pub use error::ControllerError;
