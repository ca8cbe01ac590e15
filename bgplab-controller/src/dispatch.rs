//! Command validation and submission.
//!
//! Pure boundary between operator input and the remote service: trims
//! and validates the raw input, packages the request, and classifies
//! the reply. Never touches the controller's snapshot.

use std::sync::Arc;

use tracing::debug;

use bgplab_client::{CommandRequest, SimulationService};
use bgplab_core::ControllerError;

/// Classified result of a submitted command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// The service accepted the command; the message describes the
    /// configuration change and simulation steps may have been queued.
    Success(String),
    /// The service parsed the request but rejected the command (for
    /// example a malformed neighbor statement). Message is verbatim.
    ServiceError(String),
}

pub struct CommandDispatcher<S> {
    service: Arc<S>,
}

/// Trims and validates raw operator input. Empty or whitespace-only
/// command text (or a missing target peer) is rejected locally; no
/// network round-trip is made.
pub fn validate_command(
    router_id: &str,
    command_text: &str,
) -> Result<CommandRequest, ControllerError> {
    let command = command_text.trim();
    let router = router_id.trim();
    if command.is_empty() || router.is_empty() {
        return Err(ControllerError::InvalidInput);
    }
    Ok(CommandRequest {
        command: command.to_string(),
        router: router.to_string(),
    })
}

impl<S: SimulationService> CommandDispatcher<S> {
    pub fn new(service: Arc<S>) -> Self {
        Self { service }
    }

    /// Submits a validated request and classifies the reply. Transport
    /// failures propagate as errors.
    pub async fn submit(&self, request: &CommandRequest) -> Result<CommandOutcome, ControllerError> {
        debug!(router = %request.router, "submitting command");
        let reply = self.service.execute_command(request).await?;
        if reply.is_success() {
            Ok(CommandOutcome::Success(reply.message))
        } else {
            Ok(CommandOutcome::ServiceError(reply.message))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_input_and_target() {
        let request = validate_command(" R1 ", "  neighbor 10.0.0.2 remote-as 65002  ").unwrap();
        assert_eq!(request.router, "R1");
        assert_eq!(request.command, "neighbor 10.0.0.2 remote-as 65002");
    }

    #[test]
    fn rejects_empty_and_whitespace_commands() {
        assert!(matches!(
            validate_command("R1", ""),
            Err(ControllerError::InvalidInput)
        ));
        assert!(matches!(
            validate_command("R1", "   \t  "),
            Err(ControllerError::InvalidInput)
        ));
    }

    #[test]
    fn rejects_missing_target_peer() {
        assert!(matches!(
            validate_command("  ", "neighbor 10.0.0.2 activate"),
            Err(ControllerError::InvalidInput)
        ));
    }
}
