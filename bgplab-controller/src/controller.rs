//! Controller core: snapshot ownership, operation sequencing, and
//! staleness suppression.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, error, info, instrument, warn};

use bgplab_client::SimulationService;
use bgplab_config::BgplabConfig;
use bgplab_core::log::{OutputEntry, OutputLog, Severity};
use bgplab_core::snapshot::{SimulationSnapshot, StepResult};
use bgplab_core::surface::{Control, RenderSurface};
use bgplab_core::ControllerError;
use bgplab_telemetry::MetricsRecorder;

use crate::dispatch::{validate_command, CommandDispatcher, CommandOutcome};
use crate::sequencer::AnimationSequencer;

const MSG_RESET_PLACEHOLDER: &str = "Simulation reset. Ready for commands.";
const MSG_EMPTY_COMMAND: &str = "Enter a command";
const MSG_COMMAND_FAILED: &str = "Command execution failed";
const MSG_STEP_FAILED: &str = "Simulation step failed";
const MSG_RESET_FAILED: &str = "Failed to reset simulation";
const MSG_LESSON_FAILED: &str = "Failed to load lesson";
const MSG_PAUSED: &str = "Simulation paused";
const MSG_COMPLETE: &str = "Simulation complete!";

/// Controller position in its operation lifecycle.
///
/// `Complete` is left only through `reset()` or a command that queues
/// new steps. `pause()` never moves the phase, only the running flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Idle,
    StepInFlight,
    CommandInFlight,
    Complete,
}

struct ControllerState {
    snapshot: SimulationSnapshot,
    phase: Phase,
    /// Bumped by every reset. A response captured under an older epoch
    /// is stale and must never be rendered.
    epoch: u64,
    log: OutputLog,
}

/// Orchestrates command submission, step advance, pause, and reset
/// against the remote simulation service.
///
/// The controller is the single owner of the snapshot; every update is
/// a wholesale replacement under the state lock, which is never held
/// across an await point.
pub struct SimulationController<S: SimulationService> {
    service: Arc<S>,
    surface: Arc<dyn RenderSurface>,
    sequencer: AnimationSequencer,
    dispatcher: CommandDispatcher<S>,
    metrics: MetricsRecorder,
    state: Mutex<ControllerState>,
}

impl<S: SimulationService> SimulationController<S> {
    pub fn new(
        service: Arc<S>,
        surface: Arc<dyn RenderSurface>,
        config: &BgplabConfig,
        metrics: MetricsRecorder,
    ) -> Self {
        Self {
            dispatcher: CommandDispatcher::new(Arc::clone(&service)),
            sequencer: AnimationSequencer::new(Arc::clone(&surface), config.animation.clone()),
            service,
            surface,
            metrics,
            state: Mutex::new(ControllerState {
                snapshot: SimulationSnapshot::default(),
                phase: Phase::Uninitialized,
                epoch: 0,
                log: OutputLog::with_capacity(config.log.capacity),
            }),
        }
    }

    /// Loads the lesson panel and fetches the initial snapshot (a fresh
    /// reset). A lesson fetch failure is logged and does not abort the
    /// simulation state load; a reset failure leaves the controller
    /// uninitialized with input disabled.
    #[instrument(skip(self))]
    pub async fn initialize(&self) -> Result<(), ControllerError> {
        match self.service.first_lesson().await {
            Ok(lesson) => self.surface.show_lesson(&lesson.into_view()),
            Err(e) => {
                warn!(error = %e, "lesson fetch failed");
                let mut s = self.state.lock();
                self.log(&mut s, Severity::Error, MSG_LESSON_FAILED);
            }
        }
        self.reset().await
    }

    /// Requests one step from the remote service, applies the returned
    /// snapshot, and plays the step's animation to completion before the
    /// status view and step counter are updated.
    #[instrument(skip(self))]
    pub async fn advance_step(&self) -> Result<(), ControllerError> {
        let epoch = {
            let mut s = self.state.lock();
            match s.phase {
                Phase::Idle => {}
                Phase::Complete => {
                    debug!("step requested after completion; ignoring");
                    return Ok(());
                }
                _ => return Err(ControllerError::Busy),
            }
            s.phase = Phase::StepInFlight;
            s.epoch
        };
        self.surface.set_control_enabled(Control::Step, false);

        match self.service.advance_step().await {
            Ok(reply) if reply.is_success() => {
                let step = {
                    let mut s = self.state.lock();
                    if s.epoch != epoch {
                        debug!("discarding stale step reply");
                        return Ok(());
                    }
                    s.snapshot = reply.to_snapshot();
                    let step: Option<StepResult> = reply.step.map(|w| w.into_step_result());
                    if let Some(step) = &step {
                        let current = s.snapshot.current_step;
                        self.log(
                            &mut s,
                            Severity::Info,
                            format!("Step {current}: {}", step.description),
                        );
                    }
                    step
                };

                // Motion first, authoritative state second: the status
                // view is not touched until playback resolves.
                if let Some(StepResult {
                    animation: Some(animation),
                    ..
                }) = &step
                {
                    self.sequencer.play(animation).await;
                }

                let mut s = self.state.lock();
                if s.epoch != epoch {
                    debug!("reset superseded step; skipping render");
                    return Ok(());
                }
                self.render_status(&s.snapshot);
                self.metrics.steps_total.inc();
                if s.snapshot.is_complete() {
                    self.log(&mut s, Severity::Success, MSG_COMPLETE);
                }
                self.settle(&mut s);
                Ok(())
            }
            Ok(reply) if reply.is_completed() => {
                let mut s = self.state.lock();
                if s.epoch != epoch {
                    return Ok(());
                }
                self.log(&mut s, Severity::Info, reply.message);
                s.phase = Phase::Complete;
                self.surface.set_control_enabled(Control::Step, false);
                Ok(())
            }
            Ok(reply) => {
                let mut s = self.state.lock();
                if s.epoch != epoch {
                    return Ok(());
                }
                self.metrics.errors_total.inc();
                self.log(&mut s, Severity::Error, reply.message.clone());
                self.settle(&mut s);
                Err(ControllerError::Service(reply.message))
            }
            Err(e) => {
                let mut s = self.state.lock();
                if s.epoch != epoch {
                    return Ok(());
                }
                error!(error = %e, "simulation step failed");
                self.metrics.errors_total.inc();
                self.log(&mut s, Severity::Error, MSG_STEP_FAILED);
                self.settle(&mut s);
                Err(e)
            }
        }
    }

    /// Validates and submits an operator command, then refreshes the
    /// snapshot since commands may queue new simulation steps.
    #[instrument(skip(self, command_text), fields(router = %router_id))]
    pub async fn submit_command(
        &self,
        router_id: &str,
        command_text: &str,
    ) -> Result<(), ControllerError> {
        let request = match validate_command(router_id, command_text) {
            Ok(request) => request,
            Err(e) => {
                let mut s = self.state.lock();
                self.log(&mut s, Severity::Error, MSG_EMPTY_COMMAND);
                return Err(e);
            }
        };

        let (epoch, return_phase) = {
            let mut s = self.state.lock();
            match s.phase {
                Phase::Idle | Phase::Complete => {}
                _ => return Err(ControllerError::Busy),
            }
            let return_phase = s.phase;
            s.phase = Phase::CommandInFlight;
            self.log(
                &mut s,
                Severity::Command,
                format!("{}# {}", request.router, request.command),
            );
            (s.epoch, return_phase)
        };

        match self.dispatcher.submit(&request).await {
            Ok(CommandOutcome::Success(message)) => {
                {
                    let mut s = self.state.lock();
                    if s.epoch != epoch {
                        return Ok(());
                    }
                    self.log(&mut s, Severity::Success, message);
                }
                self.surface.clear_input();
                self.metrics.commands_total.inc();

                self.refresh_snapshot(epoch).await;

                let mut s = self.state.lock();
                if s.epoch != epoch {
                    return Ok(());
                }
                self.settle(&mut s);
                Ok(())
            }
            Ok(CommandOutcome::ServiceError(message)) => {
                let mut s = self.state.lock();
                if s.epoch != epoch {
                    return Ok(());
                }
                self.metrics.errors_total.inc();
                self.log(&mut s, Severity::Error, message.clone());
                s.phase = return_phase;
                Err(ControllerError::Service(message))
            }
            Err(e) => {
                let mut s = self.state.lock();
                if s.epoch != epoch {
                    return Ok(());
                }
                error!(error = %e, "command submission failed");
                self.metrics.errors_total.inc();
                self.log(&mut s, Severity::Error, MSG_COMMAND_FAILED);
                s.phase = return_phase;
                Err(e)
            }
        }
    }

    /// Local-only: clears the running flag and re-enables stepping. The
    /// remote service is not contacted; resuming happens implicitly via
    /// the next `advance_step`.
    pub fn pause(&self) {
        let mut s = self.state.lock();
        if s.phase == Phase::Uninitialized {
            return;
        }
        s.snapshot = SimulationSnapshot::new(
            s.snapshot.peers.clone(),
            s.snapshot.current_step,
            s.snapshot.total_steps,
            false,
        );
        self.surface.set_control_enabled(Control::Pause, false);
        self.surface
            .set_control_enabled(Control::Step, !s.snapshot.is_complete());
        self.log(&mut s, Severity::Info, MSG_PAUSED);
    }

    /// Fetches a zeroed snapshot from the remote service, clears the
    /// output log to a single placeholder, and cancels any pending
    /// visual effect. Any in-flight response is superseded.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<(), ControllerError> {
        let (epoch, was_uninitialized) = {
            let mut s = self.state.lock();
            s.epoch += 1;
            let was_uninitialized = s.phase == Phase::Uninitialized;
            // The in-flight operation, if any, is logically cancelled:
            // its reply now fails the epoch check.
            if matches!(s.phase, Phase::StepInFlight | Phase::CommandInFlight) {
                s.phase = Phase::Idle;
            }
            (s.epoch, was_uninitialized)
        };
        self.sequencer.cancel_all();

        match self.service.reset().await {
            Ok(reply) if reply.is_success() => {
                let mut s = self.state.lock();
                if s.epoch != epoch {
                    debug!("reset superseded by a newer reset");
                    return Ok(());
                }
                s.snapshot = reply.to_snapshot();
                s.phase = Phase::Idle;
                s.log.clear();
                self.surface.clear_log();
                self.surface.clear_input();
                self.surface.set_control_enabled(Control::Input, true);
                self.surface.set_control_enabled(Control::Step, false);
                self.surface.set_control_enabled(Control::Pause, false);
                self.log(&mut s, Severity::Info, MSG_RESET_PLACEHOLDER);
                self.render_status(&s.snapshot);
                info!("simulation reset");
                Ok(())
            }
            Ok(reply) => {
                let mut s = self.state.lock();
                if s.epoch != epoch {
                    return Ok(());
                }
                self.metrics.errors_total.inc();
                let message = if reply.message.is_empty() {
                    MSG_RESET_FAILED.to_string()
                } else {
                    reply.message.clone()
                };
                self.log(&mut s, Severity::Error, message);
                if !was_uninitialized {
                    self.settle(&mut s);
                }
                Err(ControllerError::Service(reply.message))
            }
            Err(e) => {
                let mut s = self.state.lock();
                if s.epoch != epoch {
                    return Ok(());
                }
                error!(error = %e, "reset failed");
                self.metrics.errors_total.inc();
                self.log(&mut s, Severity::Error, MSG_RESET_FAILED);
                if !was_uninitialized {
                    self.settle(&mut s);
                }
                Err(e)
            }
        }
    }

    /// Pulls the latest snapshot and re-renders the status view. A
    /// failure keeps the stale view; the next successful operation
    /// re-renders.
    #[instrument(skip(self))]
    pub async fn refresh_state(&self) {
        let epoch = self.state.lock().epoch;
        self.refresh_snapshot(epoch).await;
    }

    async fn refresh_snapshot(&self, epoch: u64) {
        match self.service.fetch_state().await {
            Ok(reply) => {
                let mut s = self.state.lock();
                if s.epoch != epoch {
                    debug!("discarding stale state reply");
                    return;
                }
                s.snapshot = reply.to_snapshot();
                self.render_status(&s.snapshot);
            }
            Err(e) => {
                warn!(error = %e, "state refresh failed");
            }
        }
    }

    pub fn snapshot(&self) -> SimulationSnapshot {
        self.state.lock().snapshot.clone()
    }

    pub fn phase(&self) -> Phase {
        self.state.lock().phase
    }

    pub fn log_entries(&self) -> Vec<OutputEntry> {
        self.state.lock().log.iter().cloned().collect()
    }

    pub fn metrics(&self) -> &MetricsRecorder {
        &self.metrics
    }

    fn log(&self, s: &mut ControllerState, severity: Severity, text: impl Into<String>) {
        let entry = OutputEntry::new(severity, text);
        self.surface.append_log(&entry);
        s.log.push(entry);
    }

    fn render_status(&self, snapshot: &SimulationSnapshot) {
        for (peer, state) in &snapshot.peers {
            self.surface
                .set_peer_state(peer, state.state.label(), &state.state.style_class());
        }
        self.surface
            .set_step_counter(snapshot.current_step, snapshot.total_steps);
    }

    /// Re-derives phase and control availability from the snapshot.
    /// Called at every settle point so no failure path leaves the
    /// controls stuck disabled.
    fn settle(&self, s: &mut ControllerState) {
        s.phase = if s.snapshot.is_complete() {
            Phase::Complete
        } else {
            Phase::Idle
        };
        self.surface
            .set_control_enabled(Control::Step, !s.snapshot.is_complete());
        self.surface
            .set_control_enabled(Control::Pause, s.snapshot.is_running);
    }
}
