//! reqwest-backed `SimulationService`.
//!
//! The service replies with meaningful JSON bodies even on HTTP error
//! statuses (a rejected command arrives as a 4xx/5xx with
//! `{"status": "error", "message": ...}`), so bodies are decoded
//! unconditionally and only transport, timeout, and decode failures map
//! to `ControllerError::Transport`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;
use url::Url;

use bgplab_core::ControllerError;

use crate::wire::{CommandReply, CommandRequest, Lesson, ResetReply, StateReply, StepReply};
use crate::SimulationService;

const LESSON_FIRST: &str = "/api/lessons/first";
const COMMAND_EXECUTE: &str = "/api/command/execute";
const SIMULATION_STEP: &str = "/api/simulation/step";
const SIMULATION_STATE: &str = "/api/simulation/state";
const SIMULATION_RESET: &str = "/api/simulation/reset";

/// HTTP client for the simulation service with a bounded per-request
/// timeout. Expiry is indistinguishable from a connection failure for
/// the controller: both surface as `Transport`.
#[derive(Debug, Clone)]
pub struct HttpSimulationService {
    base: Url,
    client: Client,
}

impl HttpSimulationService {
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ControllerError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ControllerError::Transport(e.to_string()))?;
        Ok(Self { base, client })
    }

    fn endpoint(&self, path: &str) -> Url {
        let mut url = self.base.clone();
        url.set_path(path);
        url
    }

    async fn get<O: DeserializeOwned>(&self, path: &str) -> Result<O, ControllerError> {
        debug!(path, "GET");
        let response = self
            .client
            .get(self.endpoint(path))
            .send()
            .await
            .map_err(|e| ControllerError::Transport(e.to_string()))?;
        response
            .json()
            .await
            .map_err(|e| ControllerError::Transport(e.to_string()))
    }

    async fn post<I, O>(&self, path: &str, body: Option<&I>) -> Result<O, ControllerError>
    where
        I: Serialize + Sync,
        O: DeserializeOwned,
    {
        debug!(path, "POST");
        let mut builder = self.client.post(self.endpoint(path));
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder
            .send()
            .await
            .map_err(|e| ControllerError::Transport(e.to_string()))?;
        response
            .json()
            .await
            .map_err(|e| ControllerError::Transport(e.to_string()))
    }
}

#[async_trait]
impl SimulationService for HttpSimulationService {
    async fn first_lesson(&self) -> Result<Lesson, ControllerError> {
        self.get(LESSON_FIRST).await
    }

    async fn execute_command(
        &self,
        request: &CommandRequest,
    ) -> Result<CommandReply, ControllerError> {
        self.post(COMMAND_EXECUTE, Some(request)).await
    }

    async fn advance_step(&self) -> Result<StepReply, ControllerError> {
        self.post::<(), _>(SIMULATION_STEP, None).await
    }

    async fn fetch_state(&self) -> Result<StateReply, ControllerError> {
        self.get(SIMULATION_STATE).await
    }

    async fn reset(&self) -> Result<ResetReply, ControllerError> {
        self.post::<(), _>(SIMULATION_RESET, None).await
    }
}
