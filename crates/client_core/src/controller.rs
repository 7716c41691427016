//! Request controller: drives one prediction attempt at a time and publishes
//! its state to observers.

use std::sync::Arc;

use serde_json::Value;
use shared::{error::ErrorBody, protocol::PredictResponse};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    error::PredictionError,
    input::{validate, PredictionInput},
    transport::{PredictionTransport, TransportResponse},
};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum RequestState {
    #[default]
    Idle,
    Validating,
    InFlight,
    Succeeded(f64),
    Failed(String),
}

impl RequestState {
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Validating | Self::InFlight)
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded(_) | Self::Failed(_))
    }

    pub fn prediction(&self) -> Option<f64> {
        match self {
            Self::Succeeded(value) => Some(*value),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

const ABANDONED_MESSAGE: &str = "Prediction request was abandoned before completing";

/// Publishes `Failed` when an attempt is dropped before it settles.
struct AttemptGuard<'a> {
    state: &'a watch::Sender<RequestState>,
    settled: bool,
}

impl<'a> AttemptGuard<'a> {
    fn new(state: &'a watch::Sender<RequestState>) -> Self {
        Self {
            state,
            settled: false,
        }
    }

    fn settle(mut self, terminal: RequestState) {
        self.state.send_replace(terminal);
        self.settled = true;
    }
}

impl Drop for AttemptGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            warn!("prediction attempt dropped before completion");
            self.state
                .send_replace(RequestState::Failed(ABANDONED_MESSAGE.to_string()));
        }
    }
}

pub struct RequestController {
    transport: Arc<dyn PredictionTransport>,
    state: watch::Sender<RequestState>,
}

impl RequestController {
    pub fn new(transport: Arc<dyn PredictionTransport>) -> Self {
        let (state, _) = watch::channel(RequestState::Idle);
        Self { transport, state }
    }

    pub fn state(&self) -> RequestState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<RequestState> {
        self.state.subscribe()
    }

    /// Runs one attempt for `input`. Returns `None` without touching the
    /// transport when another attempt is still busy, otherwise the terminal
    /// state the attempt ended in.
    pub async fn submit(&self, input: &PredictionInput) -> Option<RequestState> {
        let started = self.state.send_if_modified(|current| {
            if current.is_busy() {
                return false;
            }
            *current = RequestState::Validating;
            true
        });
        if !started {
            debug!("prediction attempt already in flight; ignoring submit");
            return None;
        }
        let guard = AttemptGuard::new(&self.state);

        let terminal = match self.run_attempt(input).await {
            Ok(prediction) => {
                info!(prediction, "prediction succeeded");
                RequestState::Succeeded(prediction)
            }
            Err(err) => {
                warn!(kind = err.kind(), error = %err, "prediction failed");
                RequestState::Failed(err.user_message())
            }
        };
        guard.settle(terminal.clone());
        Some(terminal)
    }

    async fn run_attempt(&self, input: &PredictionInput) -> Result<f64, PredictionError> {
        let record = validate(input)?;
        self.state.send_replace(RequestState::InFlight);

        let payload = record.into_payload();
        debug!(
            endpoint = %self.transport.endpoint(),
            payload = ?payload,
            "sending prediction request"
        );
        let response = self.transport.post_prediction(&payload).await?;
        debug!(status = response.status, body = %response.body, "prediction response received");
        interpret(&response)
    }
}

/// Maps a received response onto a prediction or a failure.
pub fn interpret_response(status: u16, body: &str) -> Result<f64, PredictionError> {
    interpret(&TransportResponse::new(status, body))
}

fn interpret(response: &TransportResponse) -> Result<f64, PredictionError> {
    let parsed = serde_json::from_str::<Value>(&response.body).ok();

    if !response.is_success() {
        return Err(PredictionError::Server {
            status: response.status,
            message: server_error_message(response.status, &response.body, parsed.as_ref()),
        });
    }

    let value = parsed.ok_or(PredictionError::MalformedResponse)?;
    let response: PredictResponse =
        serde_json::from_value(value).map_err(|_| PredictionError::MalformedResponse)?;
    if !response.prediction.is_finite() {
        return Err(PredictionError::MalformedResponse);
    }
    Ok(response.prediction)
}

fn server_error_message(status: u16, raw: &str, parsed: Option<&Value>) -> String {
    let Some(value) = parsed else {
        let raw = raw.trim();
        if raw.is_empty() {
            return format!("Request failed with status {status}");
        }
        return raw.to_string();
    };

    let detail = serde_json::from_value::<ErrorBody>(value.clone())
        .ok()
        .and_then(|body| body.detail);
    match detail {
        Some(Value::String(detail)) if !detail.is_empty() => detail,
        Some(Value::String(_)) | None => value.to_string(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
