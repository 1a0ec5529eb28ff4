use serde::Serialize;
use tokio::sync::oneshot;

use crate::models::LlmModel;

/// Defines errors that can occur within the actor system.
#[derive(Debug, thiserror::Error, Serialize, Clone)]
pub enum ActorError {
    /// An error originating from the LLM backend.
    #[error("LLM request failed: {0}")]
    LlmError(String),
    /// A generic internal error within an actor, e.g. a closed channel.
    #[error("Internal system error: {0}")]
    Internal(String),
}

// Re-export AppError for convenience
pub use crate::error::AppError;

/// Messages that can be sent to the `LlmActor`.
#[derive(Debug)]
pub enum LlmMessage {
    /// A request for a single, non-streamed chat completion.
    Chat {
        model: LlmModel,
        system_prompt: String,
        prompt: String,
        /// A channel to send the assistant's reply back.
        responder: oneshot::Sender<Result<String, AppError>>,
    },
    /// A request for the names of the models installed on the backend.
    ListModels {
        responder: oneshot::Sender<Result<Vec<String>, AppError>>,
    },
}
