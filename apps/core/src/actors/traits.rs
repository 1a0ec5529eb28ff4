use crate::actors::messages::AppError;
use crate::models::LlmModel;
use async_trait::async_trait;

/// Defines the public interface for an LLM (Large Language Model) actor.
///
/// This trait abstracts the specific implementation of the LLM, allowing for different
/// backends (e.g., a local Ollama server, a test double) to be used interchangeably.
#[async_trait]
pub trait LlmActor: Send + Sync + 'static {
    /// Generates a complete reply to `prompt` under `system_prompt`.
    ///
    /// An empty string means the backend answered without any content.
    async fn chat(
        &self,
        model: LlmModel,
        system_prompt: String,
        prompt: String,
    ) -> Result<String, AppError>;

    /// Lists the model names installed on the backend, without tag suffixes.
    async fn list_models(&self) -> Result<Vec<String>, AppError>;
}
