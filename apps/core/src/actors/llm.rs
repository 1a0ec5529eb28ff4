use crate::actors::messages::{ActorError, AppError, LlmMessage};
use crate::actors::traits::LlmActor;
use crate::models::LlmModel;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, error, info};

// --- Constants ---
const LIST_MODELS_TIMEOUT: Duration = Duration::from_secs(5);

/// Connection settings for the Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    /// Upper bound for a chat completion. `None` waits as long as the server does.
    pub timeout: Option<Duration>,
}

/// A handle to the `LlmActor`.
///
/// This struct provides a public, cloneable interface for sending messages to the
/// running LLM actor. It abstracts away the `mpsc::Sender`.
#[derive(Clone)]
pub struct LlmActorHandle {
    sender: mpsc::Sender<LlmMessage>,
}

impl LlmActorHandle {
    /// Creates a new `LlmActor` and returns a handle to it.
    ///
    /// This will spawn the `LlmActorRunner` in a new Tokio task.
    pub fn new(config: OllamaConfig) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let actor = LlmActorRunner::new(receiver, config);
        tokio::spawn(async move { actor.run().await });
        Self { sender }
    }

    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<T, AppError>>) -> LlmMessage,
    ) -> Result<T, AppError> {
        let (send, recv) = oneshot::channel();
        self.sender
            .send(build(send))
            .await
            .map_err(|e| ActorError::Internal(e.to_string()))?;
        recv.await.map_err(|e| ActorError::Internal(e.to_string()))?
    }
}

#[async_trait]
impl LlmActor for LlmActorHandle {
    async fn chat(
        &self,
        model: LlmModel,
        system_prompt: String,
        prompt: String,
    ) -> Result<String, AppError> {
        self.request(|responder| LlmMessage::Chat {
            model,
            system_prompt,
            prompt,
            responder,
        })
        .await
    }

    async fn list_models(&self) -> Result<Vec<String>, AppError> {
        self.request(|responder| LlmMessage::ListModels { responder })
            .await
    }
}

/// Picks the model to prefer among those installed on the server.
///
/// `mistral` first, then `glm-4.7-flash`, then whatever is installed; `mistral`
/// when nothing is.
pub fn preferred_model(available: &[String]) -> String {
    LlmModel::ALL
        .iter()
        .map(|m| m.provider_id())
        .find(|id| available.iter().any(|a| a.as_str() == *id))
        .map(str::to_string)
        .or_else(|| available.first().cloned())
        .unwrap_or_else(|| LlmModel::default().provider_id().to_string())
}

// --- Ollama wire types ---
#[derive(Debug, Serialize)]
struct OllamaChatRequest<'a> {
    model: &'a str,
    messages: Vec<OllamaMessage>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct OllamaMessage {
    role: String,
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaChatReply {
    #[serde(default)]
    message: Option<OllamaMessage>,
}

#[derive(Debug, Deserialize)]
struct OllamaTags {
    #[serde(default)]
    models: Vec<OllamaTag>,
}

#[derive(Debug, Deserialize)]
struct OllamaTag {
    name: String,
}

// --- Actor Runner (Internal Logic) ---
struct LlmActorRunner {
    receiver: mpsc::Receiver<LlmMessage>,
    backend: Arc<OllamaBackend>,
}

impl LlmActorRunner {
    fn new(receiver: mpsc::Receiver<LlmMessage>, config: OllamaConfig) -> Self {
        Self {
            receiver,
            backend: Arc::new(OllamaBackend {
                config,
                client: Client::new(),
            }),
        }
    }

    async fn run(mut self) {
        info!("LlmActor started ({})", self.backend.config.base_url);

        // Each request runs on its own task so a slow completion never
        // holds up the next message.
        while let Some(msg) = self.receiver.recv().await {
            let backend = Arc::clone(&self.backend);
            tokio::spawn(async move { backend.handle_message(msg).await });
        }

        info!("LlmActor stopped");
    }
}

/// HTTP side of the actor, shared by every in-flight request.
struct OllamaBackend {
    config: OllamaConfig,
    client: Client,
}

impl OllamaBackend {
    async fn handle_message(&self, msg: LlmMessage) {
        match msg {
            LlmMessage::Chat {
                model,
                system_prompt,
                prompt,
                responder,
            } => {
                let result = self.chat_completion(model, system_prompt, prompt).await;
                if let Err(e) = &result {
                    error!("LLM call failed: {}", e);
                }
                let _ = responder.send(result);
            }
            LlmMessage::ListModels { responder } => {
                let result = self.list_models().await;
                let _ = responder.send(result);
            }
        }
    }

    async fn chat_completion(
        &self,
        model: LlmModel,
        system_prompt: String,
        prompt: String,
    ) -> Result<String, AppError> {
        debug!("LLM chat with {} for prompt: {}", model, prompt);

        let payload = OllamaChatRequest {
            model: model.provider_id(),
            messages: vec![
                OllamaMessage {
                    role: "system".to_string(),
                    content: system_prompt,
                },
                OllamaMessage {
                    role: "user".to_string(),
                    content: prompt,
                },
            ],
            stream: false,
        };

        let request_future = self
            .client
            .post(format!("{}/api/chat", self.config.base_url))
            .json(&payload)
            .send();

        let res = match self.config.timeout {
            Some(limit) => timeout(limit, request_future).await??,
            None => request_future.await?,
        };

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(ActorError::LlmError(format!(
                "Chat request failed with status {}: {}",
                status, body
            ))
            .into());
        }

        let reply: OllamaChatReply = res
            .json()
            .await
            .map_err(|e| ActorError::LlmError(e.to_string()))?;

        Ok(reply
            .message
            .map(|m| m.content.trim().to_string())
            .unwrap_or_default())
    }

    async fn list_models(&self) -> Result<Vec<String>, AppError> {
        let res = timeout(
            LIST_MODELS_TIMEOUT,
            self.client
                .get(format!("{}/api/tags", self.config.base_url))
                .send(),
        )
        .await??;

        let status = res.status();
        if !status.is_success() {
            return Err(ActorError::LlmError(format!("Model listing failed with status {}", status)).into());
        }

        let tags: OllamaTags = res
            .json()
            .await
            .map_err(|e| ActorError::LlmError(e.to_string()))?;

        Ok(tags
            .models
            .into_iter()
            .map(|m| m.name.split(':').next().unwrap_or_default().to_string())
            .collect())
    }
}
