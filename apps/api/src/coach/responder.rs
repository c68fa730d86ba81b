//! Responder: one link in the coach's fallback chain.
//!
//! Remote models and the local mock share this trait so the orchestrator can
//! walk them in order and stop at the first answer.

use async_trait::async_trait;

use crate::inference_client::{InferenceClient, InferenceError, SamplingParameters};
use crate::models::conversation::InterviewSession;
use crate::models::registry::ModelConfig;

/// Anything that can produce a coach reply for a session.
///
/// `prompt` is the text built for remote models; local responders may ignore it
/// and work from the structured session instead.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    async fn attempt(
        &self,
        session: &InterviewSession,
        prompt: &str,
    ) -> Result<String, InferenceError>;
}

/// A registered remote model reached through the shared `InferenceClient`.
pub struct RemoteResponder {
    client: InferenceClient,
    model: &'static ModelConfig,
    endpoint: String,
    parameters: SamplingParameters,
}

impl RemoteResponder {
    pub fn new(client: InferenceClient, model: &'static ModelConfig) -> Self {
        Self::with_endpoint(client, model, model.endpoint_url)
    }

    /// Same model settings, different URL. Used to point at a local stub.
    pub fn with_endpoint(
        client: InferenceClient,
        model: &'static ModelConfig,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            client,
            model,
            endpoint: endpoint.into(),
            parameters: SamplingParameters::for_model(model),
        }
    }
}

#[async_trait]
impl Responder for RemoteResponder {
    fn name(&self) -> &str {
        self.model.identifier
    }

    async fn attempt(
        &self,
        _session: &InterviewSession,
        prompt: &str,
    ) -> Result<String, InferenceError> {
        self.client
            .generate(&self.endpoint, prompt, &self.parameters)
            .await
    }
}
