//! Response Orchestrator: turns an interview session into coach text.
//!
//! Pipeline: build prompt → configured model → designated fallback model (once,
//! only if it differs from the configured one) → mock responder.
//! Remote failures are logged and absorbed; the caller always gets text back.

use std::sync::Arc;

use tracing::{info, warn};

use crate::coach::mock::MockResponder;
use crate::coach::prompts::build_prompt;
use crate::coach::responder::{RemoteResponder, Responder};
use crate::inference_client::InferenceClient;
use crate::models::conversation::InterviewSession;
use crate::models::registry::{self, ModelConfig, FALLBACK_MODEL};

pub struct Orchestrator {
    chain: Vec<Box<dyn Responder>>,
    terminal: Arc<MockResponder>,
}

impl Orchestrator {
    /// Builds an orchestrator over an explicit chain. `terminal` answers when every
    /// link of `chain` has failed.
    pub fn new(chain: Vec<Box<dyn Responder>>, terminal: Arc<MockResponder>) -> Self {
        Self { chain, terminal }
    }

    /// Standard chain for a configured model: the model itself, then the designated
    /// fallback model unless they are the same.
    pub fn for_model(
        client: InferenceClient,
        model: &'static ModelConfig,
        terminal: Arc<MockResponder>,
    ) -> Self {
        let mut chain: Vec<Box<dyn Responder>> =
            vec![Box::new(RemoteResponder::new(client.clone(), model))];

        if model.identifier != FALLBACK_MODEL {
            chain.push(Box::new(RemoteResponder::new(
                client,
                registry::fallback_model(),
            )));
        }

        Self::new(chain, terminal)
    }

    /// Names of the fallible responders, in the order they are tried.
    pub fn responder_names(&self) -> Vec<&str> {
        self.chain.iter().map(|r| r.name()).collect()
    }

    /// Produces the coach's reply. Never fails.
    pub async fn generate_response(&self, session: &InterviewSession) -> String {
        let prompt = build_prompt(session);

        for responder in &self.chain {
            match responder.attempt(session, &prompt).await {
                Ok(text) => {
                    info!("Coach reply generated by {}", responder.name());
                    return text;
                }
                Err(e) => {
                    warn!("Responder {} failed: {e}", responder.name());
                }
            }
        }

        info!("All remote responders failed, using mock responder");
        self.terminal.respond(session)
    }
}
