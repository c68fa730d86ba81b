// Interview coach: prompt building, the responder chain and the mock fallback.
// All remote calls go through inference_client.

pub mod handlers;
pub mod mock;
pub mod orchestrator;
pub mod prompts;
pub mod responder;
