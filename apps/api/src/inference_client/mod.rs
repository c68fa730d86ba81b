//! Inference Client: the single point of entry for remote text-generation calls.
//!
//! ARCHITECTURAL RULE: No other module may call the Hugging Face Inference API directly.
//! Every remote model call goes through `InferenceClient::generate`.
//!
//! One call is one HTTP request. Falling back to another model is the orchestrator's job.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

use crate::models::registry::ModelConfig;

/// Upper bound for a single remote call.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const MAX_NEW_TOKENS: u32 = 100;
const TOP_P: f32 = 0.9;

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request timed out")]
    Timeout,

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response format: {0}")]
    Format(String),
}

/// Sampling knobs sent with every request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingParameters {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub do_sample: bool,
    pub return_full_text: bool,
}

impl SamplingParameters {
    pub fn for_model(model: &ModelConfig) -> Self {
        Self {
            max_new_tokens: MAX_NEW_TOKENS,
            temperature: model.temperature,
            top_p: TOP_P,
            do_sample: true,
            return_full_text: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: &'a SamplingParameters,
}

#[derive(Debug, Deserialize)]
struct InferenceErrorBody {
    error: String,
}

/// Thin wrapper over `reqwest::Client` carrying the provider credential.
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct InferenceClient {
    client: Client,
    api_key: String,
}

impl InferenceClient {
    pub fn new(api_key: String) -> Result<Self, InferenceError> {
        Self::with_timeout(api_key, REQUEST_TIMEOUT)
    }

    pub fn with_timeout(api_key: String, timeout: Duration) -> Result<Self, InferenceError> {
        Ok(Self {
            client: Client::builder().timeout(timeout).build()?,
            api_key,
        })
    }

    /// Sends `prompt` to `endpoint` and returns the generated text.
    pub async fn generate(
        &self,
        endpoint: &str,
        prompt: &str,
        parameters: &SamplingParameters,
    ) -> Result<String, InferenceError> {
        let request_body = InferenceRequest {
            inputs: prompt,
            parameters,
        };

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        let body = response.text().await.map_err(classify)?;

        if !status.is_success() {
            // Try to parse the provider's error message
            let message = serde_json::from_str::<InferenceErrorBody>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(InferenceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = normalize_body(&body)?;
        debug!(
            "Inference call succeeded: endpoint={}, chars={}",
            endpoint,
            text.chars().count()
        );
        Ok(text)
    }
}

fn classify(error: reqwest::Error) -> InferenceError {
    if error.is_timeout() {
        InferenceError::Timeout
    } else {
        InferenceError::Http(error)
    }
}

/// Normalizes a raw response body. A body that is not JSON at all is taken as
/// plain generated text, matching how the provider occasionally answers.
pub fn normalize_body(body: &str) -> Result<String, InferenceError> {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => extract_generated_text(&value),
        Err(_) if !body.trim().is_empty() => Ok(body.to_string()),
        Err(_) => Err(InferenceError::Format("empty response body".to_string())),
    }
}

/// Extracts generated text from the three accepted response shapes:
/// a bare string, `[{"generated_text": ...}, ...]`, or `{"generated_text": ...}`.
/// Empty text counts as missing.
pub fn extract_generated_text(value: &Value) -> Result<String, InferenceError> {
    let text = match value {
        Value::String(s) => Some(s.as_str()),
        Value::Array(items) => items.first().and_then(generated_text_field),
        Value::Object(_) => generated_text_field(value),
        _ => None,
    };

    text.filter(|t| !t.is_empty())
        .map(str::to_string)
        .ok_or_else(|| InferenceError::Format(shape_of(value).to_string()))
}

fn generated_text_field(value: &Value) -> Option<&str> {
    value.get("generated_text").and_then(Value::as_str)
}

fn shape_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "empty string",
        Value::Array(_) => "array without generated_text",
        Value::Object(_) => "object without generated_text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::HeaderMap, http::StatusCode, routing::post, Json, Router};
    use serde_json::json;

    use crate::models::registry;

    #[test]
    fn test_extract_bare_string() {
        let text = extract_generated_text(&json!("Tell me more.")).unwrap();
        assert_eq!(text, "Tell me more.");
    }

    #[test]
    fn test_extract_array_first_element() {
        let value = json!([{"generated_text": "first"}, {"generated_text": "second"}]);
        assert_eq!(extract_generated_text(&value).unwrap(), "first");
    }

    #[test]
    fn test_extract_object_field() {
        let value = json!({"generated_text": "direct"});
        assert_eq!(extract_generated_text(&value).unwrap(), "direct");
    }

    #[test]
    fn test_extract_rejects_other_shapes() {
        for value in [
            json!({}),
            json!([]),
            json!([{"text": "nope"}]),
            json!({"generated_text": 42}),
            json!({"generated_text": ""}),
            json!(""),
            json!(null),
            json!(3.5),
        ] {
            assert!(
                matches!(extract_generated_text(&value), Err(InferenceError::Format(_))),
                "{value} should be a format error"
            );
        }
    }

    #[test]
    fn test_normalize_body_accepts_plain_text() {
        assert_eq!(normalize_body("plain words").unwrap(), "plain words");
        assert!(matches!(
            normalize_body("   "),
            Err(InferenceError::Format(_))
        ));
    }

    #[test]
    fn test_sampling_parameters_follow_model() {
        let model = registry::lookup("gpt2Medium").unwrap();
        let params = SamplingParameters::for_model(model);
        assert_eq!(params.max_new_tokens, 100);
        assert_eq!(params.temperature, model.temperature);
        assert!(params.do_sample);
        assert!(!params.return_full_text);

        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json["top_p"].as_f64().map(|v| (v * 10.0).round()), Some(9.0));
    }

    async fn spawn_stub(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/models/stub")
    }

    fn params() -> SamplingParameters {
        SamplingParameters::for_model(registry::default_model())
    }

    #[tokio::test]
    async fn test_generate_sends_prompt_and_credential() {
        async fn echo(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            let inputs = body["inputs"].as_str().unwrap_or_default().to_string();
            let tokens = body["parameters"]["max_new_tokens"].as_u64().unwrap_or(0);
            Json(json!([{ "generated_text": format!("{auth}|{inputs}|{tokens}") }]))
        }

        let url = spawn_stub(Router::new().route("/models/stub", post(echo))).await;
        let client = InferenceClient::new("hf_test".to_string()).unwrap();

        let text = client.generate(&url, "hello coach", &params()).await.unwrap();
        assert_eq!(text, "Bearer hf_test|hello coach|100");
    }

    #[tokio::test]
    async fn test_generate_maps_non_success_status() {
        async fn loading() -> (StatusCode, Json<Value>) {
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"error": "Model gpt2 is currently loading"})),
            )
        }

        let url = spawn_stub(Router::new().route("/models/stub", post(loading))).await;
        let client = InferenceClient::new("hf_test".to_string()).unwrap();

        match client.generate(&url, "prompt", &params()).await {
            Err(InferenceError::Api { status, message }) => {
                assert_eq!(status, 503);
                assert_eq!(message, "Model gpt2 is currently loading");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_generate_rejects_unexpected_shape() {
        async fn empty_object() -> Json<Value> {
            Json(json!({}))
        }

        let url = spawn_stub(Router::new().route("/models/stub", post(empty_object))).await;
        let client = InferenceClient::new("hf_test".to_string()).unwrap();

        let result = client.generate(&url, "prompt", &params()).await;
        assert!(matches!(result, Err(InferenceError::Format(_))));
    }

    #[tokio::test]
    async fn test_generate_times_out() {
        async fn slow() -> Json<Value> {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!("too late"))
        }

        let url = spawn_stub(Router::new().route("/models/stub", post(slow))).await;
        let client =
            InferenceClient::with_timeout("hf_test".to_string(), Duration::from_millis(100))
                .unwrap();

        let result = client.generate(&url, "prompt", &params()).await;
        assert!(matches!(result, Err(InferenceError::Timeout)));
    }

    #[tokio::test]
    async fn test_generate_reports_connection_failure() {
        let client = InferenceClient::new("hf_test".to_string()).unwrap();
        let result = client
            .generate("http://127.0.0.1:1/models/none", "prompt", &params())
            .await;
        assert!(matches!(result, Err(InferenceError::Http(_))));
    }
}
