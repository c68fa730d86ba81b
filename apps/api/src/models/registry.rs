//! Model Registry: the static table of remote text-generation models.
//!
//! Entries are defined at compile time and never mutated. The configured model
//! is resolved once at startup (see `Config`) and handed to the orchestrator.

/// Sampling and endpoint settings for a single remote model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelConfig {
    pub identifier: &'static str,
    pub endpoint_url: &'static str,
    pub description: &'static str,
    pub max_length: u32,
    pub temperature: f32,
}

/// Model used when no override is configured or the override is unknown.
pub const DEFAULT_MODEL: &str = "gpt2";

/// Model tried once when the configured model fails.
pub const FALLBACK_MODEL: &str = "gpt2";

static MODELS: &[ModelConfig] = &[
    ModelConfig {
        identifier: "gpt2",
        endpoint_url: "https://api-inference.huggingface.co/models/gpt2",
        description: "Text generation model, most reliable",
        max_length: 200,
        temperature: 0.7,
    },
    ModelConfig {
        identifier: "gpt2Medium",
        endpoint_url: "https://api-inference.huggingface.co/models/gpt2-medium",
        description: "Better quality text generation",
        max_length: 250,
        temperature: 0.7,
    },
];

/// Looks up a model by its exact identifier.
pub fn lookup(identifier: &str) -> Option<&'static ModelConfig> {
    MODELS.iter().find(|m| m.identifier == identifier)
}

/// The default model entry.
pub fn default_model() -> &'static ModelConfig {
    // DEFAULT_MODEL is always registered; checked by test_default_and_fallback_are_registered
    lookup(DEFAULT_MODEL).unwrap_or(&MODELS[0])
}

/// The designated fallback model entry.
pub fn fallback_model() -> &'static ModelConfig {
    lookup(FALLBACK_MODEL).unwrap_or(&MODELS[0])
}

/// Resolves an optional override to a registered model, falling back to the default.
pub fn resolve(requested: Option<&str>) -> &'static ModelConfig {
    requested.and_then(lookup).unwrap_or_else(default_model)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_and_fallback_are_registered() {
        assert!(lookup(DEFAULT_MODEL).is_some());
        assert!(lookup(FALLBACK_MODEL).is_some());
    }

    #[test]
    fn test_lookup_is_exact_match() {
        assert_eq!(lookup("gpt2Medium").map(|m| m.max_length), Some(250));
        assert!(lookup("GPT2").is_none());
        assert!(lookup("gpt2-medium").is_none());
    }

    #[test]
    fn test_resolve_unknown_override_uses_default() {
        assert_eq!(resolve(Some("llama-70b")).identifier, DEFAULT_MODEL);
        assert_eq!(resolve(None).identifier, DEFAULT_MODEL);
        assert_eq!(resolve(Some("gpt2Medium")).identifier, "gpt2Medium");
    }

    #[test]
    fn test_identifiers_are_unique() {
        let mut ids: Vec<_> = MODELS.iter().map(|m| m.identifier).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), MODELS.len());
    }
}
