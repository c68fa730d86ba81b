use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::models::registry::{self, ModelConfig};

/// Application configuration loaded from environment variables.
/// Built once in `main` and passed to constructors; nothing else reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub huggingface_api_key: String,
    /// Raw `AI_MODEL` value, kept so startup can report an ignored override.
    pub model_override: Option<String>,
    pub model: &'static ModelConfig,
    pub upload_dir: PathBuf,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let model_override = lookup("AI_MODEL").filter(|m| !m.trim().is_empty());

        Ok(Config {
            huggingface_api_key: require(&lookup, "HUGGINGFACE_API_KEY")?,
            model: registry::resolve(model_override.as_deref()),
            model_override,
            upload_dir: lookup("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("uploads")),
            port: lookup("PORT")
                .unwrap_or_else(|| "3000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }

    /// True when `AI_MODEL` named a model that is not registered.
    pub fn model_override_ignored(&self) -> bool {
        self.model_override
            .as_deref()
            .is_some_and(|m| m != self.model.identifier)
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Result<String> {
    lookup(key)
        .filter(|v| !v.is_empty())
        .with_context(|| format!("Required environment variable '{key}' is not set"))
}
