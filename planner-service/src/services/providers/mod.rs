//! Text-generation provider abstraction.
//!
//! The planner only needs "prompt in, text out"; the trait keeps the HTTP
//! client for the hosted model swappable with the in-process mock used by
//! tests.

pub mod groq;
pub mod mock;

use crate::services::prompt::Prompt;
use async_trait::async_trait;
use thiserror::Error;

pub use groq::GroqProvider;
pub use mock::MockTextProvider;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Model returned no text")]
    EmptyResponse,

    #[error("Content filtered")]
    ContentFiltered,
}

impl ProviderError {
    /// Short label used for metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::NetworkError(_) => "network",
            ProviderError::AuthenticationFailed(_) => "auth",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ApiError(_) => "api",
            ProviderError::MalformedResponse(_) => "malformed",
            ProviderError::EmptyResponse => "empty",
            ProviderError::ContentFiltered => "content_filter",
        }
    }
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
}

/// Text produced by a single model call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    pub text: String,

    /// Input tokens consumed.
    pub input_tokens: u32,

    /// Output tokens generated.
    pub output_tokens: u32,

    pub finish_reason: FinishReason,
}

/// Trait for text generation providers (e.g., Groq chat completions).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Model identifier, used for logging and metrics.
    fn model(&self) -> &str;

    /// Generate a completion for the prompt. One call, no retries.
    async fn generate(&self, prompt: &Prompt) -> Result<Generation, ProviderError>;

    /// Health check.
    async fn health_check(&self) -> Result<(), ProviderError>;
}
