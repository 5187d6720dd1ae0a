//! Mock provider implementation for testing.

use super::{FinishReason, Generation, ProviderError, TextProvider};
use crate::services::prompt::Prompt;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Mock text provider that answers every prompt with a canned outcome.
pub struct MockTextProvider {
    outcome: Result<String, ProviderError>,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<Prompt>>,
}

impl MockTextProvider {
    /// Always succeed with `text`.
    pub fn returning(text: impl Into<String>) -> Self {
        Self::with_outcome(Ok(text.into()))
    }

    /// Always fail with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<String, ProviderError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    /// Number of `generate` calls so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent prompt passed to `generate`.
    pub fn last_prompt(&self) -> Option<Prompt> {
        self.last_prompt
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or(None)
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn model(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &Prompt) -> Result<Generation, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut last) = self.last_prompt.lock() {
            *last = Some(prompt.clone());
        }

        let text = self.outcome.clone()?;
        Ok(Generation {
            text,
            input_tokens: (prompt.len() / 4) as u32,
            output_tokens: 10,
            finish_reason: FinishReason::Complete,
        })
    }

    async fn health_check(&self) -> Result<(), ProviderError> {
        match &self.outcome {
            Ok(_) => Ok(()),
            Err(e) => Err(e.clone()),
        }
    }
}
