//! The itinerary pipeline: context lookup, prompt, single model call.

use crate::models::{ItineraryResult, TripPreferences};
use crate::services::context::AttractionSource;
use crate::services::metrics;
use crate::services::prompt::PromptBuilder;
use crate::services::providers::{ProviderError, TextProvider};
use std::sync::Arc;
use std::time::Instant;

#[derive(Clone)]
pub struct ItineraryPlanner {
    prompts: PromptBuilder,
    context: Arc<dyn AttractionSource>,
    provider: Arc<dyn TextProvider>,
}

impl ItineraryPlanner {
    pub fn new(provider: Arc<dyn TextProvider>, context: Arc<dyn AttractionSource>) -> Self {
        Self {
            prompts: PromptBuilder::new(),
            context,
            provider,
        }
    }

    pub fn provider(&self) -> &Arc<dyn TextProvider> {
        &self.provider
    }

    /// Generate an itinerary for already-validated preferences.
    #[tracing::instrument(
        skip(self, preferences),
        fields(
            destination = %preferences.destination,
            duration = preferences.duration,
            budget = %preferences.budget,
            model = %self.provider.model(),
        )
    )]
    pub async fn plan(&self, preferences: &TripPreferences) -> Result<ItineraryResult, ProviderError> {
        let attractions = match self.context.attractions(&preferences.destination).await {
            Ok(attractions) => attractions,
            Err(e) => {
                tracing::warn!(error = %e, "Destination context lookup failed; continuing without it");
                Vec::new()
            }
        };

        let prompt = self.prompts.build(preferences, &attractions);
        let model = self.provider.model().to_string();

        let start = Instant::now();
        let result = self.provider.generate(&prompt).await;
        metrics::record_provider_latency(&model, start.elapsed().as_secs_f64());

        match result {
            Ok(generation) => {
                metrics::record_generation(&model, "success");
                metrics::record_tokens(&model, generation.input_tokens, generation.output_tokens);
                tracing::info!(
                    context_items = attractions.len(),
                    input_tokens = generation.input_tokens,
                    output_tokens = generation.output_tokens,
                    "Itinerary generated"
                );
                Ok(ItineraryResult::new(generation.text))
            }
            Err(e) => {
                metrics::record_generation(&model, e.kind());
                Err(e)
            }
        }
    }
}
