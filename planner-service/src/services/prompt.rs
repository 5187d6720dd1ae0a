//! Prompt construction for itinerary generation.

use crate::models::TripPreferences;
use crate::services::context::Attraction;

const PERSONA: &str = "You are an expert travel agent who creates personalized \
vacation itineraries. Your goal is to generate a detailed, day-by-day plan tailored to \
the traveler's preferences.";

const FORMAT_RULES: &str = "Write the plan as plain text. Start each day with a line \
\"Day N:\" and break the day into several activities, one per line, each with a \
realistic time range (HH:MM-HH:MM) and an approximate cost in the destination's local \
currency using numeric values (e.g. JPY 1500).\n\
Do not use markdown, code fences or HTML.";

const NO_CONTEXT: &str = "- No external context found";

/// Chat messages sent to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

impl Prompt {
    /// Combined length in bytes of both messages.
    pub fn len(&self) -> usize {
        self.system.len() + self.user.len()
    }

    pub fn is_empty(&self) -> bool {
        self.system.is_empty() && self.user.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct PromptBuilder;

impl PromptBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the prompt for `preferences`. Same input, same output.
    pub fn build(&self, preferences: &TripPreferences, attractions: &[Attraction]) -> Prompt {
        Prompt {
            system: self.system_message(attractions),
            user: user_message(preferences),
        }
    }

    fn system_message(&self, attractions: &[Attraction]) -> String {
        let context = if attractions.is_empty() {
            NO_CONTEXT.to_string()
        } else {
            attractions
                .iter()
                .map(|a| format!("- {}: {}", a.name, a.description.trim()))
                .collect::<Vec<_>>()
                .join("\n")
        };

        format!(
            "{persona}\n\n{rules}\n\nDestination context (public data, optional):\n{context}\n",
            persona = PERSONA,
            rules = FORMAT_RULES,
            context = context,
        )
    }
}

fn user_message(preferences: &TripPreferences) -> String {
    let interests = if preferences.interests.is_empty() {
        "not specified".to_string()
    } else {
        preferences.interests.join(", ")
    };

    format!(
        "Please generate a vacation plan based on the following preferences:\n\
         - Destination: {destination}\n\
         - Duration: {duration} days (build a schedule with realistic times each day)\n\
         - Budget: {budget} (keep costs aligned with this level)\n\
         - Interests: {interests}\n\n\
         Return only the itinerary. No explanations before or after it.",
        destination = preferences.destination,
        duration = preferences.duration,
        budget = preferences.budget,
        interests = interests,
    )
}
