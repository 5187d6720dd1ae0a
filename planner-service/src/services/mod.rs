pub mod context;
pub mod metrics;
pub mod planner;
pub mod prompt;
pub mod providers;

pub use context::{Attraction, AttractionSource, NoContext, WikipediaAttractions};
pub use planner::ItineraryPlanner;
pub use prompt::{Prompt, PromptBuilder};
pub use providers::{GroqProvider, MockTextProvider, ProviderError, TextProvider};
