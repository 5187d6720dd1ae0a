use serde::{Deserialize, Serialize};

/// The generated plan, returned verbatim to the caller as `{"itinerary": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryResult {
    pub itinerary: String,
}

impl ItineraryResult {
    pub fn new(itinerary: impl Into<String>) -> Self {
        Self {
            itinerary: itinerary.into(),
        }
    }
}
