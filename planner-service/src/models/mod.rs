pub mod itinerary;
pub mod policy;
pub mod preferences;

pub use itinerary::ItineraryResult;
pub use policy::{BookingPolicy, PolicyCheckRequest, PolicyDecision};
pub use preferences::{BudgetTier, TripPreferences};
