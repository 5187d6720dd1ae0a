//! Trip preferences submitted by the planner page.

use serde::{Deserialize, Serialize};
use std::fmt;
use validator::{Validate, ValidationError};

/// Spending level the itinerary should be planned around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BudgetTier {
    #[serde(alias = "budget", alias = "Budget-friendly", alias = "budget-friendly")]
    Budget,
    #[serde(alias = "moderate")]
    Moderate,
    #[serde(alias = "luxury")]
    Luxury,
}

impl BudgetTier {
    pub const ALL: [BudgetTier; 3] = [BudgetTier::Budget, BudgetTier::Moderate, BudgetTier::Luxury];

    pub fn as_str(&self) -> &'static str {
        match self {
            BudgetTier::Budget => "Budget",
            BudgetTier::Moderate => "Moderate",
            BudgetTier::Luxury => "Luxury",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated description of the trip a user wants planned.
///
/// Lives for a single request; nothing about it is stored.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct TripPreferences {
    #[validate(custom(function = "not_blank", message = "Destination cannot be empty"))]
    pub destination: String,

    /// Trip length in days.
    #[validate(range(min = 1, message = "Duration must be a positive number of days"))]
    pub duration: i64,

    pub budget: BudgetTier,

    /// Ordered interest tags; an empty list is allowed.
    pub interests: Vec<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> TripPreferences {
        serde_json::from_value(value).expect("valid preferences json")
    }

    #[test]
    fn accepts_empty_interests() {
        let prefs = parse(json!({
            "destination": "Kyoto, Japan",
            "duration": 5,
            "budget": "Moderate",
            "interests": []
        }));
        assert!(prefs.validate().is_ok());
        assert!(prefs.interests.is_empty());
    }

    #[test]
    fn rejects_zero_and_negative_duration() {
        for duration in [0, -3] {
            let prefs = parse(json!({
                "destination": "Lisbon",
                "duration": duration,
                "budget": "Budget",
                "interests": ["Food"]
            }));
            let errors = prefs.validate().unwrap_err();
            assert!(errors.field_errors().contains_key("duration"));
        }
    }

    #[test]
    fn rejects_blank_destination() {
        let prefs = parse(json!({
            "destination": "   ",
            "duration": 2,
            "budget": "Luxury",
            "interests": []
        }));
        let errors = prefs.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("destination"));
    }

    #[test]
    fn budget_accepts_legacy_spelling() {
        let tier: BudgetTier = serde_json::from_value(json!("Budget-friendly")).unwrap();
        assert_eq!(tier, BudgetTier::Budget);
        let tier: BudgetTier = serde_json::from_value(json!("luxury")).unwrap();
        assert_eq!(tier, BudgetTier::Luxury);
    }

    #[test]
    fn budget_rejects_unknown_tier() {
        assert!(serde_json::from_value::<BudgetTier>(json!("Shoestring")).is_err());
    }

    #[test]
    fn duration_must_be_an_integer() {
        let result = serde_json::from_value::<TripPreferences>(json!({
            "destination": "Oslo",
            "duration": "three",
            "budget": "Moderate",
            "interests": []
        }));
        assert!(result.is_err());
    }
}
