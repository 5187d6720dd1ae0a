//! Booking policy limits checked before a reservation is attempted.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

fn default_currency() -> String {
    "USD".to_string()
}

fn default_date_window_days() -> u32 {
    3
}

fn default_two_step() -> bool {
    true
}

/// ISO 4217 shape: exactly three ASCII letters, any case.
fn currency_code(value: &str) -> Result<(), ValidationError> {
    if value.len() == 3 && value.bytes().all(|b| b.is_ascii_alphabetic()) {
        Ok(())
    } else {
        Err(ValidationError::new("currency_code"))
    }
}

/// Limits a proposed booking must satisfy.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct BookingPolicy {
    /// Spending cap in minor units (cents). Zero disables the cap.
    #[serde(default)]
    pub max_budget_minor: u64,

    #[serde(default = "default_currency")]
    #[validate(custom(function = "currency_code", message = "Policy currency must be a 3-letter code"))]
    pub currency: String,

    /// Airline/hotel whitelist. `None` allows any vendor.
    #[serde(default)]
    pub allowed_vendors: Option<Vec<String>>,

    /// Allowed deviation from the requested dates.
    #[serde(default = "default_date_window_days")]
    pub date_window_days: u32,

    /// Authorize first and capture on confirmation.
    #[serde(default = "default_two_step")]
    pub require_two_step_payment: bool,
}

impl Default for BookingPolicy {
    fn default() -> Self {
        Self {
            max_budget_minor: 0,
            currency: default_currency(),
            allowed_vendors: None,
            date_window_days: default_date_window_days(),
            require_two_step_payment: default_two_step(),
        }
    }
}

/// Outcome of a policy check. `reasons` is empty when `ok` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyDecision {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl BookingPolicy {
    /// Check a proposed amount, currency and vendor against this policy.
    ///
    /// Every violated rule contributes a reason; the check never short-circuits.
    pub fn check(&self, amount_minor: u64, currency: &str, vendor: Option<&str>) -> PolicyDecision {
        let mut reasons = Vec::new();

        if self.max_budget_minor > 0 && amount_minor > self.max_budget_minor {
            reasons.push(format!(
                "amount {} exceeds cap {}",
                amount_minor, self.max_budget_minor
            ));
        }

        if !self.currency.is_empty() && !currency.eq_ignore_ascii_case(&self.currency) {
            reasons.push(format!(
                "currency {} not allowed; expected {}",
                currency, self.currency
            ));
        }

        if let (Some(allowed), Some(vendor)) = (&self.allowed_vendors, vendor) {
            if !allowed.iter().any(|v| v == vendor) {
                reasons.push(format!("vendor {} not in allowed list", vendor));
            }
        }

        PolicyDecision {
            ok: reasons.is_empty(),
            reasons,
        }
    }
}

/// Body of `POST /api/policy/check`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct PolicyCheckRequest {
    pub amount_minor: u64,

    #[validate(custom(function = "currency_code", message = "Currency must be a 3-letter code"))]
    pub currency: String,

    pub vendor: Option<String>,

    #[validate(nested)]
    pub policy: BookingPolicy,
}
