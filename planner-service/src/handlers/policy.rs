use axum::Json;
use service_core::error::AppError;

use crate::models::{PolicyCheckRequest, PolicyDecision};
use crate::utils::ValidatedJson;

/// `POST /api/policy/check`: validate a proposed booking against a policy.
pub async fn check_policy(
    ValidatedJson(request): ValidatedJson<PolicyCheckRequest>,
) -> Result<Json<PolicyDecision>, AppError> {
    let decision = request.policy.check(
        request.amount_minor,
        &request.currency,
        request.vendor.as_deref(),
    );

    if !decision.ok {
        tracing::info!(reasons = ?decision.reasons, "Booking rejected by policy");
    }

    Ok(Json(decision))
}
