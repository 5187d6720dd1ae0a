use askama::Template;
use axum::response::IntoResponse;

use crate::models::BudgetTier;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub budgets: Vec<BudgetTier>,
    pub default_budget: BudgetTier,
}

pub async fn index() -> impl IntoResponse {
    IndexTemplate {
        budgets: BudgetTier::ALL.to_vec(),
        default_budget: BudgetTier::Moderate,
    }
}
