use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationRequest {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub investment_profile: String,
    pub age: f64,
}

impl RecommendationRequest {
    /// Disposable income. Not clamped: overspending shows up as a negative amount.
    pub fn available_to_invest(&self) -> f64 {
        self.monthly_income - self.monthly_expenses
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResponse {
    pub national_investments: Vec<RecommendationItem>,
    pub international_investments: Vec<RecommendationItem>,
    pub summary: String,
    pub warnings: Vec<String>,
}

/// Only `name` is structural; the remaining keys (`type`, `allocation`,
/// `expectedReturn`, `risk`, `description`) are whatever the provider sent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationItem {
    pub name: String,
    #[serde(flatten)]
    pub details: Map<String, Value>,
}
