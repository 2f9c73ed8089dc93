//! The two use cases served over HTTP: free-form chat and structured
//! investment recommendations.

use crate::domain::chat::ChatRequest;
use crate::domain::contract;
use crate::domain::recommendation::RecommendationRequest;
use crate::llm::{json, CompletionMode, LlmClient};
use crate::prompt;

/// Returns the provider's text unmodified.
pub async fn chat(llm: &dyn LlmClient, req: &ChatRequest) -> anyhow::Result<String> {
    let prompt = prompt::chat_prompt(req);
    llm.complete(&prompt, CompletionMode::Text).await
}

/// Returns the provider's JSON object verbatim once it has the recommendation
/// shape. Unparseable output is a plain error; a shape mismatch is a
/// [`contract::ContractViolation`].
pub async fn recommend(
    llm: &dyn LlmClient,
    req: &RecommendationRequest,
) -> anyhow::Result<serde_json::Value> {
    let prompt = prompt::recommendation_prompt(req);
    let text = llm.complete(&prompt, CompletionMode::Json).await?;
    let value = json::parse_json_reply(&text)?;
    let parsed = contract::validate_recommendations(&value)?;

    tracing::debug!(
        provider = llm.provider(),
        national = parsed.national_investments.len(),
        international = parsed.international_investments.len(),
        warnings = parsed.warnings.len(),
        "recommendations generated"
    );

    Ok(value)
}
