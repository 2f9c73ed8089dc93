use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use chrono::Utc;
use finplan_core::assistant;
use finplan_core::domain::chat::{ChatReply, ChatRequest};
use finplan_core::domain::iso_timestamp;
use finplan_core::domain::recommendation::RecommendationRequest;
use serde::Serialize;

use crate::app::AppState;
use crate::error::ApiError;

const CHAT_FAILURE: &str = "Erro ao processar sua mensagem. Tente novamente.";
const RECOMMENDATION_FAILURE: &str = "Erro ao gerar recomendações. Tente novamente.";

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
    timestamp: String,
    openai: &'static str,
}

/// GET /api/health - never calls the provider
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: iso_timestamp(Utc::now()),
        openai: if state.provider_configured() {
            "configured"
        } else {
            "missing"
        },
    })
}

/// POST /api/chat
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatReply>, ApiError> {
    let llm = state.llm()?;
    let Json(req) = payload?;
    if req.message.is_empty() {
        return Err(ApiError::BadRequest("Mensagem é obrigatória".into()));
    }

    let response = assistant::chat(llm, &req)
        .await
        .map_err(|e| ApiError::upstream(e, CHAT_FAILURE))?;

    Ok(Json(ChatReply {
        response,
        timestamp: iso_timestamp(Utc::now()),
    }))
}

/// POST /api/recommendations - the provider's JSON object, verbatim
pub async fn recommendations(
    State(state): State<AppState>,
    payload: Result<Json<RecommendationRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let llm = state.llm()?;
    let Json(req) = payload?;
    if req.investment_profile.is_empty() {
        return Err(ApiError::BadRequest("Perfil de investidor é obrigatório".into()));
    }

    tracing::info!(
        available_to_invest = req.available_to_invest(),
        profile = %req.investment_profile,
        age = req.age,
        "generating recommendations"
    );

    let value = assistant::recommend(llm, &req)
        .await
        .map_err(|e| ApiError::upstream(e, RECOMMENDATION_FAILURE))?;

    Ok(Json(value))
}
