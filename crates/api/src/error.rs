use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use finplan_core::domain::contract::ContractViolation;
use finplan_core::llm::error::LlmDiagnosticsError;
use serde::Serialize;

/// API-layer error type
#[derive(Debug)]
pub enum ApiError {
    /// 400 - provider credential absent; nothing was sent upstream
    NotConfigured,

    /// 400 - malformed body or missing field
    BadRequest(String),

    /// 500 - any provider failure, collapsed into one localized message
    Upstream(&'static str),

    /// 502 - provider JSON parsed but does not have the expected shape
    ContractViolation,
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl ApiError {
    /// Logs and reports the failure, then keeps only what the caller may see.
    pub fn upstream(err: anyhow::Error, message: &'static str) -> Self {
        sentry_anyhow::capture_anyhow(&err);

        if let Some(diag) = err.downcast_ref::<LlmDiagnosticsError>() {
            tracing::debug!(
                provider = diag.provider,
                stage = diag.stage,
                raw_output = diag.raw_output.as_deref().unwrap_or_default(),
                "provider diagnostics"
            );
        }

        if let Some(violation) = err.downcast_ref::<ContractViolation>() {
            tracing::error!(
                detail = %violation.detail,
                "provider reply violates recommendation contract"
            );
            return ApiError::ContractViolation;
        }

        tracing::error!(error = %format!("{err:#}"), "provider call failed");
        ApiError::Upstream(message)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::warn!(rejection = %rejection.body_text(), "invalid request body");
        ApiError::BadRequest("Corpo da requisição inválido".into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            ApiError::NotConfigured => (
                StatusCode::BAD_REQUEST,
                "provider_not_configured",
                "OpenAI API não configurada. Defina OPENAI_API_KEY.".to_string(),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Upstream(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                msg.to_string(),
            ),
            ApiError::ContractViolation => (
                StatusCode::BAD_GATEWAY,
                "upstream_contract_violation",
                "A resposta do provedor não seguiu o formato esperado.".to_string(),
            ),
        };

        (status, Json(ErrorBody { error, message })).into_response()
    }
}
