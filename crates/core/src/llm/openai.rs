use crate::config::Settings;
use crate::llm::error::LlmDiagnosticsError;
use crate::llm::{CompletionMode, LlmClient};
use crate::prompt::PromptPair;
use anyhow::Context;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PROVIDER: &str = "openai";
const DEFAULT_BASE_URL: &str = "https://api.openai.com";
// Same default as the official OpenAI client libraries.
const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Pinned snapshot; never a floating alias.
pub const MODEL: &str = "gpt-4o-2024-08-06";
pub const TEXT_MAX_TOKENS: u32 = 500;

#[derive(Debug, Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let api_key = settings.require_openai_api_key()?.to_string();
        let base_url = settings
            .openai_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = settings
            .openai_timeout_secs
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Self::new(api_key, base_url, Duration::from_secs(timeout_secs))
    }

    pub fn new(api_key: String, base_url: String, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build reqwest client")?;

        Ok(Self {
            http,
            api_key,
            base_url,
        })
    }

    fn build_request(prompt: &PromptPair, mode: CompletionMode) -> ChatCompletionRequest {
        let (max_tokens, response_format) = match mode {
            CompletionMode::Text => (Some(TEXT_MAX_TOKENS), None),
            CompletionMode::Json => (None, Some(ResponseFormat::JsonObject)),
        };

        ChatCompletionRequest {
            model: MODEL,
            messages: vec![
                Message {
                    role: "system",
                    content: prompt.system.clone(),
                },
                Message {
                    role: "user",
                    content: prompt.user.clone(),
                },
            ],
            max_tokens,
            response_format,
        }
    }

    async fn create_completion(
        &self,
        req: ChatCompletionRequest,
    ) -> anyhow::Result<ChatCompletionResponse> {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))?,
        );

        let url = format!(
            "{}/v1/chat/completions",
            self.base_url.trim_end_matches('/')
        );
        let res = self
            .http
            .post(url)
            .headers(headers)
            .json(&req)
            .send()
            .await
            .context("OpenAI request failed")?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read OpenAI response body")?;
        if !status.is_success() {
            let raw_response_json = serde_json::from_str::<serde_json::Value>(&text).ok();
            return Err(LlmDiagnosticsError {
                provider: PROVIDER,
                stage: "http",
                detail: format!("status={status}"),
                raw_output: Some(text),
                raw_response_json,
            }
            .into());
        }

        serde_json::from_str::<ChatCompletionResponse>(&text)
            .with_context(|| format!("failed to decode OpenAI response: {text}"))
    }

    fn response_text(res: ChatCompletionResponse) -> anyhow::Result<String> {
        let Some(choice) = res.choices.into_iter().next() else {
            return Err(LlmDiagnosticsError {
                provider: PROVIDER,
                stage: "response",
                detail: "response has no choices".to_string(),
                raw_output: None,
                raw_response_json: None,
            }
            .into());
        };

        if choice.finish_reason.as_deref() == Some("length") {
            tracing::warn!("OpenAI finish_reason=length; reply is truncated");
        }

        choice.message.content.ok_or_else(|| {
            LlmDiagnosticsError {
                provider: PROVIDER,
                stage: "response",
                detail: "first choice has no message content".to_string(),
                raw_output: None,
                raw_response_json: None,
            }
            .into()
        })
    }
}

#[async_trait::async_trait]
impl LlmClient for OpenAiClient {
    fn provider(&self) -> &'static str {
        PROVIDER
    }

    async fn complete(&self, prompt: &PromptPair, mode: CompletionMode) -> anyhow::Result<String> {
        let req = Self::build_request(prompt, mode);
        let res = self.create_completion(req).await?;
        Self::response_text(res)
    }
}

#[derive(Debug, Clone, Serialize)]
struct ChatCompletionRequest {
    model: &'static str,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Debug, Clone, Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
enum ResponseFormat {
    #[serde(rename = "json_object")]
    JsonObject,
}

#[derive(Debug, Clone, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Clone, Deserialize)]
struct Choice {
    message: ChoiceMessage,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}
