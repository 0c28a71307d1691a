use std::error::Error;
use std::fmt;

use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;

/// Hard cap on answer length sent to the completion API.
pub const MAX_ANSWER_TOKENS: u32 = 400;

/// Shown when the upstream reply carries no choices.
pub const FALLBACK_ANSWER: &str = "No response";

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Single-turn request: one user message, no history.
    pub fn new(model: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: vec![Message::user(question)],
            max_tokens: MAX_ANSWER_TOKENS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl ChatResponse {
    /// First choice's content, or the fixed fallback when absent.
    pub fn into_answer(self) -> String {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .unwrap_or_else(|| FALLBACK_ANSWER.to_string())
    }
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: String,
}

#[derive(Debug)]
pub enum UpstreamError {
    MissingToken,
    Request(reqwest::Error),
    BadStatus { status: StatusCode, body: String },
}

impl fmt::Display for UpstreamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken => {
                write!(f, "HF_TOKEN is not set; the completion API requires a bearer token")
            }
            Self::Request(err) => write!(f, "completion request failed: {err}"),
            Self::BadStatus { status, body } => {
                write!(f, "completion API returned {status}: {body}")
            }
        }
    }
}

impl Error for UpstreamError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Request(err) => Some(err),
            _ => None,
        }
    }
}

/// Ask the completion API a single question and return the answer text.
///
/// No retries; the caller renders any failure to the user.
pub async fn complete(
    client: &Client,
    config: &AppConfig,
    question: &str,
) -> Result<String, UpstreamError> {
    if config.api_token.trim().is_empty() {
        return Err(UpstreamError::MissingToken);
    }

    let request = ChatRequest::new(&config.model, question);

    let response = client
        .post(format!("{}/chat/completions", config.upstream_url))
        .bearer_auth(&config.api_token)
        .json(&request)
        .send()
        .await
        .map_err(UpstreamError::Request)?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(UpstreamError::BadStatus { status, body });
    }

    let parsed: ChatResponse = response.json().await.map_err(UpstreamError::Request)?;
    Ok(parsed.into_answer())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_body_matches_completion_api_shape() {
        let request = ChatRequest::new("deepseek-ai/DeepSeek-V3", "hello");
        let body = serde_json::to_value(&request).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "model": "deepseek-ai/DeepSeek-V3",
                "messages": [{"role": "user", "content": "hello"}],
                "max_tokens": 400
            })
        );
    }

    #[test]
    fn first_choice_content_is_the_answer() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":"hi"}},{"message":{"content":"ignored"}}]}"#,
        )
        .unwrap();
        assert_eq!(response.into_answer(), "hi");
    }

    #[test]
    fn missing_choices_falls_back() {
        let response: ChatResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.into_answer(), FALLBACK_ANSWER);
    }
}
