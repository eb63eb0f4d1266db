//! OpenRouter API client.
//!
//! One POST against the chat-completions endpoint per analysis, no retries,
//! no streaming. The HTTP outcome is folded into [`ApiOutcome`] so callers
//! never see a transport error directly.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::credentials::Credential;
use crate::prompt::RenderedPrompt;

/// OpenRouter chat-completions endpoint
pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Identification headers the endpoint asks integrations to send
const REFERER: &str = "https://github.com/critique-cli/critique";
const TITLE: &str = "critique - AI Code Review";

/// How an analysis request ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiOutcome {
    /// The model produced an analysis
    Success { body: String },
    /// Anything else, classified
    Failure { kind: FailureKind, message: String },
}

/// Failure categories surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FailureKind {
    #[error("invalid API key")]
    Unauthorized,
    #[error("model unavailable")]
    NotFound,
    #[error("insufficient account balance")]
    InsufficientFunds,
    #[error("request timed out")]
    Timeout,
    #[error("connection failed")]
    ConnectionError,
    #[error("server error (HTTP {0})")]
    ServerError(u16),
    #[error("unexpected error")]
    Unknown,
}

impl ApiOutcome {
    fn failure(kind: FailureKind, message: impl Into<String>) -> Self {
        ApiOutcome::Failure {
            kind,
            message: message.into(),
        }
    }
}

/// Classify an HTTP response into an outcome. Pure; exercised directly by
/// tests without a live endpoint.
pub fn classify_response(status: u16, body: &str) -> ApiOutcome {
    match status {
        200 => match extract_content(body) {
            Some(content) => ApiOutcome::Success { body: content },
            // A 200 we cannot parse degrades to Unknown, keeping the raw
            // body as context.
            None => ApiOutcome::failure(
                FailureKind::Unknown,
                format!("could not parse the model response: {}", body.trim()),
            ),
        },
        401 => ApiOutcome::failure(
            FailureKind::Unauthorized,
            "The API key was rejected. Check the key and re-enter it with --set-key.",
        ),
        404 => ApiOutcome::failure(
            FailureKind::NotFound,
            "The requested model is unavailable. Try again later or pick another model with --model.",
        ),
        402 => ApiOutcome::failure(
            FailureKind::InsufficientFunds,
            "Insufficient account balance. Top up your OpenRouter account at openrouter.ai.",
        ),
        code => ApiOutcome::failure(FailureKind::ServerError(code), extract_error_message(body)),
    }
}

/// Map a transport-level failure (no HTTP response at all) into an outcome.
pub fn classify_transport(err: &reqwest::Error) -> ApiOutcome {
    if err.is_timeout() {
        ApiOutcome::failure(
            FailureKind::Timeout,
            "Timed out waiting for a response from the server.",
        )
    } else if err.is_connect() {
        ApiOutcome::failure(
            FailureKind::ConnectionError,
            "Could not connect to the server. Check your network connection.",
        )
    } else {
        ApiOutcome::failure(FailureKind::Unknown, err.to_string())
    }
}

/// First choice's message content, if the body parses as a completion.
fn extract_content(body: &str) -> Option<String> {
    let response: ChatCompletionResponse = serde_json::from_str(body).ok()?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .map(|message| message.content)
}

/// `error.message` from a JSON error body, falling back to the raw text.
fn extract_error_message(body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorResponse>(body) {
        if let Some(error) = parsed.error {
            if let Some(message) = error.message {
                if !message.is_empty() {
                    return message;
                }
            }
        }
    }
    body.trim().to_string()
}

/// Client for the chat-completions endpoint.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new() -> Self {
        Self::with_base_url(OPENROUTER_API_URL.to_string())
    }

    /// Point the client at a different gateway (same wire format).
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            client: Client::new(),
            base_url,
        }
    }

    /// Send one rendered prompt as the sole user message and classify
    /// whatever comes back. Blocks (as a future) up to `timeout`.
    pub async fn send(
        &self,
        prompt: &RenderedPrompt,
        credential: &Credential,
        model: &str,
        timeout: Duration,
    ) -> ApiOutcome {
        let request = ChatCompletionRequest {
            model: model.to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt.as_str().to_string(),
            }],
        };

        let response = self
            .client
            .post(&self.base_url)
            .header("Authorization", format!("Bearer {}", credential.as_str()))
            .header("Content-Type", "application/json")
            .header("HTTP-Referer", REFERER)
            .header("X-Title", TITLE)
            .timeout(timeout)
            .json(&request)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(err) => return classify_transport(&err),
        };

        let status = response.status().as_u16();
        match response.text().await {
            Ok(body) => classify_response(status, &body),
            Err(err) => classify_transport(&err),
        }
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

// Wire types (OpenAI-compatible)

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}
