/// LLM Client — the single point of entry for all completion-service calls in PromptLab.
///
/// ARCHITECTURAL RULE: No other module may call the OpenAI API directly.
/// All model interactions (chat and audio transcription) MUST go through this module.
///
/// Model: gpt-4o-mini (hardcoded — do not make configurable to prevent drift)
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod prompts;

/// The chat model used for all completion calls in PromptLab.
/// This is intentionally hardcoded to prevent accidental drift.
pub const MODEL: &str = "gpt-4o-mini";
/// The speech-to-text model used for audio transcription.
pub const SPEECH_MODEL: &str = "gpt-4o-transcribe";

const CHAT_COMPLETIONS_PATH: &str = "/v1/chat/completions";
const TRANSCRIPTIONS_PATH: &str = "/v1/audio/transcriptions";
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Per-call sampling parameters. Every exercise pins a low temperature;
/// the default matches the most common setting across the course.
#[derive(Debug, Clone, Copy)]
pub struct ChatParams {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for ChatParams {
    fn default() -> Self {
        Self {
            temperature: 0.1,
            max_tokens: 500,
        }
    }
}

impl ChatParams {
    pub fn with_max_tokens(max_tokens: u32) -> Self {
        Self {
            max_tokens,
            ..Self::default()
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

/// The seam every pipeline calls through. Production code uses `OpenAiClient`;
/// tests inject a scripted fake so pipeline behavior is exercised offline.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends one system + user message pair and returns the trimmed reply text.
    /// Single attempt, no retry — the pipelines own all failure handling.
    async fn chat(&self, system: &str, user: &str, params: ChatParams) -> Result<String, LlmError>;
}

/// The single completion-service client used by all exercises.
/// Endpoint and credentials are injected at construction (no implicit global).
#[derive(Clone)]
pub struct OpenAiClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    /// Transcribes an uploaded audio file (wav/mp3/flac…) to plain text.
    pub async fn transcribe(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, LlmError> {
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(file_name.to_string()))
            .text("model", SPEECH_MODEL)
            .text("response_format", "text");

        let response = self
            .client
            .post(format!("{}{}", self.base_url, TRANSCRIPTIONS_PATH))
            .bearer_auth(&self.api_key)
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), body));
        }

        // response_format=text returns the transcript directly, not JSON
        Ok(response.text().await?.trim().to_string())
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn chat(&self, system: &str, user: &str, params: ChatParams) -> Result<String, LlmError> {
        let request_body = ChatCompletionRequest {
            model: MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: params.temperature,
            max_tokens: params.max_tokens,
        };

        let response = self
            .client
            .post(format!("{}{}", self.base_url, CHAT_COMPLETIONS_PATH))
            .bearer_auth(&self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(api_error(status.as_u16(), body));
        }

        let completion: ChatCompletionResponse = response.json().await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .ok_or(LlmError::EmptyContent)
    }
}

/// Turns a non-success service reply into an `LlmError::Api`, preferring the
/// structured error message when the body parses as one.
fn api_error(status: u16, body: String) -> LlmError {
    let message = serde_json::from_str::<OpenAiError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body);
    LlmError::Api { status, message }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Scripted `ChatModel` fake shared by the pipeline tests.

    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;

    /// Replays a fixed sequence of replies (or failures) in call order.
    /// Calling past the end of the script fails with an API error, which the
    /// pipelines must degrade on.
    pub struct ScriptedChat {
        script: Mutex<VecDeque<Result<String, String>>>,
    }

    impl ScriptedChat {
        pub fn new<I>(script: I) -> Self
        where
            I: IntoIterator<Item = Result<String, String>>,
        {
            Self {
                script: Mutex::new(script.into_iter().collect()),
            }
        }

        /// Convenience: a script where every call succeeds.
        pub fn replies<I, S>(replies: I) -> Self
        where
            I: IntoIterator<Item = S>,
            S: Into<String>,
        {
            Self::new(replies.into_iter().map(|r| Ok(r.into())))
        }

        /// Convenience: a script where every call fails with the same message.
        pub fn always_failing(message: &str) -> Self {
            Self::new(vec![Err(message.to_string()); 8])
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedChat {
        async fn chat(
            &self,
            _system: &str,
            _user: &str,
            _params: ChatParams,
        ) -> Result<String, LlmError> {
            let next = self
                .script
                .lock()
                .expect("script lock poisoned")
                .pop_front()
                .unwrap_or_else(|| Err("script exhausted".to_string()));

            next.map_err(|message| LlmError::Api {
                status: 500,
                message,
            })
        }
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }
}
