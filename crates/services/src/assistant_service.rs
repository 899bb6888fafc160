use std::env;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::AssistantError;
use crate::transcript::Transcript;

const SYSTEM_PROMPT: &str = "You are a friendly, knowledgeable math tutor helping a student work \
through their textbook.
- Keep answers short, clear and easy to follow.
- Write every formula in LaTeX wrapped in $ delimiters, for example $x^2 + 1$.
- For a specific textbook exercise, explain the method instead of only giving the answer.
- Stay encouraging.";

#[derive(Clone, Debug)]
pub struct AssistantConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl AssistantConfig {
    /// Reads `TEXTBOOK_AI_API_KEY`, `TEXTBOOK_AI_BASE_URL` and `TEXTBOOK_AI_MODEL`.
    ///
    /// Returns `None` when no API key is set, which disables the assistant.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("TEXTBOOK_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = env::var("TEXTBOOK_AI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("TEXTBOOK_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// Tutoring chat backed by an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct AssistantService {
    client: Client,
    config: Option<AssistantConfig>,
}

impl AssistantService {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(AssistantConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<AssistantConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Ask a question, recording both sides of the exchange in `transcript`.
    ///
    /// Blank questions and a disabled assistant leave the transcript untouched.
    /// Any other failure appends an error-marked apology before returning.
    ///
    /// # Errors
    ///
    /// Returns `AssistantError` when the question is blank, the service is
    /// disabled, the request fails, or the response is empty.
    pub async fn ask(
        &self,
        transcript: &mut Transcript,
        question: &str,
    ) -> Result<String, AssistantError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AssistantError::EmptyQuestion);
        }
        let config = self.config.as_ref().ok_or(AssistantError::Disabled)?;

        transcript.push_user(question);
        match self.complete(config, transcript).await {
            Ok(answer) => {
                debug!(chars = answer.len(), "assistant answered");
                transcript.push_assistant(answer.clone());
                Ok(answer)
            }
            Err(err) => {
                warn!(error = %err, "assistant request failed");
                transcript.push_failure();
                Err(err)
            }
        }
    }

    async fn complete(
        &self,
        config: &AssistantConfig,
        transcript: &Transcript,
    ) -> Result<String, AssistantError> {
        let url = format!(
            "{}/chat/completions",
            config.base_url.trim_end_matches('/')
        );

        let mut messages = vec![RequestMessage {
            role: "system",
            content: SYSTEM_PROMPT.to_string(),
        }];
        messages.extend(transcript.history().map(|message| RequestMessage {
            role: message.role.as_api_str(),
            content: message.text.clone(),
        }));

        let payload = ChatRequest {
            model: config.model.clone(),
            messages,
            temperature: 0.2,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AssistantError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(AssistantError::EmptyResponse)?;

        Ok(content)
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<RequestMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct RequestMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}
