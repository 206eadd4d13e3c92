// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Financial coaching through an OpenAI-compatible chat-completions API.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::snapshot::AiSnapshot;
use crate::utils::http_client;

pub const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

const SYSTEM_PROMPT: &str = "You are a friendly, practical money coach for everyday people.
Rules:
- Only give general guidance, never regulated financial advice.
- Amounts in the snapshot are grouped by currency. Never add or compare amounts across currencies.
- Be encouraging but realistic.
- Respond with a single JSON object of this exact shape:
  { \"summary\": \"<one-paragraph overview>\", \"steps\": [\"<step 1>\", \"<step 2>\"] }
- The summary must answer the user's question directly.
- Give 3 to 6 concrete, actionable steps.
- No text outside the JSON object.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    pub summary: String,
    #[serde(default)]
    pub steps: Vec<String>,
}

pub trait AdviceProvider {
    fn get_advice(&self, snapshot: &AiSnapshot, question: &str) -> Result<Advice>;
}

/// Validate the question, then ask `provider`.
pub fn ask<P: AdviceProvider + ?Sized>(
    provider: &P,
    snapshot: &AiSnapshot,
    question: &str,
) -> Result<Advice> {
    let question = question.trim();
    if question.is_empty() {
        return Err(Error::validation("question", "a question is required"));
    }
    provider.get_advice(snapshot, question)
}

/// Decode the model's reply. Anything but `{summary, steps}` is a
/// collaborator failure.
pub fn parse_advice(raw: &str) -> Result<Advice> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(Error::Collaborator("empty response from the model".into()));
    }
    serde_json::from_str::<Advice>(raw).map_err(|e| {
        warn!(error = %e, "advice reply was not the expected JSON");
        Error::Collaborator("the model returned an unexpected format".into())
    })
}

fn status_message(status: StatusCode) -> String {
    match status {
        StatusCode::UNAUTHORIZED => "invalid API key, check OPENAI_API_KEY".into(),
        StatusCode::TOO_MANY_REQUESTS => "rate limit reached, wait a moment and try again".into(),
        StatusCode::NOT_FOUND => "model not available for this account".into(),
        s => format!("request failed with HTTP {}", s.as_u16()),
    }
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OpenAiAdvisor {
    api_key: Option<String>,
    model: String,
    endpoint: String,
}

impl OpenAiAdvisor {
    pub fn new(api_key: Option<String>, model: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: model.into(),
            endpoint: endpoint.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, snapshot: &AiSnapshot, question: &str) -> Result<serde_json::Value> {
        let user_message = format!(
            "Here is my financial snapshot:\n{}\n\nMy question: {}",
            serde_json::to_string_pretty(snapshot)?,
            question
        );
        Ok(json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": user_message },
            ],
            "response_format": { "type": "json_object" },
            "max_tokens": 1024,
            "temperature": 0.7,
        }))
    }
}

impl AdviceProvider for OpenAiAdvisor {
    fn get_advice(&self, snapshot: &AiSnapshot, question: &str) -> Result<Advice> {
        let key = self
            .api_key
            .as_deref()
            .ok_or_else(|| Error::Collaborator("OPENAI_API_KEY is not configured".into()))?;
        let body = self.request_body(snapshot, question)?;

        debug!(model = %self.model, endpoint = %self.endpoint, "requesting advice");
        let resp = http_client()?
            .post(&self.endpoint)
            .bearer_auth(key)
            .json(&body)
            .send()?;

        let status = resp.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "advice request rejected");
            return Err(Error::Collaborator(status_message(status)));
        }

        let parsed: ChatResponse = resp.json()?;
        let raw = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        parse_advice(&raw)
    }
}
