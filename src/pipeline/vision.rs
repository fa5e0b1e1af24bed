//! Vision model interaction: one chat-completions call per slide image.
//!
//! This module is intentionally thin — prompt text lives in
//! [`crate::prompts`] so it can be changed without touching request or
//! error-handling logic here. There is no retry and no backoff: a failed
//! call is recorded as a [`SlideError`] and the batch moves on, matching
//! the one-shot contract of the detector stage.

use crate::config::DetectConfig;
use crate::error::{DeckscanError, SlideError};
use crate::pipeline::encode::ImageAttachment;
use crate::prompts::{SYSTEM_PROMPT, USER_INSTRUCTION};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// Azure OpenAI chat-completions client for logo detection.
///
/// Holds one `reqwest::Client` for the whole batch so connections are
/// reused across the (strictly sequential) per-image calls.
pub struct VisionClient {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

/// Minimal slice of the chat-completions response we care about.
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl VisionClient {
    /// Build a client from the detector configuration.
    pub fn new(config: &DetectConfig) -> Result<Self, DeckscanError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DeckscanError::HttpClientBuild(e.to_string()))?;

        Ok(Self {
            http,
            url: completions_url(&config.endpoint, &config.deployment_id, &config.api_version),
            api_key: config.api_key.clone(),
        })
    }

    /// Ask the model which logos appear in one slide image.
    ///
    /// Returns the raw reply text (`choices[0].message.content`) verbatim.
    /// The reply is expected to resemble a bracketed list such as
    /// `[Microsoft,NVIDIA]` but is never parsed or validated here.
    pub async fn detect(&self, image: &ImageAttachment) -> Result<String, SlideError> {
        let body = request_body(image);

        let response = self
            .http
            .post(&self.url)
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| SlideError::RequestFailed {
                filename: image.filename.clone(),
                detail: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SlideError::ApiStatus {
                filename: image.filename.clone(),
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse =
            response
                .json()
                .await
                .map_err(|e| SlideError::BadResponse {
                    filename: image.filename.clone(),
                    detail: e.to_string(),
                })?;

        let reply = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| SlideError::BadResponse {
                filename: image.filename.clone(),
                detail: "response contained no choices".into(),
            })?;

        debug!("'{}' → {}", image.filename, reply);
        Ok(reply)
    }
}

/// Build the deployment-scoped chat-completions URL.
fn completions_url(endpoint: &str, deployment_id: &str, api_version: &str) -> String {
    format!(
        "{}/openai/deployments/{}/chat/completions?api-version={}",
        endpoint.trim_end_matches('/'),
        deployment_id,
        api_version
    )
}

/// Build the JSON request body: system role, user instruction, and the
/// slide image as a base64 data-URL.
fn request_body(image: &ImageAttachment) -> serde_json::Value {
    serde_json::json!({
        "messages": [
            { "role": "system", "content": SYSTEM_PROMPT },
            { "role": "user", "content": [
                { "type": "text", "text": USER_INSTRUCTION },
                { "type": "image_url", "image_url": { "url": image.data_url } }
            ]}
        ]
    })
}
