//! Chat-completion naming provider.
//!
//! Sends the cluster prompt to an OpenAI-compatible `/v1/chat/completions`
//! endpoint and parses the JSON object in the first choice. Timeouts and
//! concurrency are enforced by the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use techcat_core::config::NamingConfig;
use techcat_core::errors::{ConfigError, NamingError, TechcatResult};
use techcat_core::models::{NamingRequest, NamingResponse};
use techcat_core::traits::ICanonicalNamer;
use tracing::debug;

use crate::prompt;

pub struct ApiNamer {
    client: reqwest::Client,
    model: String,
    api_key: String,
    endpoint: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize, Serialize)]
struct ChatMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ApiNamer {
    pub fn new(model: String, api_key: String, endpoint: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            model,
            api_key,
            endpoint,
        }
    }

    pub fn from_config(config: &NamingConfig) -> Result<Self, ConfigError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| ConfigError::MissingCredential {
                provider: "naming api".to_string(),
                env_var: config.api_key_env.clone(),
            })?;
        Ok(Self::new(config.model.clone(), api_key, config.endpoint.clone()))
    }
}

/// Pull the naming JSON object out of a model reply, tolerating code fences.
pub(crate) fn parse_reply(content: &str) -> Result<NamingResponse, NamingError> {
    let trimmed = content.trim();
    let start = trimmed.find('{');
    let end = trimmed.rfind('}');
    let object = match (start, end) {
        (Some(s), Some(e)) if e > s => &trimmed[s..=e],
        _ => {
            return Err(NamingError::MalformedResponse {
                reason: "reply contains no JSON object".to_string(),
            })
        }
    };
    serde_json::from_str(object).map_err(|e| NamingError::MalformedResponse {
        reason: e.to_string(),
    })
}

#[async_trait]
impl ICanonicalNamer for ApiNamer {
    async fn name_cluster(&self, request: &NamingRequest) -> TechcatResult<NamingResponse> {
        let body = json!({
            "model": self.model,
            "temperature": 0,
            "response_format": { "type": "json_object" },
            "messages": [
                { "role": "system", "content": prompt::system_prompt() },
                { "role": "user", "content": prompt::user_prompt(request) },
            ],
        });

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| NamingError::RequestFailed {
                reason: format!("HTTP error: {e}"),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(NamingError::RequestFailed {
                reason: format!("API returned {status}: {text}"),
            }
            .into());
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| NamingError::MalformedResponse {
                reason: format!("JSON parse error: {e}"),
            })?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| NamingError::MalformedResponse {
                reason: "no choices in reply".to_string(),
            })?;
        debug!(cluster = %request.cluster_id, "naming reply received");

        Ok(parse_reply(&content)?)
    }

    fn name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_object() {
        let reply = r#"{"canonical_name": "Tiltrotor", "domain": "Propulsion", "description": "d", "confidence": 0.9, "rationale": "r"}"#;
        let parsed = parse_reply(reply).unwrap();
        assert_eq!(parsed.canonical_name, "Tiltrotor");
        assert_eq!(parsed.confidence, Some(0.9));
    }

    #[test]
    fn parses_fenced_object_with_name_alias() {
        let reply = "```json\n{\"name\": \"Solid-State Battery\"}\n```";
        let parsed = parse_reply(reply).unwrap();
        assert_eq!(parsed.canonical_name, "Solid-State Battery");
        assert!(parsed.domain.is_none());
    }

    #[test]
    fn rejects_prose() {
        assert!(matches!(
            parse_reply("I think it is a battery."),
            Err(NamingError::MalformedResponse { .. })
        ));
    }
}
