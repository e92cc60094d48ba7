use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use super::{LlmError, LlmMessage, ResponseSchema, StructuredLlm};

/// Client for any server speaking the OpenAI chat-completions protocol with
/// `json_schema` response formats (OpenAI, Ollama, llama.cpp server, ...).
pub struct OpenAiCompatibleClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenAiCompatibleClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        model: &str,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn request_body(&self, messages: &[LlmMessage], schema: &ResponseSchema) -> Value {
        json!({
            "model": self.model,
            "messages": messages,
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": schema.name,
                    "strict": schema.strict,
                    "schema": schema.schema,
                }
            }
        })
    }
}

/// Pull `choices[0].message.content` out of a chat-completions response and
/// parse it as JSON.
fn extract_content(response: &Value) -> Result<Value, LlmError> {
    let content = response
        .get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(|c| c.as_str())
        .filter(|c| !c.trim().is_empty())
        .ok_or(LlmError::EmptyResponse)?;

    serde_json::from_str(content).map_err(LlmError::InvalidJson)
}

#[async_trait]
impl StructuredLlm for OpenAiCompatibleClient {
    async fn generate_structured(
        &self,
        messages: &[LlmMessage],
        schema: &ResponseSchema,
    ) -> Result<Value, LlmError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = self.request_body(messages, schema);

        let mut builder = self.http_client.post(&url).json(&request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api { status, body });
        }

        let json: Value = response.json().await?;
        extract_content(&json)
    }
}
