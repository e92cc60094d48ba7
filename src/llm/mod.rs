//! Structured-output LLM boundary.
//!
//! Generation code talks to a [`StructuredLlm`]: it hands over a message list
//! and a JSON schema and gets back a JSON value that the provider promised
//! conforms to the schema. [`generate`] turns that value into a typed struct so
//! shape mismatches surface as [`LlmError::Schema`] at the boundary instead of
//! deep inside a handler.

pub mod openai;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

pub use openai::OpenAiCompatibleClient;

/// Errors from the LLM transport or from validating its output.
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Response contained no message content")]
    EmptyResponse,

    #[error("Response was not valid JSON: {0}")]
    InvalidJson(serde_json::Error),

    #[error("Response did not match the {schema} schema: {source}")]
    Schema {
        schema: &'static str,
        source: serde_json::Error,
    },

    #[error("Response violated the {schema} schema: {reason}")]
    Contract { schema: &'static str, reason: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LlmMessage {
    pub role: Role,
    pub content: String,
}

impl LlmMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: Role::System, content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: Role::User, content: content.into() }
    }
}

/// A named JSON schema the model output must follow.
#[derive(Debug, Clone)]
pub struct ResponseSchema {
    pub name: &'static str,
    pub schema: Value,
    /// Strict mode needs every property required and no extra properties;
    /// caller-supplied layout schemas rarely qualify.
    pub strict: bool,
}

impl ResponseSchema {
    pub fn new(name: &'static str, schema: Value) -> Self {
        Self { name, schema, strict: true }
    }

    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }
}

/// A model that can answer with JSON constrained to a schema.
#[async_trait]
pub trait StructuredLlm: Send + Sync {
    async fn generate_structured(
        &self,
        messages: &[LlmMessage],
        schema: &ResponseSchema,
    ) -> Result<Value, LlmError>;
}

/// Call the model and deserialize its answer into `T`.
pub async fn generate<T: DeserializeOwned>(
    llm: &dyn StructuredLlm,
    messages: &[LlmMessage],
    schema: &ResponseSchema,
) -> Result<T, LlmError> {
    let value = llm.generate_structured(messages, schema).await?;
    serde_json::from_value(value).map_err(|source| LlmError::Schema {
        schema: schema.name,
        source,
    })
}
