use serde::Deserialize;
use serde_json::json;

use crate::llm::{self, LlmError, LlmMessage, ResponseSchema, StructuredLlm};
use crate::templates_structs::EditHtmlUserPrompt;

const SYSTEM_PROMPT: &str = include_str!("../../templates/prompts/edit_html_system.txt");

#[derive(Debug, Deserialize)]
pub struct EditedHtml {
    pub html: String,
}

impl EditedHtml {
    pub fn schema() -> ResponseSchema {
        ResponseSchema::new(
            "EditedHtml",
            json!({
                "type": "object",
                "properties": { "html": { "type": "string" } },
                "required": ["html"],
                "additionalProperties": false
            }),
        )
    }
}

/// Apply a natural-language edit to slide HTML.
pub async fn edit_slide_html(llm: &dyn StructuredLlm, prompt: &str, html: &str) -> Result<String, LlmError> {
    let user = EditHtmlUserPrompt { prompt, html };
    let messages = [LlmMessage::system(SYSTEM_PROMPT), LlmMessage::user(user.to_string())];
    let edited: EditedHtml = llm::generate(llm, &messages, &EditedHtml::schema()).await?;
    if edited.html.trim().is_empty() {
        return Err(LlmError::Contract {
            schema: "EditedHtml",
            reason: "html was empty".to_string(),
        });
    }
    Ok(edited.html)
}
