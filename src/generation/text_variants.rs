use serde::Deserialize;
use serde_json::json;

use crate::llm::{self, LlmError, LlmMessage, ResponseSchema, StructuredLlm};
use crate::templates_structs::TextVariantsUserPrompt;

const SYSTEM_PROMPT: &str = include_str!("../../templates/prompts/text_variants_system.txt");

pub const MAX_TEXT_VARIANTS: i64 = 5;

#[derive(Debug, Deserialize)]
pub struct TextVariants {
    pub variants: Vec<String>,
}

impl TextVariants {
    pub fn schema() -> ResponseSchema {
        ResponseSchema::new(
            "TextVariants",
            json!({
                "type": "object",
                "properties": {
                    "variants": { "type": "array", "items": { "type": "string" } }
                },
                "required": ["variants"],
                "additionalProperties": false
            }),
        )
    }
}

/// Clamp a requested text-variant count into `[1, 5]`.
pub fn clamp_variant_count(requested: i64) -> usize {
    requested.clamp(1, MAX_TEXT_VARIANTS) as usize
}

pub fn build_messages(selected_text: &str, variant_count: usize) -> Vec<LlmMessage> {
    let user = TextVariantsUserPrompt {
        variant_count,
        variant_noun: if variant_count > 1 { "versions" } else { "version" },
        selected_text,
    };
    vec![LlmMessage::system(SYSTEM_PROMPT), LlmMessage::user(user.to_string())]
}

/// Rewrite `selected_text` `variant_count` ways. Returns at most `variant_count` strings.
pub async fn generate_text_variants(
    llm: &dyn StructuredLlm,
    selected_text: &str,
    variant_count: usize,
) -> Result<Vec<String>, LlmError> {
    let messages = build_messages(selected_text, variant_count);
    let mut response: TextVariants = llm::generate(llm, &messages, &TextVariants::schema()).await?;
    response.variants.truncate(variant_count);
    Ok(response.variants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_is_clamped_to_five() {
        assert_eq!(clamp_variant_count(-1), 1);
        assert_eq!(clamp_variant_count(3), 3);
        assert_eq!(clamp_variant_count(10), 5);
    }

    #[test]
    fn user_prompt_names_count_and_text() {
        let messages = build_messages("Grow revenue", 1);
        assert_eq!(messages.len(), 2);
        assert!(messages[1].content.starts_with("Write 1 alternative version of the following text:"));
        assert!(messages[1].content.contains("Grow revenue"));
    }
}
