//! Alternative layouts for a selected HTML block.

pub mod prompts;
pub mod static_variants;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::llm::{self, LlmError, LlmMessage, ResponseSchema, StructuredLlm};

pub use prompts::{LayoutPromptInput, LayoutPrompts, build_layout_prompts};
pub use static_variants::{generate_static_variants, strip_layout_classes};

pub const MAX_LAYOUT_VARIANTS: i64 = 3;

/// Kind of block the editor selected. Unknown kinds are kept verbatim so
/// they can still be echoed into the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockType {
    GridContainer,
    Column,
    ListContainer,
    ListItem,
    Other(String),
}

impl BlockType {
    pub fn parse(value: &str) -> Self {
        match value {
            "grid-container" => BlockType::GridContainer,
            "column" => BlockType::Column,
            "list-container" => BlockType::ListContainer,
            "list-item" => BlockType::ListItem,
            other => BlockType::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            BlockType::GridContainer => "grid-container",
            BlockType::Column => "column",
            BlockType::ListContainer => "list-container",
            BlockType::ListItem => "list-item",
            BlockType::Other(s) => s,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutVariant {
    pub title: String,
    pub description: String,
    pub html: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutVariants {
    pub variants: Vec<LayoutVariant>,
}

impl LayoutVariants {
    pub fn schema() -> ResponseSchema {
        ResponseSchema::new(
            "LayoutVariants",
            json!({
                "type": "object",
                "properties": {
                    "variants": {
                        "type": "array",
                        "items": {
                            "type": "object",
                            "properties": {
                                "title": { "type": "string" },
                                "description": { "type": "string" },
                                "html": { "type": "string" }
                            },
                            "required": ["title", "description", "html"],
                            "additionalProperties": false
                        }
                    }
                },
                "required": ["variants"],
                "additionalProperties": false
            }),
        )
    }
}

/// Clamp a requested layout-variant count into `[1, 3]`.
pub fn clamp_variant_count(requested: i64) -> usize {
    requested.clamp(1, MAX_LAYOUT_VARIANTS) as usize
}

/// Ask the model for layout variants, or use the rule-based generator when
/// `use_static` is set. `input.variant_count` must already be clamped.
pub async fn generate_layout_variants(
    llm: &dyn StructuredLlm,
    input: &LayoutPromptInput<'_>,
    use_static: bool,
) -> Result<Vec<LayoutVariant>, LlmError> {
    if use_static {
        log::info!("Layout variants: using static generator");
        return Ok(generate_static_variants(
            input.html,
            &input.block_type,
            input.available_width,
            input.variant_count,
        ));
    }

    log::debug!(
        "Layout variants input: block html {} chars, slide html {} chars, ~{} tokens",
        input.html.len(),
        input.full_slide_html.len(),
        (input.html.len() + input.full_slide_html.len()) / 4
    );

    let prompts = build_layout_prompts(input);
    log::debug!(
        "Layout variants prompt: {} chars (~{} tokens)",
        prompts.user.len(),
        prompts.user.len() / 4
    );

    let messages = [LlmMessage::system(prompts.system), LlmMessage::user(prompts.user)];
    let mut response: LayoutVariants = llm::generate(llm, &messages, &LayoutVariants::schema()).await?;
    response.variants.truncate(input.variant_count);
    Ok(response.variants)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_type_round_trips_known_and_unknown() {
        assert_eq!(BlockType::parse("list-container"), BlockType::ListContainer);
        assert_eq!(BlockType::parse("grid-container").as_str(), "grid-container");
        let other = BlockType::parse("hero-banner");
        assert_eq!(other, BlockType::Other("hero-banner".into()));
        assert_eq!(other.as_str(), "hero-banner");
    }

    #[test]
    fn variant_count_is_clamped() {
        assert_eq!(clamp_variant_count(-4), 1);
        assert_eq!(clamp_variant_count(0), 1);
        assert_eq!(clamp_variant_count(2), 2);
        assert_eq!(clamp_variant_count(10), 3);
    }
}
