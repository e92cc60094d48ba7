//! Prompt text for layout-variant generation.
//!
//! Pure and deterministic: the same input always renders byte-identical
//! prompts.

use crate::templates_structs::LayoutVariantsUserPrompt;

use super::BlockType;

const SYSTEM_PROMPT: &str = include_str!("../../../templates/prompts/layout_variants_system.txt");
const LIST_CONTAINER_EXAMPLES: &str = include_str!("../../../templates/prompts/list_container_examples.txt");

/// Narrowest column the designs may use, in pixels.
const MIN_COLUMN_WIDTH: i64 = 150;
const MAX_COLUMNS: i64 = 3;

const GRID_CONTAINER_SUGGESTIONS: [&str; 3] = [
    "2-column grid layout with equal spacing",
    "3-column grid layout for better content distribution",
    "4-column grid layout for compact display",
];

const COLUMN_SUGGESTIONS: [&str; 3] = [
    "Asymmetric spacing with dramatic top/bottom margins for visual impact",
    "Compact tight vertical stack for efficiency (minimal spacing)",
    "Airy generous spacing with rhythmic gaps for elegance and breathing room",
];

const LIST_CONTAINER_SUGGESTIONS: [&str; 3] = [
    "Vertical list with generous spacing (space-y-6 or space-y-8)",
    "2-column grid layout (grid grid-cols-2 gap-4) - wrap items in grid container",
    "Horizontal flex layout (flex flex-row gap-4) for compact display",
];

const LIST_ITEM_SUGGESTIONS: [&str; 3] = [
    "Compact inline layout with icon on left",
    "Card-style layout with prominent visual",
    "Minimal layout with icon and title only",
];

const GENERIC_SUGGESTIONS: [&str; 3] = [
    "Improved spacing and visual hierarchy",
    "Alternative column arrangement",
    "Reorganized content structure",
];

const OPEN_SUGGESTION: &str = "Your creative alternative - surprise us!";

/// Everything the prompt builder needs about the selected block. Dimensions
/// are validated positive by the caller and `variant_count` is already clamped.
#[derive(Debug, Clone)]
pub struct LayoutPromptInput<'a> {
    pub html: &'a str,
    pub full_slide_html: &'a str,
    pub block_type: BlockType,
    pub available_width: i64,
    pub available_height: i64,
    pub parent_container_info: Option<&'a str>,
    pub variant_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPrompts {
    pub system: String,
    pub user: String,
}

pub fn layout_suggestions(block_type: &BlockType) -> &'static [&'static str] {
    match block_type {
        BlockType::GridContainer => &GRID_CONTAINER_SUGGESTIONS,
        BlockType::Column => &COLUMN_SUGGESTIONS,
        BlockType::ListContainer => &LIST_CONTAINER_SUGGESTIONS,
        BlockType::ListItem => &LIST_ITEM_SUGGESTIONS,
        BlockType::Other(_) => &GENERIC_SUGGESTIONS,
    }
}

pub fn max_columns(available_width: i64) -> i64 {
    (available_width / MIN_COLUMN_WIDTH).min(MAX_COLUMNS)
}

fn direction_lines(block_type: &BlockType, variant_count: usize) -> String {
    let suggestions = layout_suggestions(block_type);
    (0..variant_count)
        .map(|i| format!("{}. {}", i + 1, suggestions.get(i).copied().unwrap_or(OPEN_SUGGESTION)))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_layout_prompts(input: &LayoutPromptInput<'_>) -> LayoutPrompts {
    let parent_info = input
        .parent_container_info
        .filter(|info| !info.is_empty())
        .map(|info| format!("\n\n**Parent Container**: {info}"))
        .unwrap_or_default();

    let slide_context = if input.full_slide_html.is_empty() {
        String::new()
    } else {
        format!(
            "\n\n**Full Slide HTML Context** (for understanding colors, themes, and overall layout):\n```html\n{}\n```",
            input.full_slide_html
        )
    };

    let examples = if input.block_type == BlockType::ListContainer {
        LIST_CONTAINER_EXAMPLES
    } else {
        ""
    };

    let user = LayoutVariantsUserPrompt {
        variant_count: input.variant_count,
        variant_noun: if input.variant_count > 1 { "variants" } else { "variant" },
        block_type: input.block_type.as_str(),
        available_width: input.available_width,
        available_height: input.available_height,
        parent_info,
        max_columns: max_columns(input.available_width),
        html: input.html,
        slide_context,
        directions: direction_lines(&input.block_type, input.variant_count),
        examples,
    };

    LayoutPrompts {
        system: SYSTEM_PROMPT.to_string(),
        user: user.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(block_type: BlockType, width: i64, count: usize) -> LayoutPromptInput<'static> {
        LayoutPromptInput {
            html: r#"<ul class="space-y-2"><li>A</li></ul>"#,
            full_slide_html: "",
            block_type,
            available_width: width,
            available_height: 400,
            parent_container_info: None,
            variant_count: count,
        }
    }

    #[test]
    fn prompts_are_deterministic() {
        let mut i = input(BlockType::ListContainer, 640, 3);
        i.full_slide_html = "<div class=\"bg-slate-900\">slide</div>";
        i.parent_container_info = Some("flex-1 column within md:w-1/2 parent");
        assert_eq!(build_layout_prompts(&i), build_layout_prompts(&i));
    }

    #[test]
    fn column_ceiling_follows_width() {
        assert_eq!(max_columns(100), 0);
        assert_eq!(max_columns(299), 1);
        assert_eq!(max_columns(300), 2);
        assert_eq!(max_columns(450), 3);
        assert_eq!(max_columns(2000), 3);

        let user = build_layout_prompts(&input(BlockType::Column, 320, 2)).user;
        assert!(user.contains("- Maximum columns possible: 2 (based on 150px minimum per column)"));
        assert!(user.contains("- Available Space: 320px × 400px"));
    }

    #[test]
    fn suggestions_follow_block_type_and_count() {
        let user = build_layout_prompts(&input(BlockType::GridContainer, 900, 2)).user;
        assert!(user.contains("1. 2-column grid layout with equal spacing\n2. 3-column grid layout"));
        assert!(!user.contains("3. 4-column grid layout"));

        let user = build_layout_prompts(&input(BlockType::Other("hero".into()), 900, 1)).user;
        assert!(user.contains("- Type: hero"));
        assert!(user.contains("1. Improved spacing and visual hierarchy"));
        assert!(user.contains("Design 1 creative layout variant for"));
    }

    #[test]
    fn list_container_gets_examples_and_block_html() {
        let user = build_layout_prompts(&input(BlockType::ListContainer, 900, 3)).user;
        assert!(user.contains("**IMPORTANT EXAMPLES**"));
        assert!(user.contains("```html\n<ul class=\"space-y-2\"><li>A</li></ul>\n```"));

        let other = build_layout_prompts(&input(BlockType::ListItem, 900, 3)).user;
        assert!(!other.contains("**IMPORTANT EXAMPLES**"));
    }

    #[test]
    fn optional_context_is_only_included_when_present() {
        let bare = build_layout_prompts(&input(BlockType::Column, 500, 3)).user;
        assert!(!bare.contains("**Parent Container**"));
        assert!(!bare.contains("**Full Slide HTML Context**"));

        let mut i = input(BlockType::Column, 500, 3);
        i.parent_container_info = Some("grid cell");
        i.full_slide_html = "<section>whole slide</section>";
        let user = build_layout_prompts(&i).user;
        assert!(user.contains("500px × 400px\n\n**Parent Container**: grid cell"));
        assert!(user.contains("```html\n<section>whole slide</section>\n```"));
    }

    #[test]
    fn system_prompt_is_the_designer_brief() {
        let system = build_layout_prompts(&input(BlockType::Column, 500, 3)).system;
        assert!(system.starts_with("You are a creative presentation designer"));
        assert!(system.contains("Grid columns need minimum 150px each"));
    }
}
