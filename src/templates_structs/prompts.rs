//! Askama templates for model prompts. Rendered as plain text (no escaping).

use askama::Template;

#[derive(Template)]
#[template(path = "prompts/layout_variants_user.txt")]
pub struct LayoutVariantsUserPrompt<'a> {
    pub variant_count: usize,
    pub variant_noun: &'a str,
    pub block_type: &'a str,
    pub available_width: i64,
    pub available_height: i64,
    pub parent_info: String,
    pub max_columns: i64,
    pub html: &'a str,
    pub slide_context: String,
    pub directions: String,
    pub examples: &'a str,
}

#[derive(Template)]
#[template(path = "prompts/text_variants_user.txt")]
pub struct TextVariantsUserPrompt<'a> {
    pub variant_count: usize,
    pub variant_noun: &'a str,
    pub selected_text: &'a str,
}

#[derive(Template)]
#[template(path = "prompts/edit_slide_system.txt")]
pub struct EditSlideSystemPrompt<'a> {
    pub language: &'a str,
    pub layout_name: &'a str,
    pub layout_description: &'a str,
}

#[derive(Template)]
#[template(path = "prompts/edit_slide_user.txt")]
pub struct EditSlideUserPrompt<'a> {
    pub prompt: &'a str,
    pub content: String,
}

#[derive(Template)]
#[template(path = "prompts/select_layout_user.txt")]
pub struct SelectLayoutUserPrompt<'a> {
    pub prompt: &'a str,
    pub current_layout: &'a str,
    pub content: String,
    pub layouts: String,
}

#[derive(Template)]
#[template(path = "prompts/edit_html_user.txt")]
pub struct EditHtmlUserPrompt<'a> {
    pub prompt: &'a str,
    pub html: &'a str,
}
