//! Model-backed generation: prompts, structured calls and the rule-based
//! fallbacks around them.

pub mod assets;
pub mod html_edit;
pub mod layout_variants;
pub mod slide_edit;
pub mod text_variants;
