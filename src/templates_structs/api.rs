use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::generation::layout_variants::LayoutVariant;
use crate::models::presentation::Presentation;
use crate::models::slide::Slide;

fn default_variant_count() -> i64 {
    3
}

/// POST /slide/edit body.
#[derive(Deserialize, Debug)]
pub struct EditSlideRequest {
    pub id: Uuid,
    pub prompt: String,
}

/// POST /slide/edit-html body. `html` overrides the stored HTML when present.
#[derive(Deserialize, Debug)]
pub struct EditSlideHtmlRequest {
    pub id: Uuid,
    pub prompt: String,
    #[serde(default)]
    pub html: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct SaveHtmlVariantRequest {
    pub id: Uuid,
    pub html_content: String,
}

#[derive(Deserialize, Debug)]
pub struct TextVariantsRequest {
    pub selected_text: String,
    #[serde(default = "default_variant_count")]
    pub variant_count: i64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct TextVariantsResponse {
    pub variants: Vec<String>,
}

/// POST /slide/layout-variants body.
#[derive(Deserialize, Debug)]
pub struct LayoutVariantsRequest {
    pub html: String,
    #[serde(default)]
    pub block_type: Option<String>,
    pub available_width: i64,
    pub available_height: i64,
    /// Accepted for client compatibility; not used.
    #[serde(default)]
    pub screenshot_base64: Option<String>,
    #[serde(default)]
    pub parent_container_info: Option<String>,
    #[serde(default)]
    pub full_slide_html: Option<String>,
    #[serde(default = "default_variant_count")]
    pub variant_count: i64,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct LayoutVariantsResponse {
    pub variants: Vec<LayoutVariant>,
}

/// A presentation together with its slides in order.
#[derive(Serialize, Debug)]
pub struct PresentationWithSlides {
    #[serde(flatten)]
    pub presentation: Presentation,
    pub slides: Vec<Slide>,
}

/// API error response.
#[derive(Serialize, Debug)]
pub struct ApiErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
