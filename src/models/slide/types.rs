use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

/// A slide record. Every edit that changes what the slide renders re-keys the
/// row, so `id` identifies one revision of the slide.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Slide {
    pub id: Uuid,
    #[serde(rename = "presentation")]
    pub presentation_id: Uuid,
    #[serde(rename = "index")]
    pub slide_index: i64,
    pub layout_group: String,
    pub layout: String,
    #[sqlx(json)]
    pub content: Value,
    pub html_content: Option<String>,
    pub speaker_note: Option<String>,
}

/// Input for inserting a slide.
#[derive(Debug, Clone)]
pub struct NewSlide {
    pub presentation_id: Uuid,
    pub slide_index: i64,
    pub layout_group: String,
    pub layout: String,
    pub content: Value,
    pub html_content: Option<String>,
    pub speaker_note: Option<String>,
}

/// The result of a content edit, ready to be committed under a fresh id.
#[derive(Debug, Clone)]
pub struct ContentRevision {
    pub layout: String,
    pub content: Value,
    pub speaker_note: String,
}
