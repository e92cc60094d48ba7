use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// One slide layout a presentation may use, with the schema its content follows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideLayoutSpec {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub json_schema: Value,
}

/// The layout descriptor stored on a presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentationLayout {
    pub name: String,
    #[serde(default)]
    pub ordered: bool,
    pub slides: Vec<SlideLayoutSpec>,
}

impl PresentationLayout {
    pub fn find(&self, layout_id: &str) -> Option<&SlideLayoutSpec> {
        self.slides.iter().find(|s| s.id == layout_id)
    }
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Presentation {
    pub id: Uuid,
    pub title: String,
    pub language: String,
    #[sqlx(json)]
    pub layout: PresentationLayout,
    pub created_at: String,
    pub updated_at: String,
}

/// Row for the presentation list endpoint.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PresentationListItem {
    pub id: Uuid,
    pub title: String,
    pub language: String,
    pub slide_count: i64,
    pub created_at: String,
}

/// Input for creating a presentation.
#[derive(Debug, Clone, Deserialize)]
pub struct NewPresentation {
    pub title: String,
    pub language: String,
    pub layout: PresentationLayout,
}
