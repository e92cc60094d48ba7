use serde::Serialize;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Icon,
}

impl AssetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetKind::Image => "image",
            AssetKind::Icon => "icon",
        }
    }
}

/// A provisioned media reference owned by a slide.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Asset {
    pub id: Uuid,
    pub slide_id: Uuid,
    pub kind: AssetKind,
    pub prompt: String,
    pub url: String,
    pub created_at: String,
}

/// An asset provisioned during reconciliation but not yet committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAsset {
    pub kind: AssetKind,
    pub prompt: String,
    pub url: String,
}

/// Net asset changes between two revisions of a slide's content.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetChanges {
    pub created: Vec<NewAsset>,
    /// (kind, prompt) of placeholders that no longer appear in the content.
    pub removed: Vec<(AssetKind, String)>,
}
