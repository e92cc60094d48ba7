//! Slide edit orchestration: load, generate, reconcile, commit under a new id.

use uuid::Uuid;

use crate::db::DbPool;
use crate::errors::AppError;
use crate::generation::assets::{AssetProvider, reconcile_assets};
use crate::generation::{html_edit, slide_edit};
use crate::llm::StructuredLlm;
use crate::models::presentation;
use crate::models::slide::{self, ContentRevision, Slide};

/// Regenerate a slide's structured content from an instruction.
///
/// Assets for new media placeholders are provisioned before the commit, so the
/// committed revision never points at an asset that does not exist.
pub async fn edit_content(
    pool: &DbPool,
    llm: &dyn StructuredLlm,
    assets: &dyn AssetProvider,
    slide_id: Uuid,
    prompt: &str,
) -> Result<Slide, AppError> {
    let slide = slide::find_by_id(pool, slide_id)
        .await?
        .ok_or(AppError::NotFound("Slide"))?;
    let presentation = presentation::find_by_id(pool, slide.presentation_id)
        .await?
        .ok_or(AppError::NotFound("Presentation"))?;

    let spec = slide_edit::select_slide_layout(llm, prompt, &presentation.layout, &slide)
        .await
        .map_err(|e| AppError::generation("Failed to select slide layout", e))?
        .ok_or_else(|| AppError::InvalidInput("Presentation has no slide layouts".to_string()))?;

    let mut content = slide_edit::edit_slide_content(llm, prompt, &slide, &presentation.language, spec)
        .await
        .map_err(|e| AppError::generation("Failed to edit slide", e))?;
    let speaker_note = slide_edit::take_speaker_note(&mut content);

    let changes = reconcile_assets(assets, &slide.content, &mut content)
        .await
        .map_err(|e| AppError::Generation(e.to_string()))?;
    log::info!(
        "Slide {slide_id}: layout {}, {} new assets, {} removed",
        spec.id,
        changes.created.len(),
        changes.removed.len()
    );

    let revision = ContentRevision {
        layout: spec.id.clone(),
        content,
        speaker_note,
    };
    slide::commit_content_edit(pool, slide_id, &revision, &changes).await
}

/// Apply an instruction to a slide's HTML. `html_override` wins over the
/// stored HTML; with neither there is nothing to edit.
pub async fn edit_html(
    pool: &DbPool,
    llm: &dyn StructuredLlm,
    slide_id: Uuid,
    prompt: &str,
    html_override: Option<&str>,
) -> Result<Slide, AppError> {
    let slide = slide::find_by_id(pool, slide_id)
        .await?
        .ok_or(AppError::NotFound("Slide"))?;

    let html_to_edit = html_override
        .filter(|h| !h.is_empty())
        .or(slide.html_content.as_deref().filter(|h| !h.is_empty()))
        .ok_or_else(|| AppError::InvalidInput("No HTML to edit".to_string()))?;

    let edited = html_edit::edit_slide_html(llm, prompt, html_to_edit)
        .await
        .map_err(|e| AppError::generation("Failed to edit slide HTML", e))?;

    slide::commit_html_edit(pool, slide_id, &edited).await
}

/// Store HTML the editor picked (e.g. a layout variant) as the slide's new revision.
pub async fn save_html_variant(pool: &DbPool, slide_id: Uuid, html_content: &str) -> Result<Slide, AppError> {
    if html_content.trim().is_empty() {
        return Err(AppError::InvalidInput("HTML content cannot be empty".to_string()));
    }
    slide::find_by_id(pool, slide_id)
        .await?
        .ok_or(AppError::NotFound("Slide"))?;
    slide::commit_html_edit(pool, slide_id, html_content).await
}
