use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::config::GenerationSettings;
use crate::db::DbPool;
use crate::editing;
use crate::errors::AppError;
use crate::generation::assets::AssetProvider;
use crate::generation::layout_variants::{self, BlockType, LayoutPromptInput};
use crate::generation::text_variants;
use crate::llm::StructuredLlm;
use crate::models::slide;
use crate::templates_structs::{
    EditSlideHtmlRequest, EditSlideRequest, LayoutVariantsRequest, LayoutVariantsResponse,
    SaveHtmlVariantRequest, TextVariantsRequest, TextVariantsResponse,
};

/// GET /api/v1/ppt/slide/{id}
pub async fn read(pool: web::Data<DbPool>, path: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
    let slide = slide::find_by_id(&pool, path.into_inner())
        .await?
        .ok_or(AppError::NotFound("Slide"))?;
    Ok(HttpResponse::Ok().json(slide))
}

/// POST /api/v1/ppt/slide/edit - regenerate content; the slide comes back under a new id
pub async fn edit(
    pool: web::Data<DbPool>,
    llm: web::Data<dyn StructuredLlm>,
    assets: web::Data<dyn AssetProvider>,
    body: web::Json<EditSlideRequest>,
) -> Result<HttpResponse, AppError> {
    let slide = editing::edit_content(&pool, llm.get_ref(), assets.get_ref(), body.id, &body.prompt).await?;
    Ok(HttpResponse::Ok().json(slide))
}

/// POST /api/v1/ppt/slide/edit-html
pub async fn edit_html(
    pool: web::Data<DbPool>,
    llm: web::Data<dyn StructuredLlm>,
    body: web::Json<EditSlideHtmlRequest>,
) -> Result<HttpResponse, AppError> {
    let slide = editing::edit_html(&pool, llm.get_ref(), body.id, &body.prompt, body.html.as_deref()).await?;
    Ok(HttpResponse::Ok().json(slide))
}

/// POST /api/v1/ppt/slide/save-html-variant
pub async fn save_html_variant(
    pool: web::Data<DbPool>,
    body: web::Json<SaveHtmlVariantRequest>,
) -> Result<HttpResponse, AppError> {
    let slide = editing::save_html_variant(&pool, body.id, &body.html_content).await?;
    Ok(HttpResponse::Ok().json(slide))
}

/// POST /api/v1/ppt/slide/text-variants
pub async fn text_variants(
    llm: web::Data<dyn StructuredLlm>,
    body: web::Json<TextVariantsRequest>,
) -> Result<HttpResponse, AppError> {
    if body.selected_text.trim().is_empty() {
        return Err(AppError::InvalidInput("Selected text cannot be empty".to_string()));
    }
    let count = text_variants::clamp_variant_count(body.variant_count);

    let variants = text_variants::generate_text_variants(llm.get_ref(), &body.selected_text, count)
        .await
        .map_err(|e| AppError::generation("Failed to generate text variants", e))?;

    Ok(HttpResponse::Ok().json(TextVariantsResponse { variants }))
}

/// POST /api/v1/ppt/slide/layout-variants
pub async fn layout_variants(
    llm: web::Data<dyn StructuredLlm>,
    settings: web::Data<GenerationSettings>,
    body: web::Json<LayoutVariantsRequest>,
) -> Result<HttpResponse, AppError> {
    if body.html.trim().is_empty() {
        return Err(AppError::InvalidInput("HTML content cannot be empty".to_string()));
    }
    let block_type = body
        .block_type
        .as_deref()
        .map(str::trim)
        .filter(|b| !b.is_empty())
        .ok_or_else(|| AppError::InvalidInput("Block type is required".to_string()))?;
    if body.available_width <= 0 || body.available_height <= 0 {
        return Err(AppError::InvalidInput("Available dimensions must be positive".to_string()));
    }

    let input = LayoutPromptInput {
        html: &body.html,
        full_slide_html: body.full_slide_html.as_deref().unwrap_or(""),
        block_type: BlockType::parse(block_type),
        available_width: body.available_width,
        available_height: body.available_height,
        parent_container_info: body.parent_container_info.as_deref(),
        variant_count: layout_variants::clamp_variant_count(body.variant_count),
    };

    let variants = layout_variants::generate_layout_variants(llm.get_ref(), &input, settings.use_static_layout_variants)
        .await
        .map_err(|e| AppError::generation("Failed to generate layout variants", e))?;

    Ok(HttpResponse::Ok().json(LayoutVariantsResponse { variants }))
}
