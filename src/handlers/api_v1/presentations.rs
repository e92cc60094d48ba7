use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::{presentation, slide};
use crate::templates_structs::PresentationWithSlides;

/// GET /api/v1/ppt/presentation/all
pub async fn list(pool: web::Data<DbPool>) -> Result<HttpResponse, AppError> {
    let items = presentation::find_all_list_items(&pool).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// GET /api/v1/ppt/presentation/{id} - presentation plus its slides in order
pub async fn read(pool: web::Data<DbPool>, path: web::Path<Uuid>) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let presentation = presentation::find_by_id(&pool, id)
        .await?
        .ok_or(AppError::NotFound("Presentation"))?;
    let slides = slide::find_for_presentation(&pool, id).await?;

    Ok(HttpResponse::Ok().json(PresentationWithSlides { presentation, slides }))
}
