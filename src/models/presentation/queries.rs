use sqlx::types::Json;
use uuid::Uuid;

use crate::db::DbPool;
use crate::errors::AppError;
use super::types::*;

const SELECT_PRESENTATION: &str =
    "SELECT id, title, language, layout, created_at, updated_at FROM presentations";

/// Find a single presentation by id.
pub async fn find_by_id(pool: &DbPool, id: Uuid) -> Result<Option<Presentation>, AppError> {
    let presentation = sqlx::query_as::<_, Presentation>(&format!("{SELECT_PRESENTATION} WHERE id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(presentation)
}

/// List all presentations, newest first, with their slide counts.
pub async fn find_all_list_items(pool: &DbPool) -> Result<Vec<PresentationListItem>, AppError> {
    let items = sqlx::query_as::<_, PresentationListItem>(
        "SELECT p.id, p.title, p.language, \
                (SELECT COUNT(*) FROM slides s WHERE s.presentation_id = p.id) AS slide_count, \
                p.created_at \
         FROM presentations p \
         ORDER BY p.created_at DESC, p.title",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

/// Create a presentation, returning its new id.
pub async fn create(pool: &DbPool, new: &NewPresentation) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO presentations (id, title, language, layout) VALUES (?1, ?2, ?3, ?4)")
        .bind(id)
        .bind(&new.title)
        .bind(&new.language)
        .bind(Json(&new.layout))
        .execute(pool)
        .await?;
    Ok(id)
}

/// Count presentations (used to decide whether to seed demo data).
pub async fn count(pool: &DbPool) -> Result<i64, AppError> {
    let (n,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM presentations")
        .fetch_one(pool)
        .await?;
    Ok(n)
}
