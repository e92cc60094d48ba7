use sqlx::SqliteConnection;
use sqlx::types::Json;
use uuid::Uuid;

use crate::db::DbPool;
use crate::errors::AppError;
use crate::models::asset::{self, AssetChanges};
use super::types::*;

const SELECT_SLIDE: &str = "SELECT id, presentation_id, slide_index, layout_group, layout, content, \
                            html_content, speaker_note FROM slides";

/// Find a single slide by id.
pub async fn find_by_id(pool: &DbPool, id: Uuid) -> Result<Option<Slide>, AppError> {
    let slide = sqlx::query_as::<_, Slide>(&format!("{SELECT_SLIDE} WHERE id = ?1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(slide)
}

/// All slides of a presentation, in display order.
pub async fn find_for_presentation(pool: &DbPool, presentation_id: Uuid) -> Result<Vec<Slide>, AppError> {
    let slides = sqlx::query_as::<_, Slide>(&format!(
        "{SELECT_SLIDE} WHERE presentation_id = ?1 ORDER BY slide_index, rowid"
    ))
    .bind(presentation_id)
    .fetch_all(pool)
    .await?;
    Ok(slides)
}

/// Insert a slide, returning its id.
pub async fn create(pool: &DbPool, new: &NewSlide) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    sqlx::query(
        "INSERT INTO slides (id, presentation_id, slide_index, layout_group, layout, content, html_content, speaker_note) \
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
    )
    .bind(id)
    .bind(new.presentation_id)
    .bind(new.slide_index)
    .bind(&new.layout_group)
    .bind(&new.layout)
    .bind(Json(&new.content))
    .bind(&new.html_content)
    .bind(&new.speaker_note)
    .execute(pool)
    .await?;
    Ok(id)
}

/// Move a slide to a fresh id. Assets follow via `ON UPDATE CASCADE`.
async fn rekey(conn: &mut SqliteConnection, old_id: Uuid) -> Result<Uuid, AppError> {
    let new_id = Uuid::new_v4();
    let result = sqlx::query("UPDATE slides SET id = ?1 WHERE id = ?2")
        .bind(new_id)
        .bind(old_id)
        .execute(conn)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Slide"));
    }
    Ok(new_id)
}

/// Commit a content edit: re-key the slide, store the new content, layout and
/// speaker note, and apply the asset changes, all in one transaction.
pub async fn commit_content_edit(
    pool: &DbPool,
    old_id: Uuid,
    revision: &ContentRevision,
    changes: &AssetChanges,
) -> Result<Slide, AppError> {
    let mut tx = pool.begin().await?;

    let new_id = rekey(&mut *tx, old_id).await?;

    sqlx::query("UPDATE slides SET content = ?1, layout = ?2, speaker_note = ?3 WHERE id = ?4")
        .bind(Json(&revision.content))
        .bind(&revision.layout)
        .bind(&revision.speaker_note)
        .bind(new_id)
        .execute(&mut *tx)
        .await?;

    for (kind, prompt) in &changes.removed {
        asset::delete_by_prompt(&mut *tx, new_id, *kind, prompt).await?;
    }
    for new_asset in &changes.created {
        asset::insert(&mut *tx, new_id, new_asset).await?;
    }

    let slide = sqlx::query_as::<_, Slide>(&format!("{SELECT_SLIDE} WHERE id = ?1"))
        .bind(new_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(slide)
}

/// Replace a slide's rendered HTML under a fresh id.
pub async fn commit_html_edit(pool: &DbPool, old_id: Uuid, html: &str) -> Result<Slide, AppError> {
    let mut tx = pool.begin().await?;

    let new_id = rekey(&mut *tx, old_id).await?;

    sqlx::query("UPDATE slides SET html_content = ?1 WHERE id = ?2")
        .bind(html)
        .bind(new_id)
        .execute(&mut *tx)
        .await?;

    let slide = sqlx::query_as::<_, Slide>(&format!("{SELECT_SLIDE} WHERE id = ?1"))
        .bind(new_id)
        .fetch_one(&mut *tx)
        .await?;

    tx.commit().await?;
    Ok(slide)
}
