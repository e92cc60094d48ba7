use sqlx::SqliteConnection;
use uuid::Uuid;

use crate::db::DbPool;
use crate::errors::AppError;
use super::types::*;

/// All assets currently owned by a slide.
pub async fn find_for_slide(pool: &DbPool, slide_id: Uuid) -> Result<Vec<Asset>, AppError> {
    let assets = sqlx::query_as::<_, Asset>(
        "SELECT id, slide_id, kind, prompt, url, created_at \
         FROM assets WHERE slide_id = ?1 ORDER BY created_at, rowid",
    )
    .bind(slide_id)
    .fetch_all(pool)
    .await?;
    Ok(assets)
}

/// Record an asset for a slide. Runs on a caller-owned connection so it can
/// join the slide commit's transaction.
pub async fn insert(conn: &mut SqliteConnection, slide_id: Uuid, asset: &NewAsset) -> Result<Uuid, AppError> {
    let id = Uuid::new_v4();
    sqlx::query("INSERT INTO assets (id, slide_id, kind, prompt, url) VALUES (?1, ?2, ?3, ?4, ?5)")
        .bind(id)
        .bind(slide_id)
        .bind(asset.kind)
        .bind(&asset.prompt)
        .bind(&asset.url)
        .execute(conn)
        .await?;
    Ok(id)
}

/// Delete the slide's assets for a placeholder that disappeared from its content.
pub async fn delete_by_prompt(
    conn: &mut SqliteConnection,
    slide_id: Uuid,
    kind: AssetKind,
    prompt: &str,
) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM assets WHERE slide_id = ?1 AND kind = ?2 AND prompt = ?3")
        .bind(slide_id)
        .bind(kind)
        .bind(prompt)
        .execute(conn)
        .await?;
    Ok(result.rows_affected())
}
