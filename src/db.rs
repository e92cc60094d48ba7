use std::str::FromStr;

use serde::Deserialize;
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::errors::AppError;
use crate::models::presentation::{self, NewPresentation};
use crate::models::slide::{self, NewSlide};

pub type DbPool = SqlitePool;

const DEMO_SEED: &str = include_str!("../data/seed/demo.json");

pub async fn init_pool(database_url: &str) -> Result<DbPool, AppError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(8)
        .connect_with(options)
        .await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &DbPool) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    log::info!("Database migrations complete");
    Ok(())
}

#[derive(Deserialize)]
struct SeedSlide {
    layout: String,
    #[serde(default)]
    layout_group: String,
    content: Value,
    #[serde(default)]
    html_content: Option<String>,
    #[serde(default)]
    speaker_note: Option<String>,
}

#[derive(Deserialize)]
struct SeedPresentation {
    #[serde(flatten)]
    presentation: NewPresentation,
    slides: Vec<SeedSlide>,
}

/// Import a seed presentation with its slides. Returns the presentation id.
async fn import_seed(pool: &DbPool, json: &str, label: &str) -> Result<uuid::Uuid, AppError> {
    let seed: SeedPresentation = serde_json::from_str(json)
        .map_err(|e| AppError::Config(format!("Bad {label} seed JSON: {e}")))?;

    let presentation_id = presentation::create(pool, &seed.presentation).await?;
    for (index, s) in seed.slides.into_iter().enumerate() {
        slide::create(
            pool,
            &NewSlide {
                presentation_id,
                slide_index: index as i64,
                layout_group: s.layout_group,
                layout: s.layout,
                content: s.content,
                html_content: s.html_content,
                speaker_note: s.speaker_note,
            },
        )
        .await?;
    }
    log::info!("Seed {label}: created presentation {presentation_id}");
    Ok(presentation_id)
}

/// Seed the bundled demo presentation when the database has no presentations.
pub async fn seed_demo(pool: &DbPool) -> Result<(), AppError> {
    let count = presentation::count(pool).await?;
    if count > 0 {
        log::info!("Database already seeded ({count} presentations), skipping demo seed");
        return Ok(());
    }
    import_seed(pool, DEMO_SEED, "demo").await?;
    Ok(())
}
