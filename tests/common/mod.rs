//! Shared test infrastructure.
//!
//! - `setup_test_db()` - in-memory SQLite with migrations applied
//! - `StubLlm` - canned answers keyed by response schema name
//! - `StubAssets` - deterministic asset URLs derived from the prompt
//! - `test_app()` - the API routes wired to the stubs

#![allow(dead_code)]

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use async_trait::async_trait;
use serde_json::{Value, json};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use uuid::Uuid;

use slidedesk::config::GenerationSettings;
use slidedesk::db::{self, DbPool};
use slidedesk::generation::assets::{AssetError, AssetProvider};
use slidedesk::handlers;
use slidedesk::llm::{LlmError, LlmMessage, ResponseSchema, StructuredLlm};
use slidedesk::models::asset::AssetKind;
use slidedesk::models::presentation::{self, NewPresentation, PresentationLayout, SlideLayoutSpec};
use slidedesk::models::slide::{self, NewSlide};

// ============================================================================
// DATABASE SETUP
// ============================================================================

pub struct TestDb {
    pool: DbPool,
}

impl TestDb {
    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

/// A fresh in-memory database. One connection, never recycled, so every
/// query sees the same database.
pub async fn setup_test_db() -> TestDb {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("parse sqlite url")
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory DB");
    db::run_migrations(&pool).await.expect("Failed to run migrations");
    TestDb { pool }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub fn title_layout() -> SlideLayoutSpec {
    SlideLayoutSpec {
        id: "general:title-slide".to_string(),
        name: Some("Title Slide".to_string()),
        description: Some("Big title, subtitle and a hero image".to_string()),
        json_schema: json!({
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "subtitle": { "type": "string" },
                "image": {
                    "type": "object",
                    "properties": { "__image_prompt__": { "type": "string" } }
                }
            },
            "required": ["title"]
        }),
    }
}

pub fn bullets_layout() -> SlideLayoutSpec {
    SlideLayoutSpec {
        id: "general:bullet-icons".to_string(),
        name: Some("Bullets with icons".to_string()),
        description: None,
        json_schema: json!({
            "type": "object",
            "properties": {
                "title": { "type": "string" },
                "bullets": { "type": "array" }
            },
            "required": ["title", "bullets"]
        }),
    }
}

pub async fn create_presentation(pool: &DbPool, slides: Vec<SlideLayoutSpec>) -> Uuid {
    let new = NewPresentation {
        title: "Test deck".to_string(),
        language: "English".to_string(),
        layout: PresentationLayout {
            name: "general".to_string(),
            ordered: false,
            slides,
        },
    };
    presentation::create(pool, &new).await.expect("create presentation")
}

pub async fn create_slide(
    pool: &DbPool,
    presentation_id: Uuid,
    layout: &str,
    content: Value,
    html_content: Option<&str>,
) -> Uuid {
    let new = NewSlide {
        presentation_id,
        slide_index: 0,
        layout_group: "general".to_string(),
        layout: layout.to_string(),
        content,
        html_content: html_content.map(str::to_string),
        speaker_note: None,
    };
    slide::create(pool, &new).await.expect("create slide")
}

// ============================================================================
// STUBS
// ============================================================================

/// Answers each structured call with the canned value registered for the
/// schema name, and records which schemas were asked for.
#[derive(Default)]
pub struct StubLlm {
    answers: HashMap<&'static str, Value>,
    pub calls: Mutex<Vec<String>>,
}

impl StubLlm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, schema: &'static str, value: Value) -> Self {
        self.answers.insert(schema, value);
        self
    }

    pub fn called(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl StructuredLlm for StubLlm {
    async fn generate_structured(
        &self,
        _messages: &[LlmMessage],
        schema: &ResponseSchema,
    ) -> Result<Value, LlmError> {
        self.calls.lock().unwrap().push(schema.name.to_string());
        self.answers.get(schema.name).cloned().ok_or_else(|| LlmError::Api {
            status: 503,
            body: format!("no stubbed answer for {}", schema.name),
        })
    }
}

/// Hands out `/assets/{kind}/{prompt}` and remembers every request.
#[derive(Default)]
pub struct StubAssets {
    pub provisioned: Mutex<Vec<(AssetKind, String)>>,
}

#[async_trait]
impl AssetProvider for StubAssets {
    async fn provision(&self, kind: AssetKind, prompt: &str) -> Result<String, AssetError> {
        self.provisioned.lock().unwrap().push((kind, prompt.to_string()));
        Ok(format!("/assets/{}/{}", kind.as_str(), prompt.replace(' ', "-")))
    }
}

// ============================================================================
// APP
// ============================================================================

pub fn test_app(
    pool: &DbPool,
    llm: Arc<dyn StructuredLlm>,
    assets: Arc<dyn AssetProvider>,
    settings: GenerationSettings,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    > + use<>,
> {
    App::new()
        .app_data(web::Data::new(pool.clone()))
        .app_data(web::Data::from(llm))
        .app_data(web::Data::from(assets))
        .app_data(web::Data::new(settings))
        .configure(handlers::api_v1::configure)
}
