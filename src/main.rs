use std::io;
use std::sync::Arc;

use actix_web::{App, HttpServer, middleware, web};

use slidedesk::config::{AppConfig, GenerationSettings};
use slidedesk::db;
use slidedesk::generation::assets::{AssetProvider, PlaceholderAssetProvider};
use slidedesk::handlers;
use slidedesk::llm::{OpenAiCompatibleClient, StructuredLlm};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let cfg = AppConfig::from_env().map_err(io::Error::other)?;

    // Ensure data directory exists for the default SQLite file
    std::fs::create_dir_all("data")?;

    let pool = db::init_pool(&cfg.database_url).await.map_err(io::Error::other)?;
    db::run_migrations(&pool).await.map_err(io::Error::other)?;
    if cfg.seed_demo {
        db::seed_demo(&pool).await.map_err(io::Error::other)?;
    }

    let client = OpenAiCompatibleClient::new(
        &cfg.llm_base_url,
        cfg.llm_api_key.clone(),
        &cfg.llm_model,
        cfg.llm_timeout,
    )
    .map_err(io::Error::other)?;
    if cfg.llm_api_key.is_none() {
        log::warn!("No LLM_API_KEY set; requests to {} go out unauthenticated", cfg.llm_base_url);
    }
    log::info!("LLM model {} at {}", client.model(), cfg.llm_base_url);
    if cfg.use_static_layout_variants {
        log::info!("Layout variants use the static generator");
    }

    let llm: Arc<dyn StructuredLlm> = Arc::new(client);
    let assets: Arc<dyn AssetProvider> = Arc::new(PlaceholderAssetProvider {
        image_url: cfg.placeholder_image_url.clone(),
        icon_url: cfg.placeholder_icon_url.clone(),
    });
    let settings = GenerationSettings::from(&cfg);

    log::info!("Starting server at http://{}", cfg.bind_addr);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::from(llm.clone()))
            .app_data(web::Data::from(assets.clone()))
            .app_data(web::Data::new(settings))
            .configure(handlers::api_v1::configure)
    })
    .bind(&cfg.bind_addr)?
    .run()
    .await
}
