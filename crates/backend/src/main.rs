use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, Method};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use wms_backend::routes::configure_routes;
use wms_backend::shared::config::{load_config, require_api_key, resolve_path, resolve_port};
use wms_backend::shared::data::db::initialize_database;
use wms_backend::shared::llm::{LlmProvider, OpenAiProvider};
use wms_backend::shared::local_store::{FileLocalStore, LocalStore};
use wms_backend::shared::AppState;
use wms_backend::system;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env не обязателен
    let _ = dotenvy::dotenv();

    let config = load_config()?;
    system::tracing::initialize(&resolve_path(&config.logging.dir))?;

    // Без ключа LLM сервер не стартует
    let api_key = match require_api_key(
        &config.llm.api_key_env,
        std::env::var(&config.llm.api_key_env).ok(),
    ) {
        Ok(key) => key,
        Err(e) => {
            tracing::error!("{}", e);
            return Err(e);
        }
    };

    let db_path = resolve_path(&config.database.path);
    tracing::info!("Opening database: {}", db_path.display());
    let db = initialize_database(&db_path)
        .await
        .map_err(|e| anyhow::anyhow!("db init failed: {e}"))?;

    let local_store: Arc<dyn LocalStore> =
        Arc::new(FileLocalStore::open(resolve_path(&config.storage.dir))?);

    let provider = match &config.llm.api_base {
        Some(endpoint) => {
            OpenAiProvider::new_with_endpoint(endpoint.clone(), api_key, config.llm.model.clone())
        }
        None => OpenAiProvider::new(api_key, config.llm.model.clone()),
    };
    tracing::info!("LLM model: {}", provider.model());
    let llm: Arc<dyn LlmProvider> = Arc::new(provider);

    let state = AppState::new(db, local_store, llm)?;

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    let app = configure_routes(state).layer(cors);

    let port = resolve_port(&config, std::env::var("PORT").ok());
    let addr: SocketAddr = ([0, 0, 0, 0], port).into();

    tracing::info!("Attempting to bind server to http://{}", addr);
    let listener = match TcpListener::bind(addr).await {
        Ok(listener) => {
            tracing::info!("Server running on port {}", port);
            listener
        }
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                tracing::error!(
                    "Error: Port {} is already in use. Please ensure no other process is using this port.",
                    port
                );
            } else {
                tracing::error!("Failed to bind to port {}. Error: {}", port, e);
            }
            return Err(e.into());
        }
    };

    axum::serve(listener, app).await?;

    Ok(())
}
