//src/main.rs

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod import;
mod models;
mod services;

use crate::config::{AppState, Settings};
use crate::docs::ApiDoc;

/// Planilhas diárias podem passar do limite padrão do axum (2 MiB).
const UPLOAD_BODY_LIMIT: usize = 25 * 1024 * 1024;

fn router(app_state: AppState) -> Router {
    let inventory_routes = Router::new()
        .route("/", get(handlers::inventory::get_inventory))
        .route(
            "/upload",
            post(handlers::inventory::upload_inventory)
                .layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        );

    let family_routes = Router::new().route(
        "/",
        get(handlers::families::list_families).post(handlers::families::create_family),
    );

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/inventory", inventory_routes)
        .nest("/api/families", family_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Sem configuração válida a aplicação não sobe.
    let settings = Settings::from_env()?;
    let app_state = AppState::new(&settings)?;

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);

    axum::serve(listener, router(app_state)).await?;
    Ok(())
}
