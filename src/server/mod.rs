//! HTTP server
//!
//! Shared application state, router assembly and the serve loop.

pub mod error;
pub mod routes;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::{header, HeaderValue, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::Config;
use crate::hiscores::HiscoresClient;
use crate::skills::SkillCatalog;

/// State shared across handlers.
pub struct AppState {
    pub catalog: SkillCatalog,
    pub hiscores: HiscoresClient,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let catalog = match &config.data.skill_data_dir {
            Some(dir) => SkillCatalog::new(dir),
            None => SkillCatalog::with_defaults(),
        };
        Self {
            catalog,
            hiscores: HiscoresClient::new(),
            config,
        }
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    let origins = &config.cors.allowed_origins;
    let allow_origin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|o| o.parse::<HeaderValue>().ok()),
        )
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the full application router.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = cors_layer(&state.config);
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::skill_routes())
        .merge(routes::calculator_routes())
        .merge(routes::player_routes())
        .with_state(state)
        .layer(cors)
}

/// Bind and serve until shutdown.
pub async fn run(config: Config) -> Result<()> {
    let addr = config.addr();
    let state = Arc::new(AppState::new(config));
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding to {addr}"))?;
    log::info!("Listening on http://{addr}");

    axum::serve(listener, app).await?;
    Ok(())
}
