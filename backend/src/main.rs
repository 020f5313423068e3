use dotenvy::dotenv;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::{TraceLayer, DefaultMakeSpan, DefaultOnResponse};
use tracing::Level;
use tracing_subscriber::EnvFilter;
use std::sync::Arc;

mod error;
mod handlers {
    pub mod book_call_dtos;
    pub mod book_call_handlers;
}
mod api {
    pub mod notifier;
}
mod config {
    pub mod settings;
}
mod utils {
    pub mod notification_template;
}

use api::notifier::{LogNotifier, Notifier};
use config::settings::Settings;
use handlers::book_call_handlers;

async fn health_check() -> &'static str {
    "OK"
}

pub struct AppState {
    pub settings: Settings,
    pub notifier: Arc<dyn Notifier>,
}

pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([
            axum::http::Method::GET,
            axum::http::Method::POST,
            axum::http::Method::OPTIONS,
        ])
        .allow_headers([axum::http::header::CONTENT_TYPE]);
    let cors = match &state.settings.frontend_origin {
        Some(origin) => cors.allow_origin(origin.clone()),
        None => cors.allow_origin(Any),
    };

    Router::new()
        .route("/api/health", get(health_check))
        .route("/api/book-call", post(book_call_handlers::book_call))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
        )
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::from_env()?;

    let _guard = settings.sentry_dsn.as_deref().map(|dsn| {
        sentry::init((dsn, sentry::ClientOptions {
            release: sentry::release_name!(),
            ..Default::default()
        }))
    });
    if settings.notification_email.is_none() {
        tracing::warn!("NOTIFICATION_EMAIL not set, booking requests will only be logged");
    }

    let bind_addr = settings.bind_addr;
    let state = Arc::new(AppState {
        settings,
        notifier: Arc::new(LogNotifier),
    });

    use tokio::net::TcpListener;

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("Listening on {}", bind_addr);
    axum::serve(listener, app(state).into_make_service()).await?;
    Ok(())
}
