use crate::app_context::AppContext;
use crate::cli::ServeArgs;
use crate::storage::sessions::HashMapSessionsStorage;
use crate::{health, http::cors, http::middleware, sessions};
use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;

pub fn new(args: &ServeArgs, app_context: AppContext<HashMapSessionsStorage>) -> Router {
    let cors_policy = cors::layer(args);
    tracing::info!("Initialized HTTP configuration.");

    let health_routes = Router::new().route("/check", get(health::handlers::healthcheck));
    let sessions_routes = Router::new()
        .route("/", post(sessions::handlers::create))
        .route("/:session_id/round", get(sessions::handlers::current_round))
        .route("/:session_id/click", post(sessions::handlers::click))
        .route("/:session_id/guess", post(sessions::handlers::guess))
        .route("/:session_id/next", post(sessions::handlers::next))
        .route("/:session_id/stats", get(sessions::handlers::stats))
        .route("/:session_id/summary", get(sessions::handlers::summary));

    Router::new()
        .nest("/health", health_routes)
        .nest("/sessions", sessions_routes)
        .with_state(app_context)
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(middleware::tracing))
                .layer(cors_policy),
        )
}
