use axum::{Json, Router, debug_handler, response::IntoResponse, routing::get};
use tagreview::{AppState, conversations, db, reviews, tagdata};
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let db_url =
        dotenv::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:tagreview.db?mode=rwc".to_owned());
    let db_pool = db::connect(&db_url).await.unwrap();

    let app_state = AppState { db_pool };

    let app = Router::new()
        .route("/health", get(health))

        .nest("/revisionreviews", reviews::router())
        .nest("/tag/reviews", conversations::router())
        .nest("/tagdata", tagdata::router())

        .with_state(app_state)
        .layer(CorsLayer::permissive());

    let addr = dotenv::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_owned());
    tracing::info!("listening on {addr}");
    let listener = tokio::net::TcpListener::bind(&addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

#[debug_handler]
async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
