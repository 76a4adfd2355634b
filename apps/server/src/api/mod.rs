//! HTTP API: one router per module, mounted under `/api`.

mod health;
mod market;
mod news;
mod sentiment;
mod watchlist;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::main_lib::AppState;

pub fn app_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .merge(health::router())
        .merge(market::router())
        .merge(news::router())
        .merge(sentiment::router())
        .merge(watchlist::router());

    Router::new()
        .route("/", get(health::root))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
