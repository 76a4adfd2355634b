use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};

use fundpulse_storage_sqlite::{NewWatchedFund, WatchedFund, DEFAULT_USER_ID};

use crate::{error::ApiResult, main_lib::AppState};

/// List the watchlist, newest first.
async fn list_watchlist(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<WatchedFund>>> {
    let funds = state.watchlist.list(DEFAULT_USER_ID)?;
    Ok(Json(funds))
}

/// Add a fund to the watchlist. A duplicate (user, code) pair is a 409.
async fn add_to_watchlist(
    State(state): State<Arc<AppState>>,
    Json(fund): Json<NewWatchedFund>,
) -> ApiResult<(StatusCode, Json<WatchedFund>)> {
    let created = state.watchlist.add(fund)?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Remove a fund from the watchlist by code.
async fn remove_from_watchlist(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> ApiResult<StatusCode> {
    state.watchlist.remove(DEFAULT_USER_ID, &code)?;
    Ok(StatusCode::NO_CONTENT)
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/watchlist", get(list_watchlist).post(add_to_watchlist))
        .route(
            "/watchlist/{code}",
            axum::routing::delete(remove_from_watchlist),
        )
}
