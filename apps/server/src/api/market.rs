use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};

use fundpulse_market_data::{FundDetail, FundSummary, DEFAULT_SEARCH_LIMIT};

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

#[derive(serde::Deserialize)]
struct FundSearchQuery {
    #[serde(default)]
    q: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
}

/// Search funds by code, name, or pinyin alias.
///
/// An absent or empty query yields an empty array rather than an error.
async fn search_market_funds(
    State(state): State<Arc<AppState>>,
    Query(query): Query<FundSearchQuery>,
) -> Json<Vec<FundSummary>> {
    let q = query.q.unwrap_or_default();
    let limit = query.limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    Json(state.fund_service.search_funds(&q, limit).await)
}

/// Fund detail: latest NAV, history, manager block, holdings.
async fn get_fund_details(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> ApiResult<Json<FundDetail>> {
    match state.fund_service.get_fund_detail(&code).await {
        Some(detail) => Ok(Json(detail)),
        None => Err(ApiError::NotFound("Fund not found".to_string())),
    }
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/market/funds", get(search_market_funds))
        .route("/fund/{code}", get(get_fund_details))
}
