use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};

use fundpulse_news::NewsItem;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

const DEFAULT_NEWS_LIMIT: usize = 5;

#[derive(serde::Deserialize)]
struct NewsSearchBody {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    api_key: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
}

/// Search recent news for a query. The caller supplies the provider key.
async fn search_news(
    State(state): State<Arc<AppState>>,
    Json(body): Json<NewsSearchBody>,
) -> ApiResult<Json<Vec<NewsItem>>> {
    let query = body.query.unwrap_or_default();
    let api_key = body.api_key.unwrap_or_default();
    if query.is_empty() || api_key.is_empty() {
        return Err(ApiError::BadRequest("Missing query or api_key".to_string()));
    }

    let limit = body.limit.unwrap_or(DEFAULT_NEWS_LIMIT);
    let items = state
        .news_client
        .search_fund_news(&query, &api_key, limit)
        .await;
    Ok(Json(items))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/search/news", post(search_news))
}
