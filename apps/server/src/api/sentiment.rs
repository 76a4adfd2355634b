use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use chrono::{DateTime, Utc};

use crate::{error::ApiResult, main_lib::AppState};

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct SentimentReportResponse {
    report: String,
    generated_at: DateTime<Utc>,
}

/// Run the full sentiment pipeline and return the generated report.
///
/// Runs synchronously within the request; a failed indicator feed surfaces
/// as a 500 with no partial report.
async fn generate_report(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<SentimentReportResponse>> {
    let report = state.dashboard.run_analysis().await?;
    Ok(Json(SentimentReportResponse {
        report,
        generated_at: Utc::now(),
    }))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/sentiment/report", post(generate_report))
}
