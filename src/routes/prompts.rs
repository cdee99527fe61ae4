//! Handler for listing categorized prompts from the export file.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use tracing::instrument;

use crate::error::AppError;
use crate::export::{ExportRecord, PromptQuery};
use crate::state::AppState;

/// Handler for `GET /prompts?category=..&limit=..`.
///
/// Query string rejections go through `AppError` so they share the JSON error body.
#[instrument(name = "prompts::list", skip_all)]
pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<PromptQuery>, QueryRejection>,
) -> Result<Json<Vec<ExportRecord>>, AppError> {
    let Query(params) = params?;
    let category = params.category();
    let limit = params.limit();

    let prompts = state.exports.list_prompts(category, limit).await?;

    tracing::debug!(?category, limit, returned = prompts.len(), "Listed prompts");
    Ok(Json(prompts))
}
