use crate::{error::AppError, AppState};
use analytics::{ReportCache, TradeReport};
use axum::{body::Bytes, extract::State, Json};
use std::sync::{Arc, MutexGuard, PoisonError};

/// # POST /api/report
/// Accepts the raw CSV export as the request body and returns the full report.
pub async fn create_report(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TradeReport>, AppError> {
    tracing::info!(bytes = body.len(), "Report requested.");

    let cached = lock_cache(&state).get(&body);
    if let Some(report) = cached {
        return Ok(Json(TradeReport::clone(&report)));
    }

    // The cache stays unlocked while the report is built.
    let build_state = Arc::clone(&state);
    let content = body.clone();
    let report = tokio::task::spawn_blocking(move || build_state.pipeline.run_bytes(&content))
        .await
        .map_err(|e| AppError::Internal(format!("report task failed: {e}")))??;

    let report = lock_cache(&state).insert(&body, report);
    Ok(Json(TradeReport::clone(&report)))
}

/// A panic elsewhere never leaves the cache half-written, so a poisoned lock
/// is still safe to use.
fn lock_cache(state: &AppState) -> MutexGuard<'_, ReportCache> {
    state.cache.lock().unwrap_or_else(PoisonError::into_inner)
}
