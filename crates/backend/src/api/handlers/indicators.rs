use axum::{extract::State, Json};
use contracts::shared::indicators::*;

use crate::api::AppState;
use crate::shared::indicators::metadata;

/// POST /api/indicators/compute
///
/// Batch-computes indicators over the whole network or one store.
pub async fn compute_indicators(
    State(state): State<AppState>,
    Json(req): Json<ComputeIndicatorsRequest>,
) -> Json<ComputeIndicatorsResponse> {
    tracing::info!(
        "Indicators: computing {} indicators for store {}",
        req.indicator_ids.len(),
        req.context.store.as_deref().unwrap_or("all"),
    );

    let snapshot = state.session.snapshot().await;
    let stores = snapshot.filtered(req.context.store.as_deref());
    let values = state.indicators.compute(&req.indicator_ids, &stores);

    tracing::info!("Indicators: returning {} values", values.len());
    Json(ComputeIndicatorsResponse { values })
}

/// GET /api/indicators/meta
///
/// Returns the full catalogue of available indicators and sets.
pub async fn get_indicator_catalog() -> Json<IndicatorCatalogResponse> {
    Json(metadata::build_catalog())
}
