use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::Utc;
use contracts::domain::a001_store::{StoreDataset, StoreRecord};
use contracts::shared::kpi::{compute_store_kpis_with, DerivedKpiSet};
use serde::Serialize;

use crate::api::AppState;
use crate::domain::a001_store::export;

#[derive(Serialize)]
pub struct StoreDetail {
    pub store: StoreRecord,
    pub kpis: DerivedKpiSet,
}

/// GET /api/stores
pub async fn list_all(State(state): State<AppState>) -> Json<StoreDataset> {
    let snapshot = state.session.snapshot().await;
    Json(StoreDataset::clone(&snapshot))
}

/// GET /api/stores/:name
pub async fn get_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<StoreDetail>, StatusCode> {
    let snapshot = state.session.snapshot().await;
    let store = snapshot.find(&name).ok_or(StatusCode::NOT_FOUND)?;
    let kpis = compute_store_kpis_with(store, &mut state.estimates());
    Ok(Json(StoreDetail {
        store: store.clone(),
        kpis,
    }))
}

/// POST /api/dataset/reset
pub async fn reset(State(state): State<AppState>) -> Result<Json<StoreDataset>, StatusCode> {
    match state.session.reset().await {
        Ok(dataset) => Ok(Json(StoreDataset::clone(&dataset))),
        Err(e) => {
            tracing::error!("Failed to reset dataset: {e:#}");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /api/export/csv
pub async fn export_csv(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let snapshot = state.session.snapshot().await;
    let bytes = export::stores_to_csv(&snapshot.stores).map_err(|e| {
        tracing::error!("CSV export failed: {e:#}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    let disposition = format!("attachment; filename=\"{}\"", export::csv_file_name(Utc::now()));
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    ))
}
