use axum::{
    extract::{Query, State},
    Json,
};
use contracts::domain::a001_store::StoreRecord;
use contracts::shared::indicators::IndicatorStatus;
use contracts::shared::kpi::{
    analyze_network, analyze_store, bag_average, classify, compare_stores, compute_aggregate_kpis,
    compute_store_kpis_with, ranked_entries, stores_needing_attention, top_stores, DerivedKpiSet,
    KpiError, KpiMetric, NetworkKpis, RankedEntry, Recommendation, SortOrder, StoreComparison,
};
use contracts::usecases::common::UseCaseError;
use serde::{Deserialize, Serialize};

use super::{api_error, ApiError};
use crate::api::AppState;
use crate::shared::format::format_percentage;

const DEFAULT_PERFORMERS_LIMIT: usize = 5;

#[derive(Debug, Deserialize)]
pub struct StoreFilter {
    pub store: Option<String>,
}

fn parse_metric(name: &str) -> Result<KpiMetric, ApiError> {
    KpiMetric::from_name(name).ok_or_else(|| api_error(KpiError::UnknownMetric(name.to_string()).into()))
}

/// GET /api/kpis/stores?store=
pub async fn store_kpis(
    State(state): State<AppState>,
    Query(filter): Query<StoreFilter>,
) -> Json<Vec<DerivedKpiSet>> {
    let snapshot = state.session.snapshot().await;
    let mut estimates = state.estimates();
    let kpis = snapshot
        .filtered(filter.store.as_deref())
        .iter()
        .map(|s| compute_store_kpis_with(s, &mut estimates))
        .collect();
    Json(kpis)
}

/// GET /api/kpis/network?store=
pub async fn network_kpis(
    State(state): State<AppState>,
    Query(filter): Query<StoreFilter>,
) -> Result<Json<NetworkKpis>, ApiError> {
    let snapshot = state.session.snapshot().await;
    let stores = snapshot.filtered(filter.store.as_deref());
    compute_aggregate_kpis(&stores)
        .map(Json)
        .map_err(|e| api_error(e.into()))
}

#[derive(Debug, Deserialize)]
pub struct ClassifyQuery {
    pub metric: String,
    pub value: f64,
}

#[derive(Debug, Serialize)]
pub struct ClassifyResponse {
    pub metric: String,
    pub value: f64,
    pub status: IndicatorStatus,
    pub css_class: &'static str,
    /// Value as the dashboard prints it.
    pub display: String,
}

/// GET /api/kpis/classify?metric=&value=
pub async fn classify_value(Query(q): Query<ClassifyQuery>) -> Json<ClassifyResponse> {
    let status = classify(&q.metric, q.value);
    let display = match KpiMetric::from_name(&q.metric) {
        Some(m) if m.is_percentage() => format_percentage(q.value),
        _ => q.value.to_string(),
    };
    Json(ClassifyResponse {
        metric: q.metric,
        value: q.value,
        status,
        css_class: status.css_class(),
        display,
    })
}

#[derive(Debug, Deserialize)]
pub struct RankingQuery {
    pub metric: String,
    /// `asc` or `desc`; best-first for the metric when absent.
    pub order: Option<String>,
    pub limit: Option<usize>,
}

/// GET /api/ranking?metric=&order=&limit=
pub async fn ranking(
    State(state): State<AppState>,
    Query(q): Query<RankingQuery>,
) -> Result<Json<Vec<RankedEntry>>, ApiError> {
    let metric = parse_metric(&q.metric)?;
    let order = match q.order.as_deref() {
        None => metric.natural_order(),
        Some("asc") => SortOrder::Ascending,
        Some("desc") => SortOrder::Descending,
        Some(other) => {
            return Err(api_error(UseCaseError::validation(format!(
                "order must be asc or desc, got {other}"
            ))))
        }
    };

    let snapshot = state.session.snapshot().await;
    let mut entries = ranked_entries(&snapshot.stores, metric, order);
    if let Some(limit) = q.limit {
        entries.truncate(limit);
    }
    Ok(Json(entries))
}

#[derive(Debug, Deserialize)]
pub struct PerformersQuery {
    pub metric: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct PerformersResponse {
    pub metric: KpiMetric,
    pub top: Vec<StoreRecord>,
    pub needing_attention: Vec<StoreRecord>,
}

/// GET /api/performers?metric=&limit=
pub async fn performers(
    State(state): State<AppState>,
    Query(q): Query<PerformersQuery>,
) -> Result<Json<PerformersResponse>, ApiError> {
    let metric = match q.metric.as_deref() {
        Some(name) => parse_metric(name)?,
        None => KpiMetric::CustomerSatisfaction,
    };
    let limit = q.limit.unwrap_or(DEFAULT_PERFORMERS_LIMIT);

    let snapshot = state.session.snapshot().await;
    Ok(Json(PerformersResponse {
        metric,
        top: top_stores(&snapshot.stores, metric, limit),
        needing_attention: stores_needing_attention(&snapshot.stores, metric, limit),
    }))
}

#[derive(Debug, Deserialize)]
pub struct CompareQuery {
    pub left: String,
    pub right: String,
}

/// GET /api/compare?left=&right=
pub async fn compare(
    State(state): State<AppState>,
    Query(q): Query<CompareQuery>,
) -> Result<Json<StoreComparison>, ApiError> {
    let snapshot = state.session.snapshot().await;
    let find = |name: &str| {
        snapshot
            .find(name)
            .ok_or_else(|| api_error(UseCaseError::not_found(format!("store not found: {name}"))))
    };
    let (left, right) = (find(&q.left)?, find(&q.right)?);
    compare_stores(left, right)
        .map(Json)
        .map_err(|e| api_error(e.into()))
}

/// GET /api/recommendations?store=
///
/// Network analysis by default; one store's findings when `store` is set.
pub async fn recommendations(
    State(state): State<AppState>,
    Query(filter): Query<StoreFilter>,
) -> Result<Json<Vec<Recommendation>>, ApiError> {
    let snapshot = state.session.snapshot().await;

    match filter.store.as_deref() {
        None | Some("all") | Some("") => analyze_network(&snapshot.stores)
            .map(Json)
            .map_err(|e| api_error(e.into())),
        Some(name) => {
            let store = snapshot
                .find(name)
                .ok_or_else(|| api_error(UseCaseError::not_found(format!("store not found: {name}"))))?;
            let bag_avg = bag_average(&snapshot.stores).unwrap_or_default();
            Ok(Json(analyze_store(store, bag_avg)))
        }
    }
}

