use axum::{
    routing::{get, post},
    Router,
};

use crate::api::{handlers, AppState};

/// All application routes
pub fn configure_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // A001 Stores
        .route("/api/stores", get(handlers::a001_store::list_all))
        .route("/api/stores/:name", get(handlers::a001_store::get_by_name))
        .route("/api/dataset/reset", post(handlers::a001_store::reset))
        .route("/api/export/csv", get(handlers::a001_store::export_csv))
        // KPI engine
        .route("/api/kpis/stores", get(handlers::kpis::store_kpis))
        .route("/api/kpis/network", get(handlers::kpis::network_kpis))
        .route("/api/kpis/classify", get(handlers::kpis::classify_value))
        .route("/api/ranking", get(handlers::kpis::ranking))
        .route("/api/performers", get(handlers::kpis::performers))
        .route("/api/compare", get(handlers::kpis::compare))
        .route("/api/recommendations", get(handlers::kpis::recommendations))
        // Indicators
        .route(
            "/api/indicators/compute",
            post(handlers::indicators::compute_indicators),
        )
        .route(
            "/api/indicators/meta",
            get(handlers::indicators::get_indicator_catalog),
        )
        // UseCase u501: Import from Excel
        .route(
            "/api/import/excel",
            post(handlers::u501_import_from_excel::import_excel),
        )
        .route(
            "/api/export/template",
            get(handlers::u501_import_from_excel::export_template),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_store::StoreSession;
    use crate::shared::config::{parse_config, DEFAULT_CONFIG};
    use crate::shared::data::db::memory_connection;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    async fn app() -> Router {
        let mut config = parse_config(DEFAULT_CONFIG).unwrap();
        config.estimates.seed = Some(7);
        let session = StoreSession::load(memory_connection().await, "stores").await.unwrap();
        configure_routes(AppState::new(session, &config))
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.clone().oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::get(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_network_kpis() {
        let app = app().await;
        let (status, body) = send(&app, get("/api/kpis/network")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["store_count"], 10);
        assert_eq!(body["avg_customer_satisfaction"], 80.5);
        assert_eq!(body["growth"]["kind"], "defined");
        assert_eq!(body["growth"]["percent"], 1.5);
    }

    #[tokio::test]
    async fn test_network_kpis_unknown_store_is_no_data() {
        let app = app().await;
        let (status, body) = send(&app, get("/api/kpis/network?store=Madrid")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "NO_DATA");
    }

    #[tokio::test]
    async fn test_classify() {
        let app = app().await;
        let (_, body) = send(&app, get("/api/kpis/classify?metric=rateOfSale&value=8")).await;
        assert_eq!(body["status"], "warning");
        assert_eq!(body["display"], "8%");
        let (_, body) = send(&app, get("/api/kpis/classify?metric=soh&value=8")).await;
        assert_eq!(body["status"], "neutral");
    }

    #[tokio::test]
    async fn test_ranking_and_bad_metric() {
        let app = app().await;
        let (status, body) = send(&app, get("/api/ranking?metric=rateOfSale&limit=3")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 3);
        assert_eq!(body[0]["name"], "Lorca");

        let (status, body) = send(&app, get("/api/ranking?metric=footfall")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_store_detail_and_compare() {
        let app = app().await;
        let (status, body) = send(&app, get("/api/stores/Murcia")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["kpis"]["growth"]["percent"], -11.1);
        assert!(body["kpis"]["self_checkout_usage"]["value"].is_number());

        let (status, _) = send(&app, get("/api/stores/Madrid")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app, get("/api/compare?left=Murcia&right=Lorca")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["rows"].as_array().unwrap().len(), 5);

        let (status, _) = send(&app, get("/api/compare?left=Murcia&right=Murcia")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    fn upload(sheets: &[&str]) -> Request<Body> {
        let mut wb = rust_xlsxwriter::Workbook::new();
        for name in sheets {
            let ws = wb.add_worksheet();
            ws.set_name(*name).unwrap();
            ws.write_number(3, 1, 800_000.0).unwrap();
        }
        let xlsx = wb.save_to_buffer().unwrap();

        let boundary = "kpi-boundary";
        let mut body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"area.xlsx\"\r\nContent-Type: application/octet-stream\r\n\r\n"
        )
        .into_bytes();
        body.extend_from_slice(&xlsx);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

        Request::post("/api/import/excel")
            .header("content-type", format!("multipart/form-data; boundary={boundary}"))
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn test_import_and_reset() {
        let app = app().await;

        let req = upload(&["396"]);
        let (status, report) = send(&app, req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["imported_stores"][0], "Murcia");

        let (_, stores) = send(&app, get("/api/stores")).await;
        assert_eq!(stores["stores"].as_array().unwrap().len(), 1);
        assert_eq!(stores["source"]["kind"], "imported");

        let reset = Request::post("/api/dataset/reset").body(Body::empty()).unwrap();
        let (status, stores) = send(&app, reset).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(stores["stores"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_import_without_file_field() {
        let app = app().await;
        let req = Request::post("/api/import/excel")
            .header("content-type", "multipart/form-data; boundary=x")
            .body(Body::from("--x--\r\n"))
            .unwrap();
        let (status, body) = send(&app, req).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_exports() {
        let app = app().await;
        let resp = app.clone().oneshot(get("/api/export/csv")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers()["content-type"].to_str().unwrap().starts_with("text/csv"));

        let resp = app.clone().oneshot(get("/api/export/template")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        // xlsx is a zip container
        assert_eq!(&bytes[..2], b"PK");
    }

    #[tokio::test]
    async fn test_template_export_with_case_only_name_clash() {
        let app = app().await;
        let (status, report) = send(&app, upload(&["396", "murcia"])).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["imported_stores"], serde_json::json!(["Murcia", "murcia"]));

        let resp = app.clone().oneshot(get("/api/export/template")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }
}
