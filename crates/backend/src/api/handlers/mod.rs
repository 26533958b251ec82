pub mod a001_store;
pub mod indicators;
pub mod kpis;
pub mod u501_import_from_excel;

use axum::{http::StatusCode, Json};
use contracts::usecases::common::UseCaseError;

/// Error response of use-case style endpoints: status plus a JSON body.
pub type ApiError = (StatusCode, Json<UseCaseError>);

pub fn api_error(err: UseCaseError) -> ApiError {
    let status = match err.code.as_str() {
        "VALIDATION_ERROR" => StatusCode::BAD_REQUEST,
        "NOT_FOUND" | "NO_DATA" => StatusCode::NOT_FOUND,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status == StatusCode::INTERNAL_SERVER_ERROR {
        tracing::error!("{}", err);
    }
    (status, Json(err))
}
