use axum::{
    extract::{Multipart, Query, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use contracts::usecases::common::UseCaseError;
use contracts::usecases::u501_import_from_excel::{ImportOptions, ImportReport};

use super::{api_error, ApiError};
use crate::api::AppState;
use crate::usecases::u501_import_from_excel::template;

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// POST /api/import/excel?dry_run=
///
/// Multipart upload; the workbook is read from the `file` field.
pub async fn import_excel(
    State(state): State<AppState>,
    Query(options): Query<ImportOptions>,
    mut multipart: Multipart,
) -> Result<Json<ImportReport>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        api_error(UseCaseError::validation("Malformed multipart body").with_details(e.to_string()))
    })? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or("upload.xlsx").to_string();
        let bytes = field.bytes().await.map_err(|e| {
            api_error(UseCaseError::validation("Failed to read upload").with_details(e.to_string()))
        })?;
        upload = Some((file_name, bytes.to_vec()));
        break;
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| api_error(UseCaseError::validation("Missing multipart field: file")))?;

    state
        .importer
        .execute(&state.session, &file_name, bytes, options.dry_run)
        .await
        .map(Json)
        .map_err(api_error)
}

/// GET /api/export/template
pub async fn export_template(State(state): State<AppState>) -> Result<impl IntoResponse, StatusCode> {
    let snapshot = state.session.snapshot().await;
    let bytes = template::build_template(&snapshot.stores).map_err(|e| {
        tracing::error!("Template export failed: {e:#}");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", template::TEMPLATE_FILE_NAME),
            ),
        ],
        bytes,
    ))
}
