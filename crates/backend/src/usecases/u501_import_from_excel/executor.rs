use contracts::domain::a001_store::{
    DatasetSource, ImportReport, SkippedSheet, StoreDataset, StoreRecord,
};
use contracts::shared::spreadsheet::{
    is_store_sheet, map_store_sheet, StoreDirectory, StoreSheetOptions,
};
use contracts::usecases::common::{UseCaseError, UseCaseMetadata, UseCaseResult};
use contracts::usecases::u501_import_from_excel::ImportFromExcel;
use uuid::Uuid;

use super::workbook_reader::read_workbook;
use crate::domain::a001_store::StoreSession;
use crate::shared::config::ImportConfig;

/// Executor for the workbook import use case
pub struct ImportExecutor {
    options: StoreSheetOptions,
}

impl ImportExecutor {
    pub fn new(config: &ImportConfig) -> Self {
        let mut directory = StoreDirectory::with_defaults();
        directory.extend(config.store_names.clone());
        Self {
            options: StoreSheetOptions {
                directory,
                soiled_damaged_default: config.soiled_damaged_default,
            },
        }
    }

    /// Maps every store sheet of the workbook into a validated dataset.
    ///
    /// Sheets that fail mapping are reported, not fatal. A workbook without
    /// any usable store sheet, or with two sheets resolving to the same
    /// store, is rejected.
    pub fn map_workbook(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> UseCaseResult<(StoreDataset, ImportReport)> {
        let sheets = read_workbook(bytes)
            .map_err(|e| UseCaseError::validation("File is not a readable workbook").with_details(e.to_string()))?;

        let mut stores: Vec<StoreRecord> = Vec::new();
        let mut skipped = Vec::new();

        for sheet in sheets {
            if !is_store_sheet(&sheet.name) {
                tracing::debug!("{}: skipping sheet {}", ImportFromExcel::full_name(), sheet.name);
                skipped.push(SkippedSheet {
                    sheet_name: sheet.name,
                    reason: "not a store sheet".into(),
                });
                continue;
            }

            let mapped = match &sheet.cells {
                Ok(cells) => map_store_sheet(&sheet.name, cells, &self.options).map_err(|e| e.to_string()),
                Err(e) => Err(format!("unreadable sheet: {e}")),
            };

            match mapped {
                Ok(store) => stores.push(store),
                Err(reason) => {
                    tracing::warn!("Sheet {} rejected: {}", sheet.name, reason);
                    skipped.push(SkippedSheet {
                        sheet_name: sheet.name,
                        reason,
                    });
                }
            }
        }

        if stores.is_empty() {
            let details = skipped
                .iter()
                .map(|s| format!("{}: {}", s.sheet_name, s.reason))
                .collect::<Vec<_>>()
                .join("; ");
            return Err(UseCaseError::validation("Workbook contains no valid store sheets").with_details(details));
        }

        let dataset = StoreDataset::new(
            stores,
            DatasetSource::Imported {
                file_name: file_name.to_string(),
            },
        );
        dataset.validate()?;

        let report = ImportReport {
            import_id: Uuid::new_v4().to_string(),
            usecase: ImportFromExcel::display_name().to_string(),
            file_name: file_name.to_string(),
            imported_count: dataset.stores.len(),
            imported_stores: dataset.stores.iter().map(|s| s.name.clone()).collect(),
            skipped_sheets: skipped,
        };

        Ok((dataset, report))
    }

    /// Maps the workbook and, unless `dry_run`, replaces the session dataset.
    pub async fn execute(
        &self,
        session: &StoreSession,
        file_name: &str,
        bytes: Vec<u8>,
        dry_run: bool,
    ) -> UseCaseResult<ImportReport> {
        tracing::info!(
            "{}: {} ({} bytes, dry_run={})",
            ImportFromExcel::full_name(),
            file_name,
            bytes.len(),
            dry_run
        );

        let (dataset, report) = self.map_workbook(file_name, bytes)?;

        if !dry_run {
            session.replace(dataset).await?;
        }

        tracing::info!(
            "{} {}: {} stores, {} sheets skipped",
            report.usecase,
            report.import_id,
            report.imported_count,
            report.skipped_sheets.len()
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::{parse_config, DEFAULT_CONFIG};
    use crate::shared::data::db::memory_connection;
    use rust_xlsxwriter::Workbook;

    fn executor() -> ImportExecutor {
        let mut config = parse_config(DEFAULT_CONFIG).unwrap().import;
        config.store_names.insert("500".into(), "Gandia".into());
        ImportExecutor::new(&config)
    }

    fn workbook(sheets: &[(&str, Option<f64>)]) -> Vec<u8> {
        let mut wb = Workbook::new();
        for (name, sales) in sheets {
            let ws = wb.add_worksheet();
            ws.set_name(*name).unwrap();
            if let Some(sales) = sales {
                ws.write_number(3, 1, *sales).unwrap();
                ws.write_number(3, 3, 0.8).unwrap();
            }
        }
        wb.save_to_buffer().unwrap()
    }

    #[test]
    fn test_map_workbook_collects_skips() {
        let bytes = workbook(&[
            ("396", Some(800_000.0)),
            ("Hoja1", None),
            ("500", Some(400_000.0)),
            ("371", None),
        ]);
        let (dataset, report) = executor().map_workbook("area.xlsx", bytes).unwrap();

        assert_eq!(report.imported_stores, vec!["Murcia", "Gandia"]);
        assert_eq!(report.imported_count, 2);
        assert_eq!(report.usecase, "Import from Excel");
        assert_eq!(dataset.stores[0].sales.last_year, 1_000_000.0);
        assert_eq!(dataset.stores[0].soiled_and_damaged_rate, 5.0);

        let skipped: Vec<_> = report.skipped_sheets.iter().map(|s| s.sheet_name.as_str()).collect();
        assert_eq!(skipped, vec!["Hoja1", "371"]);
        assert!(report.skipped_sheets[1].reason.contains("B4"));
    }

    #[test]
    fn test_no_store_sheets_rejected() {
        let err = executor()
            .map_workbook("empty.xlsx", workbook(&[("Sheet1", None), ("Template", None)]))
            .unwrap_err();
        assert_eq!(err.code, "VALIDATION_ERROR");
    }

    #[test]
    fn test_duplicate_store_rejected() {
        let bytes = workbook(&[("396", Some(1.0)), ("Murcia", Some(2.0))]);
        let err = executor().map_workbook("dup.xlsx", bytes).unwrap_err();
        assert!(err.message.contains("Murcia"));
    }

    #[test]
    fn test_garbage_upload_rejected() {
        let err = executor().map_workbook("x.xlsx", b"hello".to_vec()).unwrap_err();
        assert_eq!(err.code, "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_execute_replaces_unless_dry_run() {
        let session = StoreSession::load(memory_connection().await, "stores").await.unwrap();
        let exec = executor();

        let bytes = workbook(&[("396", Some(800_000.0))]);
        exec.execute(&session, "area.xlsx", bytes.clone(), true).await.unwrap();
        assert_eq!(session.snapshot().await.stores.len(), 10);

        exec.execute(&session, "area.xlsx", bytes, false).await.unwrap();
        let snap = session.snapshot().await;
        assert_eq!(snap.stores.len(), 1);
        assert_eq!(
            snap.source,
            DatasetSource::Imported {
                file_name: "area.xlsx".into()
            }
        );
    }
}
