use serde::{Deserialize, Serialize};

use crate::usecases::common::UseCaseMetadata;

pub use crate::domain::a001_store::{ImportReport, SkippedSheet};

pub struct ImportFromExcel;

impl UseCaseMetadata for ImportFromExcel {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "import_from_excel"
    }

    fn display_name() -> &'static str {
        "Import from Excel"
    }
}

/// Query options of the upload endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImportOptions {
    /// Map and validate only; the current dataset is left as is.
    #[serde(default)]
    pub dry_run: bool,
}
