use serde::{Deserialize, Serialize};

use crate::domain::a001_store::DatasetError;
use crate::shared::kpi::KpiError;

pub type UseCaseResult<T> = Result<T, UseCaseError>;

/// JSON error body returned by use-case endpoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UseCaseError {
    pub code: String,
    pub message: String,
    pub details: Option<String>,
}

impl UseCaseError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn no_data(message: impl Into<String>) -> Self {
        Self::new("NO_DATA", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

impl std::fmt::Display for UseCaseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(details) = &self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for UseCaseError {}

impl From<anyhow::Error> for UseCaseError {
    fn from(err: anyhow::Error) -> Self {
        UseCaseError::internal(err.to_string())
    }
}

impl From<DatasetError> for UseCaseError {
    fn from(err: DatasetError) -> Self {
        match err {
            DatasetError::Decode(_) => UseCaseError::internal(err.to_string()),
            _ => UseCaseError::validation(err.to_string()),
        }
    }
}

impl From<KpiError> for UseCaseError {
    fn from(err: KpiError) -> Self {
        match err {
            KpiError::EmptyDataset => UseCaseError::no_data(err.to_string()),
            KpiError::UnknownMetric(_) | KpiError::SameStore(_) => {
                UseCaseError::validation(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_details() {
        let err = UseCaseError::validation("bad workbook").with_details("sheet 396: B4 empty");
        assert_eq!(err.to_string(), "[VALIDATION_ERROR] bad workbook: sheet 396: B4 empty");
    }

    #[test]
    fn test_error_mapping() {
        assert_eq!(UseCaseError::from(KpiError::EmptyDataset).code, "NO_DATA");
        assert_eq!(
            UseCaseError::from(DatasetError::DuplicateName("Lorca".into())).code,
            "VALIDATION_ERROR"
        );
        assert_eq!(
            UseCaseError::from(DatasetError::Decode("eof".into())).code,
            "INTERNAL_ERROR"
        );
    }
}
