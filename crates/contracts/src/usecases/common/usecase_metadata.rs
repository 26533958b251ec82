/// Identification of a use case for logs and API documentation
pub trait UseCaseMetadata {
    /// Index, e.g. "u501"
    fn usecase_index() -> &'static str;

    /// Technical name, e.g. "import_from_excel"
    fn usecase_name() -> &'static str;

    /// Human-readable name, shown in import reports
    fn display_name() -> &'static str;

    /// "u501_import_from_excel"
    fn full_name() -> String {
        format!("{}_{}", Self::usecase_index(), Self::usecase_name())
    }
}
