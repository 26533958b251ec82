use contracts::shared::kpi::SeededEstimates;
use std::sync::Arc;

use crate::domain::a001_store::StoreSession;
use crate::shared::config::Config;
use crate::shared::indicators::registry::IndicatorRegistry;
use crate::usecases::u501_import_from_excel::ImportExecutor;

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<StoreSession>,
    pub importer: Arc<ImportExecutor>,
    pub indicators: Arc<IndicatorRegistry>,
    pub estimate_seed: Option<u64>,
}

impl AppState {
    pub fn new(session: StoreSession, config: &Config) -> Self {
        Self {
            session: Arc::new(session),
            importer: Arc::new(ImportExecutor::new(&config.import)),
            indicators: Arc::new(IndicatorRegistry::new()),
            estimate_seed: config.estimates.seed,
        }
    }

    /// Fixed-seed estimates when configured, a fresh seed per call otherwise.
    pub fn estimates(&self) -> SeededEstimates {
        SeededEstimates::new(self.estimate_seed.unwrap_or_else(rand::random))
    }
}
