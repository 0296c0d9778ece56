use std::sync::Arc;

use crate::ats::keyword_scorer::AtsScorer;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable ATS scorer. Default: KeywordScorer.
    pub scorer: Arc<dyn AtsScorer>,
}
