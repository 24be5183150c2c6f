//! Shared application state for the web server.

use std::sync::Arc;

use crediflow_model::LoanClassifier;

use crate::config::Config;

/// Shared state injected into every Axum handler. The classifier is loaded
/// once at startup and read-only for the process lifetime; the dataset is
/// deliberately NOT held here — it is re-read per visualization request.
#[derive(Clone)]
pub struct AppState {
    pub classifier: LoanClassifier,
    pub config: Config,
}

impl AppState {
    pub fn new(classifier: LoanClassifier, config: Config) -> Self {
        Self { classifier, config }
    }
}

pub type SharedState = Arc<AppState>;
