use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::CompletionClient;
use crate::store::OpportunityStore;

/// Shared application state injected into all route handlers via Axum
/// extractors. The store is behind a trait object so tests can swap the
/// Postgres backend for the in-memory one.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OpportunityStore>,
    pub llm: CompletionClient,
    /// Runtime configuration. Handlers currently read nothing from it, but
    /// it rides along for the ones that will.
    #[allow(dead_code)]
    pub config: Config,
}
