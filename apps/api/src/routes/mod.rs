pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assessment::handlers as assessment_handlers;
use crate::chat::handlers as chat_handlers;
use crate::posting::handlers as posting_handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Chat — all workflows enter here
        .route("/api/v1/chat", post(chat_handlers::handle_chat))
        // Opportunities
        .route(
            "/api/v1/opportunities/:id",
            get(posting_handlers::handle_get_opportunity),
        )
        .route(
            "/api/v1/opportunities/:id/close",
            post(posting_handlers::handle_close_opportunity),
        )
        .route(
            "/api/v1/companies/:company_id/opportunities",
            get(posting_handlers::handle_list_company_opportunities),
        )
        // Applications
        .route(
            "/api/v1/opportunities/:id/applications",
            post(posting_handlers::handle_submit_application),
        )
        // Candidate assessment
        .route(
            "/api/v1/opportunities/:id/candidates",
            get(assessment_handlers::handle_ranked_candidates),
        )
        .with_state(state)
}
