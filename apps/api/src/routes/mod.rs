pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::ats::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/ats/keyword-score",
            post(handlers::handle_keyword_score),
        )
        .route(
            "/api/v1/resumes/ats-score",
            post(handlers::handle_resume_score),
        )
        .route("/api/v1/resumes/text", post(handlers::handle_resume_text))
        .with_state(state)
}
