pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::coach::handlers::handle_interview;
use crate::resume::handlers::{handle_upload_resume, UPLOAD_BODY_LIMIT};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/upload-resume",
            post(handle_upload_resume).layer(DefaultBodyLimit::max(UPLOAD_BODY_LIMIT)),
        )
        .route("/interview", post(handle_interview))
        .with_state(state)
}
