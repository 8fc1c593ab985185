use axum::{
    routing::{get, post},
    Router,
};

use super::{handlers, state::AppState};

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route(
            "/payments/build_process",
            post(handlers::payments::build_process),
        )
        .route(
            "/payments/validate",
            get(handlers::payments::validate_query).post(handlers::payments::validate_form),
        )
        .route(
            "/payments/success",
            get(handlers::payments::success_query).post(handlers::payments::success_form),
        )
        .route("/payments/capture", post(handlers::payments::capture))
        .route("/payments/void", post(handlers::payments::void))
        .route("/payments/refund", post(handlers::payments::refund))
        // Settings routes
        .route("/settings/validate", post(handlers::settings::validate))
        .route(
            "/settings/encryptable_fields",
            get(handlers::settings::encryptable_fields),
        )
        .with_state(state)
}
