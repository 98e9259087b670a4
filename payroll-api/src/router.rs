use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use payroll_core::PayrollPolicy;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{error::panic_response, handlers};

/// Create the application router with all calculator endpoints
pub fn create_router(policy: Arc<PayrollPolicy>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/policy", get(handlers::get_policy))
        .route("/salary/gross-to-net", post(handlers::gross_to_net))
        .route("/salary/net-to-gross", post(handlers::net_to_gross))
        .route("/tax/personal-income", post(handlers::personal_income_tax))
        .route("/bhxh/lump-sum", post(handlers::bhxh_lump_sum))
        .route("/interest/compound", post(handlers::compound_interest))
        .with_state(policy)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
