//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router,
    extract::FromRef,
    http::StatusCode,
    middleware,
    routing::{get, post},
};

use crate::{
    AppState,
    auth::{AuthState, auth_guard, post_log_in, register_user},
    transaction::{
        create_transaction_endpoint, delete_transaction_endpoint, get_all_transactions,
        get_month_wise_report, get_my_transactions, get_summary, get_transaction_endpoint,
        update_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let transaction_routes = Router::new()
        .route(
            "/",
            post(create_transaction_endpoint).get(get_all_transactions),
        )
        .route("/my", get(get_my_transactions))
        .route("/summary", get(get_summary))
        .route("/month-wise-report", get(get_month_wise_report))
        .route(
            "/{transaction_id}",
            get(get_transaction_endpoint)
                .put(update_transaction_endpoint)
                .delete(delete_transaction_endpoint),
        )
        .route_layer(middleware::from_fn_with_state(
            AuthState::from_ref(&state),
            auth_guard,
        ));

    Router::new()
        .route("/", get(get_coffee))
        .route("/api/auth/register", post(register_user))
        .route("/api/auth/login", post(post_log_in))
        .nest("/api/transactions", transaction_routes)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> StatusCode {
    StatusCode::IM_A_TEAPOT
}
