//! The route handler for creating a new transaction.

use axum::{Extension, Json, extract::State, http::StatusCode};

use crate::{
    AppState, Error,
    transaction::{
        db::create_transaction,
        models::{Transaction, TransactionData},
    },
    user::UserID,
};

/// A route handler for creating a new transaction.
///
/// The record's owner is always the authenticated user; any owner the client
/// might supply in the body is ignored.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn create_transaction_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserID>,
    Json(new_transaction): Json<TransactionData>,
) -> Result<(StatusCode, Json<Transaction>), Error> {
    let connection = state.db_connection.lock().unwrap();

    create_transaction(new_transaction, user_id, &connection)
        .map(|transaction| (StatusCode::CREATED, Json(transaction)))
}
