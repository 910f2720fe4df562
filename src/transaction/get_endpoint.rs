//! The route handler for getting a single transaction.

use axum::{
    Extension, Json,
    extract::{Path, State},
};

use crate::{
    AppState, Error,
    transaction::{
        db::get_transaction,
        models::{Transaction, TransactionId},
    },
    user::UserID,
};

/// A route handler for getting a transaction by its ID.
///
/// Responds with 404 both when the ID does not exist and when the record
/// belongs to another user, so a caller cannot probe for other users' records.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_transaction_endpoint(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserID>,
    Path(transaction_id): Path<TransactionId>,
) -> Result<Json<Transaction>, Error> {
    let connection = state.db_connection.lock().unwrap();

    let transaction = get_transaction(transaction_id, &connection)?;

    if transaction.user_id != user_id {
        return Err(Error::NotFound);
    }

    Ok(Json(transaction))
}
