//! The route handlers for the paginated transaction listings.

use axum::{
    Extension, Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    pagination::{PaginationParams, total_pages},
    transaction::{
        db::{count_transactions, get_transaction_page},
        models::Transaction,
    },
    user::UserID,
};

/// One page of transactions plus the paging bookkeeping the client needs to
/// fetch the rest.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    /// The records on this page.
    pub transactions: Vec<Transaction>,
    /// How many pages the full result set spans.
    pub total_pages: u64,
    /// The one-based number of this page.
    pub current_page: u64,
}

/// A route handler for listing every user's transactions, paginated.
///
/// A valid session is the only requirement; the listing is not scoped to the
/// caller. Use the `/my` listing for the caller's own records.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_all_transactions(
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<TransactionPage>, Error> {
    list_page(None, params, &state)
}

/// A route handler for listing the calling user's transactions, paginated.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_my_transactions(
    State(state): State<AppState>,
    Extension(user_id): Extension<UserID>,
    Query(params): Query<PaginationParams>,
) -> Result<Json<TransactionPage>, Error> {
    list_page(Some(user_id), params, &state)
}

fn list_page(
    owner: Option<UserID>,
    params: PaginationParams,
    state: &AppState,
) -> Result<Json<TransactionPage>, Error> {
    let (page, limit) = params.resolve(&state.pagination_config);

    let connection = state.db_connection.lock().unwrap();

    let transactions = get_transaction_page(owner, (page - 1) * limit, limit, &connection)?;
    let total = count_transactions(owner, &connection)?;

    Ok(Json(TransactionPage {
        transactions,
        total_pages: total_pages(total, limit),
        current_page: page,
    }))
}
