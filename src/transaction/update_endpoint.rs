//! The route handler for updating an existing transaction.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};

use crate::{
    AppState, Error,
    transaction::{
        db::update_transaction,
        models::{TransactionChanges, TransactionId},
    },
};

/// A route handler for merging new field values into an existing transaction.
///
/// The record is looked up by ID alone: any authenticated user can update any
/// record. Only the `/my` listing and get-by-ID are owner-scoped.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn update_transaction_endpoint(
    State(state): State<AppState>,
    Path(transaction_id): Path<TransactionId>,
    Json(changes): Json<TransactionChanges>,
) -> Result<Json<Value>, Error> {
    let connection = state.db_connection.lock().unwrap();

    update_transaction(transaction_id, changes, &connection)?;

    Ok(Json(json!({ "message": "Updated transaction successfully" })))
}

#[cfg(test)]
mod update_endpoint_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        AppState, build_router, pagination::PaginationConfig, transaction::models::Transaction,
    };

    use super::super::test_utils::{TEST_SECRET, TestSession, create_user_and_log_in};

    fn get_test_server() -> TestServer {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(db_connection, TEST_SECRET, PaginationConfig::default())
            .expect("Could not create app state.");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    async fn create_expense(server: &TestServer, session: &TestSession) -> Transaction {
        server
            .post("/api/transactions/")
            .add_cookie(session.cookie.clone())
            .json(&json!({
                "type": "expense",
                "category": "food",
                "amount": 20.0,
                "description": "Pie",
            }))
            .await
            .json::<Transaction>()
    }

    #[tokio::test]
    async fn update_merges_supplied_fields() {
        let server = get_test_server();
        let session = create_user_and_log_in(&server, "alice").await;
        let inserted = create_expense(&server, &session).await;

        let response = server
            .put(&format!("/api/transactions/{}", inserted.id))
            .add_cookie(session.cookie.clone())
            .json(&json!({
                "amount": 25.0,
            }))
            .await;

        response.assert_status_ok();

        let updated = server
            .get(&format!("/api/transactions/{}", inserted.id))
            .add_cookie(session.cookie.clone())
            .await
            .json::<Transaction>();

        assert_eq!(updated.amount, 25.0);
        assert_eq!(updated.category, "food");
        assert_eq!(
            updated.description.as_deref(),
            Some("Pie"),
            "fields missing from the update body must keep their stored values"
        );
    }

    #[tokio::test]
    async fn update_missing_transaction_returns_404() {
        let server = get_test_server();
        let session = create_user_and_log_in(&server, "alice").await;

        server
            .put("/api/transactions/1337")
            .add_cookie(session.cookie.clone())
            .json(&json!({
                "amount": 25.0,
            }))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn update_is_not_owner_scoped() {
        let server = get_test_server();
        let alice = create_user_and_log_in(&server, "alice").await;
        let bob = create_user_and_log_in(&server, "bob").await;
        let alices_transaction = create_expense(&server, &alice).await;

        // Any authenticated user can update any record by ID.
        server
            .put(&format!("/api/transactions/{}", alices_transaction.id))
            .add_cookie(bob.cookie.clone())
            .json(&json!({
                "amount": 99.0,
            }))
            .await
            .assert_status_ok();

        let updated = server
            .get(&format!("/api/transactions/{}", alices_transaction.id))
            .add_cookie(alice.cookie.clone())
            .await
            .json::<Transaction>();

        assert_eq!(updated.amount, 99.0);
        assert_eq!(updated.user_id, alice.user_id, "ownership does not change");
    }
}
