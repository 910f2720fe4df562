//! The income/expense summary over a filtered set of transactions.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, Error,
    transaction::{
        db::{TransactionFilter, get_transactions_filtered},
        models::{Transaction, TransactionKind},
    },
};

/// The query parameters accepted by the summary endpoint.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryParams {
    /// Only count transactions dated on or after this date (`YYYY-MM-DD`).
    pub start_date: Option<String>,
    /// Only count transactions dated on or before this date (`YYYY-MM-DD`).
    pub end_date: Option<String>,
    /// Only count transactions with this exact category.
    pub category: Option<String>,
}

/// Income and expense totals over a set of transactions.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// The sum of the amounts of all income transactions.
    pub total_income: f64,
    /// The sum of the amounts of all expense transactions.
    pub total_expenses: f64,
    /// `total_income - total_expenses`.
    pub balance: f64,
}

/// Date format for the summary query parameters, e.g. "2025-03-14".
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

fn parse_date(raw_date: &str) -> Result<Date, Error> {
    Date::parse(raw_date, DATE_FORMAT)
        .map_err(|_| Error::InvalidDateFormat(raw_date.to_owned()))
}

/// Total the amounts of `transactions` by kind.
///
/// An empty set yields all zeroes.
pub(crate) fn summarize(transactions: &[Transaction]) -> Summary {
    let mut total_income = 0.0;
    let mut total_expenses = 0.0;

    for transaction in transactions {
        match transaction.kind {
            TransactionKind::Income => total_income += transaction.amount,
            TransactionKind::Expense => total_expenses += transaction.amount,
        }
    }

    Summary {
        total_income,
        total_expenses,
        balance: total_income - total_expenses,
    }
}

/// A route handler for the income/expense summary.
///
/// Totals run over every user's transactions, optionally restricted to an
/// inclusive date range and an exact category.
///
/// # Errors
///
/// Returns [Error::InvalidDateFormat] if a supplied date string does not parse.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_summary(
    State(state): State<AppState>,
    Query(params): Query<SummaryParams>,
) -> Result<Json<Summary>, Error> {
    let filter = TransactionFilter {
        start_date: params.start_date.as_deref().map(parse_date).transpose()?,
        end_date: params.end_date.as_deref().map(parse_date).transpose()?,
        category: params.category,
    };

    let connection = state.db_connection.lock().unwrap();
    let transactions = get_transactions_filtered(filter, &connection)?;

    Ok(Json(summarize(&transactions)))
}


#[cfg(test)]
mod summary_endpoint_tests {
    use axum::http::StatusCode;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{AppState, build_router, pagination::PaginationConfig};

    use super::super::test_utils::{TEST_SECRET, TestSession, create_user_and_log_in};
    use super::Summary;

    fn get_test_server() -> TestServer {
        let db_connection =
            Connection::open_in_memory().expect("Could not open database in memory.");
        let state = AppState::new(db_connection, TEST_SECRET, PaginationConfig::default())
            .expect("Could not create app state.");

        TestServer::try_new(build_router(state)).expect("Could not create test server.")
    }

    async fn create_transaction(
        server: &TestServer,
        session: &TestSession,
        kind: &str,
        category: &str,
        amount: f64,
        date: &str,
    ) {
        server
            .post("/api/transactions/")
            .add_cookie(session.cookie.clone())
            .json(&json!({
                "type": kind,
                "category": category,
                "amount": amount,
                "date": date,
            }))
            .await
            .assert_status_success();
    }

    #[tokio::test]
    async fn summary_balances_income_against_expenses() {
        let server = get_test_server();
        let session = create_user_and_log_in(&server, "alice").await;
        create_transaction(&server, &session, "income", "salary", 1500.0, "2025-03-01").await;
        create_transaction(&server, &session, "expense", "food", 20.0, "2025-03-14").await;
        create_transaction(&server, &session, "expense", "rent", 480.0, "2025-03-01").await;

        let response = server
            .get("/api/transactions/summary")
            .add_cookie(session.cookie.clone())
            .await;

        response.assert_status_ok();
        let summary = response.json::<Summary>();

        assert_eq!(summary.total_income, 1500.0);
        assert_eq!(summary.total_expenses, 500.0);
        assert_eq!(summary.balance, 1000.0);
    }

    #[tokio::test]
    async fn summary_of_no_transactions_is_zero() {
        let server = get_test_server();
        let session = create_user_and_log_in(&server, "alice").await;

        let response = server
            .get("/api/transactions/summary")
            .add_cookie(session.cookie.clone())
            .await;

        response.assert_status_ok();
        let summary = response.json::<Summary>();

        assert_eq!(summary.balance, 0.0);
    }

    #[tokio::test]
    async fn summary_respects_date_range_and_category() {
        let server = get_test_server();
        let session = create_user_and_log_in(&server, "alice").await;
        create_transaction(&server, &session, "expense", "food", 10.0, "2025-01-05").await;
        create_transaction(&server, &session, "expense", "food", 20.0, "2025-02-05").await;
        create_transaction(&server, &session, "expense", "rent", 40.0, "2025-02-06").await;
        create_transaction(&server, &session, "expense", "food", 80.0, "2025-03-05").await;

        let response = server
            .get("/api/transactions/summary")
            .add_query_param("startDate", "2025-02-01")
            .add_query_param("endDate", "2025-02-28")
            .add_query_param("category", "food")
            .add_cookie(session.cookie.clone())
            .await;

        response.assert_status_ok();
        let summary = response.json::<Summary>();

        assert_eq!(summary.total_expenses, 20.0);
        assert_eq!(summary.balance, -20.0);
    }

    #[tokio::test]
    async fn summary_spans_all_users() {
        let server = get_test_server();
        let alice = create_user_and_log_in(&server, "alice").await;
        let bob = create_user_and_log_in(&server, "bob").await;
        create_transaction(&server, &alice, "income", "salary", 100.0, "2025-03-01").await;
        create_transaction(&server, &bob, "expense", "food", 30.0, "2025-03-02").await;

        let response = server
            .get("/api/transactions/summary")
            .add_cookie(alice.cookie.clone())
            .await;

        response.assert_status_ok();
        let summary = response.json::<Summary>();

        assert_eq!(
            summary.balance, 70.0,
            "the summary runs over every user's transactions"
        );
    }

    #[tokio::test]
    async fn summary_rejects_malformed_date() {
        let server = get_test_server();
        let session = create_user_and_log_in(&server, "alice").await;

        server
            .get("/api/transactions/summary")
            .add_query_param("startDate", "next tuesday")
            .add_cookie(session.cookie.clone())
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }
}
