//! The month-by-category aggregation over all transactions.

use std::collections::HashMap;

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    transaction::{
        db::{TransactionFilter, get_transactions_filtered},
        models::Transaction,
    },
};

/// One (month, category) group in the month-wise report.
#[derive(Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCategoryTotal {
    /// The calendar month number, 1 (January) through 12 (December).
    pub month: u8,
    /// The category shared by the transactions in this group.
    pub category: String,
    /// The sum of the amounts of the transactions in this group.
    pub total_amount: f64,
}

/// Group `transactions` by (calendar month, category) and sum the amount per
/// group.
///
/// Groups are ordered by ascending month number. The order of categories
/// within a month is left as the grouping produced it.
pub(crate) fn month_wise_report(transactions: &[Transaction]) -> Vec<MonthlyCategoryTotal> {
    let mut totals: HashMap<(u8, &str), f64> = HashMap::new();

    for transaction in transactions {
        let key = (
            u8::from(transaction.date.month()),
            transaction.category.as_str(),
        );
        *totals.entry(key).or_insert(0.0) += transaction.amount;
    }

    let mut report: Vec<MonthlyCategoryTotal> = totals
        .into_iter()
        .map(|((month, category), total_amount)| MonthlyCategoryTotal {
            month,
            category: category.to_owned(),
            total_amount,
        })
        .collect();

    report.sort_by_key(|group| group.month);

    report
}

/// A route handler for the month-wise report.
///
/// The report runs over every user's transactions.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn get_month_wise_report(
    State(state): State<AppState>,
) -> Result<Json<Vec<MonthlyCategoryTotal>>, Error> {
    let connection = state.db_connection.lock().unwrap();
    let transactions = get_transactions_filtered(TransactionFilter::default(), &connection)?;

    Ok(Json(month_wise_report(&transactions)))
}
