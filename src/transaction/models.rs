//! The core types for income and expense records.

use rusqlite::{
    ToSql,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::user::UserID;

/// A unique identifier for a transaction record.
pub type TransactionId = i64;

/// Whether a transaction records money earned or money spent.
///
/// The kind does not constrain the sign of the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in, e.g. salary.
    Income,
    /// Money going out, e.g. groceries.
    Expense,
}

impl TransactionKind {
    /// The kind as it is stored in the database and serialized on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }
}

impl ToSql for TransactionKind {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

impl FromSql for TransactionKind {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(FromSqlError::Other(
                format!("unknown transaction type {other}").into(),
            )),
        }
    }
}

/// A single income or expense record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: TransactionId,
    /// Whether the transaction is an income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// A free-form label grouping related transactions, e.g. "food".
    pub category: String,
    /// The amount of money earned or spent.
    pub amount: f64,
    /// When the transaction happened.
    pub date: Date,
    /// An optional text description of what the transaction was for.
    pub description: Option<String>,
    /// The ID of the user that owns this transaction.
    pub user_id: UserID,
}

/// The fields a client supplies to create a transaction.
///
/// The owner is never part of this payload; it is always taken from the
/// authenticated request context.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionData {
    /// Whether the transaction is an income or an expense.
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    /// A free-form label grouping related transactions.
    pub category: String,
    /// The amount of money earned or spent.
    pub amount: f64,
    /// When the transaction happened. Defaults to today (UTC) if not given.
    pub date: Option<Date>,
    /// An optional text description.
    pub description: Option<String>,
}

/// A partial set of transaction fields to merge into an existing record.
///
/// Fields left out of the request body keep their stored values.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionChanges {
    /// A new kind for the transaction.
    #[serde(rename = "type")]
    pub kind: Option<TransactionKind>,
    /// A new category for the transaction.
    pub category: Option<String>,
    /// A new amount for the transaction.
    pub amount: Option<f64>,
    /// A new date for the transaction.
    pub date: Option<Date>,
    /// A new description for the transaction.
    pub description: Option<String>,
}
