//! Database operations for transactions.

use rusqlite::{Connection, Row, params_from_iter, types::Value};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    transaction::models::{Transaction, TransactionChanges, TransactionData, TransactionId},
    user::UserID,
};

/// Initialize the transaction table and indexes.
pub(crate) fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute_batch(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
            id INTEGER PRIMARY KEY,
            type TEXT NOT NULL,
            category TEXT NOT NULL,
            amount REAL NOT NULL,
            date TEXT NOT NULL,
            description TEXT,
            user_id INTEGER NOT NULL,
            FOREIGN KEY(user_id) REFERENCES user(id) ON UPDATE CASCADE ON DELETE CASCADE
        );

        CREATE INDEX IF NOT EXISTS idx_transaction_user ON \"transaction\"(user_id);",
    )?;

    Ok(())
}

/// Create a transaction owned by `user_id` and return it with its generated ID.
///
/// The date defaults to today (UTC) when the client does not supply one.
///
/// # Errors
/// This function will return a:
/// - [Error::EmptyCategory] if the category is empty or only whitespace,
/// - [Error::SqlError] if there is some other SQL error.
pub fn create_transaction(
    data: TransactionData,
    user_id: UserID,
    connection: &Connection,
) -> Result<Transaction, Error> {
    if data.category.trim().is_empty() {
        return Err(Error::EmptyCategory);
    }

    let date = data
        .date
        .unwrap_or_else(|| OffsetDateTime::now_utc().date());

    connection.execute(
        "INSERT INTO \"transaction\" (type, category, amount, date, description, user_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        (
            data.kind,
            &data.category,
            data.amount,
            date,
            &data.description,
            user_id.as_i64(),
        ),
    )?;

    let id = connection.last_insert_rowid();

    Ok(Transaction {
        id,
        kind: data.kind,
        category: data.category,
        amount: data.amount,
        date,
        description: data.description,
        user_id,
    })
}

/// Retrieve a single transaction by ID.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - [Error::SqlError] if there is some other SQL error.
pub fn get_transaction(id: TransactionId, connection: &Connection) -> Result<Transaction, Error> {
    connection
        .prepare(
            "SELECT id, type, category, amount, date, description, user_id
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_row(&[(":id", &id)], map_row)
        .map_err(|error| error.into())
}

/// Retrieve one page of transactions in insertion order.
///
/// `owner` limits the page to a single user's records; `None` pages over every
/// user's records.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transaction_page(
    owner: Option<UserID>,
    offset: u64,
    limit: u64,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let (where_clause, parameters) = match owner {
        Some(user_id) => (" WHERE user_id = ?1", vec![Value::from(user_id.as_i64())]),
        None => ("", vec![]),
    };

    // Sort by ID to keep the page windows stable between requests.
    let query = format!(
        "SELECT id, type, category, amount, date, description, user_id
         FROM \"transaction\"{where_clause}
         ORDER BY id ASC LIMIT {limit} OFFSET {offset}"
    );

    connection
        .prepare(&query)?
        .query_map(params_from_iter(parameters.iter()), map_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
        .collect()
}

/// Count the transactions that [get_transaction_page] would page over.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn count_transactions(owner: Option<UserID>, connection: &Connection) -> Result<u64, Error> {
    match owner {
        Some(user_id) => connection.query_row(
            "SELECT COUNT(id) FROM \"transaction\" WHERE user_id = :user_id",
            &[(":user_id", &user_id.as_i64())],
            |row| row.get::<_, i64>(0).map(|count| count as u64),
        ),
        None => connection.query_row("SELECT COUNT(id) FROM \"transaction\"", [], |row| {
            row.get::<_, i64>(0).map(|count| count as u64)
        }),
    }
    .map_err(|error| error.into())
}

/// Defines which transactions feed an aggregation.
///
/// The default filter selects every transaction.
#[derive(Debug, Default)]
pub struct TransactionFilter {
    /// Include transactions dated on or after this date.
    pub start_date: Option<Date>,
    /// Include transactions dated on or before this date.
    pub end_date: Option<Date>,
    /// Include only transactions with this exact category.
    pub category: Option<String>,
}

/// Select the transactions matching `filter`, across all users.
///
/// # Errors
/// This function will return an [Error::SqlError] if there is an SQL error.
pub fn get_transactions_filtered(
    filter: TransactionFilter,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    let mut query_string_parts = vec![
        "SELECT id, type, category, amount, date, description, user_id FROM \"transaction\""
            .to_string(),
    ];
    let mut where_clause_parts = vec![];
    let mut query_parameters = vec![];

    if let Some(start_date) = filter.start_date {
        where_clause_parts.push(format!("date >= ?{}", query_parameters.len() + 1));
        query_parameters.push(Value::Text(start_date.to_string()));
    }

    if let Some(end_date) = filter.end_date {
        where_clause_parts.push(format!("date <= ?{}", query_parameters.len() + 1));
        query_parameters.push(Value::Text(end_date.to_string()));
    }

    if let Some(category) = filter.category {
        where_clause_parts.push(format!("category = ?{}", query_parameters.len() + 1));
        query_parameters.push(Value::Text(category));
    }

    if !where_clause_parts.is_empty() {
        query_string_parts.push(String::from("WHERE ") + &where_clause_parts.join(" AND "));
    }

    let query_string = query_string_parts.join(" ");

    connection
        .prepare(&query_string)?
        .query_map(params_from_iter(query_parameters.iter()), map_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
        .collect()
}

/// Merge the supplied fields into the transaction with `id` and return the
/// updated record.
///
/// The lookup is by ID alone, regardless of which user owns the record.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - [Error::EmptyCategory] if the new category is empty or only whitespace,
/// - [Error::SqlError] if there is some other SQL error.
pub fn update_transaction(
    id: TransactionId,
    changes: TransactionChanges,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let mut transaction = get_transaction(id, connection)?;

    if let Some(kind) = changes.kind {
        transaction.kind = kind;
    }

    if let Some(category) = changes.category {
        if category.trim().is_empty() {
            return Err(Error::EmptyCategory);
        }

        transaction.category = category;
    }

    if let Some(amount) = changes.amount {
        transaction.amount = amount;
    }

    if let Some(date) = changes.date {
        transaction.date = date;
    }

    if let Some(description) = changes.description {
        transaction.description = Some(description);
    }

    connection.execute(
        "UPDATE \"transaction\"
         SET type = ?1, category = ?2, amount = ?3, date = ?4, description = ?5
         WHERE id = ?6",
        (
            transaction.kind,
            &transaction.category,
            transaction.amount,
            transaction.date,
            &transaction.description,
            id,
        ),
    )?;

    Ok(transaction)
}

/// Delete the transaction with `id`.
///
/// The lookup is by ID alone, regardless of which user owns the record.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - [Error::SqlError] if there is some other SQL error.
pub fn delete_transaction(id: TransactionId, connection: &Connection) -> Result<(), Error> {
    let rows_affected = connection.execute("DELETE FROM \"transaction\" WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(Error::NotFound);
    }

    Ok(())
}

fn map_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        kind: row.get(1)?,
        category: row.get(2)?,
        amount: row.get(3)?,
        date: row.get(4)?,
        description: row.get(5)?,
        user_id: UserID::new(row.get(6)?),
    })
}
