//! Pocketbook is a JSON API for recording and reviewing personal income and
//! expenses.
//!
//! Users register with a display name and password, then log in to receive a
//! signed session token in an http-only cookie. Authenticated users can record
//! income and expense transactions and query them through paginated listings,
//! an income/expense summary, and a month-by-category report.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod auth;
mod db;
mod pagination;
mod routing;
mod state;
mod transaction;
mod user;

pub use auth::PasswordHash;
pub use db::initialize as initialize_db;
pub use pagination::PaginationConfig;
pub use routing::build_router;
pub use state::AppState;
pub use user::{User, UserID};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request did not include a session token.
    #[error("no session token in the request")]
    NoToken,

    /// The session token failed verification.
    ///
    /// Covers a bad signature, a malformed payload, and an expired token. The
    /// three cases are deliberately indistinguishable to the client.
    #[error("the session token is invalid")]
    InvalidToken,

    /// The user provided a name and password combination that does not match a
    /// registered user.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// The username used at registration is already taken.
    #[error("the username is already taken")]
    DuplicateUsername,

    /// An empty string was used as a username.
    #[error("username cannot be empty")]
    EmptyUsername,

    /// An empty string was used as a password.
    #[error("password cannot be empty")]
    EmptyPassword,

    /// An empty string was used as a transaction category.
    #[error("category cannot be empty")]
    EmptyCategory,

    /// A date string could not be parsed.
    ///
    /// Dates must be in the format `YYYY-MM-DD`, e.g. "2025-03-14".
    #[error("could not parse date \"{0}\", expected the format YYYY-MM-DD")]
    InvalidDateFormat(String),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// A session token could not be created.
    #[error("could not create a session token")]
    TokenCreation,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.ends_with("user.name") =>
            {
                Error::DuplicateUsername
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match self {
            Error::NoToken | Error::InvalidToken => StatusCode::UNAUTHORIZED,
            Error::InvalidCredentials
            | Error::DuplicateUsername
            | Error::EmptyUsername
            | Error::EmptyPassword
            | Error::EmptyCategory
            | Error::InvalidDateFormat(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::HashingError(_) | Error::TokenCreation | Error::SqlError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            // Internal details are logged on the server, never sent to the client.
            tracing::error!("An unexpected error occurred: {}", self);
            "Internal server error".to_owned()
        } else {
            self.to_string()
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}
