//! The route handler for registering a new user.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::{AppState, Error, PasswordHash, user::create_user};

/// The data a client submits to create an account.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterData {
    /// The display name to register. Must be unique.
    pub name: String,
    /// The password for the new account.
    pub password: String,
}

/// Handler for registration requests.
///
/// # Errors
///
/// This function will return an error if:
/// - the name or password is empty,
/// - the name is already registered,
/// - the password could not be hashed.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn register_user(
    State(state): State<AppState>,
    Json(new_user): Json<RegisterData>,
) -> Result<(StatusCode, Json<Value>), Error> {
    if new_user.name.trim().is_empty() {
        return Err(Error::EmptyUsername);
    }

    if new_user.password.is_empty() {
        return Err(Error::EmptyPassword);
    }

    let password_hash =
        PasswordHash::from_raw_password(&new_user.password, PasswordHash::DEFAULT_COST)?;

    let connection = state.db_connection.lock().unwrap();
    create_user(&new_user.name, password_hash, &connection)?;

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}
