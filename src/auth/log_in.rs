//! The route handler for logging in a registered user.
//! The token and cookie modules handle the lower level session token logic.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use axum_extra::extract::CookieJar;
use jsonwebtoken::EncodingKey;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::{cookie::set_session_cookie, token::encode_token},
    user::get_user_by_name,
};

/// The state needed to log a user in.
#[derive(Clone)]
pub struct LoginState {
    /// The key for signing new session tokens.
    pub encoding_key: EncodingKey,
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for LoginState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            encoding_key: state.token_keys.encoding_key.clone(),
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The credentials entered by the user at log-in.
///
/// Stored as plain strings. There is no need for validation here since they
/// are only compared against the registered name and password hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    /// Name entered during log-in.
    pub name: String,
    /// Password entered during log-in.
    pub password: String,
}

/// The body returned on a successful log-in.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// A human readable confirmation.
    pub message: String,
    /// The issued session token. The same token is also set as a cookie.
    pub token: String,
}

/// Handler for log-in requests.
///
/// On success the session token is set in an http-only cookie and echoed in
/// the response body.
///
/// # Errors
///
/// An unknown name and a wrong password produce the same rejection so the
/// response does not reveal which names are registered.
///
/// # Panics
///
/// Panics if the lock for the database connection is already held by the same thread.
pub async fn post_log_in(
    State(state): State<LoginState>,
    jar: CookieJar,
    Json(credentials): Json<Credentials>,
) -> Result<(CookieJar, Json<LoginResponse>), Error> {
    let user = {
        let connection = state.db_connection.lock().unwrap();

        get_user_by_name(&credentials.name, &connection).map_err(|error| match error {
            Error::NotFound => Error::InvalidCredentials,
            error => error,
        })?
    };

    let password_is_correct =
        user.password_hash
            .verify(&credentials.password)
            .map_err(|error| {
                tracing::error!("Error verifying password: {error}");
                Error::HashingError(error.to_string())
            })?;

    if !password_is_correct {
        return Err(Error::InvalidCredentials);
    }

    let token = encode_token(user.id, &state.encoding_key)?;
    let jar = set_session_cookie(jar, token.clone());

    Ok((
        jar,
        Json(LoginResponse {
            message: "Login successful".to_owned(),
            token,
        }),
    ))
}
