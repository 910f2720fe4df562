//! Authentication middleware that validates the session token cookie and
//! attaches the caller's identity to the request.

use axum::{
    extract::{FromRef, Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::CookieJar;
use jsonwebtoken::DecodingKey;

use crate::{
    AppState,
    auth::{cookie::get_token_from_cookies, token::decode_token},
};

/// The state needed for the auth middleware.
#[derive(Clone)]
pub struct AuthState {
    /// The key used to verify session token signatures.
    pub decoding_key: DecodingKey,
}

impl FromRef<AppState> for AuthState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            decoding_key: state.token_keys.decoding_key.clone(),
        }
    }
}

/// Middleware function that checks for a valid session token cookie.
/// The user ID is placed into the request and then the request executed
/// normally if the token is valid, otherwise a 401 response is returned.
///
/// The gate only establishes who is asking; it knows nothing about the
/// resource being accessed.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn auth_guard(
    State(state): State<AuthState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let token = match get_token_from_cookies(&jar) {
        Ok(token) => token,
        Err(error) => return error.into_response(),
    };

    let user_id = match decode_token(&token, &state.decoding_key) {
        Ok(user_id) => user_id,
        Err(error) => return error.into_response(),
    };

    request.extensions_mut().insert(user_id);
    next.run(request).await
}
